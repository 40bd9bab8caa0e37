// ABOUTME: Republishes the active slot's task definition as a new revision.
// ABOUTME: Optionally swaps the container image; family and volumes pass through.

use super::error::RolloutError;
use crate::cluster::ClusterClient;
use crate::types::{ImageRef, TaskDefinitionRef};

/// Clones an existing task definition into a new revision. Registering a
/// fresh revision (rather than mutating in place) keeps the revision history
/// available for rollback outside this tool.
#[derive(Debug, Clone)]
pub struct TaskDefinitionPublisher {
    image_override: Option<ImageRef>,
}

impl TaskDefinitionPublisher {
    pub fn new(image_override: Option<ImageRef>) -> Self {
        Self { image_override }
    }

    /// Fetch `current`, apply the image override if any, and register the
    /// result. Fails before any mutation when the definition does not hold
    /// exactly one container definition.
    pub async fn publish<C: ClusterClient + ?Sized>(
        &self,
        client: &C,
        current: &TaskDefinitionRef,
    ) -> Result<TaskDefinitionRef, RolloutError> {
        let mut definition = client.describe_task_definition(current).await?;

        if definition.container_definitions.len() != 1 {
            return Err(RolloutError::AmbiguousContainer {
                family: definition.family,
                count: definition.container_definitions.len(),
            });
        }

        if let Some(image) = &self.image_override {
            definition.container_definitions[0].image = image.clone();
        }

        let new_ref = client.register_task_definition(&definition).await?;
        tracing::info!(
            family = %definition.family,
            revision = %new_ref,
            "registered task definition revision"
        );
        Ok(new_ref)
    }
}
