// ABOUTME: Facade over the remote container-fleet control plane.
// ABOUTME: Defines the ClusterClient trait and the HTTP implementation.

mod error;
mod http;
mod types;

pub use error::{ClusterError, ClusterErrorKind};
pub use http::{ControlPlaneConfig, HttpClusterClient};
pub use types::{ContainerDefinition, Service, ServiceStatus, TaskDefinition, Volume};

use crate::types::{SlotName, TaskDefinitionRef};
use async_trait::async_trait;

/// Partial update applied to a service. Absent fields are left untouched
/// by the control plane.
#[derive(Debug, Clone, Default)]
pub struct ServiceUpdate {
    pub task_definition: Option<TaskDefinitionRef>,
    pub desired_count: Option<u64>,
}

impl ServiceUpdate {
    pub fn desired_count(count: u64) -> Self {
        Self {
            task_definition: None,
            desired_count: Some(count),
        }
    }

    pub fn with_task(mut self, task: TaskDefinitionRef) -> Self {
        self.task_definition = Some(task);
        self
    }
}

/// Thin facade over the control plane API. Each call is one synchronous
/// request/response exchange; eventual-consistency retries are the caller's
/// job (see `ConvergencePoller`), never this layer's.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Look up a service by name. `ClusterError::NotFound` when absent.
    async fn describe_service(&self, name: &SlotName) -> Result<Service, ClusterError>;

    /// Fetch a task definition revision by reference.
    async fn describe_task_definition(
        &self,
        task: &TaskDefinitionRef,
    ) -> Result<TaskDefinition, ClusterError>;

    /// Register a new task definition revision and return its reference.
    async fn register_task_definition(
        &self,
        definition: &TaskDefinition,
    ) -> Result<TaskDefinitionRef, ClusterError>;

    /// Create a service running `desired_count` copies of `task`.
    async fn create_service(
        &self,
        name: &SlotName,
        task: &TaskDefinitionRef,
        desired_count: u64,
    ) -> Result<(), ClusterError>;

    /// Apply a partial update to an existing service.
    async fn update_service(
        &self,
        name: &SlotName,
        update: ServiceUpdate,
    ) -> Result<(), ClusterError>;

    /// Delete a service.
    async fn delete_service(&self, name: &SlotName) -> Result<(), ClusterError>;
}
