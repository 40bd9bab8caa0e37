// ABOUTME: Error types for rollout orchestration.
// ABOUTME: Each variant carries the slot or task context it failed on.

use crate::cluster::ClusterError;
use crate::types::{SlotName, SlotNameError};
use std::time::Duration;

/// Errors that abort a rollout. There is no automatic rollback: whatever
/// mutations already landed stay in place and the error is surfaced.
#[derive(Debug, thiserror::Error)]
pub enum RolloutError {
    /// The named slot does not exist in the cluster.
    #[error("service not found: {name}")]
    SlotNotFound { name: SlotName },

    /// The source slot exists but is not actively serving traffic.
    #[error("service not running: {name}")]
    SourceNotRunning { name: SlotName },

    /// The task definition has other than exactly one container definition.
    #[error("task family '{family}' has {count} container definitions, expected exactly one")]
    AmbiguousContainer { family: String, count: usize },

    /// Colour resolution found zero or more than one candidate slot running.
    #[error("unable to determine next colour for '{base}': {running} candidate slot(s) running")]
    ColourResolution { base: SlotName, running: usize },

    /// The target slot is already serving traffic.
    #[error("target slot already in service: {name}")]
    TargetConflict { name: SlotName },

    /// A slot failed to converge within the deadline under the abort policy.
    #[error("slot '{name}' did not converge within {waited:?}")]
    ConvergenceTimeout { name: SlotName, waited: Duration },

    /// A derived slot name (colour or timestamp suffix) failed validation.
    #[error("derived slot name invalid: {0}")]
    InvalidSlotName(#[from] SlotNameError),

    /// Unclassified control plane failure, propagated verbatim.
    #[error(transparent)]
    Cluster(#[from] ClusterError),
}

impl RolloutError {
    /// Translate a describe failure for `name` into rollout terms:
    /// a control plane 404 means the slot is absent.
    pub(crate) fn from_describe(err: ClusterError, name: &SlotName) -> Self {
        if err.is_not_found() {
            RolloutError::SlotNotFound { name: name.clone() }
        } else {
            RolloutError::Cluster(err)
        }
    }
}
