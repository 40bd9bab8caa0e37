// ABOUTME: Application-wide error types for slotctl.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::cluster::ClusterError;
use crate::rollout::RolloutError;
use crate::types::{ParseImageRefError, SlotNameError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("previous and next slot names are identical: {0}")]
    SameSlotNames(String),

    #[error("invalid slot name: {0}")]
    SlotName(#[from] SlotNameError),

    #[error("invalid image reference: {0}")]
    ImageRef(#[from] ParseImageRefError),

    #[error(transparent)]
    Cluster(#[from] ClusterError),

    #[error(transparent)]
    Rollout(#[from] RolloutError),
}

pub type Result<T> = std::result::Result<T, Error>;
