// ABOUTME: Rolling-update orchestration using the type state pattern.
// ABOUTME: Exports the Rollout state machine, naming policy, publisher, and poller.

mod error;
mod naming;
mod plan;
mod poller;
mod publisher;
mod rollout;
mod state;
mod transitions;

pub use error::RolloutError;
pub use naming::{ResolvedSlots, SlotNaming};
pub use plan::{
    DEFAULT_CONVERGENCE_TIMEOUT, DEFAULT_POLL_INTERVAL, DEFAULT_STEP_INTERVAL, TimeoutPolicy,
    UpdatePlan,
};
pub use poller::ConvergencePoller;
pub use publisher::TaskDefinitionPublisher;
pub use rollout::Rollout;
pub use state::{
    Completed, Initialized, NamesResolved, ScaledOver, SourceValidated, TargetReady, TaskPublished,
};
