// ABOUTME: Generic rollout struct parameterized by state marker.
// ABOUTME: Fields are filled in as transitions progress through the cutover.

use std::marker::PhantomData;

use super::plan::UpdatePlan;
use super::state::{Completed, Initialized, NamesResolved, ScaledOver, TargetReady, TaskPublished};
use crate::types::{SlotName, TaskDefinitionRef};

/// A rollout in progress, parameterized by its current state.
///
/// The state marker `S` restricts which transition is callable next, so the
/// cutover sequence (resolve, validate, publish, ensure target, scale, drain)
/// cannot be reordered or skipped at compile time. Any transition error
/// aborts the rollout; mutations that already landed stay in place.
#[derive(Debug)]
pub struct Rollout<S> {
    pub(crate) plan: UpdatePlan,
    pub(crate) previous: Option<SlotName>,
    pub(crate) next: Option<SlotName>,
    pub(crate) source_task: Option<TaskDefinitionRef>,
    pub(crate) task: Option<TaskDefinitionRef>,
    pub(crate) target_count: Option<u64>,
    pub(crate) _state: PhantomData<S>,
}

impl Rollout<Initialized> {
    pub fn new(plan: UpdatePlan) -> Self {
        Rollout {
            plan,
            previous: None,
            next: None,
            source_task: None,
            task: None,
            target_count: None,
            _state: PhantomData,
        }
    }
}

impl<S> Rollout<S> {
    pub fn plan(&self) -> &UpdatePlan {
        &self.plan
    }
}

// State-specific accessors; the expects hold by construction of the
// corresponding transitions.
impl Rollout<NamesResolved> {
    pub fn previous_slot(&self) -> &SlotName {
        self.previous.as_ref().expect("names are resolved")
    }

    pub fn next_slot(&self) -> &SlotName {
        self.next.as_ref().expect("names are resolved")
    }
}

impl Rollout<TaskPublished> {
    pub fn published_task(&self) -> &TaskDefinitionRef {
        self.task.as_ref().expect("task is published")
    }
}

impl Rollout<TargetReady> {
    pub fn target_count(&self) -> u64 {
        self.target_count.expect("target count is fixed")
    }
}

impl Rollout<ScaledOver> {
    pub fn next_slot(&self) -> &SlotName {
        self.next.as_ref().expect("names are resolved")
    }
}

impl Rollout<Completed> {
    /// The slot now serving traffic.
    pub fn active_slot(&self) -> &SlotName {
        self.next.as_ref().expect("names are resolved")
    }

    /// The task definition revision the active slot runs.
    pub fn active_task(&self) -> &TaskDefinitionRef {
        self.task.as_ref().expect("task is published")
    }
}
