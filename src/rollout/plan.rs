// ABOUTME: Caller-supplied intent for one rollout.
// ABOUTME: Slot names, optional overrides, and pacing parameters.

use super::naming::SlotNaming;
use crate::types::{ImageRef, SlotName};
use std::time::Duration;

/// Default deadline for one convergence wait.
pub const DEFAULT_CONVERGENCE_TIMEOUT: Duration = Duration::from_secs(60);

/// Default pause between scale steps, giving downstream health checks and
/// load-balancer registration time to catch up.
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_secs(30);

/// Default cadence at which the poller re-reads a slot.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// What to do when a convergence wait hits its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeoutPolicy {
    /// Abort the rollout with `RolloutError::ConvergenceTimeout`.
    #[default]
    Abort,
    /// Log a warning and issue the next mutation anyway.
    Proceed,
}

/// Intent for one rolling update. At most one rollout may execute against a
/// given slot pair at a time; nothing here enforces that, so serialization
/// is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct UpdatePlan {
    /// The slot being replaced (or the base name under colour naming).
    pub previous: SlotName,
    /// Explicit target slot; absent means derive via the colour policy.
    pub next: Option<SlotName>,
    /// Replace the container image when republishing the task definition.
    pub image_override: Option<ImageRef>,
    /// Final capacity; absent means inherit the source's running count.
    pub desired_count: Option<u64>,
    pub convergence_timeout: Duration,
    pub step_interval: Duration,
    pub poll_interval: Duration,
    pub on_timeout: TimeoutPolicy,
}

impl UpdatePlan {
    pub fn new(previous: SlotName) -> Self {
        Self {
            previous,
            next: None,
            image_override: None,
            desired_count: None,
            convergence_timeout: DEFAULT_CONVERGENCE_TIMEOUT,
            step_interval: DEFAULT_STEP_INTERVAL,
            poll_interval: DEFAULT_POLL_INTERVAL,
            on_timeout: TimeoutPolicy::default(),
        }
    }

    pub fn next_slot(mut self, next: SlotName) -> Self {
        self.next = Some(next);
        self
    }

    pub fn image_override(mut self, image: ImageRef) -> Self {
        self.image_override = Some(image);
        self
    }

    pub fn desired_count(mut self, count: u64) -> Self {
        self.desired_count = Some(count);
        self
    }

    pub fn on_timeout(mut self, policy: TimeoutPolicy) -> Self {
        self.on_timeout = policy;
        self
    }

    /// The naming policy this plan implies: an explicit next name selects the
    /// explicit-pair policy, otherwise the alternating-colour policy applies.
    pub fn naming(&self) -> SlotNaming {
        match &self.next {
            Some(next) => SlotNaming::ExplicitPair {
                previous: self.previous.clone(),
                next: next.clone(),
            },
            None => SlotNaming::Colour {
                base: self.previous.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> SlotName {
        SlotName::new(s).unwrap()
    }

    #[test]
    fn defaults_match_documented_values() {
        let plan = UpdatePlan::new(name("api"));
        assert_eq!(plan.convergence_timeout, Duration::from_secs(60));
        assert_eq!(plan.step_interval, Duration::from_secs(30));
        assert_eq!(plan.on_timeout, TimeoutPolicy::Abort);
        assert!(plan.next.is_none());
        assert!(plan.desired_count.is_none());
    }

    #[test]
    fn absent_next_selects_colour_policy() {
        let plan = UpdatePlan::new(name("api"));
        assert!(matches!(plan.naming(), SlotNaming::Colour { .. }));
    }

    #[test]
    fn explicit_next_selects_pair_policy() {
        let plan = UpdatePlan::new(name("api-v1")).next_slot(name("api-v2"));
        match plan.naming() {
            SlotNaming::ExplicitPair { previous, next } => {
                assert_eq!(previous.as_str(), "api-v1");
                assert_eq!(next.as_str(), "api-v2");
            }
            other => panic!("expected explicit pair, got {other:?}"),
        }
    }
}
