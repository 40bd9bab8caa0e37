// ABOUTME: Deadline-bound polling until a slot's pending count drops to zero.
// ABOUTME: The single bounded-retry primitive in the rollout; nothing else retries.

use crate::cluster::{ClusterClient, ClusterError};
use crate::types::SlotName;
use std::time::{Duration, Instant};

/// Blocks the current task until a slot converges or a deadline passes.
/// Convergence means `pending_count == 0`: the control plane has fully
/// applied the slot's last requested change.
#[derive(Debug, Clone, Copy)]
pub struct ConvergencePoller {
    interval: Duration,
    deadline: Duration,
}

impl ConvergencePoller {
    pub fn new(interval: Duration, deadline: Duration) -> Self {
        Self { interval, deadline }
    }

    /// Poll `name` at the configured cadence. Returns `Ok(true)` on
    /// convergence, `Ok(false)` when the deadline elapses first. The slot is
    /// always checked at least once, even with a zero deadline. Control
    /// plane errors propagate immediately.
    pub async fn wait<C: ClusterClient + ?Sized>(
        &self,
        client: &C,
        name: &SlotName,
    ) -> Result<bool, ClusterError> {
        let started = Instant::now();

        loop {
            let service = client.describe_service(name).await?;
            if service.pending_count == 0 {
                tracing::debug!(slot = %name, "slot converged");
                return Ok(true);
            }

            if started.elapsed() >= self.deadline {
                tracing::debug!(
                    slot = %name,
                    pending = service.pending_count,
                    "convergence deadline elapsed"
                );
                return Ok(false);
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}
