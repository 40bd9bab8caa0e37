// ABOUTME: State transition methods for rollout orchestration.
// ABOUTME: Each method consumes self and returns the next state on success.

use std::marker::PhantomData;

use crate::cluster::{ClusterClient, ServiceStatus, ServiceUpdate};
use crate::output::Output;
use crate::types::SlotName;

use super::Rollout;
use super::error::RolloutError;
use super::plan::TimeoutPolicy;
use super::poller::ConvergencePoller;
use super::publisher::TaskDefinitionPublisher;
use super::state::{
    Completed, Initialized, NamesResolved, ScaledOver, SourceValidated, TargetReady, TaskPublished,
};

// =============================================================================
// Internal Helpers
// =============================================================================

impl<S> Rollout<S> {
    /// Internal helper to transition to a new state.
    fn transition<T>(self) -> Rollout<T> {
        Rollout {
            plan: self.plan,
            previous: self.previous,
            next: self.next,
            source_task: self.source_task,
            task: self.task,
            target_count: self.target_count,
            _state: PhantomData,
        }
    }

    fn poller(&self) -> ConvergencePoller {
        ConvergencePoller::new(self.plan.poll_interval, self.plan.convergence_timeout)
    }

    /// Wait for `name` to converge, applying the plan's timeout policy.
    /// Under `Abort` a deadline miss fails the rollout; under `Proceed` it is
    /// surfaced as a warning and the caller issues the next mutation anyway.
    async fn await_convergence<C: ClusterClient + ?Sized>(
        &self,
        client: &C,
        name: &SlotName,
        output: &Output,
    ) -> Result<(), RolloutError> {
        let converged = self.poller().wait(client, name).await?;
        if converged {
            return Ok(());
        }

        match self.plan.on_timeout {
            TimeoutPolicy::Abort => Err(RolloutError::ConvergenceTimeout {
                name: name.clone(),
                waited: self.plan.convergence_timeout,
            }),
            TimeoutPolicy::Proceed => {
                tracing::warn!(
                    slot = %name,
                    waited = ?self.plan.convergence_timeout,
                    "convergence deadline missed, proceeding per timeout policy"
                );
                output.warning(&format!(
                    "{name} did not converge within {:.0}s, proceeding",
                    self.plan.convergence_timeout.as_secs_f64()
                ));
                Ok(())
            }
        }
    }
}

// =============================================================================
// Initialized -> NamesResolved
// =============================================================================

impl Rollout<Initialized> {
    /// Resolve the (previous, next) slot pair via the plan's naming policy.
    ///
    /// Under the colour policy the previous name is corrected to the slot
    /// that actually resolved (a bare base name may resolve to `base-blue`).
    ///
    /// # Errors
    ///
    /// `SlotNotFound` when the previous slot is absent, `ColourResolution`
    /// when zero or more than one colour candidate is running.
    #[must_use = "rollout state must be used"]
    pub async fn resolve_names<C: ClusterClient + ?Sized>(
        mut self,
        client: &C,
    ) -> Result<Rollout<NamesResolved>, RolloutError> {
        let resolved = self.plan.naming().resolve(client).await?;
        tracing::info!(previous = %resolved.previous, next = %resolved.next, "slot pair resolved");

        self.previous = Some(resolved.previous);
        self.next = Some(resolved.next);
        Ok(self.transition())
    }
}

// =============================================================================
// NamesResolved -> SourceValidated
// =============================================================================

impl Rollout<NamesResolved> {
    /// Re-read the previous slot and require it to be actively serving.
    /// Fixes the target capacity: the explicit plan count, or the source's
    /// running count observed here.
    ///
    /// # Errors
    ///
    /// `SourceNotRunning` unless the slot is ACTIVE with `running_count > 0`.
    #[must_use = "rollout state must be used"]
    pub async fn validate_source<C: ClusterClient + ?Sized>(
        mut self,
        client: &C,
    ) -> Result<Rollout<SourceValidated>, RolloutError> {
        let name = self.previous.as_ref().expect("names are resolved");
        let source = client
            .describe_service(name)
            .await
            .map_err(|e| RolloutError::from_describe(e, name))?;

        if !source.is_serving() {
            return Err(RolloutError::SourceNotRunning { name: name.clone() });
        }

        let target = self.plan.desired_count.unwrap_or(source.running_count);
        tracing::info!(
            source = %source.service_name,
            running = source.running_count,
            target,
            "source slot validated"
        );

        self.source_task = Some(source.task_definition);
        self.target_count = Some(target);
        Ok(self.transition())
    }
}

// =============================================================================
// SourceValidated -> TaskPublished
// =============================================================================

impl Rollout<SourceValidated> {
    /// Republish the source slot's task definition as a new revision,
    /// applying the plan's image override if present.
    ///
    /// # Errors
    ///
    /// `AmbiguousContainer` when the definition does not hold exactly one
    /// container definition; nothing has been mutated at that point.
    #[must_use = "rollout state must be used"]
    pub async fn publish_task<C: ClusterClient + ?Sized>(
        mut self,
        client: &C,
    ) -> Result<Rollout<TaskPublished>, RolloutError> {
        let current = self.source_task.as_ref().expect("source is validated");
        let publisher = TaskDefinitionPublisher::new(self.plan.image_override.clone());
        let new_task = publisher.publish(client, current).await?;

        self.task = Some(new_task);
        Ok(self.transition())
    }
}

// =============================================================================
// TaskPublished -> TargetReady
// =============================================================================

impl Rollout<TaskPublished> {
    /// Make the next slot exist and carry the new task revision.
    ///
    /// Absent or decommissioned slots are created at desired count 1; an
    /// existing stopped slot is repointed at the new revision with desired
    /// count 0 so the scale loop grows it from scratch.
    ///
    /// # Errors
    ///
    /// `TargetConflict` when the next slot already has running tasks: a
    /// target already in service is not a valid rollout start.
    #[must_use = "rollout state must be used"]
    pub async fn ensure_target<C: ClusterClient + ?Sized>(
        self,
        client: &C,
    ) -> Result<Rollout<TargetReady>, RolloutError> {
        let next = self.next.as_ref().expect("names are resolved");
        let task = self.task.as_ref().expect("task is published");

        match client.describe_service(next).await {
            Err(e) if e.is_not_found() => {
                tracing::info!(slot = %next, "creating target slot");
                client.create_service(next, task, 1).await?;
            }
            Err(e) => return Err(e.into()),
            Ok(existing) if existing.running_count > 0 => {
                return Err(RolloutError::TargetConflict { name: next.clone() });
            }
            Ok(existing) if existing.status == ServiceStatus::Inactive => {
                tracing::info!(slot = %next, "recreating decommissioned target slot");
                client.create_service(next, task, 1).await?;
            }
            Ok(_) => {
                tracing::info!(slot = %next, "repointing stopped target slot at new revision");
                client
                    .update_service(
                        next,
                        ServiceUpdate::desired_count(0).with_task(task.clone()),
                    )
                    .await?;
            }
        }

        Ok(self.transition())
    }
}

// =============================================================================
// TargetReady -> ScaledOver
// =============================================================================

impl Rollout<TargetReady> {
    /// The convergence loop: move one unit of capacity per iteration from
    /// the previous slot to the next until the next holds the target count.
    ///
    /// Within an iteration the increment on the next slot is always issued
    /// and observed before the decrement on the previous slot, bounding the
    /// worst-case overshoot to one extra unit of running capacity and never
    /// undershooting.
    #[must_use = "rollout state must be used"]
    pub async fn scale_over<C: ClusterClient + ?Sized>(
        self,
        client: &C,
        output: &Output,
    ) -> Result<Rollout<ScaledOver>, RolloutError> {
        let prev_name = self.previous.clone().expect("names are resolved");
        let next_name = self.next.clone().expect("names are resolved");
        let task = self.task.clone().expect("task is published");
        let target = self.target_count.expect("target count is fixed");

        loop {
            let prev = client.describe_service(&prev_name).await?;
            let next = client.describe_service(&next_name).await?;

            if next.running_count >= target {
                tracing::info!(
                    slot = %next_name,
                    running = next.running_count,
                    target,
                    "target capacity reached"
                );
                return Ok(self.transition());
            }

            client
                .update_service(
                    &next_name,
                    ServiceUpdate::desired_count(next.running_count + 1).with_task(task.clone()),
                )
                .await?;
            self.await_convergence(client, &next_name, output).await?;

            // A source already at zero has nothing left to give back; this
            // happens when the requested count exceeds the original capacity.
            if prev.running_count > 0 {
                client
                    .update_service(
                        &prev_name,
                        ServiceUpdate::desired_count(prev.running_count - 1),
                    )
                    .await?;
                self.await_convergence(client, &prev_name, output).await?;
            }

            tracing::info!(
                step_interval = ?self.plan.step_interval,
                "cutover step complete, pausing before next step"
            );
            output.progress(&format!(
                "  → {} running {} of {}, pausing before next step...",
                next_name,
                next.running_count + 1,
                target
            ));
            tokio::time::sleep(self.plan.step_interval).await;
        }
    }
}

// =============================================================================
// ScaledOver -> Completed
// =============================================================================

impl Rollout<ScaledOver> {
    /// Drain the previous slot to zero and delete it.
    #[must_use = "rollout state must be used"]
    pub async fn decommission_source<C: ClusterClient + ?Sized>(
        self,
        client: &C,
        output: &Output,
    ) -> Result<Rollout<Completed>, RolloutError> {
        let prev_name = self.previous.clone().expect("names are resolved");

        let prev = client.describe_service(&prev_name).await?;
        if prev.running_count != 0 {
            tracing::info!(slot = %prev_name, running = prev.running_count, "draining source slot");
            client
                .update_service(&prev_name, ServiceUpdate::desired_count(0))
                .await?;
            self.await_convergence(client, &prev_name, output).await?;
        }

        tracing::info!(slot = %prev_name, "deleting source slot");
        client.delete_service(&prev_name).await?;

        Ok(self.transition())
    }
}
