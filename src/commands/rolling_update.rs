// ABOUTME: Rolling-update command implementation.
// ABOUTME: Validates arguments, builds the plan, and drives the rollout state machine.

use crate::cli::OnTimeout;
use slotctl::cluster::{ClusterClient, ControlPlaneConfig, HttpClusterClient};
use slotctl::error::{Error, Result};
use slotctl::output::Output;
use slotctl::rollout::{Rollout, TimeoutPolicy, UpdatePlan};
use slotctl::types::{ImageRef, SlotName};
use std::time::Duration;

pub struct RollingUpdateArgs {
    pub service: String,
    pub next_service: Option<String>,
    pub image: Option<String>,
    pub timeout: u64,
    pub step_interval: u64,
    pub count: Option<u64>,
    pub cluster: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub on_timeout: OnTimeout,
}

/// Run one rolling update. All argument validation happens before the
/// control plane client is even constructed.
pub async fn rolling_update(args: RollingUpdateArgs, output: &mut Output) -> Result<()> {
    let previous = SlotName::new(&args.service)?;
    let next = args
        .next_service
        .as_deref()
        .map(SlotName::new)
        .transpose()?;

    if let Some(next) = &next
        && *next == previous
    {
        return Err(Error::SameSlotNames(previous.to_string()));
    }

    let image = args.image.as_deref().map(ImageRef::parse).transpose()?;

    let mut plan = UpdatePlan::new(previous.clone());
    plan.next = next;
    plan.image_override = image;
    plan.desired_count = args.count;
    plan.convergence_timeout = Duration::from_secs(args.timeout);
    plan.step_interval = Duration::from_secs(args.step_interval);
    plan.on_timeout = match args.on_timeout {
        OnTimeout::Abort => TimeoutPolicy::Abort,
        OnTimeout::Proceed => TimeoutPolicy::Proceed,
    };

    let config = ControlPlaneConfig {
        region: args.region.clone(),
        cluster: args.cluster.clone(),
        endpoint: args.endpoint.clone(),
        token: args.token.clone(),
    };
    let client = HttpClusterClient::new(&config)?;

    output.start_timer();
    output.progress(&format!(
        "Rolling update for {} in cluster {} ({})",
        previous, args.cluster, args.region
    ));

    run_rollout(&client, plan, output).await?;

    output.success("Cutover complete!");
    Ok(())
}

/// Drive the rollout state machine from start to finish.
async fn run_rollout<C: ClusterClient>(
    client: &C,
    plan: UpdatePlan,
    output: &Output,
) -> Result<()> {
    let rollout = Rollout::new(plan);

    output.progress("  → Resolving slot names...");
    let rollout = rollout.resolve_names(client).await?;
    output.progress(&format!(
        "  → Previous: {}, next: {}",
        rollout.previous_slot(),
        rollout.next_slot()
    ));

    let rollout = rollout.validate_source(client).await?;

    output.progress("  → Publishing task definition revision...");
    let rollout = rollout.publish_task(client).await?;
    output.progress(&format!("  → New revision: {}", rollout.published_task()));

    output.progress("  → Ensuring target slot exists...");
    let rollout = rollout.ensure_target(client).await?;

    output.progress(&format!(
        "  → Shifting capacity to {} instance(s)...",
        rollout.target_count()
    ));
    let rollout = rollout.scale_over(client, output).await?;

    output.progress(&format!(
        "  → {} at target capacity, draining and deleting previous slot...",
        rollout.next_slot()
    ));
    let rollout = rollout.decommission_source(client, output).await?;

    output.progress(&format!(
        "  ✓ Active slot: {} running {}",
        rollout.active_slot(),
        rollout.active_task()
    ));
    Ok(())
}
