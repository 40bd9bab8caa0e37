// ABOUTME: Slot naming policies for resolving the (previous, next) pair.
// ABOUTME: Alternating-colour probing and explicit-pair with timestamp fallback.

use super::error::RolloutError;
use crate::cluster::{ClusterClient, Service, ServiceStatus};
use crate::types::{SlotColour, SlotName};
use chrono::Utc;

/// The resolved slot name pair a rollout operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSlots {
    pub previous: SlotName,
    pub next: SlotName,
}

/// How the previous and next slot names are determined. Selected explicitly
/// by the caller: supplying a next name means `ExplicitPair`, otherwise the
/// alternating-colour convention applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotNaming {
    /// Probe `base`, `base-blue`, and `base-green`; exactly one must be
    /// running. A running bare base or green slot targets `base-blue`, a
    /// running blue slot targets `base-green`.
    Colour { base: SlotName },

    /// Both names supplied directly. A next name that resolves to a
    /// decommissioned (INACTIVE) slot is replaced with a timestamp-suffixed
    /// name so the stale identity is not reused.
    ExplicitPair { previous: SlotName, next: SlotName },
}

impl SlotNaming {
    /// Resolve the slot pair against the live cluster.
    pub async fn resolve<C: ClusterClient + ?Sized>(
        &self,
        client: &C,
    ) -> Result<ResolvedSlots, RolloutError> {
        match self {
            SlotNaming::Colour { base } => resolve_colour(client, base).await,
            SlotNaming::ExplicitPair { previous, next } => {
                resolve_explicit(client, previous, next).await
            }
        }
    }
}

/// Describe a slot, treating a control plane 404 as "absent".
async fn probe<C: ClusterClient + ?Sized>(
    client: &C,
    name: &SlotName,
) -> Result<Option<Service>, RolloutError> {
    match client.describe_service(name).await {
        Ok(service) => Ok(Some(service)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn resolve_colour<C: ClusterClient + ?Sized>(
    client: &C,
    base: &SlotName,
) -> Result<ResolvedSlots, RolloutError> {
    // Candidate order doubles as target selection: which probe matched
    // decides the next colour, independent of what the base name itself
    // looks like. A base that happens to end in a colour suffix must not
    // skew resolution.
    let candidates = [
        (base.clone(), SlotColour::Blue),
        (base.coloured(SlotColour::Blue)?, SlotColour::Green),
        (base.coloured(SlotColour::Green)?, SlotColour::Blue),
    ];

    let mut present = 0usize;
    let mut running: Vec<(Service, SlotColour)> = Vec::new();
    for (name, target) in &candidates {
        if let Some(service) = probe(client, name).await? {
            present += 1;
            if service.running_count > 0 {
                running.push((service, *target));
            }
        }
    }

    if present == 0 {
        return Err(RolloutError::SlotNotFound { name: base.clone() });
    }

    if running.len() != 1 {
        return Err(RolloutError::ColourResolution {
            base: base.clone(),
            running: running.len(),
        });
    }

    let (active_service, target_colour) = running.remove(0);
    let active = active_service.service_name;
    let next = base.coloured(target_colour)?;

    tracing::debug!(active = %active, next = %next, "colour resolution complete");
    Ok(ResolvedSlots {
        previous: active,
        next,
    })
}

async fn resolve_explicit<C: ClusterClient + ?Sized>(
    client: &C,
    previous: &SlotName,
    next: &SlotName,
) -> Result<ResolvedSlots, RolloutError> {
    client
        .describe_service(previous)
        .await
        .map_err(|e| RolloutError::from_describe(e, previous))?;

    let next = match probe(client, next).await? {
        Some(existing) if existing.status == ServiceStatus::Inactive => {
            let substitute = previous.timestamped(Utc::now())?;
            tracing::info!(
                requested = %next,
                substitute = %substitute,
                "next slot is decommissioned, substituting timestamped name"
            );
            substitute
        }
        _ => next.clone(),
    };

    Ok(ResolvedSlots {
        previous: previous.clone(),
        next,
    })
}
