// ABOUTME: Rollout state marker types for the type state pattern.
// ABOUTME: Zero-sized types enforce valid state transitions at compile time.

/// Initial state: plan accepted, nothing resolved yet.
/// Available actions: `resolve_names()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Initialized;

/// Slot names resolved: the (previous, next) pair is known.
/// Available actions: `validate_source()`
#[derive(Debug, Clone, Copy, Default)]
pub struct NamesResolved;

/// Source validated: previous slot is active with running tasks, and the
/// target capacity is fixed.
/// Available actions: `publish_task()`
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceValidated;

/// Task published: a new task definition revision is registered.
/// Available actions: `ensure_target()`
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskPublished;

/// Target ready: the next slot exists and runs the new revision.
/// Available actions: `scale_over()`
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetReady;

/// Scaled over: the next slot holds the target capacity.
/// Available actions: `decommission_source()`
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaledOver;

/// Completed: the previous slot is drained and deleted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Completed;
