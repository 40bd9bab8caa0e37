// ABOUTME: Command module aggregator for the slotctl CLI.
// ABOUTME: Re-exports the rolling-update command handler.

mod rolling_update;

pub use rolling_update::{RollingUpdateArgs, rolling_update};
