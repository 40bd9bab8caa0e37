// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines the rolling-update subcommand and its arguments.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "slotctl")]
#[command(about = "Zero-downtime rolling cutover between service slots on a container fleet")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Emit JSON lines instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace the running slot of a service without dropping traffic
    RollingUpdate {
        /// Service (previous slot) name, or the base name under colour naming
        service: String,

        /// Explicit next slot name; omit to derive via blue/green alternation
        next_service: Option<String>,

        /// Override the container image in the republished task definition
        #[arg(long)]
        image: Option<String>,

        /// Convergence timeout in seconds for each scale step
        #[arg(long, default_value_t = 60)]
        timeout: u64,

        /// Pause in seconds between scale steps
        #[arg(long, default_value_t = 30)]
        step_interval: u64,

        /// Final instance count; defaults to the previous slot's running count
        #[arg(long)]
        count: Option<u64>,

        /// Target cluster
        #[arg(long, default_value = "default")]
        cluster: String,

        /// Target region
        #[arg(long, env = "SLOTCTL_REGION")]
        region: String,

        /// Control plane endpoint override (defaults to the regional endpoint)
        #[arg(long)]
        endpoint: Option<String>,

        /// Bearer token for the control plane
        #[arg(long, env = "SLOTCTL_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Policy when a convergence wait hits its deadline
        #[arg(long, value_enum, default_value = "abort")]
        on_timeout: OnTimeout,
    },
}

/// CLI surface for the convergence timeout policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnTimeout {
    /// Fail the rollout when a slot misses its convergence deadline
    Abort,
    /// Log a warning and continue (the behaviour of older fleet tooling)
    Proceed,
}
