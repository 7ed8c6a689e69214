//! Configuration types for graph-walker
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Maximum reasonable worker count
const MAX_WORKERS: usize = 512;

/// Concurrent graph walker
#[derive(Parser, Debug, Clone)]
#[command(
    name = "graph-walker",
    version,
    about = "Sums the values of all graph nodes reachable from node 0",
    long_about = "Walks a graph concurrently from node 0 using a fixed-size worker pool,\n\
                  visiting every reachable node exactly once, and prints the sum of their\n\
                  values to standard output. Logs and the run summary go to stderr.",
    after_help = "EXAMPLES:\n    \
        graph-walker graph.in\n    \
        graph-walker graph.in -w 8\n    \
        graph-walker graph.in --timeout-secs 30 -q"
)]
pub struct CliArgs {
    /// Input file describing the graph
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Number of worker threads
    #[arg(
        short = 'w',
        long,
        default_value_t = default_workers(),
        value_name = "NUM"
    )]
    pub workers: usize,

    /// Cancel the walk after this many seconds (the partial sum is printed)
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Quiet mode - suppress the summary on stderr
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (debug-level logs)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

fn default_workers() -> usize {
    num_cpus::get()
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Input graph file
    pub input: PathBuf,

    /// Number of worker threads
    pub worker_count: usize,

    /// Optional deadline for the whole walk
    pub timeout: Option<Duration>,

    /// Print a human summary to stderr after the walk
    pub show_summary: bool,

    /// Verbose logging
    pub verbose: bool,
}

impl WalkConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        if args.workers == 0 || args.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: args.workers,
                max: MAX_WORKERS,
            });
        }

        if args.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidTimeout { secs: 0 });
        }

        Ok(Self {
            input: args.input,
            worker_count: args.workers,
            timeout: args.timeout_secs.map(Duration::from_secs),
            show_summary: !args.quiet,
            verbose: args.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(workers: usize, timeout_secs: Option<u64>) -> CliArgs {
        CliArgs {
            input: PathBuf::from("graph.in"),
            workers,
            timeout_secs,
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = WalkConfig::from_args(args(4, Some(30))).unwrap();
        assert_eq!(config.worker_count, 4);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert!(config.show_summary);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = WalkConfig::from_args(args(0, None)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidWorkerCount { count: 0, .. }
        ));
    }

    #[test]
    fn test_excessive_workers_rejected() {
        let err = WalkConfig::from_args(args(100_000, None)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWorkerCount { .. }));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = WalkConfig::from_args(args(4, Some(0))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { secs: 0 }));
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
