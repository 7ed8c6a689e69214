//! graph-walker - Concurrent Graph Traversal Engine
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use graph_walker::config::{CliArgs, WalkConfig};
use graph_walker::graph::Graph;
use graph_walker::walker::WalkCoordinator;
use std::process::ExitCode;
use std::thread;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = WalkConfig::from_args(args).context("Invalid configuration")?;

    // Load the graph
    let graph = Graph::from_path(&config.input)
        .with_context(|| format!("Failed to load graph from '{}'", config.input.display()))?;

    let coordinator = WalkCoordinator::new(config.clone(), graph);

    // Ctrl-C cancels the walk; the partial sum is still reported
    let cancel = coordinator.cancel_token();
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, stopping walk...");
        cancel.cancel();
    })
    .context("Failed to set signal handler")?;

    // Optional deadline, expressed through the same cancellation token
    if let Some(timeout) = config.timeout {
        let cancel = coordinator.cancel_token();
        thread::spawn(move || {
            thread::sleep(timeout);
            cancel.cancel();
        });
    }

    // Run the walk
    let result = coordinator.run().context("Walk failed")?;

    // The sum is the program's output; everything else goes to stderr
    println!("{}", result.sum);

    if config.show_summary {
        eprintln!(
            "Processed {} nodes in {:.2?}{}",
            result.nodes_processed,
            result.duration,
            if result.completed { "" } else { " (interrupted)" }
        );
    }

    if !result.completed {
        info!("Walk was interrupted before completion");
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("graph_walker=debug,warn")
    } else {
        EnvFilter::new("graph_walker=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
