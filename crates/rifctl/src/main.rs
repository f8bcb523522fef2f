//! rifctl - router interface API toolkit

use anyhow::Context;
use clap::{Parser, Subcommand};
use sonic_rifctl::output::{render_attribute_table, render_interfaces, render_report, to_json};
use sonic_rifctl::{attribute_table, run_check, Topology};
use sonic_sai::sim::SimSwitchConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// SAI router interface API toolkit
#[derive(Parser, Debug)]
#[command(name = "rifctl")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level, overridden by RUST_LOG
    #[arg(short = 'l', long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the router interface attribute catalogue
    Attrs {
        #[arg(long)]
        json: bool,
    },
    /// Run the conformance suite against a virtual switch
    Check {
        /// Drive the exported C method table instead of the Rust API
        #[arg(long)]
        via_ffi: bool,
        #[arg(long)]
        json: bool,
    },
    /// Build a virtual switch from a topology file and print its interfaces
    Apply {
        topology: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> anyhow::Result<bool> {
    match command {
        Command::Attrs { json } => {
            let table = attribute_table();
            if json {
                print!("{}", to_json(&table)?);
            } else {
                print!("{}", render_attribute_table(&table));
            }
            Ok(true)
        }
        Command::Check { via_ffi, json } => {
            let report = run_check(SimSwitchConfig::default(), via_ffi)
                .context("failed to run conformance suite")?;
            if json {
                print!("{}", to_json(&report)?);
            } else {
                print!("{}", render_report(&report));
            }
            Ok(report.is_success())
        }
        Command::Apply { topology, json } => {
            let applied = Topology::load(&topology)
                .and_then(|t| t.apply())
                .with_context(|| format!("failed to apply {}", topology.display()))?;
            info!(
                "applied {}: {} router interfaces",
                topology.display(),
                applied.interfaces.len()
            );
            if json {
                print!("{}", to_json(&applied.interfaces)?);
            } else {
                print!("{}", render_interfaces(&applied.interfaces));
            }
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(args.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
