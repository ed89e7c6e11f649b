//! Command-line runner for steering scenarios.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use strider::{init_logging, Scenario};

/// Walk a simulated agent through a goal scenario
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (JSON); runs the built-in demo when omitted
    #[arg(short, long)]
    scenario: Option<PathBuf>,
    /// Number of ticks to simulate, overriding the scenario
    #[arg(short, long)]
    ticks: Option<u32>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Write the final path and per-tick trace to this file as JSON
    #[arg(long, value_name = "FILE")]
    dump_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let scenario = match &args.scenario {
        Some(path) => Scenario::from_path(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => {
            info!("no scenario given; running the demo walk");
            Scenario::demo()
        }
    };
    let report = scenario.run(args.ticks).context("running scenario")?;

    for (tick, goal) in &report.arrivals {
        info!("tick {tick}: reached goal {}", goal.0);
    }
    info!(
        "final phase {}; {} tick(s) without a path; largest turn {:.1} degrees",
        report.final_phase, report.no_path_ticks, report.max_turn
    );

    if let Some(path) = &args.dump_path {
        let json = serde_json::to_string_pretty(&report).context("serialising report")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!("wrote {} path points to {}", report.path.len(), path.display());
    }
    Ok(())
}
