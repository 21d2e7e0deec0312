//! crossing — run the gridwalk simulator from the command line.
//!
//! With no arguments, three agents cross a 30×30 field corner to corner and
//! the field is redrawn in the terminal after every move.
//!
//! ```text
//! crossing                                  # built-in crossing scenario
//! crossing --config crossing.toml -v        # TOML config, debug logging
//! crossing --roster roster.csv --trace out  # CSV roster, write agent_trace.csv
//! crossing --scatter 8 --seed 3 --lockstep 2000 --no-console
//! ```

mod setup;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gw_output::{ConsoleRenderer, CsvTraceWriter, FanOut, TraceRenderer};
use gw_sim::{SimBuilder, SimReport};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "crossing", version, about = "Multi-agent grid crossing simulator")]
pub struct Cli {
    /// TOML config file.  Defaults to the built-in crossing scenario.
    #[arg(long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Replace the roster with agents from a CSV file
    /// (`agent_id,start_x,start_y,target_x,target_y,speed`).
    #[arg(long, value_name = "CSV", conflicts_with = "scatter")]
    pub roster: Option<PathBuf>,

    /// Replace the roster with N agents at random distinct cells.
    #[arg(long, value_name = "N")]
    pub scatter: Option<usize>,

    /// Override the config's RNG seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write `agent_trace.csv` into this directory.
    #[arg(long, value_name = "DIR")]
    pub trace: Option<PathBuf>,

    /// Do not draw the field.
    #[arg(long)]
    pub no_console: bool,

    /// Pause after drawing each frame.
    #[arg(long, value_name = "MS", default_value_t = 0)]
    pub frame_delay_ms: u64,

    /// Run deterministically on one thread for at most this many rounds.
    #[arg(long, value_name = "MAX_ROUNDS")]
    pub lockstep: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = setup::build_config(&cli)?;
    let field_size = config.field_size;

    // 1. Renderers.
    let mut fan = FanOut::new();
    let console = (!cli.no_console).then(|| {
        Arc::new(
            ConsoleRenderer::stdout(field_size)
                .frame_delay(Duration::from_millis(cli.frame_delay_ms)),
        )
    });
    if let Some(console) = &console {
        fan = fan.with(console.clone());
    }
    let trace = match &cli.trace {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let trace = Arc::new(TraceRenderer::new(CsvTraceWriter::new(dir)?));
            fan = fan.with(trace.clone());
            Some(trace)
        }
        None => None,
    };

    // 2. Build and run.
    let sim = SimBuilder::greedy(config).renderer(Arc::new(fan)).build()?;
    let report = match cli.lockstep {
        Some(max_rounds) => sim.run_lockstep(max_rounds)?,
        None => sim.run()?,
    };

    if let Some(e) = console.and_then(|c| c.take_error()) {
        warn!(error = %e, "console output failed");
    }
    if let Some(e) = trace.and_then(|t| t.take_error()) {
        warn!(error = %e, "trace output failed");
    }

    // 3. Summary.
    print_summary(&report);
    Ok(())
}

fn print_summary(report: &SimReport) {
    println!();
    println!("Simulation complete in {:.3} s", report.elapsed.as_secs_f64());
    println!(
        "  moves: {}  |  steps: {}  |  gate acquisitions: {}",
        report.total_moves(),
        report.total_steps(),
        report.gate_acquisitions
    );
    println!();

    println!(
        "{:<7} {:<10} {:>6} {:>8} {:>7} {:>10} {:<8}",
        "Agent", "Final", "Moves", "Detours", "Yields", "Gridlocks", "Arrived"
    );
    println!("{}", "-".repeat(63));
    for agent in &report.agents {
        println!(
            "{:<7} {:<10} {:>6} {:>8} {:>7} {:>10} {:<8}",
            agent.id.0,
            agent.final_position.to_string(),
            agent.moves,
            agent.detours,
            agent.yields,
            agent.gridlocks,
            if agent.arrived { "yes" } else { "no" },
        );
    }
}
