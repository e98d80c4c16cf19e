#![deny(unsafe_code)]
//! CLI binary for the billiard engine.
//!
//! Subcommands:
//! - `run` — simulate one or more launches against world parameters
//! - `scenario <file>` — run a Scenario JSON file
//! - `list` — print available motion laws

mod error;

use billiard_core::{Launch, MotionLawKind, Scenario, Trajectory};
use billiard_sim::DriverConfig;
use clap::{Parser, Subcommand};
use error::CliError;
use glam::DVec2;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "billiard", about = "Event-driven elliptical billiard simulator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate one or more launches.
    Run {
        /// World parameters as a JSON object
        /// (keys: a, b, center_x, center_y, radius, gravity, law, max_events).
        #[arg(long, default_value = "{}")]
        params: String,

        /// Launch as "x,y,theta"; repeat for a batch.
        #[arg(long = "start", required = true)]
        starts: Vec<String>,

        /// Event budget per trajectory; overrides the `max_events` params key.
        #[arg(long)]
        max_events: Option<usize>,

        /// Optional cap on total simulated time per trajectory.
        #[arg(long)]
        max_time: Option<f64>,
    },
    /// Run a Scenario JSON file.
    Scenario {
        /// Path to the scenario file.
        file: PathBuf,
    },
    /// List available motion laws.
    List,
}

/// Parses a "x,y,theta" launch spec.
fn parse_start(spec: &str) -> Result<Launch, CliError> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(CliError::Input(format!(
            "expected --start as x,y,theta, got: {spec}"
        )));
    }
    let mut values = [0.0_f64; 3];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| CliError::Input(format!("invalid number '{part}' in --start {spec}")))?;
    }
    Ok(Launch::new(DVec2::new(values[0], values[1]), values[2]))
}

fn print_trajectories(trajectories: &[Trajectory], json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(trajectories)?);
    } else {
        for (i, t) in trajectories.iter().enumerate() {
            println!(
                "trajectory {i}: {} events, total time {:.6}, status {}",
                t.len(),
                t.total_time,
                serde_json::to_value(t.status)?
                    .as_str()
                    .unwrap_or("unknown")
            );
            for e in &t.events {
                let tangent = e
                    .tangent_speed
                    .map(|s| format!(", tangent speed {s:.6}"))
                    .unwrap_or_default();
                println!(
                    "  {:?} at t+{:.6}: pos ({:.6}, {:.6}), angle {:.6}{tangent}",
                    e.kind, e.elapsed, e.position.x, e.position.y, e.reflection_angle
                );
            }
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let laws = MotionLawKind::list_names();
            if cli.json {
                let info = serde_json::json!({ "motion_laws": laws });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Motion laws:");
                for name in laws {
                    println!("  {name}");
                }
            }
        }
        Command::Run {
            params,
            starts,
            max_events,
            max_time,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let mut scenario = Scenario::from_json(&params)?;
            if let Some(cap) = max_events {
                scenario.max_events = cap;
            }
            for spec in &starts {
                scenario.launches.push(parse_start(spec)?);
            }
            scenario.validate()?;

            let config = DriverConfig {
                max_events: scenario.max_events,
                max_time,
                ..DriverConfig::default()
            };
            let trajectories =
                billiard_sim::simulate_batch(&scenario.world, &scenario.launches, &config)?;
            print_trajectories(&trajectories, cli.json)?;
        }
        Command::Scenario { file } => {
            let text = std::fs::read_to_string(&file)?;
            let scenario: Scenario = serde_json::from_str(&text)
                .map_err(|e| CliError::Input(format!("invalid scenario file: {e}")))?;
            let trajectories = billiard_sim::simulate_scenario(&scenario)?;
            print_trajectories(&trajectories, cli.json)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
