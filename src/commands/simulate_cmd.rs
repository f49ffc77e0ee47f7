use std::io;
use std::process::ExitCode;

use thiserror::Error;
use tracing::{debug, error};

use crate::commands::base_commands::{OutputFormat, SimulateArgs};
use crate::commands::report_format::format_simulation_report;
use crate::domain::config::{GameFormat, SimulationConfig};
use crate::domain::results::SimulationResults;
use crate::services::config_yaml::{ConfigYamlError, load_config_from_yaml_file, validate_config};
use crate::services::results_chart::{ResultsChartError, write_results_chart_png};
use crate::services::simulation::{SimulationError, run_simulation, run_simulation_seeded};

const DEFAULT_SINGLES_RATINGS: [f64; 1] = [4.5];
const DEFAULT_DOUBLES_RATINGS: [f64; 4] = [4.5, 4.0, 4.5, 4.0];

#[derive(Error, Debug)]
pub enum SimulateCommandError {
    #[error(transparent)]
    Config(#[from] ConfigYamlError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error("failed to serialize results as yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to serialize results as json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write results to {path}: {source}")]
    Write { path: String, source: io::Error },
    #[error(transparent)]
    Chart(#[from] ResultsChartError),
}

pub fn simulate_command(args: SimulateArgs) -> ExitCode {
    match run_simulate(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to simulate match strategies: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_simulate(args: &SimulateArgs) -> Result<(), SimulateCommandError> {
    let config = resolve_config(args)?;
    debug!(?config, "resolved simulation config");

    let results = match args.seed {
        Some(seed) => run_simulation_seeded(&config, seed)?,
        None => run_simulation(&config)?,
    };
    println!("{}", format_simulation_report(&config, &results));

    if let Some(output) = &args.output {
        let contents = serialize_results(&results, args.format)?;
        std::fs::write(output, contents).map_err(|source| SimulateCommandError::Write {
            path: output.clone(),
            source,
        })?;
        println!("Simulation results written to {output}");
    }

    if let Some(chart) = &args.chart {
        write_results_chart_png(chart, &results)?;
        println!("Results chart written to {chart}");
    }

    Ok(())
}

/// A config file wins over the individual match options.
fn resolve_config(args: &SimulateArgs) -> Result<SimulationConfig, ConfigYamlError> {
    if let Some(path) = &args.config {
        return load_config_from_yaml_file(path);
    }

    let players = if args.ratings.is_empty() {
        match args.game_format {
            GameFormat::Singles => DEFAULT_SINGLES_RATINGS.to_vec(),
            GameFormat::Doubles => DEFAULT_DOUBLES_RATINGS.to_vec(),
        }
    } else {
        args.ratings.clone()
    };

    let config = SimulationConfig {
        simulation_count: args.simulations,
        game_format: args.game_format,
        points_per_game: args.points,
        match_format: args.match_format,
        side_advantage: args.side_advantage,
        first_point_rule: args.first_point_rule,
        players,
    };
    validate_config(&config)?;
    Ok(config)
}

fn serialize_results(
    results: &SimulationResults,
    format: OutputFormat,
) -> Result<String, SimulateCommandError> {
    Ok(match format {
        OutputFormat::Yaml => serde_yaml::to_string(results)?,
        OutputFormat::Json => serde_json::to_string_pretty(results)?,
    })
}
