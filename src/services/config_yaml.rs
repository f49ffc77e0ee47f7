use std::io;
use std::ops::RangeInclusive;
use std::path::Path;

use thiserror::Error;

use crate::domain::config::{GameFormat, SimulationConfig};

pub const SIMULATION_COUNT_RANGE: RangeInclusive<usize> = 1..=1_000_000;
pub const SUPPORTED_POINTS_PER_GAME: [u32; 3] = [11, 15, 21];
pub const SIDE_ADVANTAGE_RANGE: RangeInclusive<i32> = -5..=5;
pub const RATING_RANGE: RangeInclusive<f64> = 2.0..=8.0;

#[derive(Error, Debug)]
pub enum ConfigYamlError {
    #[error("failed to read config yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("simulation count {0} is outside 1..=1000000")]
    SimulationCountOutOfRange(usize),
    #[error("unsupported points per game {0} (expected 11, 15 or 21)")]
    UnsupportedPointsPerGame(u32),
    #[error("side advantage {0} is outside -5..=5")]
    SideAdvantageOutOfRange(i32),
    #[error("player rating {0} is outside 2.0..=8.0")]
    RatingOutOfRange(f64),
    #[error("{format} expects {expected} player ratings, got {actual}")]
    PlayerCount {
        format: GameFormat,
        expected: String,
        actual: usize,
    },
}

pub fn load_config_from_yaml_file<P: AsRef<Path>>(
    path: P,
) -> Result<SimulationConfig, ConfigYamlError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_config_from_yaml_str(&contents)
}

/// Parses and validates a YAML simulation config.
pub fn deserialize_config_from_yaml_str(input: &str) -> Result<SimulationConfig, ConfigYamlError> {
    let config: SimulationConfig = serde_yaml::from_str(input)?;
    validate_config(&config)?;
    Ok(config)
}

/// Range checks that keep the engine inside the situations it models.
///
/// # Errors
/// - Simulation count outside `1..=1_000_000`.
/// - Points per game other than 11, 15 or 21.
/// - Side advantage outside `-5..=5`.
/// - Wrong number of ratings for the game format, or a rating outside `2.0..=8.0`.
pub fn validate_config(config: &SimulationConfig) -> Result<(), ConfigYamlError> {
    if !SIMULATION_COUNT_RANGE.contains(&config.simulation_count) {
        return Err(ConfigYamlError::SimulationCountOutOfRange(
            config.simulation_count,
        ));
    }
    if !SUPPORTED_POINTS_PER_GAME.contains(&config.points_per_game) {
        return Err(ConfigYamlError::UnsupportedPointsPerGame(
            config.points_per_game,
        ));
    }
    if !SIDE_ADVANTAGE_RANGE.contains(&config.side_advantage) {
        return Err(ConfigYamlError::SideAdvantageOutOfRange(
            config.side_advantage,
        ));
    }

    let accepted = config.game_format.accepted_player_counts();
    if !accepted.contains(&config.players.len()) {
        return Err(ConfigYamlError::PlayerCount {
            format: config.game_format,
            expected: describe_counts(accepted),
            actual: config.players.len(),
        });
    }
    if let Some(rating) = config
        .players
        .iter()
        .find(|rating| !RATING_RANGE.contains(*rating))
    {
        return Err(ConfigYamlError::RatingOutOfRange(*rating));
    }

    Ok(())
}

pub(crate) fn describe_counts(counts: &[usize]) -> String {
    counts
        .iter()
        .map(|count| count.to_string())
        .collect::<Vec<_>>()
        .join(" or ")
}
