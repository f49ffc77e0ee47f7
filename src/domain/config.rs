use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GameFormat {
    Singles,
    Doubles,
}

impl GameFormat {
    /// Ratings accepted for this format.
    pub fn accepted_player_counts(self) -> &'static [usize] {
        match self {
            GameFormat::Singles => &[1, 2],
            GameFormat::Doubles => &[4],
        }
    }
}

impl fmt::Display for GameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameFormat::Singles => write!(f, "singles"),
            GameFormat::Doubles => write!(f, "doubles"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum MatchFormat {
    #[serde(rename = "best_of_1")]
    #[value(name = "best-of-1")]
    BestOf1,
    #[serde(rename = "best_of_3")]
    #[value(name = "best-of-3")]
    BestOf3,
}

impl MatchFormat {
    pub fn wins_needed(self) -> u32 {
        match self {
            MatchFormat::BestOf1 => 1,
            MatchFormat::BestOf3 => 2,
        }
    }

    pub fn max_games(self) -> u32 {
        2 * self.wins_needed() - 1
    }
}

/// Input to a simulation run. Ratings are ordered team A first:
/// `[a]` or `[a, b]` for singles, `[a1, a2, b1, b2]` for doubles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub simulation_count: usize,
    pub game_format: GameFormat,
    pub points_per_game: u32,
    pub match_format: MatchFormat,
    pub side_advantage: i32,
    pub first_point_rule: bool,
    pub players: Vec<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            simulation_count: 100_000,
            game_format: GameFormat::Doubles,
            points_per_game: 11,
            match_format: MatchFormat::BestOf3,
            side_advantage: 0,
            first_point_rule: false,
            players: vec![4.5, 4.0, 4.5, 4.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamStrengths {
    pub a: f64,
    pub b: f64,
}

impl TeamStrengths {
    /// Derives per-side strengths. A single singles rating plays against
    /// itself; doubles averages each pair. `None` for any other shape.
    pub fn from_players(format: GameFormat, players: &[f64]) -> Option<TeamStrengths> {
        match (format, players) {
            (GameFormat::Singles, [rating]) => Some(TeamStrengths {
                a: *rating,
                b: *rating,
            }),
            (GameFormat::Singles, [a, b]) => Some(TeamStrengths { a: *a, b: *b }),
            (GameFormat::Doubles, [a1, a2, b1, b2]) => Some(TeamStrengths {
                a: a1 / 2.0 + a2 / 2.0,
                b: b1 / 2.0 + b2 / 2.0,
            }),
            _ => None,
        }
    }
}
