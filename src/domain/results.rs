use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Serve First")]
    ServeFirst,
    #[serde(rename = "Choose Side")]
    ChooseSide,
}

impl Recommendation {
    /// Strictly higher serve-first rate wins; ties go to choosing a side.
    pub fn from_win_rates(serve_first_win_rate: f64, choose_side_win_rate: f64) -> Self {
        if serve_first_win_rate > choose_side_win_rate {
            Recommendation::ServeFirst
        } else {
            Recommendation::ChooseSide
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::ServeFirst => write!(f, "Serve First"),
            Recommendation::ChooseSide => write!(f, "Choose Side"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    pub simulation_count: usize,
    pub recommendation: Recommendation,
    pub serve_first_win_rate: f64,
    pub choose_side_win_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimal_server: Option<u8>,
}
