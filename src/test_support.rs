use crate::domain::config::{GameFormat, MatchFormat, SimulationConfig, TeamStrengths};
use crate::services::game::GameSetup;
use crate::services::match_play::MatchSetup;

pub fn even_strengths() -> TeamStrengths {
    TeamStrengths { a: 4.5, b: 4.5 }
}

// Side A serves, no handicaps, no switching ends.
pub fn game_setup(format: GameFormat, points_to_win: u32) -> GameSetup {
    GameSetup {
        strengths: even_strengths(),
        points_to_win,
        side_advantage: 0,
        first_point_rule: false,
        a_serves_first: true,
        flip_side_at_halfway: false,
        format,
    }
}

pub fn match_setup(format: GameFormat, wins_needed: u32) -> MatchSetup {
    MatchSetup {
        strengths: even_strengths(),
        points_to_win: 11,
        wins_needed,
        side_advantage: 0,
        first_point_rule: false,
        a_serves_first: true,
        format,
    }
}

pub fn singles_config(players: &[f64]) -> SimulationConfig {
    SimulationConfig {
        simulation_count: 1000,
        game_format: GameFormat::Singles,
        points_per_game: 11,
        match_format: MatchFormat::BestOf3,
        side_advantage: 0,
        first_point_rule: false,
        players: players.to_vec(),
    }
}

pub fn doubles_config(players: &[f64]) -> SimulationConfig {
    SimulationConfig {
        game_format: GameFormat::Doubles,
        ..singles_config(players)
    }
}
