use rand::Rng;

use crate::domain::config::{GameFormat, TeamStrengths};
use crate::domain::side::{Server, Side};
use crate::services::point_model::point_win_probability;

/// Everything needed to play one game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSetup {
    pub strengths: TeamStrengths,
    pub points_to_win: u32,
    /// Percentage-point bias toward side A at the start of the game.
    pub side_advantage: i32,
    /// The opening server forfeits the first point and the serve.
    pub first_point_rule: bool,
    pub a_serves_first: bool,
    /// Switch ends once either score reaches half of `points_to_win`.
    pub flip_side_at_halfway: bool,
    pub format: GameFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub winner: Side,
    pub score_a: u32,
    pub score_b: u32,
}

impl GameOutcome {
    pub fn score_of(&self, side: Side) -> u32 {
        match side {
            Side::A => self.score_a,
            Side::B => self.score_b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GameState {
    score_a: u32,
    score_b: u32,
    server: Server,
    side_advantage: i32,
    ends_switched: bool,
}

impl GameState {
    fn opening(setup: &GameSetup) -> Self {
        let opening_side = if setup.a_serves_first { Side::A } else { Side::B };
        let mut state = Self {
            score_a: 0,
            score_b: 0,
            server: Server::first_of(opening_side),
            side_advantage: setup.side_advantage,
            ends_switched: false,
        };
        if setup.first_point_rule {
            let receiver = opening_side.opponent();
            state.award_point(receiver);
            state.server = Server::first_of(receiver);
        }
        state
    }

    fn award_point(&mut self, side: Side) {
        match side {
            Side::A => self.score_a += 1,
            Side::B => self.score_b += 1,
        }
    }

    /// Every rally scores for its winner. A serving side that wins keeps the
    /// serve; one that loses hands it on per `Server::after_lost_rally`.
    fn resolve_rally(&mut self, rally_winner: Side, format: GameFormat) {
        self.award_point(rally_winner);
        if rally_winner != self.server.side() {
            self.server = self.server.after_lost_rally(format);
        }
    }

    fn switch_ends_if_due(&mut self, halfway: u32) {
        if !self.ends_switched && (self.score_a >= halfway || self.score_b >= halfway) {
            self.side_advantage = -self.side_advantage;
            self.ends_switched = true;
        }
    }

    fn is_finished(&self, points_to_win: u32) -> bool {
        let leading = self.score_a.max(self.score_b);
        leading >= points_to_win && self.score_a.abs_diff(self.score_b) >= 2
    }

    fn into_outcome(self) -> GameOutcome {
        let winner = if self.score_a > self.score_b {
            Side::A
        } else {
            Side::B
        };
        GameOutcome {
            winner,
            score_a: self.score_a,
            score_b: self.score_b,
        }
    }
}

/// Plays one game to `points_to_win`, win by two, no cap.
pub fn play_game<R: Rng + ?Sized>(setup: &GameSetup, rng: &mut R) -> GameOutcome {
    let mut state = GameState::opening(setup);
    let halfway = setup.points_to_win.div_ceil(2);

    loop {
        if setup.flip_side_at_halfway {
            state.switch_ends_if_due(halfway);
        }
        if state.is_finished(setup.points_to_win) {
            break;
        }

        let a_serving = state.server.side() == Side::A;
        let p_a = point_win_probability(
            setup.strengths.a,
            setup.strengths.b,
            a_serving,
            state.side_advantage,
        );
        let rally_winner = if rng.gen_bool(p_a) { Side::A } else { Side::B };
        state.resolve_rally(rally_winner, setup.format);
    }

    state.into_outcome()
}
