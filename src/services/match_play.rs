use rand::Rng;

use crate::domain::config::{GameFormat, TeamStrengths};
use crate::domain::side::Side;
use crate::services::game::{GameOutcome, GameSetup, play_game};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchSetup {
    pub strengths: TeamStrengths,
    pub points_to_win: u32,
    pub wins_needed: u32,
    pub side_advantage: i32,
    pub first_point_rule: bool,
    pub a_serves_first: bool,
    pub format: GameFormat,
}

impl MatchSetup {
    /// Number of the game that can only be reached at even game score.
    pub fn deciding_game(&self) -> u32 {
        2 * self.wins_needed - 1
    }

    /// Setup of the `game_number`th game (1-based). Even games swap the
    /// opening server and invert the side advantage.
    pub fn game_setup(&self, game_number: u32) -> GameSetup {
        let swapped = game_number % 2 == 0;
        GameSetup {
            strengths: self.strengths,
            points_to_win: self.points_to_win,
            side_advantage: if swapped {
                -self.side_advantage
            } else {
                self.side_advantage
            },
            first_point_rule: self.first_point_rule,
            a_serves_first: self.a_serves_first != swapped,
            flip_side_at_halfway: game_number == self.deciding_game(),
            format: self.format,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winner: Side,
    pub games_a: u32,
    pub games_b: u32,
    pub points_a: u32,
    pub points_b: u32,
}

impl MatchOutcome {
    pub fn games_played(&self) -> u32 {
        self.games_a + self.games_b
    }
}

/// Plays games until one side has `wins_needed` of them.
///
/// Ends and opening serve alternate between games. Only the deciding game
/// switches ends at its halfway point.
pub fn play_match<R: Rng + ?Sized>(setup: &MatchSetup, rng: &mut R) -> MatchOutcome {
    play_match_with(setup, |game| play_game(game, rng))
}

fn play_match_with<F>(setup: &MatchSetup, mut play_one: F) -> MatchOutcome
where
    F: FnMut(&GameSetup) -> GameOutcome,
{
    let mut outcome = MatchOutcome {
        winner: Side::A,
        games_a: 0,
        games_b: 0,
        points_a: 0,
        points_b: 0,
    };

    loop {
        let game = play_one(&setup.game_setup(outcome.games_played() + 1));

        outcome.points_a += game.score_a;
        outcome.points_b += game.score_b;
        match game.winner {
            Side::A => outcome.games_a += 1,
            Side::B => outcome.games_b += 1,
        }

        if outcome.games_a >= setup.wins_needed {
            outcome.winner = Side::A;
            return outcome;
        }
        if outcome.games_b >= setup.wins_needed {
            outcome.winner = Side::B;
            return outcome;
        }
    }
}
