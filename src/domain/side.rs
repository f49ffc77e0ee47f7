use serde::{Deserialize, Serialize};

use crate::domain::config::GameFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Who is currently serving.
///
/// Doubles cycles through all four states as serves are lost. Singles
/// only ever uses the two `*First` states: the serve passes straight to the
/// opponent after a lost rally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Server {
    TeamAFirst,
    TeamASecond,
    TeamBFirst,
    TeamBSecond,
}

impl Server {
    /// The opening server of `side`.
    pub fn first_of(side: Side) -> Server {
        match side {
            Side::A => Server::TeamAFirst,
            Side::B => Server::TeamBFirst,
        }
    }

    pub fn side(self) -> Side {
        match self {
            Server::TeamAFirst | Server::TeamASecond => Side::A,
            Server::TeamBFirst | Server::TeamBSecond => Side::B,
        }
    }

    /// Next server after the serving side loses a rally.
    pub fn after_lost_rally(self, format: GameFormat) -> Server {
        match (format, self) {
            (GameFormat::Singles, server) => Server::first_of(server.side().opponent()),
            (GameFormat::Doubles, Server::TeamAFirst) => Server::TeamASecond,
            (GameFormat::Doubles, Server::TeamASecond) => Server::TeamBFirst,
            (GameFormat::Doubles, Server::TeamBFirst) => Server::TeamBSecond,
            (GameFormat::Doubles, Server::TeamBSecond) => Server::TeamAFirst,
        }
    }
}
