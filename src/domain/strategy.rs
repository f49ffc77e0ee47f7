use crate::domain::side::Side;

/// The two pre-match choices being compared for side A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    ServeFirst,
    ChooseSide,
}

impl Strategy {
    pub fn opening_server(self) -> Side {
        match self {
            Strategy::ServeFirst => Side::A,
            Strategy::ChooseSide => Side::B,
        }
    }

    pub fn a_serves_first(self) -> bool {
        self.opening_server() == Side::A
    }
}
