//! Turn phases of the board state machine.
//!
//! Every board sits in exactly one `Stage`. Each stage belongs to one of
//! four kinds (see `StageType`):
//!
//! - **Player / Opponent**: a side chooses a move from the enumerated list.
//! - **GameFlow**: hidden randomness or bookkeeping. Crossed only by applying
//!   `Move::GameFlow`, whose seed fixes the outcome.
//! - **GameEnd**: terminal, no moves.
//!
//! Raw ids (`u8`) are sparse: the tens digit encodes the side or the
//! terminal block.

use serde::{Deserialize, Serialize};

use super::moves::AttackTarget;
use super::side::Side;
use crate::error::GameError;

/// Kind of a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageType {
    Player,
    Opponent,
    GameFlow,
    GameEnd,
}

/// A turn phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Stage {
    PlayerTurnStart = 1,
    PlayerChooseBoardMove = 2,
    PlayerPutMinion = 3,
    PlayerAttack = 4,
    PlayerTurnEnd = 5,

    OpponentTurnStart = 11,
    OpponentChooseBoardMove = 12,
    OpponentPutMinion = 13,
    OpponentAttack = 14,
    OpponentTurnEnd = 15,

    PlayerWon = 21,
    OpponentWon = 22,
    Draw = 23,
}

impl Stage {
    /// Every stage, in id order.
    pub const ALL: [Stage; 13] = [
        Stage::PlayerTurnStart,
        Stage::PlayerChooseBoardMove,
        Stage::PlayerPutMinion,
        Stage::PlayerAttack,
        Stage::PlayerTurnEnd,
        Stage::OpponentTurnStart,
        Stage::OpponentChooseBoardMove,
        Stage::OpponentPutMinion,
        Stage::OpponentAttack,
        Stage::OpponentTurnEnd,
        Stage::PlayerWon,
        Stage::OpponentWon,
        Stage::Draw,
    ];

    #[must_use]
    pub const fn turn_start(side: Side) -> Self {
        match side {
            Side::Player => Stage::PlayerTurnStart,
            Side::Opponent => Stage::OpponentTurnStart,
        }
    }

    #[must_use]
    pub const fn choose_board_move(side: Side) -> Self {
        match side {
            Side::Player => Stage::PlayerChooseBoardMove,
            Side::Opponent => Stage::OpponentChooseBoardMove,
        }
    }

    #[must_use]
    pub const fn put_minion(side: Side) -> Self {
        match side {
            Side::Player => Stage::PlayerPutMinion,
            Side::Opponent => Stage::OpponentPutMinion,
        }
    }

    #[must_use]
    pub const fn attack(side: Side) -> Self {
        match side {
            Side::Player => Stage::PlayerAttack,
            Side::Opponent => Stage::OpponentAttack,
        }
    }

    #[must_use]
    pub const fn turn_end(side: Side) -> Self {
        match side {
            Side::Player => Stage::PlayerTurnEnd,
            Side::Opponent => Stage::OpponentTurnEnd,
        }
    }

    /// Terminal stage for a win by `side`.
    #[must_use]
    pub const fn won(side: Side) -> Self {
        match side {
            Side::Player => Stage::PlayerWon,
            Side::Opponent => Stage::OpponentWon,
        }
    }

    /// Raw stage id.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn kind(self) -> StageType {
        match self {
            Stage::PlayerChooseBoardMove => StageType::Player,
            Stage::OpponentChooseBoardMove => StageType::Opponent,
            Stage::PlayerTurnStart
            | Stage::PlayerPutMinion
            | Stage::PlayerAttack
            | Stage::PlayerTurnEnd
            | Stage::OpponentTurnStart
            | Stage::OpponentPutMinion
            | Stage::OpponentAttack
            | Stage::OpponentTurnEnd => StageType::GameFlow,
            Stage::PlayerWon | Stage::OpponentWon | Stage::Draw => StageType::GameEnd,
        }
    }

    /// The side this stage belongs to. `None` for game-end stages.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self.id() / 10 {
            0 => Some(Side::Player),
            1 => Some(Side::Opponent),
            _ => None,
        }
    }

    /// A side is choosing a move.
    #[must_use]
    pub const fn is_decision(self) -> bool {
        matches!(self.kind(), StageType::Player | StageType::Opponent)
    }

    #[must_use]
    pub const fn is_game_flow(self) -> bool {
        matches!(self.kind(), StageType::GameFlow)
    }

    #[must_use]
    pub const fn is_game_end(self) -> bool {
        matches!(self.kind(), StageType::GameEnd)
    }

    /// Stable human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Stage::PlayerTurnStart => "PlayerTurnStart",
            Stage::PlayerChooseBoardMove => "PlayerChooseBoardMove",
            Stage::PlayerPutMinion => "PlayerPutMinion",
            Stage::PlayerAttack => "PlayerAttack",
            Stage::PlayerTurnEnd => "PlayerTurnEnd",
            Stage::OpponentTurnStart => "OpponentTurnStart",
            Stage::OpponentChooseBoardMove => "OpponentChooseBoardMove",
            Stage::OpponentPutMinion => "OpponentPutMinion",
            Stage::OpponentAttack => "OpponentAttack",
            Stage::OpponentTurnEnd => "OpponentTurnEnd",
            Stage::PlayerWon => "PlayerWon",
            Stage::OpponentWon => "OpponentWon",
            Stage::Draw => "Draw",
        }
    }
}

impl TryFrom<u8> for Stage {
    type Error = GameError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.id() == id)
            .ok_or(GameError::UnhandledStage(id))
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload carried between consecutive stages of one logical turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageData {
    #[default]
    None,
    PutMinion { hand_index: u8, location: u8 },
    Attack { attacker: u8, defender: AttackTarget },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_partition_stages() {
        let decision = Stage::ALL.iter().filter(|s| s.is_decision()).count();
        let flow = Stage::ALL.iter().filter(|s| s.is_game_flow()).count();
        let end = Stage::ALL.iter().filter(|s| s.is_game_end()).count();

        assert_eq!(decision, 2);
        assert_eq!(flow, 8);
        assert_eq!(end, 3);
    }

    #[test]
    fn test_sides() {
        assert_eq!(Stage::PlayerAttack.side(), Some(Side::Player));
        assert_eq!(Stage::OpponentTurnEnd.side(), Some(Side::Opponent));
        assert_eq!(Stage::Draw.side(), None);
        assert_eq!(Stage::choose_board_move(Side::Opponent).kind(), StageType::Opponent);
    }

    #[test]
    fn test_try_from_round_trip() {
        for stage in Stage::ALL {
            assert_eq!(Stage::try_from(stage.id()), Ok(stage));
        }
    }

    #[test]
    fn test_try_from_unknown() {
        assert_eq!(Stage::try_from(0), Err(GameError::UnhandledStage(0)));
        assert_eq!(Stage::try_from(99), Err(GameError::UnhandledStage(99)));
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = Stage::ALL.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Stage::ALL.len());
        assert_eq!(Stage::PlayerPutMinion.to_string(), "PlayerPutMinion");
    }
}
