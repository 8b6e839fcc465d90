//! Per-stage handlers.
//!
//! Each handler is parameterized by the side it acts for, so one module
//! serves both the player and the opponent stage of the same phase.
//! Only `choose_board_move` is a decision stage; the rest are game flow.

pub(crate) mod attack;
pub(crate) mod choose_board_move;
pub(crate) mod put_minion;
pub(crate) mod turn_end;
pub(crate) mod turn_start;
