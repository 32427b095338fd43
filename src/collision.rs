//! End-of-tick judgement: drowned, struck, swept off the board, or home.

use crate::board::{Board, GOAL_ROW};
use crate::entity::{Actor, Hazard};

/// Outcome of judging one tick. Lethal verdicts are listed in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing happened; keep playing.
    Clear,
    /// In the river and not on a log.
    Drowned,
    /// A car shares the row and is less than one cell away.
    Struck,
    /// Carried (or otherwise moved) off the side of the board.
    OutOfBounds,
    /// Reached the goal row.
    Home,
}

impl Verdict {
    pub fn is_terminal(self) -> bool {
        self != Self::Clear
    }
}

fn is_struck(actor: &Actor, hazards: &[Hazard]) -> bool {
    hazards
        .iter()
        .any(|c| c.y == actor.y && (c.x - actor.x).abs() < 1.0)
}

/// Judge the actor against this tick's entity positions.
/// `riding` is the result of the rider phase; it only matters inside the float band.
/// The goal is only awarded when nothing lethal applies, so a tick never both kills and wins.
pub fn judge(actor: &Actor, hazards: &[Hazard], riding: bool, board: &Board) -> Verdict {
    if board.in_float_band(actor.y) && !riding {
        Verdict::Drowned
    } else if is_struck(actor, hazards) {
        Verdict::Struck
    } else if actor.x < 0.0 || actor.x >= board.width_f() {
        Verdict::OutOfBounds
    } else if actor.y == GOAL_ROW {
        Verdict::Home
    } else {
        Verdict::Clear
    }
}
