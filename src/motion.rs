//! Per-tick lane motion with wrap-around at the board edges.

use crate::board::Board;
use crate::entity::{Hazard, Platform};

/// Re-enter from the opposite edge once an entity of `span` cells has fully left the board.
/// Thresholds are strict: sitting exactly on `width` or `-span` does not wrap.
#[inline]
fn wrap(x: f64, span: f64, width: f64) -> f64 {
    if x > width {
        -span
    } else if x < -span {
        width
    } else {
        x
    }
}

impl Hazard {
    /// Position after one tick.
    pub fn stepped(&self, board: &Board) -> Self {
        Self {
            x: wrap(self.x + self.velocity(), 1.0, board.width_f()),
            ..*self
        }
    }
}

impl Platform {
    /// Position after one tick. Wraps on the full length so the log slides back in.
    pub fn stepped(&self, board: &Board) -> Self {
        Self {
            x: wrap(
                self.x + self.velocity(),
                self.length as f64,
                board.width_f(),
            ),
            ..*self
        }
    }
}

pub fn step_hazards(hazards: &mut [Hazard], board: &Board) {
    for h in hazards.iter_mut() {
        *h = h.stepped(board);
    }
}

pub fn step_platforms(platforms: &mut [Platform], board: &Board) {
    for p in platforms.iter_mut() {
        *p = p.stepped(board);
    }
}
