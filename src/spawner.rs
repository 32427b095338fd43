//! Fresh lane populations for a new round.

use crate::board::Board;
use crate::entity::{Heading, Hazard, Platform};
use rand::Rng;

/// Cars per road row (inclusive).
const HAZARDS_PER_ROW: (usize, usize) = (2, 4);
/// Logs per river row (inclusive).
const PLATFORMS_PER_ROW: (usize, usize) = (2, 3);
/// Log length in cells (inclusive).
const PLATFORM_LENGTH: (i32, i32) = (2, 4);
/// Half-open speed ranges in cells per tick.
const HAZARD_SPEED: (f64, f64) = (0.5, 1.0);
const PLATFORM_SPEED: (f64, f64) = (0.3, 0.6);

/// Every moving entity on the board.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lanes {
    pub hazards: Vec<Hazard>,
    pub platforms: Vec<Platform>,
}

/// Build new cars and logs for every lane row. Called at start and on every reset.
pub fn spawn<R: Rng>(board: &Board, rng: &mut R) -> Lanes {
    let mut hazards = Vec::new();
    for y in board.hazard_band.rows() {
        let heading = Heading::for_row(y);
        let count = rng.random_range(HAZARDS_PER_ROW.0..=HAZARDS_PER_ROW.1);
        for _ in 0..count {
            let x = random_column(board, rng);
            hazards.push(Hazard {
                x,
                y,
                heading,
                speed: rng.random_range(HAZARD_SPEED.0..HAZARD_SPEED.1),
            });
        }
    }

    let mut platforms = Vec::new();
    for y in board.float_band.rows() {
        let heading = Heading::for_row(y);
        let count = rng.random_range(PLATFORMS_PER_ROW.0..=PLATFORMS_PER_ROW.1);
        for _ in 0..count {
            let x = random_column(board, rng);
            let length = rng.random_range(PLATFORM_LENGTH.0..=PLATFORM_LENGTH.1);
            platforms.push(Platform {
                x,
                y,
                length,
                heading,
                speed: rng.random_range(PLATFORM_SPEED.0..PLATFORM_SPEED.1),
            });
        }
    }

    debug_assert!(!hazards.is_empty() && !platforms.is_empty());
    log::debug!(
        "spawned {} hazards and {} platforms",
        hazards.len(),
        platforms.len()
    );
    Lanes { hazards, platforms }
}

/// Whole-numbered start column in `[0, width)`.
fn random_column<R: Rng>(board: &Board, rng: &mut R) -> f64 {
    rng.random_range(0..board.width) as f64
}
