//! Board geometry: fixed grid size plus the two tunable lane bands.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Columns on the board.
pub const BOARD_WIDTH: i32 = 11;
/// Rows on the board. Row 0 is the goal, row `BOARD_HEIGHT - 1` is the start.
pub const BOARD_HEIGHT: i32 = 15;

/// The row the actor must reach.
pub const GOAL_ROW: i32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("band {0} is empty (start row after end row)")]
    Empty(Band),
    #[error("band {band} must lie within rows {min}-{max}")]
    OutOfRange { band: Band, min: i32, max: i32 },
    #[error("hazard band {hazard} overlaps float band {float}")]
    Overlap { hazard: Band, float: Band },
    #[error("invalid band {0:?}: expected START-END, e.g. 3-7")]
    Parse(String),
}

/// Inclusive range of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub start: i32,
    pub end: i32,
}

impl Band {
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn contains(&self, y: i32) -> bool {
        y >= self.start && y <= self.end
    }

    pub fn rows(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }

    fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for Band {
    type Err = BoardError;

    /// Parse `START-END` (e.g. `3-7`). A single row `N` is also accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |v: &str| {
            v.trim()
                .parse::<i32>()
                .map_err(|_| BoardError::Parse(s.to_string()))
        };
        match s.split_once('-') {
            Some((a, b)) => Ok(Self::new(parse(a)?, parse(b)?)),
            None => {
                let row = parse(s)?;
                Ok(Self::new(row, row))
            }
        }
    }
}

/// Terrain under a cell, ignoring whatever is standing on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    Goal,
    Water,
    Road,
    Grass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    pub hazard_band: Band,
    pub float_band: Band,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            hazard_band: Band::new(3, 7),
            float_band: Band::new(9, 13),
        }
    }
}

impl Board {
    /// Fixed-size board with custom lane bands. Bands may not touch the goal or start rows
    /// and may not overlap each other.
    pub fn with_bands(hazard_band: Band, float_band: Band) -> Result<Self, BoardError> {
        let (min, max) = (GOAL_ROW + 1, BOARD_HEIGHT - 2);
        for band in [hazard_band, float_band] {
            if band.start > band.end {
                return Err(BoardError::Empty(band));
            }
            if band.start < min || band.end > max {
                return Err(BoardError::OutOfRange { band, min, max });
            }
        }
        if hazard_band.overlaps(&float_band) {
            return Err(BoardError::Overlap {
                hazard: hazard_band,
                float: float_band,
            });
        }
        Ok(Self {
            hazard_band,
            float_band,
            ..Self::default()
        })
    }

    /// Width as a float, for comparisons against continuous positions.
    #[inline]
    pub fn width_f(&self) -> f64 {
        self.width as f64
    }

    /// Bottom-centre cell where the actor starts.
    pub fn start_cell(&self) -> (i32, i32) {
        (self.width / 2, self.height - 1)
    }

    #[inline]
    pub fn in_float_band(&self, y: i32) -> bool {
        self.float_band.contains(y)
    }

    #[inline]
    pub fn in_hazard_band(&self, y: i32) -> bool {
        self.hazard_band.contains(y)
    }

    pub fn terrain(&self, y: i32) -> Terrain {
        if y == GOAL_ROW {
            Terrain::Goal
        } else if self.in_float_band(y) {
            Terrain::Water
        } else if self.in_hazard_band(y) {
            Terrain::Road
        } else {
            Terrain::Grass
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bands_are_valid() {
        let d = Board::default();
        assert_eq!(Board::with_bands(d.hazard_band, d.float_band), Ok(d));
        assert_eq!(d.start_cell(), (5, 14));
    }

    #[test]
    fn terrain_by_row() {
        let b = Board::default();
        assert_eq!(b.terrain(0), Terrain::Goal);
        assert_eq!(b.terrain(1), Terrain::Grass);
        assert_eq!(b.terrain(3), Terrain::Road);
        assert_eq!(b.terrain(7), Terrain::Road);
        assert_eq!(b.terrain(8), Terrain::Grass);
        assert_eq!(b.terrain(9), Terrain::Water);
        assert_eq!(b.terrain(13), Terrain::Water);
        assert_eq!(b.terrain(14), Terrain::Grass);
    }

    #[test]
    fn parse_band() {
        assert_eq!("3-7".parse::<Band>(), Ok(Band::new(3, 7)));
        assert_eq!(" 4 ".parse::<Band>(), Ok(Band::new(4, 4)));
        assert!(matches!("x-2".parse::<Band>(), Err(BoardError::Parse(_))));
    }

    #[test]
    fn rejects_overlap_and_out_of_range() {
        assert!(matches!(
            Board::with_bands(Band::new(3, 9), Band::new(9, 13)),
            Err(BoardError::Overlap { .. })
        ));
        assert!(matches!(
            Board::with_bands(Band::new(0, 2), Band::new(9, 13)),
            Err(BoardError::OutOfRange { .. })
        ));
        assert!(matches!(
            Board::with_bands(Band::new(3, 7), Band::new(9, 14)),
            Err(BoardError::OutOfRange { .. })
        ));
        assert!(matches!(
            Board::with_bands(Band::new(7, 3), Band::new(9, 13)),
            Err(BoardError::Empty(_))
        ));
    }
}
