//! Things on the board: the actor, cars (hazards) and logs (platforms).

/// Travel direction along a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    /// Even rows travel right, odd rows travel left.
    pub fn for_row(y: i32) -> Self {
        if y % 2 == 0 { Self::Right } else { Self::Left }
    }

    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }
}

/// A car: one cell wide, kills on contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hazard {
    pub x: f64,
    pub y: i32,
    pub heading: Heading,
    pub speed: f64,
}

impl Hazard {
    /// Signed displacement per tick.
    #[inline]
    pub fn velocity(&self) -> f64 {
        self.heading.sign() * self.speed
    }

    /// Column the car is drawn in.
    #[inline]
    pub fn cell(&self) -> i32 {
        self.x.floor() as i32
    }
}

/// A log: `length` cells wide, safe to stand on while it carries you.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub x: f64,
    pub y: i32,
    pub length: i32,
    pub heading: Heading,
    pub speed: f64,
}

impl Platform {
    #[inline]
    pub fn velocity(&self) -> f64 {
        self.heading.sign() * self.speed
    }

    /// True if column `col` is inside `[floor(x), floor(x) + length)`.
    #[inline]
    pub fn covers(&self, col: i32) -> bool {
        let start = self.x.floor() as i32;
        col >= start && col < start + self.length
    }
}

/// The player. `x` is continuous because logs drag it by fractional amounts;
/// it is only floored when drawn or when matched against a log's cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    pub x: f64,
    pub y: i32,
}

impl Actor {
    pub fn at(x: i32, y: i32) -> Self {
        Self { x: x as f64, y }
    }

    #[inline]
    pub fn cell(&self) -> i32 {
        self.x.floor() as i32
    }
}
