//! Game state: board, actor, lanes, score, and the per-tick phase sequence.

use crate::board::{Board, Terrain};
use crate::collision::{self, Verdict};
use crate::entity::Actor;
use crate::motion;
use crate::rider;
use crate::spawner::{self, Lanes};
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Points for reaching the goal row.
pub const GOAL_POINTS: u32 = 100;

/// One of the five things a player can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Up,
    Down,
    Left,
    Right,
    Reset,
}

impl Intent {
    /// Map a keyboard key name (`ArrowUp`, `r`, ...). Unknown names are ignored.
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Self::Up),
            "ArrowDown" => Some(Self::Down),
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            "r" | "R" => Some(Self::Reset),
            _ => None,
        }
    }

    /// Map an on-screen button name. The down button doubles as reset once the round is over.
    pub fn from_button(name: &str, round_over: bool) -> Option<Self> {
        match name {
            "up" => Some(Self::Up),
            "down" if round_over => Some(Self::Reset),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

/// What a cell shows, in draw precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Actor,
    Hazard,
    Platform,
    Goal,
    Water,
    Road,
    Grass,
}

impl From<Terrain> for CellKind {
    fn from(t: Terrain) -> Self {
        match t {
            Terrain::Goal => Self::Goal,
            Terrain::Water => Self::Water,
            Terrain::Road => Self::Road,
            Terrain::Grass => Self::Grass,
        }
    }
}

/// Terminal flags and scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameState {
    pub game_over: bool,
    pub won: bool,
    pub score: u32,
    pub high_score: u32,
}

impl GameState {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.game_over || self.won
    }
}

/// Everything the tick and the input handler share.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub board: Board,
    pub actor: Actor,
    pub lanes: Lanes,
    pub state: GameState,
    /// Last terminal verdict, kept for the status line.
    pub last_verdict: Option<Verdict>,
    rng: Pcg32,
}

impl Simulation {
    pub fn new(board: Board, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let lanes = spawner::spawn(&board, &mut rng);
        let (x, y) = board.start_cell();
        Self {
            board,
            actor: Actor::at(x, y),
            lanes,
            state: GameState::default(),
            last_verdict: None,
            rng,
        }
    }

    /// Simulation with caller-provided lanes. Nothing is randomised until the next reset.
    #[cfg(test)]
    pub fn with_lanes(board: Board, lanes: Lanes) -> Self {
        let mut sim = Self::new(board, 0);
        sim.lanes = lanes;
        sim
    }

    /// Run one tick: motion, then riding, then judgement. Does nothing once the round is over.
    pub fn tick(&mut self) -> Verdict {
        if self.state.is_terminal() {
            return Verdict::Clear;
        }

        motion::step_hazards(&mut self.lanes.hazards, &self.board);
        motion::step_platforms(&mut self.lanes.platforms, &self.board);

        let mut riding = false;
        if self.board.in_float_band(self.actor.y) {
            let (actor, on_log) = rider::bind(self.actor, &self.lanes.platforms);
            self.actor = actor;
            riding = on_log;
        }

        let verdict = collision::judge(&self.actor, &self.lanes.hazards, riding, &self.board);
        log::trace!(
            "tick: actor=({:.2}, {}) riding={} verdict={:?}",
            self.actor.x,
            self.actor.y,
            riding,
            verdict
        );
        self.settle(verdict);
        verdict
    }

    fn settle(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Clear => return,
            Verdict::Home => {
                self.state.won = true;
                self.state.score += GOAL_POINTS;
                log::info!("reached the goal, score {}", self.state.score);
            }
            Verdict::Drowned | Verdict::Struck | Verdict::OutOfBounds => {
                self.state.game_over = true;
                log::info!("round lost ({:?}), score {}", verdict, self.state.score);
            }
        }
        self.last_verdict = Some(verdict);
    }

    /// Apply a player intent immediately. While the round is over only `Reset` is honoured.
    /// Returns true when something changed.
    pub fn apply(&mut self, intent: Intent) -> bool {
        if intent == Intent::Reset {
            self.reset();
            return true;
        }
        if self.state.is_terminal() {
            return false;
        }
        let before = self.actor;
        let (w, h) = (self.board.width, self.board.height);
        let a = &mut self.actor;
        match intent {
            Intent::Up => a.y = (a.y - 1).max(0),
            Intent::Down => a.y = (a.y + 1).min(h - 1),
            Intent::Left => a.x = (a.x - 1.0).max(0.0),
            Intent::Right => a.x = (a.x + 1.0).min((w - 1) as f64),
            Intent::Reset => {}
        }
        *a != before
    }

    /// New lanes, actor back at the start, flags cleared, score folded into the high score.
    pub fn reset(&mut self) {
        self.lanes = spawner::spawn(&self.board, &mut self.rng);
        let (x, y) = self.board.start_cell();
        self.actor = Actor::at(x, y);
        let s = &mut self.state;
        s.high_score = s.high_score.max(s.score);
        s.score = 0;
        s.game_over = false;
        s.won = false;
        self.last_verdict = None;
        log::info!("reset, high score {}", s.high_score);
    }

    /// What to draw at cell `(x, y)`. Positions are floored here and nowhere else.
    pub fn cell_at(&self, x: i32, y: i32) -> CellKind {
        if self.actor.cell() == x && self.actor.y == y {
            return CellKind::Actor;
        }
        if self
            .lanes
            .hazards
            .iter()
            .any(|c| c.y == y && c.cell() == x)
        {
            return CellKind::Hazard;
        }
        if self
            .lanes
            .platforms
            .iter()
            .any(|p| p.y == y && p.covers(x))
        {
            return CellKind::Platform;
        }
        self.board.terrain(y).into()
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn high_score(&self) -> u32 {
        self.state.high_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Hazard, Heading, Platform};
    use proptest::prelude::*;

    fn empty() -> Simulation {
        Simulation::with_lanes(Board::default(), Lanes::default())
    }

    fn log(x: f64, y: i32, heading: Heading, speed: f64) -> Platform {
        Platform { x, y, length: 3, heading, speed }
    }

    #[test]
    fn starts_bottom_centre() {
        let sim = Simulation::new(Board::default(), 1);
        assert_eq!(sim.actor, Actor::at(5, 14));
        assert_eq!(sim.state, GameState::default());
    }

    #[test]
    fn four_ups_from_start() {
        let mut sim = empty();
        for _ in 0..4 {
            assert!(sim.apply(Intent::Up));
        }
        assert_eq!(sim.actor, Actor::at(5, 10));
        assert!(!sim.state.is_terminal());
    }

    #[test]
    fn moves_clamp_at_edges() {
        let mut sim = empty();
        assert!(!sim.apply(Intent::Down));
        assert_eq!(sim.actor.y, 14);
        sim.actor = Actor::at(0, 14);
        assert!(!sim.apply(Intent::Left));
        assert_eq!(sim.actor.x, 0.0);
        sim.actor = Actor::at(10, 14);
        assert!(!sim.apply(Intent::Right));
        assert_eq!(sim.actor.x, 10.0);
        sim.actor = Actor::at(3, 0);
        assert!(!sim.apply(Intent::Up));
        assert_eq!(sim.actor.y, 0);
    }

    #[test]
    fn left_from_fractional_position_clamps_to_zero() {
        let mut sim = empty();
        sim.actor = Actor { x: 0.4, y: 14 };
        sim.apply(Intent::Left);
        assert_eq!(sim.actor.x, 0.0);
    }

    #[test]
    fn unknown_keys_map_to_nothing() {
        assert_eq!(Intent::from_key_name("Space"), None);
        assert_eq!(Intent::from_key_name("ArrowUp"), Some(Intent::Up));
        assert_eq!(Intent::from_key_name("R"), Some(Intent::Reset));
        assert_eq!(Intent::from_button("jump", false), None);
    }

    #[test]
    fn buttons_match_keys() {
        for (key, button) in [
            ("ArrowUp", "up"),
            ("ArrowDown", "down"),
            ("ArrowLeft", "left"),
            ("ArrowRight", "right"),
            ("r", "reset"),
        ] {
            assert_eq!(Intent::from_key_name(key), Intent::from_button(button, false));
        }
        assert_eq!(Intent::from_button("down", true), Some(Intent::Reset));
    }

    #[test]
    fn drowns_in_open_water() {
        let mut sim = empty();
        sim.actor = Actor::at(5, 10);
        assert_eq!(sim.tick(), Verdict::Drowned);
        assert!(sim.state.game_over);
        assert!(!sim.state.won);
    }

    #[test]
    fn struck_by_car_on_same_row() {
        let mut sim = empty();
        sim.lanes.hazards.push(Hazard { x: 4.5, y: 4, heading: Heading::Right, speed: 0.5 });
        sim.actor = Actor { x: 5.4, y: 4 };
        assert_eq!(sim.tick(), Verdict::Struck);
        assert!(sim.state.game_over);
    }

    #[test]
    fn reaching_goal_scores_once() {
        let mut sim = empty();
        sim.state.score = 200;
        sim.actor = Actor::at(5, 1);
        sim.apply(Intent::Up);
        assert_eq!(sim.tick(), Verdict::Home);
        assert!(sim.state.won);
        assert!(!sim.state.game_over);
        assert_eq!(sim.score(), 300);
        // halted: further ticks neither move entities nor score
        sim.lanes.hazards.push(Hazard { x: 1.0, y: 3, heading: Heading::Right, speed: 0.5 });
        assert_eq!(sim.tick(), Verdict::Clear);
        assert_eq!(sim.score(), 300);
        assert_eq!(sim.lanes.hazards[0].x, 1.0);
    }

    #[test]
    fn riding_moves_exactly_by_log_speed() {
        let mut sim = empty();
        // log moves first (3.0 -> 3.5), actor at column 4 is still on it
        sim.lanes.platforms.push(log(3.0, 10, Heading::Right, 0.5));
        sim.lanes.hazards.push(Hazard { x: 0.0, y: 5, heading: Heading::Right, speed: 0.9 });
        sim.actor = Actor::at(4, 10);
        assert_eq!(sim.tick(), Verdict::Clear);
        assert_eq!(sim.actor.x, 4.5);
        assert_eq!(sim.actor.y, 10);
    }

    #[test]
    fn riding_sees_this_ticks_log_position() {
        let mut sim = empty();
        // before motion the log covers 3..6; after it covers 2..5 and column 5 is water
        sim.lanes.platforms.push(log(3.2, 11, Heading::Left, 0.5));
        sim.actor = Actor::at(5, 11);
        assert_eq!(sim.tick(), Verdict::Drowned);
    }

    #[test]
    fn carried_off_the_edge() {
        let mut sim = empty();
        sim.lanes.platforms.push(log(8.5, 12, Heading::Right, 0.55));
        sim.actor = Actor { x: 10.5, y: 12 };
        assert_eq!(sim.tick(), Verdict::OutOfBounds);
        assert!(sim.state.game_over);
    }

    #[test]
    fn input_ignored_after_round_ends() {
        let mut sim = empty();
        sim.actor = Actor::at(5, 10);
        sim.tick();
        assert!(!sim.apply(Intent::Down));
        assert_eq!(sim.actor, Actor::at(5, 10));
    }

    #[test]
    fn reset_restores_start_and_folds_high_score() {
        let mut sim = Simulation::new(Board::default(), 9);
        let before = sim.lanes.clone();
        sim.state = GameState { game_over: true, won: false, score: 300, high_score: 200 };
        sim.actor = Actor { x: 2.3, y: 11 };
        assert!(sim.apply(Intent::Reset));
        assert_eq!(sim.state, GameState { game_over: false, won: false, score: 0, high_score: 300 });
        assert_eq!(sim.actor, Actor::at(5, 14));
        assert_ne!(sim.lanes, before);
        assert!(sim.last_verdict.is_none());

        sim.state.score = 100;
        sim.reset();
        assert_eq!(sim.high_score(), 300);
    }

    #[test]
    fn cell_precedence() {
        let mut sim = empty();
        sim.lanes.platforms.push(log(1.0, 10, Heading::Right, 0.3));
        sim.lanes.hazards.push(Hazard { x: 2.9, y: 10, heading: Heading::Right, speed: 0.5 });
        sim.lanes.hazards.push(Hazard { x: 7.2, y: 4, heading: Heading::Left, speed: 0.5 });
        sim.actor = Actor { x: 1.7, y: 10 };
        assert_eq!(sim.cell_at(1, 10), CellKind::Actor);
        assert_eq!(sim.cell_at(2, 10), CellKind::Hazard);
        assert_eq!(sim.cell_at(3, 10), CellKind::Platform);
        assert_eq!(sim.cell_at(4, 10), CellKind::Water);
        assert_eq!(sim.cell_at(7, 4), CellKind::Hazard);
        assert_eq!(sim.cell_at(6, 4), CellKind::Road);
        assert_eq!(sim.cell_at(0, 0), CellKind::Goal);
        assert_eq!(sim.cell_at(0, 8), CellKind::Grass);
    }

    fn any_move() -> impl Strategy<Value = Intent> {
        prop_oneof![
            Just(Intent::Up),
            Just(Intent::Down),
            Just(Intent::Left),
            Just(Intent::Right),
        ]
    }

    proptest! {
        #[test]
        fn moves_never_leave_the_board(
            x in 0.0f64..=10.0,
            y in 0i32..15,
            moves in prop::collection::vec(any_move(), 1..64),
        ) {
            let mut sim = empty();
            sim.actor = Actor { x, y };
            let (w, h) = (sim.board.width_f(), sim.board.height);
            for intent in moves {
                sim.apply(intent);
                prop_assert!(sim.actor.x >= 0.0 && sim.actor.x <= w - 1.0);
                prop_assert!(sim.actor.y >= 0 && sim.actor.y <= h - 1);
            }
        }
    }
}
