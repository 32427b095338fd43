//! Fixed-interval tick driver. Owns the simulation so ticks and input share one context.

use crate::collision::Verdict;
use crate::game::{Intent, Simulation};
use std::time::{Duration, Instant};

/// How long the app may sleep while halted before polling input again.
const HALTED_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Running,
    Halted,
}

#[derive(Debug)]
pub struct GameClock {
    sim: Simulation,
    interval: Duration,
    /// When the next tick fires. `None` while halted: nothing is scheduled.
    next_fire: Option<Instant>,
}

impl GameClock {
    pub fn new(sim: Simulation, interval: Duration, now: Instant) -> Self {
        debug_assert!(!interval.is_zero());
        let next_fire = (!sim.state.is_terminal()).then(|| now + interval);
        Self {
            sim,
            interval,
            next_fire,
        }
    }

    pub fn state(&self) -> ClockState {
        if self.next_fire.is_some() {
            ClockState::Running
        } else {
            ClockState::Halted
        }
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    /// Drop any scheduled tick.
    pub fn halt(&mut self) {
        self.next_fire = None;
    }

    /// Time until the next tick is due, for bounding an input poll.
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_fire
            .map_or(HALTED_POLL, |t| t.saturating_duration_since(now))
    }

    /// Fire the tick if it is due. Reads the simulation as it is right now,
    /// including any input applied since the previous tick.
    pub fn poll(&mut self, now: Instant) -> Option<Verdict> {
        let due = self.next_fire.filter(|&t| now >= t)?;
        // Skip ticks missed while the process was stalled rather than bursting them.
        let mut next = due + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        self.next_fire = Some(next);

        let verdict = self.sim.tick();
        if verdict.is_terminal() {
            self.halt();
        }
        Some(verdict)
    }

    /// Apply player input immediately. Reset restarts the clock from `now`.
    pub fn handle(&mut self, intent: Intent, now: Instant) -> bool {
        let changed = self.sim.apply(intent);
        if intent == Intent::Reset {
            self.next_fire = Some(now + self.interval);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::entity::Actor;
    use crate::spawner::Lanes;

    const TICK: Duration = Duration::from_millis(200);

    fn clock(now: Instant) -> GameClock {
        GameClock::new(
            Simulation::with_lanes(Board::default(), Lanes::default()),
            TICK,
            now,
        )
    }

    #[test]
    fn fires_on_the_interval() {
        let t0 = Instant::now();
        let mut c = clock(t0);
        assert_eq!(c.state(), ClockState::Running);
        assert_eq!(c.poll(t0 + Duration::from_millis(199)), None);
        assert_eq!(c.poll(t0 + TICK), Some(Verdict::Clear));
        assert_eq!(c.poll(t0 + TICK), None);
        assert_eq!(c.until_next(t0 + TICK), TICK);
        assert_eq!(c.poll(t0 + TICK * 2), Some(Verdict::Clear));
    }

    #[test]
    fn stalls_do_not_burst() {
        let t0 = Instant::now();
        let mut c = clock(t0);
        let late = t0 + TICK * 5;
        assert!(c.poll(late).is_some());
        assert_eq!(c.poll(late), None);
        assert_eq!(c.until_next(late), TICK);
    }

    #[test]
    fn halts_on_terminal_state_and_stays_halted() {
        let t0 = Instant::now();
        let mut c = clock(t0);
        c.handle(Intent::Up, t0);
        c.handle(Intent::Up, t0);
        c.handle(Intent::Up, t0);
        c.handle(Intent::Up, t0);
        assert_eq!(c.sim().actor, Actor::at(5, 10));
        assert_eq!(c.poll(t0 + TICK), Some(Verdict::Drowned));
        assert_eq!(c.state(), ClockState::Halted);
        assert_eq!(c.poll(t0 + TICK * 10), None);
        assert!(!c.handle(Intent::Left, t0 + TICK * 10));
    }

    #[test]
    fn reset_resumes() {
        let t0 = Instant::now();
        let mut c = clock(t0);
        c.halt();
        assert_eq!(c.state(), ClockState::Halted);
        assert_eq!(c.until_next(t0), HALTED_POLL);
        let t1 = t0 + TICK * 3;
        assert!(c.handle(Intent::Reset, t1));
        assert_eq!(c.state(), ClockState::Running);
        assert_eq!(c.poll(t1 + TICK - Duration::from_millis(1)), None);
        assert!(c.poll(t1 + TICK).is_some());
    }

    #[test]
    fn input_between_ticks_is_judged_next_tick() {
        let t0 = Instant::now();
        let mut c = clock(t0);
        assert_eq!(c.poll(t0 + TICK), Some(Verdict::Clear));
        for _ in 0..5 {
            c.handle(Intent::Up, t0 + TICK);
        }
        assert_eq!(c.sim().actor.y, 9);
        assert_eq!(c.poll(t0 + TICK * 2), Some(Verdict::Drowned));
    }
}
