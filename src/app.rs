//! App: terminal init, main loop, tick and input handling.

use crate::GameConfig;
use crate::clock::GameClock;
use crate::game::{Intent, Simulation};
use crate::input::{Action, key_to_action};
use crate::theme::Theme;
use crate::ui::{self, GameLayout};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::DefaultTerminal;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tachyonfx::Effect;

pub struct App {
    config: GameConfig,
    theme: Theme,
    clock: GameClock,
    /// Flash played once when a round ends.
    end_effect: Option<Effect>,
    /// Last time we processed the end flash (for delta).
    end_effect_time: Option<Instant>,
    /// Terminal size at the last draw, for mouse hit-testing.
    last_area: Rect,
}

impl App {
    pub fn new(config: GameConfig, theme: Theme) -> Self {
        let sim = Simulation::new(config.board, config.seed);
        let clock = GameClock::new(sim, config.tick, Instant::now());
        Self {
            config,
            theme,
            clock,
            end_effect: None,
            end_effect_time: None,
            last_area: Rect::default(),
        }
    }

    /// Apply an intent right away; the next tick judges the result.
    fn apply_intent(&mut self, intent: Intent, now: Instant) {
        let changed = self.clock.handle(intent, now);
        if intent == Intent::Reset {
            self.end_effect = None;
            self.end_effect_time = None;
        } else if changed {
            log::trace!("{:?} -> {:?}", intent, self.clock.sim().actor);
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let layout = GameLayout::new(self.last_area, self.clock.sim());
        let round_over = self.clock.sim().state.is_terminal();
        if let Some(intent) = layout
            .button_at(mouse.column, mouse.row)
            .and_then(|name| Intent::from_button(name, round_over))
        {
            self.apply_intent(intent, now);
        }
    }

    fn fire_tick(&mut self, now: Instant) {
        if self.clock.poll(now).is_some_and(|v| v.is_terminal()) {
            self.end_effect = Some(ui::end_flash(self.clock.sim(), &self.theme));
            self.end_effect_time = Some(now);
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            event::{DisableMouseCapture, EnableMouseCapture},
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        let result = self.run_loop(&mut terminal);

        // Restore
        execute!(std::io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
        disable_raw_mode()?;

        // The clock is dropped with the app; nothing stays scheduled.
        self.clock.halt();
        log::info!(
            "exiting, score {} high score {}",
            self.clock.sim().score(),
            self.clock.sim().high_score()
        );
        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut next_frame = Instant::now();
        loop {
            let now = Instant::now();
            if now >= next_frame {
                terminal.draw(|f| {
                    self.last_area = f.area();
                    ui::draw(
                        f,
                        &self.clock,
                        &self.theme,
                        &mut self.end_effect,
                        &mut self.end_effect_time,
                        now,
                    );
                })?;
                next_frame = now + self.config.frame;
            }

            // Sleep until whichever comes first: input, the next tick, or the next frame.
            let timeout = self
                .clock
                .until_next(now)
                .min(next_frame.saturating_duration_since(now));

            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            match key_to_action(key) {
                                Action::Quit => return Ok(()),
                                Action::Play(intent) => self.apply_intent(intent, Instant::now()),
                                Action::None => {}
                            }
                        }
                        Event::Mouse(mouse) => self.handle_mouse(mouse, Instant::now()),
                        Event::Resize(..) => next_frame = Instant::now(),
                        _ => {}
                    }
                }
            }

            self.fire_tick(Instant::now());
        }
    }
}
