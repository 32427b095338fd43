//! Layout and drawing: board, score panel, status, clickable pad, help.

use crate::clock::{ClockState, GameClock};
use crate::collision::Verdict;
use crate::game::{CellKind, Simulation};
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};
use std::time::Instant;
use tachyonfx::{Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx};

/// Each board cell is two terminal columns wide so cells look square.
const CELL_WIDTH: u16 = 2;
const SIDEBAR_WIDTH: u16 = 28;
/// Pad button size in terminal cells (including its border).
const BUTTON_W: u16 = 5;
const BUTTON_H: u16 = 3;
/// Duration of the flash when a round ends.
const END_FLASH_MS: u32 = 350;

/// Board size in terminal cells including its border.
fn board_outer_size(sim: &Simulation) -> (u16, u16) {
    let w = sim.board.width as u16 * CELL_WIDTH + 2;
    let h = sim.board.height as u16 + 2;
    (w, h)
}

/// Rows the sidebar needs: stats (6), pad (8), help (8).
const SIDEBAR_HEIGHT: u16 = 22;

/// Total size of board plus sidebar.
fn content_size(sim: &Simulation) -> (u16, u16) {
    let (bw, bh) = board_outer_size(sim);
    (bw + SIDEBAR_WIDTH, bh.max(SIDEBAR_HEIGHT))
}

/// Screen regions, shared by drawing and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLayout {
    pub board: Rect,
    pub stats: Rect,
    pub pad: Rect,
    pub help: Rect,
    /// Whether the area is large enough to draw the game at all.
    pub fits: bool,
}

impl GameLayout {
    pub fn new(area: Rect, sim: &Simulation) -> Self {
        let (bw, bh) = board_outer_size(sim);
        let (total_w, total_h) = content_size(sim);

        // Center horizontally
        let horiz = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(total_w),
                Constraint::Fill(1),
            ])
            .split(area);
        // Center vertically
        let vert = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(total_h),
                Constraint::Fill(1),
            ])
            .split(horiz[1]);
        let active = vert[1];
        let fits = area.width >= total_w && area.height >= total_h;

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(bw), Constraint::Length(SIDEBAR_WIDTH)])
            .split(active);
        let board = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(bh), Constraint::Fill(1)])
            .split(cols[0])[0];
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),                // score, best, status
                Constraint::Length(BUTTON_H * 2 + 2), // pad
                Constraint::Fill(1),                  // help
            ])
            .split(cols[1]);

        Self {
            board,
            stats: side[0],
            pad: side[1],
            help: side[2],
            fits,
        }
    }

    /// Buttons of the on-screen pad with their names. The down button reads "R" once the round is over.
    pub fn buttons(&self) -> [(Rect, &'static str); 4] {
        let inner = Block::default().borders(Borders::ALL).inner(self.pad);
        let left = inner.x + inner.width.saturating_sub(BUTTON_W * 3) / 2;
        let top = inner.y;
        let at = |col: u16, row: u16| Rect {
            x: left + col * BUTTON_W,
            y: top + row * BUTTON_H,
            width: BUTTON_W,
            height: BUTTON_H,
        }
        .intersection(inner);
        [
            (at(1, 0), "up"),
            (at(0, 1), "left"),
            (at(1, 1), "down"),
            (at(2, 1), "right"),
        ]
    }

    /// Name of the pad button under a terminal position, if any. Nothing is hit while
    /// only the "too small" message is on screen.
    pub fn button_at(&self, column: u16, row: u16) -> Option<&'static str> {
        if !self.fits {
            return None;
        }
        let pos = Position::new(column, row);
        self.buttons()
            .into_iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, name)| name)
    }
}

/// Draw one frame. When the round has just ended, a short flash is rendered over the board
/// through `end_effect`; `effect_time` tracks the last time it was processed.
pub fn draw(
    frame: &mut Frame,
    clock: &GameClock,
    theme: &Theme,
    end_effect: &mut Option<Effect>,
    effect_time: &mut Option<Instant>,
    now: Instant,
) {
    let area = frame.area();
    let sim = clock.sim();
    let layout = GameLayout::new(area, sim);
    if !layout.fits {
        draw_too_small(frame, theme, area);
        return;
    }

    draw_board(frame, sim, theme, layout.board);
    draw_stats(frame, clock, theme, layout.stats);
    draw_pad(frame, sim, theme, &layout);
    draw_help(frame, theme, layout.help);

    if sim.state.is_terminal() {
        if let Some(effect) = end_effect.as_mut().filter(|e| !e.done()) {
            let board_inner = Block::default().borders(Borders::ALL).inner(layout.board);
            let delta = effect_time
                .map(|t| now.saturating_duration_since(t))
                .unwrap_or(std::time::Duration::ZERO);
            let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
            *effect_time = Some(now);
            frame.render_effect(effect, board_inner, TfxDuration::from_millis(delta_ms));
        } else {
            draw_end_banner(frame, sim, theme, layout.board);
        }
    }
}

/// Flash the board towards the car colour on a loss, or the goal colour on a win.
pub fn end_flash(sim: &Simulation, theme: &Theme) -> Effect {
    let tint = if sim.state.won { theme.goal } else { theme.car };
    fx::fade_to(tint, tint, (END_FLASH_MS, Interpolation::Linear))
}

fn draw_too_small(frame: &mut Frame, theme: &Theme, area: Rect) {
    Paragraph::new(Line::from(Span::styled(
        "Terminal too small. Enlarge the window or press Q to quit.",
        Style::default().fg(theme.main_fg),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(area, frame.buffer_mut());
}

fn cell_symbol(kind: CellKind) -> &'static str {
    match kind {
        CellKind::Actor => "◖◗",
        CellKind::Hazard => "▐▌",
        CellKind::Platform => "▓▓",
        CellKind::Water => "~ ",
        CellKind::Goal | CellKind::Road | CellKind::Grass => "  ",
    }
}

fn draw_board(frame: &mut Frame, sim: &Simulation, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .title(Span::styled(" Frogtui ", Style::default().fg(theme.title)));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let buf = frame.buffer_mut();
    for y in 0..sim.board.height {
        let row = inner.y + y as u16;
        if row >= inner.bottom() {
            break;
        }
        let terrain: CellKind = sim.board.terrain(y).into();
        for x in 0..sim.board.width {
            let col = inner.x + x as u16 * CELL_WIDTH;
            if col + CELL_WIDTH > inner.right() {
                break;
            }
            let kind = sim.cell_at(x, y);
            let style = match kind {
                // the frog keeps whatever it stands on as background
                CellKind::Actor => Style::default()
                    .fg(theme.frog)
                    .bg(theme.cell_color(terrain))
                    .add_modifier(Modifier::BOLD),
                CellKind::Water => Style::default().fg(Color::White).bg(theme.water),
                _ => Style::default().fg(Color::Black).bg(theme.cell_color(kind)),
            };
            buf.set_string(col, row, cell_symbol(kind), style);
        }
    }
}

fn panel(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
}

fn verdict_text(verdict: Option<Verdict>) -> &'static str {
    match verdict {
        Some(Verdict::Drowned) => "Splash! Fell in the river.",
        Some(Verdict::Struck) => "Squashed by a car.",
        Some(Verdict::OutOfBounds) => "Swept off the edge.",
        Some(Verdict::Home) => "Made it across!",
        Some(Verdict::Clear) | None => "Hop to the top!",
    }
}

fn draw_stats(frame: &mut Frame, clock: &GameClock, theme: &Theme, area: Rect) {
    let sim = clock.sim();
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let state_line = match clock.state() {
        ClockState::Running => Span::styled("Running", Style::default().fg(Color::Green)),
        ClockState::Halted if sim.state.won => {
            Span::styled("You Win!", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        }
        ClockState::Halted => {
            Span::styled("Game Over", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        }
    };
    let lines = vec![
        Line::from(vec![
            Span::styled("Score: ", title_style),
            Span::styled(sim.score().to_string(), fg_style),
        ]),
        Line::from(vec![
            Span::styled("High Score: ", title_style),
            Span::styled(sim.high_score().to_string(), fg_style),
        ]),
        Line::from(state_line),
        Line::from(Span::styled(verdict_text(sim.last_verdict), fg_style)),
    ];
    let block = panel(theme);
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());
    Paragraph::new(lines).render(inner, frame.buffer_mut());
}

fn draw_pad(frame: &mut Frame, sim: &Simulation, theme: &Theme, layout: &GameLayout) {
    panel(theme).render(layout.pad, frame.buffer_mut());
    let round_over = sim.state.is_terminal();
    for (rect, name) in layout.buttons() {
        let label = match name {
            "up" => "↑",
            "left" => "←",
            "right" => "→",
            "down" if round_over => "R",
            _ => "↓",
        };
        Paragraph::new(Line::from(Span::styled(label, Style::default().fg(theme.main_fg))))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.inactive_fg)),
            )
            .render(rect, frame.buffer_mut());
    }
}

fn draw_help(frame: &mut Frame, theme: &Theme, area: Rect) {
    let fg = Style::default().fg(theme.main_fg);
    let dim = Style::default().fg(theme.inactive_fg);
    let lines = vec![
        Line::from(Span::styled("Get the frog to the top", fg)),
        Line::from(Span::styled("Avoid cars on the road", fg)),
        Line::from(Span::styled("Ride logs over the river", fg)),
        Line::from(Span::styled("The water is deadly", fg)),
        Line::from(Span::styled("Arrows/hjkl move  R reset", dim)),
        Line::from(Span::styled("Click the pad  Q quit", dim)),
    ];
    let block = panel(theme);
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(inner, frame.buffer_mut());
}

fn draw_end_banner(frame: &mut Frame, sim: &Simulation, theme: &Theme, board: Rect) {
    let (title, hint, style) = if sim.state.won {
        (
            " You Win! ",
            "Press R to play again",
            Style::default().fg(Color::Black).bg(Color::Green),
        )
    } else {
        (
            " Game Over! ",
            "Press R to restart",
            Style::default().fg(Color::White).bg(Color::Red),
        )
    };
    let popup_w = board.width.saturating_sub(2);
    let popup_h = 4u16.min(board.height);
    let popup = Rect {
        x: board.x + 1,
        y: board.y + board.height.saturating_sub(popup_h) / 2,
        width: popup_w,
        height: popup_h,
    };
    let lines = vec![
        Line::from(Span::styled(title, style.add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(hint, Style::default().fg(theme.main_fg))),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
                .style(Style::default().bg(theme.bg)),
        )
        .render(popup, frame.buffer_mut());
}
