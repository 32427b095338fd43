//! Key bindings: arrows, vim-style hjkl, R to restart, Q/Esc to quit.

use crate::game::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Play(Intent),
    Quit,
    None,
}

/// Browser-style key name for a terminal key, so terminal keys go through the
/// same mapping as any other named-key source. hjkl alias the arrows.
fn key_name(code: KeyCode) -> Option<&'static str> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some("ArrowUp"),
        KeyCode::Down | KeyCode::Char('j') => Some("ArrowDown"),
        KeyCode::Left | KeyCode::Char('h') => Some("ArrowLeft"),
        KeyCode::Right | KeyCode::Char('l') => Some("ArrowRight"),
        KeyCode::Char('r') => Some("r"),
        KeyCode::Char('R') => Some("R"),
        _ => None,
    }
}

/// Map key event to an action. Ctrl-C quits; other modified keys are ignored.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
        return Action::Quit;
    }
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return Action::None;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => key_name(code)
            .and_then(Intent::from_key_name)
            .map_or(Action::None, Action::Play),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Action {
        key_to_action(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn arrows_and_vim_keys() {
        assert_eq!(press(KeyCode::Up), Action::Play(Intent::Up));
        assert_eq!(press(KeyCode::Char('k')), Action::Play(Intent::Up));
        assert_eq!(press(KeyCode::Char('j')), Action::Play(Intent::Down));
        assert_eq!(press(KeyCode::Left), Action::Play(Intent::Left));
        assert_eq!(press(KeyCode::Char('l')), Action::Play(Intent::Right));
    }

    #[test]
    fn reset_either_case() {
        assert_eq!(press(KeyCode::Char('r')), Action::Play(Intent::Reset));
        let shifted = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert_eq!(key_to_action(shifted), Action::Play(Intent::Reset));
    }

    #[test]
    fn quit_and_unknown() {
        assert_eq!(press(KeyCode::Esc), Action::Quit);
        assert_eq!(press(KeyCode::Char('q')), Action::Quit);
        assert_eq!(press(KeyCode::Char('x')), Action::None);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(ctrl_c), Action::Quit);
        let alt_up = KeyEvent::new(KeyCode::Up, KeyModifiers::ALT);
        assert_eq!(key_to_action(alt_up), Action::None);
    }
}
