//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.

use crate::game::CellKind;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Cell and UI colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub goal: Color,
    pub grass: Color,
    pub road: Color,
    pub water: Color,
    pub car: Color,
    pub log: Color,
    pub frog: Color,
    /// Panel background.
    pub bg: Color,
    /// Borders.
    pub div_line: Color,
    /// Text (score, instructions).
    pub main_fg: Color,
    /// Highlight / titles.
    pub title: Color,
    /// Secondary text (key hints).
    pub inactive_fg: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

impl Default for Theme {
    fn default() -> Self {
        Self::meadow_default()
    }
}

impl Theme {
    /// Built-in palette: pale goal strip, green verges, grey road, blue river.
    pub fn meadow_default() -> Self {
        Self {
            goal: rgb(0xBBF7D0),
            grass: rgb(0x86EFAC),
            road: rgb(0x6B7280),
            water: rgb(0x60A5FA),
            car: rgb(0xEF4444),
            log: rgb(0x854D0E),
            frog: rgb(0x22C55E),
            bg: rgb(0x31353F),
            div_line: rgb(0x3F444F),
            main_fg: rgb(0xABB2BF),
            title: rgb(0xE5C07B),
            inactive_fg: rgb(0x5C6370),
        }
    }

    /// Load theme from a btop-style file: `theme[key]="value"` or `theme[key]='value'`.
    /// Falls back to defaults if path is None or the file is missing; unknown or
    /// malformed keys keep their default colour.
    pub fn load(path: Option<&Path>, palette: crate::Palette) -> Result<Self, ThemeError> {
        let path = match path {
            Some(p) if p.exists() => p,
            Some(p) => {
                log::warn!("theme file {} not found, using defaults", p.display());
                return Ok(Self::default_for(palette));
            }
            None => return Ok(Self::default_for(palette)),
        };
        let s = std::fs::read_to_string(path)?;
        let map = parse_theme_file(&s);
        let mut theme = Self::from_map(&map);
        theme.apply_palette(palette);
        log::info!("loaded theme {} ({} keys)", path.display(), map.len());
        Ok(theme)
    }

    pub fn default_for(palette: crate::Palette) -> Self {
        let mut t = Self::meadow_default();
        t.apply_palette(palette);
        t
    }

    /// Override entity (and some terrain) colours for high-contrast or colorblind play.
    pub fn apply_palette(&mut self, palette: crate::Palette) {
        match palette {
            crate::Palette::Normal => {}
            crate::Palette::HighContrast => {
                self.frog = rgb(0x00FF00);
                self.car = rgb(0xFF0000);
                self.log = rgb(0xFFFF00);
                self.water = rgb(0x0000AA);
                self.road = rgb(0x202020);
                self.grass = rgb(0x005500);
                self.goal = rgb(0xFFFFFF);
            }
            crate::Palette::Colorblind => {
                // avoid relying on red/green alone
                self.frog = rgb(0xEE7733);
                self.car = rgb(0xCC3311);
                self.log = rgb(0xBBBB00);
                self.water = rgb(0x0077BB);
                self.grass = rgb(0x009988);
            }
        }
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let d = Self::meadow_default();
        let get = |key: &str, fallback: Color| {
            map.get(key)
                .and_then(|v| parse_hex(v).ok())
                .unwrap_or(fallback)
        };
        Self {
            goal: get("goal", d.goal),
            grass: get("grass", d.grass),
            road: get("road", d.road),
            water: get("water", d.water),
            car: get("car", d.car),
            log: get("log", d.log),
            frog: get("frog", d.frog),
            bg: get("meter_bg", d.bg),
            div_line: get("div_line", d.div_line),
            main_fg: get("main_fg", d.main_fg),
            title: get("title", d.title),
            inactive_fg: get("inactive_fg", d.inactive_fg),
        }
    }

    /// Fill colour for a board cell.
    pub fn cell_color(&self, kind: CellKind) -> Color {
        match kind {
            CellKind::Actor => self.frog,
            CellKind::Hazard => self.car,
            CellKind::Platform => self.log,
            CellKind::Goal => self.goal,
            CellKind::Water => self.water,
            CellKind::Road => self.road,
            CellKind::Grass => self.grass,
        }
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(stripped) = line.strip_prefix("theme[") else {
            continue;
        };
        let Some(end) = stripped.find(']') else {
            continue;
        };
        let key = stripped[..end].trim();
        let rest = stripped[end + 1..].trim();
        if let Some(value) = rest.strip_prefix('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if !value.is_empty() {
                map.insert(key.to_string(), value.to_string());
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(s.to_string());
    if !s.is_ascii() {
        return Err(invalid());
    }
    let channel = |from: usize, to: usize| u8::from_str_radix(&s[from..to], 16).map_err(|_| invalid());
    let (r, g, b) = match s.len() {
        6 => (channel(0, 2)?, channel(2, 4)?, channel(4, 6)?),
        3 => (channel(0, 1)? * 17, channel(1, 2)? * 17, channel(2, 3)? * 17),
        _ => return Err(invalid()),
    };
    Ok(Color::Rgb(r, g, b))
}
