//! Colour palette, loadable from `theme.conf` (`key = #RRGGBB`).

use std::path::Path;

use anyhow::Context as _;
use ratatui::style::Color;
use tracing::warn;

use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_fg: Color,
    pub header_bg: Color,
    pub status_fg: Color,
    pub status_bg: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub success: Color,
    pub error: Color,
}

/// Config keys in file order.
const KEYS: [&str; 12] = [
    "text",
    "muted",
    "title",
    "border",
    "header_fg",
    "header_bg",
    "status_fg",
    "status_bg",
    "selected_fg",
    "selected_bg",
    "success",
    "error",
];

impl Theme {
    /// Catppuccin Mocha.
    pub fn mocha() -> Self {
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            muted: Color::Rgb(0x7f, 0x84, 0x9c),
            title: Color::Rgb(0xcb, 0xa6, 0xf7),
            border: Color::Rgb(0x58, 0x5b, 0x70),
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),
            header_bg: Color::Rgb(0x31, 0x32, 0x44),
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),
            selected_fg: Color::Rgb(0xf9, 0xe2, 0xaf),
            selected_bg: Color::Rgb(0x45, 0x47, 0x5a),
            success: Color::Rgb(0xa6, 0xe3, 0xa1),
            error: Color::Rgb(0xf3, 0x8b, 0xa8),
        }
    }

    fn slot(&mut self, key: &str) -> Option<&mut Color> {
        Some(match key {
            "text" => &mut self.text,
            "muted" => &mut self.muted,
            "title" => &mut self.title,
            "border" => &mut self.border,
            "header_fg" => &mut self.header_fg,
            "header_bg" => &mut self.header_bg,
            "status_fg" => &mut self.status_fg,
            "status_bg" => &mut self.status_bg,
            "selected_fg" => &mut self.selected_fg,
            "selected_bg" => &mut self.selected_bg,
            "success" => &mut self.success,
            "error" => &mut self.error,
            _ => return None,
        })
    }

    /// Parse config text on top of the default palette; bad lines are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            let (key, val) = (key.trim(), val.trim());
            match (theme.slot(key), parse_color(val)) {
                (Some(slot), Some(color)) => *slot = color,
                _ => warn!(line, "ignoring theme entry"),
            }
        }
        theme
    }

    pub fn to_config(&self) -> String {
        let mut copy = *self;
        let mut out = String::from("# userdash theme\n# Colors: #RRGGBB or 'reset'\n\n");
        for key in KEYS {
            if let Some(c) = copy.slot(key) {
                out.push_str(&format!("{key} = {}\n", format_color(*c)));
            }
        }
        out
    }

    /// Load `path`, or write the defaults there when it does not exist yet.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of `theme.conf`.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("read theme {}", path.display()))?;
            return Ok(Self::parse(&contents));
        }
        let theme = Self::mocha();
        std::fs::write(path, theme.to_config())
            .with_context(|| format!("write theme {}", path.display()))?;
        Ok(theme)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("reset") {
        return Some(Color::Reset);
    }
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(byte(0)?, byte(2)?, byte(4)?))
}

fn format_color(c: Color) -> String {
    match c {
        Color::Rgb(r, g, b) => format!("#{r:02X}{g:02X}{b:02X}"),
        _ => "reset".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips() {
        let t = Theme::mocha();
        assert_eq!(Theme::parse(&t.to_config()), t);
    }

    #[test]
    fn overrides_known_keys_and_skips_garbage() {
        let t = Theme::parse("error = #FF0000\nbogus = #000000\ntext = nothex\n# c\nsuccess=reset");
        assert_eq!(t.error, Color::Rgb(0xff, 0, 0));
        assert_eq!(t.success, Color::Reset);
        assert_eq!(t.text, Theme::mocha().text);
    }
}
