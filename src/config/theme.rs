//! Theme configuration options for fsc
//!
//! Each themed element is a [ColorPair] of foreground and background. Colors are
//! names ("cyan"), hex codes ("#RRGGBB" or "#RGB") or "default".
//! # Examples
//! ```toml
//! [theme.selection]
//! fg = "black"
//! bg = "#89B4FA"
//! ```

use crate::utils::parse_color;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Theme {
    title: ColorPair,
    path: ColorPair,
    separator: ColorPair,
    selection: ColorPair,
    directory: ColorPair,
    executable: ColorPair,
    filter: ColorPair,
    help: ColorPair,
    error: ColorPair,
}

impl Default for Theme {
    fn default() -> Self {
        let base = Color::Rgb(0x1E, 0x1E, 0x2E);
        let text = Color::Rgb(0xFA, 0xFA, 0xFA);
        let dim = Color::Rgb(0x6C, 0x70, 0x86);
        Theme {
            title: ColorPair::new(text, Color::Rgb(0x7D, 0x56, 0xF4)),
            path: ColorPair::new(text, base),
            separator: ColorPair::new(Color::Rgb(0x45, 0x47, 0x5A), Color::Reset),
            selection: ColorPair::new(base, Color::Rgb(0x89, 0xB4, 0xFA)),
            directory: ColorPair::new(Color::Rgb(0x89, 0xB4, 0xFA), Color::Reset),
            executable: ColorPair::new(Color::Rgb(0xA6, 0xE3, 0xA1), Color::Reset),
            filter: ColorPair::new(Color::Rgb(0xF9, 0xE2, 0xAF), base),
            help: ColorPair::new(dim, base),
            error: ColorPair::new(Color::Rgb(0xF3, 0x8B, 0xA8), Color::Reset),
        }
    }
}

impl Theme {
    pub fn title_style(&self) -> Style {
        self.title.style()
    }

    pub fn path_style(&self) -> Style {
        self.path.style()
    }

    pub fn separator_style(&self) -> Style {
        self.separator.style()
    }

    /// Selection is always bold so it stays visible on themes without a background.
    pub fn selection_style(&self) -> Style {
        self.selection.style().add_modifier(Modifier::BOLD)
    }

    pub fn directory_style(&self) -> Style {
        self.directory.style()
    }

    pub fn executable_style(&self) -> Style {
        self.executable.style()
    }

    pub fn filter_style(&self) -> Style {
        self.filter.style()
    }

    pub fn help_style(&self) -> Style {
        self.help.style()
    }

    pub fn error_style(&self) -> Style {
        self.error.style()
    }
}

/// Foreground/background pair as written in the config file.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    #[serde(default = "reset", deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default = "reset", deserialize_with = "deserialize_color_field")]
    bg: Color,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    pub fn style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

fn reset() -> Color {
    Color::Reset
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
