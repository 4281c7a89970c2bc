//! Helpers for fsc.
//!
//! - Color parsing from strings or hex codes
//! - Displaying home directories as "~" in file paths
//! - Validating the start directory before the session starts

use crate::core::FscError;

use ratatui::style::Color;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Parses a string (color name or hex) into a ratatui::style::Color
///
/// Supports standard names (red, green, etc.) as well as hex values (#RRGGBB or #RGB)
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        _ => s.strip_prefix('#').and_then(parse_hex).unwrap_or(Color::Reset),
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let expanded = match hex.len() {
        6 => hex.to_string(),
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        _ => return None,
    };
    let rgb = u32::from_str_radix(&expanded, 16).ok()?;
    Some(Color::Rgb(
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    ))
}

pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Util function to shorten home directory to ~.
/// Is used by the path bar in the render function.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = get_home()
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        let mut short = stripped.display().to_string();
        if short.starts_with(MAIN_SEPARATOR) {
            short.remove(0);
        }
        return format!("~{}{}", MAIN_SEPARATOR, short);
    }
    path.display().to_string()
}

/// Checks that the start path exists and is a directory.
///
/// Returns the path as given; resolution to an absolute path happens in the listing.
pub fn validate_start_dir(path: &Path) -> Result<PathBuf, FscError> {
    let meta = std::fs::metadata(path)
        .map_err(|e| FscError::invalid_start(path, format!("does not exist ({e})")))?;
    if !meta.is_dir() {
        return Err(FscError::invalid_start(path, "not a directory"));
    }
    std::fs::read_dir(path)
        .map_err(|e| FscError::invalid_start(path, format!("cannot be read ({e})")))?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::error;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn colors_from_names_and_hex() {
        assert_eq!(parse_color("Cyan"), Color::Cyan);
        assert_eq!(parse_color("default"), Color::Reset);
        assert_eq!(parse_color("#89B4FA"), Color::Rgb(0x89, 0xB4, 0xFA));
        assert_eq!(parse_color("#fff"), Color::Rgb(255, 255, 255));
        assert_eq!(parse_color("#12345"), Color::Reset);
        assert_eq!(parse_color("nope"), Color::Reset);
    }

    #[test]
    fn home_is_shortened() {
        if let Some(home) = get_home() {
            assert_eq!(shorten_home_path(&home), "~");
            let nested = home.join("projects").join("fsc");
            assert_eq!(
                shorten_home_path(&nested),
                format!("~{0}projects{0}fsc", MAIN_SEPARATOR)
            );
        }
    }

    #[test]
    fn start_dir_validation() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        assert_eq!(validate_start_dir(dir.path())?, dir.path());

        let file = dir.path().join("plain.txt");
        File::create(&file)?;
        let err = validate_start_dir(&file).err().ok_or("file accepted as start dir")?;
        assert!(err.to_string().contains("plain.txt"));
        assert!(err.to_string().contains("not a directory"));

        let missing = dir.path().join("missing");
        assert!(matches!(
            validate_start_dir(&missing),
            Err(FscError::InvalidStartPath { .. })
        ));
        Ok(())
    }
}
