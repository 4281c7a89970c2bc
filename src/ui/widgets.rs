//! Small building blocks used by the renderer: entry rows, text fitting, popups and the
//! help overlay.

use crate::app::PREFIX_COMMANDS;
use crate::config::{Display, Theme};
use crate::core::Entry;

use chrono::{DateTime, Local};
use humansize::{DECIMAL, format_size};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, ListItem, Paragraph},
};
use std::time::SystemTime;
use unicode_width::UnicodeWidthChar;

/// Width of the size column, right aligned.
const SIZE_WIDTH: usize = 9;
/// Width of "YYYY-MM-DD HH:MM".
const TIME_WIDTH: usize = 16;

/// Formats the file size into a human-readable string, "-" for directories.
pub fn format_file_size(size: u64, is_dir: bool) -> String {
    if is_dir {
        "-".into()
    } else {
        format_size(size, DECIMAL)
    }
}

/// Formats the modification time, "-" if unknown.
pub fn format_file_time(modified: Option<SystemTime>) -> String {
    modified
        .map(|mtime| {
            let dt: DateTime<Local> = DateTime::from(mtime);
            dt.format("%Y-%m-%d %H:%M").to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

/// Fits `line` into exactly `width` columns.
///
/// Control characters are dropped, tabs expand to the next multiple of 4, wide characters
/// count double, and the result is truncated or padded with spaces.
pub fn fit_to_width(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut current_w = 0;

    for c in line.chars() {
        if c == '\t' {
            let space_count = 4 - (current_w % 4);
            if current_w + space_count > width {
                break;
            }
            out.push_str(&" ".repeat(space_count));
            current_w += space_count;
            continue;
        }

        if c.is_control() {
            continue;
        }

        let w = c.width().unwrap_or(0);
        if current_w + w > width {
            break;
        }

        out.push(c);
        current_w += w;
    }

    if current_w < width {
        out.push_str(&" ".repeat(width - current_w));
    }
    out
}

/// Builds one row of the entry list: glyph or marker, name, then the optional size and
/// time columns flush right.
pub fn entry_row<'a>(
    entry: &Entry,
    width: usize,
    is_selected: bool,
    display: &Display,
    theme: &Theme,
) -> ListItem<'a> {
    let (glyph, marker) = match (display.icons(), entry.is_dir()) {
        (true, true) => ("📁 ", ""),
        (true, false) => ("📄 ", ""),
        (false, true) => ("", "/"),
        (false, false) => ("", ""),
    };
    let link = if entry.is_symlink() { " ->" } else { "" };
    let name = format!("{glyph}{}{marker}{link}", entry.name());

    let mut columns = String::new();
    if display.show_size() {
        let size = format_file_size(entry.size(), entry.is_dir());
        columns.push_str(&format!(" {size:>SIZE_WIDTH$}"));
    }
    if display.show_modified() {
        let time = format_file_time(entry.modified());
        columns.push_str(&format!("  {time:<TIME_WIDTH$}"));
    }
    // leave room for the name before showing columns
    if columns.chars().count() + 8 > width {
        columns.clear();
    }
    let name_width = width.saturating_sub(columns.chars().count());

    let style = if is_selected {
        theme.selection_style()
    } else if entry.is_dir() {
        theme.directory_style()
    } else if entry.is_executable() {
        theme.executable_style()
    } else {
        Style::default()
    };

    let dim = if is_selected {
        style
    } else {
        theme.separator_style()
    };

    ListItem::new(Line::from(vec![
        Span::styled(fit_to_width(&name, name_width), style),
        Span::styled(columns, dim),
    ]))
}

/// Returns a centered rect taking `percent_x` by `percent_y` of `area`.
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Draws the help overlay listing the prefix commands and the default bindings.
pub fn draw_help(frame: &mut Frame, area: Rect, theme: &Theme, prefix_key: char) {
    let popup = popup_area(area, 60, 70);
    frame.render_widget(Clear, popup);

    let mut commands: Vec<_> = PREFIX_COMMANDS.entries().collect();
    commands.sort_by_key(|(letter, _)| **letter);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Press {prefix_key} then:"),
            theme.title_style(),
        )),
        Line::default(),
    ];
    lines.extend(commands.into_iter().map(|(letter, cmd)| {
        Line::from(vec![
            Span::styled(format!("  {prefix_key}{letter}  "), theme.filter_style()),
            Span::raw(cmd.describe()),
        ])
    }));
    lines.push(Line::default());
    for (keys, what) in [
        ("up/down", "move selection"),
        ("enter/right", "open directory or pick file"),
        ("left", "parent directory"),
        ("backspace", "erase filter character"),
        ("esc/ctrl+c", "quit"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("  {keys:<12}"), theme.filter_style()),
            Span::raw(what),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Anything else is typed into the filter.",
        theme.help_style(),
    )));

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(theme.separator_style());
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit_to_width("abc", 5), "abc  ");
        assert_eq!(fit_to_width("abcdef", 4), "abcd");
        assert_eq!(fit_to_width("a\tb", 6), "a   b ");
        assert_eq!(fit_to_width("a\u{7}b", 3), "ab ");
    }

    #[test]
    fn fit_counts_wide_chars() {
        // each CJK char takes two columns
        assert_eq!(fit_to_width("日本語", 5), "日本 ");
    }

    #[test]
    fn size_and_time_formatting() {
        let size = format_file_size(1500, false);
        assert!(size.starts_with("1.5") && size.ends_with("kB"), "{size}");
        assert_eq!(format_file_size(1500, true), "-");
        assert_eq!(format_file_time(None), "-");
        assert_eq!(format_file_time(Some(SystemTime::now())).len(), TIME_WIDTH);
    }

    #[test]
    fn popup_is_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = popup_area(area, 60, 70);
        assert!(popup.width < area.width && popup.height < area.height);
        assert!(popup.x > 0 && popup.y > 0);
        assert!(popup.right() < area.right() && popup.bottom() < area.bottom());
    }
}
