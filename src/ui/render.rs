//! UI renderer implementation.
//!
//! Contains the top-level [render] entry point used by the terminal loop. It reads the
//! session state and config and produces widgets, without changing either.
//!
//! Layout, top to bottom: title, path bar, separator, entry list, filter line, status
//! line and the key hint footer. The help overlay is drawn on top when enabled.

use crate::app::SessionState;
use crate::config::Config;
use crate::ui::widgets;
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListState, Paragraph},
};

pub const TITLE: &str = "fsc - File Search CLI";
pub const EMPTY_FILTER_TEXT: &str = "No entries match filter";
const FOOTER_TEXT: &str = "↑/↓ move  enter/→ open  ← parent  esc quit";

/// Render function which renders the entire terminal UI for fsc on each frame.
pub fn render(frame: &mut Frame, state: &SessionState, config: &Config) {
    let area = frame.area();
    let theme = config.theme();
    let footer_height = u16::from(config.display().show_footer());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(footer_height),
        ])
        .split(area);

    let width = area.width as usize;

    frame.render_widget(
        Paragraph::new(widgets::fit_to_width(&format!(" {TITLE}"), width))
            .style(theme.title_style()),
        chunks[0],
    );

    let path = shorten_home_path(state.current_dir());
    frame.render_widget(
        Paragraph::new(widgets::fit_to_width(&format!(" {path}"), width))
            .style(theme.path_style()),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new("─".repeat(width)).style(theme.separator_style()),
        chunks[2],
    );

    render_entries(frame, state, config, chunks[3]);
    frame.render_widget(filter_line(state, config, width), chunks[4]);
    frame.render_widget(status_line(state, config), chunks[5]);

    if config.display().show_footer() {
        frame.render_widget(
            Paragraph::new(widgets::fit_to_width(FOOTER_TEXT, width)).style(theme.help_style()),
            chunks[6],
        );
    }

    if state.show_help() {
        widgets::draw_help(frame, area, theme, state.prefix_key());
    }
}

fn render_entries(frame: &mut Frame, state: &SessionState, config: &Config, area: Rect) {
    let theme = config.theme();

    if state.visible_entries().is_empty() {
        let text = if state.is_loading() {
            "Loading..."
        } else {
            EMPTY_FILTER_TEXT
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {text}"),
                theme.help_style(),
            ))),
            area,
        );
        return;
    }

    let width = area.width as usize;
    let selected = state.selected_idx();
    let items: Vec<_> = state
        .visible_entries()
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            widgets::entry_row(entry, width, idx == selected, config.display(), theme)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(selected));

    frame.render_stateful_widget(
        List::new(items).highlight_style(Style::default()),
        area,
        &mut list_state,
    );
}

/// `Filter: <query>_`, the pending prefix and the mode badges on the right.
fn filter_line<'a>(state: &SessionState, config: &Config, width: usize) -> Paragraph<'a> {
    let theme = config.theme();
    let flags = state.flags();

    let mut badges = Vec::new();
    for (on, label) in [
        (flags.regex_mode, "regex"),
        (state.vim_mode(), "vim"),
        (flags.show_hidden, "hidden"),
        (flags.dirs_only, "dirs"),
        (flags.files_only, "files"),
    ] {
        if on {
            badges.push(format!("[{label}]"));
        }
    }
    let badges = badges.join(" ");

    let pending = state
        .pending_prefix()
        .map(|p| format!(" {}…", p.text()))
        .unwrap_or_default();
    let left = format!(" Filter: {}_{pending}", state.query());
    let left_width = width.saturating_sub(badges.chars().count() + 1);

    Paragraph::new(Line::from(vec![
        Span::styled(widgets::fit_to_width(&left, left_width), theme.filter_style()),
        Span::styled(format!("{badges} "), theme.help_style()),
    ]))
}

/// Notices and invalid pattern messages take the line, otherwise the entry count.
fn status_line<'a>(state: &SessionState, config: &Config) -> Paragraph<'a> {
    let theme = config.theme();
    let line = if let Some(notice) = state.notice() {
        Line::from(Span::styled(format!(" {notice}"), theme.error_style()))
    } else if let Some(err) = state.filter_error() {
        Line::from(Span::styled(format!(" {err}"), theme.error_style()))
    } else {
        let shown = state.visible_entries().len();
        let total = state.all_entries().len();
        Line::from(Span::styled(
            format!(" {shown}/{total} entries"),
            theme.help_style(),
        ))
    };
    Paragraph::new(line)
}
