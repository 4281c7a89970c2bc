//! UI-related tests for fsc
//!
//! These render full frames into a ratatui TestBackend and check the visible text.
//! Temporary directories provide the listings and are cleaned up after the tests complete.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fsc::app::{Command, Event, SessionOptions, SessionState};
use fsc::config::Config;
use fsc::core::list_dir;
use fsc::ui::{self, widgets};
use ratatui::{Terminal, backend::TestBackend};
use std::error;
use std::fs::{self, File};
use std::path::Path;
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn error::Error>>;

fn loaded(dir: &Path) -> Result<SessionState, Box<dyn error::Error>> {
    let (state, cmd) = SessionState::new(dir, SessionOptions::default());
    let Command::LoadDirectory { request_id, path } = cmd else {
        return Err("no initial listing request".into());
    };
    let (state, _) = state.update(Event::ListingReady {
        request_id,
        listing: list_dir(&path)?,
    });
    Ok(state)
}

fn press(state: SessionState, c: char) -> SessionState {
    state
        .update(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::NONE,
        )))
        .0
}

fn draw(state: &SessionState, config: &Config) -> Result<String, Box<dyn error::Error>> {
    let mut terminal = Terminal::new(TestBackend::new(80, 20))?;
    terminal.draw(|f| ui::render(f, state, config))?;

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    Ok(text)
}

#[test]
fn test_ui_fit_to_width_is_exact() {
    let width = 10;
    let cases = ["short.txt", "very_long_filename.txt", "🦀_crab.rs", "\t_tab"];

    for input in cases {
        let result = widgets::fit_to_width(input, width);
        let actual = unicode_width::UnicodeWidthStr::width(result.as_str());

        assert_eq!(
            actual, width,
            "Failed to produce exact width for input: '{}'. Result was: '{}'",
            input, result
        );
        assert!(!result.chars().any(|c| c.is_control()));
    }
}

#[test]
fn test_frame_shows_title_entries_and_filter() -> TestResult {
    let tmp = tempdir()?;
    File::create(tmp.path().join("alpha.txt"))?;
    fs::create_dir(tmp.path().join("beta"))?;

    let config = Config::default();
    let state = loaded(tmp.path())?;
    let screen = draw(&state, &config)?;

    assert!(screen.contains("fsc - File Search CLI"));
    assert!(screen.contains("alpha.txt"));
    assert!(screen.contains("beta"));
    assert!(screen.contains("Filter: _"));
    assert!(screen.contains("2/2 entries"));
    Ok(())
}

#[test]
fn test_frame_shows_empty_filter_message_and_query() -> TestResult {
    let tmp = tempdir()?;
    File::create(tmp.path().join("alpha.txt"))?;

    let config = Config::default();
    let state = press(press(loaded(tmp.path())?, 'z'), 'q');
    let screen = draw(&state, &config)?;

    assert!(screen.contains("No entries match filter"));
    assert!(screen.contains("Filter: zq_"));
    assert!(!screen.contains("alpha.txt"));
    Ok(())
}

#[test]
fn test_frame_shows_badges_and_pending_prefix() -> TestResult {
    let tmp = tempdir()?;
    let config = Config::default();

    let state = press(press(loaded(tmp.path())?, '/'), 'r');
    let state = press(state, '/');
    let screen = draw(&state, &config)?;

    assert!(screen.contains("[regex]"));
    assert!(screen.contains("Filter: _ /"));
    Ok(())
}

#[test]
fn test_help_overlay_lists_prefix_commands() -> TestResult {
    let tmp = tempdir()?;
    let config = Config::default();

    let state = press(press(loaded(tmp.path())?, '/'), '?');
    assert!(state.show_help());
    let screen = draw(&state, &config)?;

    assert!(screen.contains("Help"));
    assert!(screen.contains("/q"));
    assert!(screen.contains("quit"));
    Ok(())
}

#[test]
fn test_plain_markers_without_icons() -> TestResult {
    let tmp = tempdir()?;
    fs::create_dir(tmp.path().join("docs"))?;

    let config = Config::parse("[display]\nicons = false\nshow_size = false")?;
    let screen = draw(&loaded(tmp.path())?, &config)?;

    assert!(screen.contains("docs/"));
    Ok(())
}
