//! Terminal rendering and event loop for fsc.
//!
//! Handles setup/teardown of raw mode and the alternate screen, redraws, and feeds
//! keypresses, resizes, prefix timeouts and worker responses into the session.
//! Commands returned by the session are carried out here.
//!
//! The interface is drawn on stderr. stdout only ever receives the selected path, so
//! `vim "$(fsc)"` and `cd "$(fsc)"` capture nothing else.

use crate::app::{Command, Event, SessionState};
use crate::config::Config;
use crate::core::worker::{WorkerResponse, WorkerTask, Workers};
use crate::ui;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Delay between input polls. Also bounds how late a prefix timeout fires.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Initializes the terminal in raw mode and alternate screen and runs the main event loop.
///
/// Blocks until the session sets an exit action and returns the final state.
/// The terminal is restored before returning, also when the loop fails.
pub fn run_terminal(
    session: SessionState,
    initial: Command,
    config: &Config,
    workers: &Workers,
) -> io::Result<SessionState> {
    enable_raw_mode()?;
    let mut out = tui_writer();
    enter_screen(&mut out)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(out))?;

    let result = event_loop(&mut terminal, session, initial, config, workers);

    disable_raw_mode()?;
    leave_screen(terminal.backend_mut())?;
    result
}

/// The stream the interface is drawn on.
fn tui_writer() -> io::Stderr {
    io::stderr()
}

fn enter_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, EnterAlternateScreen, Hide)
}

fn leave_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, Show)
}

/// Best-effort restore of the terminal, for the panic hook.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = leave_screen(&mut tui_writer());
}

/// The one prefix timer that can be armed at a time. Arming a new one replaces it.
struct PrefixTimer {
    generation: u64,
    deadline: Instant,
}

/// Carries out the session's commands against the worker and the prefix timer.
struct Driver<'a> {
    workers: &'a Workers,
    timer: Option<PrefixTimer>,
}

impl Driver<'_> {
    fn execute(&mut self, cmd: Command) {
        log::debug!("command {cmd:?}");
        match cmd {
            Command::LoadDirectory { request_id, path } => {
                if let Err(e) = self
                    .workers
                    .io_tx()
                    .send(WorkerTask::LoadDirectory { path, request_id })
                {
                    log::error!("listing worker is gone: {e}");
                }
            }
            Command::StartPrefixTimer { generation, delay } => {
                self.timer = Some(PrefixTimer {
                    generation,
                    deadline: Instant::now() + delay,
                });
            }
            Command::Exit(_) => {}
        }
    }

    fn dispatch(&mut self, session: SessionState, event: Event) -> SessionState {
        let (session, cmd) = session.update(event);
        if let Some(cmd) = cmd {
            self.execute(cmd);
        }
        session
    }

    /// Events that became due without user input: an expired prefix timer and
    /// any finished listings.
    fn due_events(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        let now = Instant::now();
        if let Some(timer) = self.timer.take_if(|t| now >= t.deadline) {
            events.push(Event::PrefixTimeout {
                generation: timer.generation,
            });
        }
        while let Ok(resp) = self.workers.response_rx().try_recv() {
            events.push(match resp {
                WorkerResponse::DirectoryLoaded {
                    listing,
                    request_id,
                } => Event::ListingReady {
                    request_id,
                    listing,
                },
                WorkerResponse::DirectoryFailed {
                    path,
                    message,
                    request_id,
                } => Event::ListingFailed {
                    request_id,
                    path,
                    message,
                },
            });
        }
        events
    }
}

/// Main event loop of fsc: draws the UI, polls for events and dispatches them to the session.
/// Returns once an exit action is set.
fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    mut session: SessionState,
    initial: Command,
    config: &Config,
    workers: &Workers,
) -> io::Result<SessionState>
where
    io::Error: From<<B as Backend>::Error>,
{
    let mut driver = Driver {
        workers,
        timer: None,
    };
    driver.execute(initial);

    let size = terminal.size()?;
    session = driver.dispatch(
        session,
        Event::Resize {
            width: size.width,
            height: size.height,
        },
    );
    let mut changed = true;

    loop {
        for ev in driver.due_events() {
            session = driver.dispatch(session, ev);
            changed = true;
        }

        if changed {
            terminal.draw(|f| ui::render(f, &session, config))?;
            changed = false;
        }

        if session.exit_action().is_set() {
            break;
        }

        // Event Polling
        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                event::Event::Key(key) if key.kind == KeyEventKind::Press => {
                    session = driver.dispatch(session, Event::Key(key));
                    changed = true;
                }
                event::Event::Resize(width, height) => {
                    session = driver.dispatch(session, Event::Resize { width, height });
                    changed = true;
                }
                _ => {}
            }
        }
    }
    Ok(session)
}
