//! Session state and the transition function for fsc.
//!
//! [SessionState] is the whole interactive session: the current directory and its listing,
//! the filter query and toggles, the selection, a pending prefix and the exit decision.
//!
//! All input goes through [SessionState::update], which consumes the state and an [Event]
//! and returns the next state plus at most one [Command] for the terminal loop to carry out.
//! The state never reads the clock or the filesystem itself: prefix timeouts come back as
//! [Event::PrefixTimeout] and listings as [Event::ListingReady] or [Event::ListingFailed].

use crate::app::keymap::Keymap;
use crate::config::Config;
use crate::config::general::{DEFAULT_PREFIX_KEY, DEFAULT_PREFIX_TIMEOUT_MS};
use crate::core::filter::{FilterFlags, filter_with_error};
use crate::core::fm::{Entry, Listing};

use crossterm::event::KeyEvent;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What happens once the session ends.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExitAction {
    #[default]
    None,
    OpenEditor(PathBuf),
    SelectFile(PathBuf),
    Quit,
}

impl ExitAction {
    /// True once the session has decided how to end.
    pub fn is_set(&self) -> bool {
        *self != ExitAction::None
    }
}

/// Inputs to [SessionState::update].
#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    PrefixTimeout {
        generation: u64,
    },
    ListingReady {
        request_id: u64,
        listing: Listing,
    },
    ListingFailed {
        request_id: u64,
        path: PathBuf,
        message: String,
    },
    Resize {
        width: u16,
        height: u16,
    },
}

/// Side effects requested by [SessionState::update].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List `path` and answer with a listing event carrying `request_id`.
    LoadDirectory { request_id: u64, path: PathBuf },
    /// Deliver [Event::PrefixTimeout] with `generation` after `delay`.
    StartPrefixTimer { generation: u64, delay: Duration },
    /// End the session.
    Exit(ExitAction),
}

/// The prefix key has been pressed and its command letter is awaited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPrefix {
    text: String,
    generation: u64,
}

impl PendingPrefix {
    pub(super) fn new(prefix_key: char, generation: u64) -> Self {
        PendingPrefix {
            text: prefix_key.to_string(),
            generation,
        }
    }

    pub(super) fn into_text(self) -> String {
        self.text
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A listing that was requested and whose answer is still outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingListing {
    request_id: u64,
    path: PathBuf,
}

/// Startup settings for a session, merged from the config and the command line.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub flags: FilterFlags,
    pub vim_mode: bool,
    pub prefix_key: char,
    pub prefix_timeout: Duration,
    pub keymap: Keymap,
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Self {
        let general = config.general();
        SessionOptions {
            flags: FilterFlags {
                show_hidden: general.show_hidden(),
                dirs_only: general.dirs_only(),
                files_only: general.files_only() && !general.dirs_only(),
                regex_mode: general.regex_mode(),
            },
            vim_mode: general.vim_mode(),
            prefix_key: general.prefix_key(),
            prefix_timeout: general.prefix_timeout(),
            keymap: Keymap::from_keys(config.keys()),
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            flags: FilterFlags::default(),
            vim_mode: false,
            prefix_key: DEFAULT_PREFIX_KEY,
            prefix_timeout: Duration::from_millis(DEFAULT_PREFIX_TIMEOUT_MS),
            keymap: Keymap::default(),
        }
    }
}

/// The complete state of one interactive session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(super) keymap: Keymap,
    pub(super) prefix_key: char,
    pub(super) prefix_timeout: Duration,

    pub(super) current_dir: PathBuf,
    pub(super) all_entries: Vec<Entry>,
    pub(super) visible_entries: Vec<Entry>,
    pub(super) selected: usize,

    pub(super) query: String,
    pub(super) flags: FilterFlags,
    pub(super) vim_mode: bool,
    pub(super) show_help: bool,

    pub(super) pending_prefix: Option<PendingPrefix>,
    pub(super) prefix_generation: u64,
    pending_listing: Option<PendingListing>,
    request_counter: u64,

    pub(super) exit_action: ExitAction,
    size: (u16, u16),
    pub(super) notice: Option<String>,
    filter_error: Option<String>,
}

impl SessionState {
    /// Creates an empty session for `start_dir` along with the command that loads it.
    ///
    /// The entry sets stay empty until the matching [Event::ListingReady] arrives.
    pub fn new(start_dir: impl Into<PathBuf>, options: SessionOptions) -> (Self, Command) {
        let mut state = SessionState {
            keymap: options.keymap,
            prefix_key: options.prefix_key,
            prefix_timeout: options.prefix_timeout,
            current_dir: start_dir.into(),
            all_entries: Vec::new(),
            visible_entries: Vec::new(),
            selected: 0,
            query: String::new(),
            flags: options.flags,
            vim_mode: options.vim_mode,
            show_help: false,
            pending_prefix: None,
            prefix_generation: 0,
            pending_listing: None,
            request_counter: 0,
            exit_action: ExitAction::None,
            size: (0, 0),
            notice: None,
            filter_error: None,
        };
        let dir = state.current_dir.clone();
        let cmd = state.request_listing(dir);
        (state, cmd)
    }

    /// Applies one event and returns the next state and the command to run, if any.
    ///
    /// Once an exit action is set the state is final and further events are ignored.
    pub fn update(mut self, event: Event) -> (Self, Option<Command>) {
        if self.exit_action.is_set() {
            return (self, None);
        }

        let cmd = match event {
            Event::Key(key) => {
                self.notice = None;
                self.handle_key(key)
            }
            Event::PrefixTimeout { generation } => {
                self.handle_prefix_timeout(generation);
                None
            }
            Event::ListingReady {
                request_id,
                listing,
            } => {
                self.handle_listing_ready(request_id, listing);
                None
            }
            Event::ListingFailed {
                request_id,
                path,
                message,
            } => {
                self.handle_listing_failed(request_id, &path, message);
                None
            }
            Event::Resize { width, height } => {
                self.size = (width, height);
                None
            }
        };
        (self, cmd)
    }

    // Accessors

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn all_entries(&self) -> &[Entry] {
        &self.all_entries
    }

    pub fn visible_entries(&self) -> &[Entry] {
        &self.visible_entries
    }

    pub fn selected_idx(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.visible_entries.get(self.selected)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn flags(&self) -> FilterFlags {
        self.flags
    }

    pub fn vim_mode(&self) -> bool {
        self.vim_mode
    }

    pub fn regex_mode(&self) -> bool {
        self.flags.regex_mode
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn pending_prefix(&self) -> Option<&PendingPrefix> {
        self.pending_prefix.as_ref()
    }

    pub fn prefix_key(&self) -> char {
        self.prefix_key
    }

    pub fn exit_action(&self) -> &ExitAction {
        &self.exit_action
    }

    /// True while a requested listing has not been answered.
    pub fn is_loading(&self) -> bool {
        self.pending_listing.is_some()
    }

    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn filter_error(&self) -> Option<&str> {
        self.filter_error.as_deref()
    }

    // Listing requests and responses

    /// Records `path` as the pending listing and returns the command that loads it.
    /// A newer request supersedes any older one still in flight.
    pub(super) fn request_listing(&mut self, path: PathBuf) -> Command {
        self.request_counter += 1;
        let request_id = self.request_counter;
        log::debug!("requesting listing #{request_id} of {}", path.display());
        self.pending_listing = Some(PendingListing {
            request_id,
            path: path.clone(),
        });
        Command::LoadDirectory { request_id, path }
    }

    fn is_pending_request(&self, request_id: u64) -> bool {
        self.pending_listing
            .as_ref()
            .is_some_and(|p| p.request_id == request_id)
    }

    fn handle_listing_ready(&mut self, request_id: u64, listing: Listing) {
        if !self.is_pending_request(request_id) {
            log::debug!("discarding stale listing #{request_id}");
            return;
        }
        self.pending_listing = None;
        log::info!(
            "entered {} ({} entries)",
            listing.path.display(),
            listing.entries.len()
        );
        self.current_dir = listing.path;
        self.all_entries = listing.entries;
        self.query.clear();
        self.selected = 0;
        self.refilter();
    }

    fn handle_listing_failed(&mut self, request_id: u64, path: &Path, message: String) {
        if !self.is_pending_request(request_id) {
            log::debug!("discarding stale failure #{request_id} for {}", path.display());
            return;
        }
        if let Some(pending) = self.pending_listing.take() {
            log::warn!("listing {} failed: {message}", pending.path.display());
        }
        self.notice = Some(message);
    }

    // Filtering

    /// Recomputes the visible set from the listing, query and flags, clamping the selection.
    pub(super) fn refilter(&mut self) {
        let (visible, error) = filter_with_error(&self.all_entries, &self.query, self.flags);
        self.visible_entries = visible;
        self.filter_error = error.map(|e| e.to_string());
        self.selected = match self.visible_entries.len() {
            0 => 0,
            len => self.selected.min(len - 1),
        };
    }

    /// Recomputes the visible set, keeping the selected entry if it is still visible.
    pub(super) fn refilter_keep_selection(&mut self) {
        let previous = self.selected_entry().map(|e| e.path().to_path_buf());
        self.refilter();
        self.selected = previous
            .and_then(|p| self.visible_entries.iter().position(|e| e.path() == p))
            .unwrap_or(0);
    }

    /// Appends typed text to the query. The selection resets to the first match.
    pub(super) fn push_query(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.query.push_str(text);
        self.selected = 0;
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::SystemTime;

    fn entry(name: &str, dir: bool) -> Entry {
        let flags = if dir { Entry::IS_DIR } else { 0 };
        Entry::new(
            name,
            PathBuf::from("/base").join(name),
            flags,
            0,
            Some(SystemTime::UNIX_EPOCH),
        )
    }

    fn loaded(names: &[(&str, bool)]) -> SessionState {
        let (state, cmd) = SessionState::new("/base", SessionOptions::default());
        let Command::LoadDirectory { request_id, path } = cmd else {
            panic!("initial command must load the start directory");
        };
        let listing = Listing {
            path,
            entries: names.iter().map(|(n, d)| entry(n, *d)).collect(),
        };
        let (state, _) = state.update(Event::ListingReady {
            request_id,
            listing,
        });
        state
    }

    #[test]
    fn starts_empty_and_requests_listing() {
        let (state, cmd) = SessionState::new("/base", SessionOptions::default());
        assert!(state.visible_entries().is_empty());
        assert!(state.is_loading());
        assert_eq!(
            cmd,
            Command::LoadDirectory {
                request_id: 1,
                path: PathBuf::from("/base")
            }
        );
    }

    #[test]
    fn listing_populates_sorted_visible_set() {
        let state = loaded(&[("b.txt", false), ("a.txt", false), (".hidden", false)]);
        let names: Vec<_> = state.visible_entries().iter().map(|e| e.name()).collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
        assert_eq!(state.all_entries().len(), 3);
        assert!(!state.is_loading());
    }

    #[test]
    fn stale_listing_is_discarded() {
        let (state, _) = SessionState::new("/base", SessionOptions::default());
        let (state, _) = state.update(Event::ListingReady {
            request_id: 42,
            listing: Listing {
                path: PathBuf::from("/elsewhere"),
                entries: vec![entry("x", false)],
            },
        });
        assert_eq!(state.current_dir(), Path::new("/base"));
        assert!(state.all_entries().is_empty());
        assert!(state.is_loading());
    }

    #[test]
    fn failed_listing_sets_notice_only() {
        let mut state = loaded(&[("a.txt", false)]);
        let cmd = state.request_listing(PathBuf::from("/locked"));
        let Command::LoadDirectory { request_id, path } = cmd else {
            panic!("expected a load command");
        };
        let (state, _) = state.update(Event::ListingFailed {
            request_id,
            path,
            message: "permission denied".into(),
        });
        assert_eq!(state.current_dir(), Path::new("/base"));
        assert_eq!(state.visible_entries().len(), 1);
        assert_eq!(state.notice(), Some("permission denied"));
        assert!(!state.is_loading());
    }

    #[test]
    fn stale_failure_keeps_pending_request() {
        let mut state = loaded(&[("a.txt", false)]);
        let Command::LoadDirectory { request_id, .. } =
            state.request_listing(PathBuf::from("/next"))
        else {
            panic!("expected a load command");
        };
        let (state, _) = state.update(Event::ListingFailed {
            request_id: request_id - 1,
            path: PathBuf::from("/base"),
            message: "gone".into(),
        });
        assert!(state.is_loading());
        assert!(state.notice().is_none());

        let (state, _) = state.update(Event::ListingFailed {
            request_id,
            path: PathBuf::from("/next"),
            message: "gone".into(),
        });
        assert!(!state.is_loading());
        assert_eq!(state.notice(), Some("gone"));
    }

    #[test]
    fn resize_is_recorded() {
        let state = loaded(&[]);
        let (state, cmd) = state.update(Event::Resize {
            width: 80,
            height: 24,
        });
        assert_eq!(state.size(), (80, 24));
        assert!(cmd.is_none());
    }

    #[test]
    fn options_from_config_prefer_dirs_only() -> Result<(), Box<dyn std::error::Error>> {
        let cfg = Config::parse("[general]\ndirs_only = true\nfiles_only = true\nvim_mode = true")?;
        let opts = SessionOptions::from_config(&cfg);
        assert!(opts.flags.dirs_only);
        assert!(!opts.flags.files_only);
        assert!(opts.vim_mode);
        Ok(())
    }
}
