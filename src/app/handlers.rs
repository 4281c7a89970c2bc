//! Key handling for [SessionState].
//!
//! Dispatch order for a key event:
//! 1. the prefix key with no prefix pending starts one
//! 2. any key while a prefix is pending completes it
//! 3. bound keys (quit, movement, activate, parent, erase), vim keys only in vim mode
//! 4. any other printable character is appended to the filter query

use crate::app::keymap::{
    Action, NavAction, PREFIX_COMMANDS, PrefixCommand, SystemAction, printable_char,
};
use crate::app::state::{Command, ExitAction, PendingPrefix, SessionState};
use crate::core::fm::parent_dir;

use crossterm::event::KeyEvent;

impl SessionState {
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if let Some(pending) = self.pending_prefix.take() {
            return self.complete_prefix(pending, &key);
        }

        if self.is_prefix_key(&key) {
            return Some(self.start_prefix());
        }

        if let Some(action) = self.keymap.lookup(&key, self.vim_mode) {
            return match action {
                Action::System(SystemAction::Quit) => self.exit(ExitAction::Quit),
                Action::Nav(nav) => self.handle_nav(nav),
            };
        }

        if let Some(c) = printable_char(&key) {
            self.push_query(c.encode_utf8(&mut [0; 4]));
        }
        None
    }

    fn is_prefix_key(&self, key: &KeyEvent) -> bool {
        printable_char(key) == Some(self.prefix_key)
    }

    fn start_prefix(&mut self) -> Command {
        self.prefix_generation += 1;
        let generation = self.prefix_generation;
        self.pending_prefix = Some(PendingPrefix::new(self.prefix_key, generation));
        Command::StartPrefixTimer {
            generation,
            delay: self.prefix_timeout,
        }
    }

    /// Resolves a pending prefix with the key that followed it.
    ///
    /// A command letter runs its command. Any other printable key is typed together with
    /// the prefix text, and a non-printable key (Esc, arrows) types the prefix alone.
    fn complete_prefix(&mut self, pending: PendingPrefix, key: &KeyEvent) -> Option<Command> {
        let letter = printable_char(key);
        if let Some(cmd) = letter.and_then(|c| PREFIX_COMMANDS.get(&c)).copied() {
            log::debug!("prefix command {cmd:?}");
            return self.run_prefix_command(cmd);
        }

        let mut text = pending.into_text();
        if let Some(c) = letter {
            text.push(c);
        }
        self.push_query(&text);
        None
    }

    pub(super) fn handle_prefix_timeout(&mut self, generation: u64) {
        match self.pending_prefix.take() {
            Some(pending) if pending.generation() == generation => {
                self.push_query(pending.text());
            }
            other => self.pending_prefix = other,
        }
    }

    fn run_prefix_command(&mut self, cmd: PrefixCommand) -> Option<Command> {
        match cmd {
            PrefixCommand::OpenEditor => match self.selected_entry() {
                Some(entry) => {
                    let path = entry.path().to_path_buf();
                    return self.exit(ExitAction::OpenEditor(path));
                }
                None => self.notice = Some("nothing selected to open".into()),
            },
            PrefixCommand::PrintPath => {
                let path = self
                    .selected_entry()
                    .map(|e| e.path().to_path_buf())
                    .unwrap_or_else(|| self.current_dir.clone());
                return self.exit(ExitAction::SelectFile(path));
            }
            PrefixCommand::Quit => return self.exit(ExitAction::Quit),
            PrefixCommand::ToggleVim => {
                self.vim_mode = !self.vim_mode;
            }
            PrefixCommand::ToggleHelp => {
                self.show_help = !self.show_help;
            }
            PrefixCommand::ToggleRegex => {
                self.flags.regex_mode = !self.flags.regex_mode;
                self.refilter_keep_selection();
            }
            PrefixCommand::ToggleHidden => {
                self.flags.show_hidden = !self.flags.show_hidden;
                self.refilter_keep_selection();
            }
            PrefixCommand::ToggleDirsOnly => {
                self.flags.dirs_only = !self.flags.dirs_only;
                if self.flags.dirs_only {
                    self.flags.files_only = false;
                }
                self.refilter_keep_selection();
            }
            PrefixCommand::ToggleFilesOnly => {
                self.flags.files_only = !self.flags.files_only;
                if self.flags.files_only {
                    self.flags.dirs_only = false;
                }
                self.refilter_keep_selection();
            }
        }
        None
    }

    fn handle_nav(&mut self, nav: NavAction) -> Option<Command> {
        match nav {
            NavAction::GoUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            NavAction::GoDown => {
                if self.selected + 1 < self.visible_entries.len() {
                    self.selected += 1;
                }
                None
            }
            NavAction::Activate => {
                let entry = self.selected_entry()?;
                let path = entry.path().to_path_buf();
                if entry.is_dir() {
                    Some(self.request_listing(path))
                } else {
                    self.exit(ExitAction::SelectFile(path))
                }
            }
            NavAction::GoParent => {
                let parent = parent_dir(&self.current_dir);
                Some(self.request_listing(parent))
            }
            NavAction::Erase => {
                if self.query.pop().is_some() {
                    self.selected = 0;
                    self.refilter();
                }
                None
            }
        }
    }

    fn exit(&mut self, action: ExitAction) -> Option<Command> {
        log::info!("session ending with {action:?}");
        self.exit_action = action.clone();
        Some(Command::Exit(action))
    }
}

#[cfg(test)]
mod tests {
    use crate::app::state::{Event, SessionOptions};
    use crate::core::fm::{Entry, Listing};

    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::path::PathBuf;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ch(c: char) -> Event {
        key(KeyCode::Char(c))
    }

    fn session(names: &[(&str, bool)]) -> SessionState {
        let (state, cmd) = SessionState::new("/base", SessionOptions::default());
        let Command::LoadDirectory { request_id, path } = cmd else {
            panic!("expected initial load");
        };
        let entries = names
            .iter()
            .map(|(n, d)| {
                let flags = if *d { Entry::IS_DIR } else { 0 };
                Entry::new(*n, PathBuf::from("/base").join(n), flags, 0, None)
            })
            .collect();
        state
            .update(Event::ListingReady {
                request_id,
                listing: Listing { path, entries },
            })
            .0
    }

    fn feed(mut state: SessionState, events: Vec<Event>) -> SessionState {
        for ev in events {
            state = state.update(ev).0;
        }
        state
    }

    #[test]
    fn typing_filters() {
        let state = session(&[("apple", false), ("banana", false), ("cherry", false)]);
        let state = feed(state, vec![ch('a'), ch('n')]);
        assert_eq!(state.query(), "an");
        let names: Vec<_> = state.visible_entries().iter().map(|e| e.name()).collect();
        assert_eq!(names, ["banana"]);
    }

    #[test]
    fn prefix_starts_timer() {
        let state = session(&[]);
        let (state, cmd) = state.update(ch('/'));
        assert_eq!(state.pending_prefix().map(|p| p.text()), Some("/"));
        assert!(matches!(
            cmd,
            Some(Command::StartPrefixTimer { generation: 1, .. })
        ));
        assert_eq!(state.query(), "");
    }

    #[test]
    fn unknown_letter_after_prefix_is_typed() {
        let state = session(&[("x/y", false)]);
        let state = feed(state, vec![ch('/'), ch('x')]);
        assert_eq!(state.query(), "/x");
        assert!(state.pending_prefix().is_none());
    }

    #[test]
    fn double_prefix_types_both() {
        let state = feed(session(&[]), vec![ch('/'), ch('/')]);
        assert_eq!(state.query(), "//");
    }

    #[test]
    fn esc_during_prefix_flushes_without_quitting() {
        let state = feed(session(&[]), vec![ch('/'), key(KeyCode::Esc)]);
        assert_eq!(state.query(), "/");
        assert_eq!(state.exit_action(), &ExitAction::None);
    }

    #[test]
    fn timeout_flushes_only_current_generation() {
        let state = feed(session(&[]), vec![ch('/')]);
        let state = feed(state, vec![Event::PrefixTimeout { generation: 99 }]);
        assert!(state.pending_prefix().is_some());
        let state = feed(state, vec![Event::PrefixTimeout { generation: 1 }]);
        assert!(state.pending_prefix().is_none());
        assert_eq!(state.query(), "/");
    }

    #[test]
    fn prefix_q_quits() {
        let state = session(&[("a", false)]);
        let (state, cmd) = feed(state, vec![ch('a'), ch('/')]).update(ch('q'));
        assert_eq!(cmd, Some(Command::Exit(ExitAction::Quit)));
        assert_eq!(state.exit_action(), &ExitAction::Quit);
        assert_eq!(state.query(), "a");
    }

    #[test]
    fn prefix_e_opens_selected_or_notices() {
        let empty = feed(session(&[]), vec![ch('/'), ch('e')]);
        assert_eq!(empty.exit_action(), &ExitAction::None);
        assert!(empty.notice().is_some());

        let state = feed(session(&[("notes.md", false)]), vec![ch('/'), ch('e')]);
        assert_eq!(
            state.exit_action(),
            &ExitAction::OpenEditor(PathBuf::from("/base/notes.md"))
        );
    }

    #[test]
    fn prefix_p_prints_current_dir_when_empty() {
        let state = feed(session(&[]), vec![ch('/'), ch('p')]);
        assert_eq!(
            state.exit_action(),
            &ExitAction::SelectFile(PathBuf::from("/base"))
        );
    }

    #[test]
    fn toggles_keep_selection() {
        let state = session(&[("a", false), ("b", false), (".c", false)]);
        let state = feed(state, vec![key(KeyCode::Down)]);
        assert_eq!(state.selected_entry().map(|e| e.name()), Some("b"));
        let state = feed(state, vec![ch('/'), ch('.')]);
        assert!(state.flags().show_hidden);
        assert_eq!(state.visible_entries().len(), 3);
        assert_eq!(state.selected_entry().map(|e| e.name()), Some("b"));
    }

    #[test]
    fn dirs_and_files_only_are_exclusive() {
        let state = session(&[("dir", true), ("file", false)]);
        let state = feed(state, vec![ch('/'), ch('d')]);
        assert!(state.flags().dirs_only);
        assert_eq!(state.visible_entries().len(), 1);
        let state = feed(state, vec![ch('/'), ch('f')]);
        assert!(state.flags().files_only && !state.flags().dirs_only);
        assert_eq!(state.selected_entry().map(|e| e.name()), Some("file"));
    }

    #[test]
    fn vim_mode_consumes_movement_letters() {
        let state = session(&[("a", false), ("b", false)]);
        let state = feed(state, vec![ch('/'), ch('v'), ch('j')]);
        assert!(state.vim_mode());
        assert_eq!(state.query(), "");
        assert_eq!(state.selected_idx(), 1);

        let state = feed(state, vec![ch('/'), ch('v'), ch('j')]);
        assert_eq!(state.query(), "j");
    }

    #[test]
    fn movement_is_clamped() {
        let state = session(&[("a", false), ("b", false)]);
        let state = feed(state, vec![key(KeyCode::Up)]);
        assert_eq!(state.selected_idx(), 0);
        let state = feed(state, vec![key(KeyCode::Down), key(KeyCode::Down)]);
        assert_eq!(state.selected_idx(), 1);
    }

    #[test]
    fn activate_dir_requests_listing_and_file_selects() {
        let state = session(&[("sub", true), ("z.txt", false)]);
        let (state, cmd) = state.update(key(KeyCode::Enter));
        assert!(matches!(
            cmd,
            Some(Command::LoadDirectory { ref path, .. }) if path == &PathBuf::from("/base/sub")
        ));
        assert_eq!(state.current_dir(), PathBuf::from("/base"));

        let (state, cmd) = feed(state, vec![key(KeyCode::Down)]).update(key(KeyCode::Enter));
        assert_eq!(
            cmd,
            Some(Command::Exit(ExitAction::SelectFile(PathBuf::from(
                "/base/z.txt"
            ))))
        );
        let (_, after) = state.update(ch('x'));
        assert!(after.is_none());
    }

    #[test]
    fn erase_pops_query() {
        let state = feed(session(&[]), vec![ch('a'), ch('b'), key(KeyCode::Backspace)]);
        assert_eq!(state.query(), "a");
        let state = feed(state, vec![key(KeyCode::Backspace), key(KeyCode::Backspace)]);
        assert_eq!(state.query(), "");
    }

    #[test]
    fn invalid_regex_reports_but_keeps_everything() {
        let state = session(&[("a", false), ("b", false)]);
        let state = feed(state, vec![ch('/'), ch('r'), ch('[')]);
        assert!(state.regex_mode());
        assert_eq!(state.visible_entries().len(), 2);
        assert!(state.filter_error().is_some());

        let state = feed(state, vec![key(KeyCode::Backspace), ch('a')]);
        assert_eq!(state.visible_entries().len(), 1);
        assert!(state.filter_error().is_none());
    }
}
