//! Application layer for fsc.
//!
//! - [state]: the session state, its events and commands, and the transition function
//! - [keymap]: key bindings and the prefix-command table
//! - handlers: key dispatch for the session state

mod handlers;
pub mod keymap;
pub mod state;

pub use keymap::{Action, Keymap, NavAction, PREFIX_COMMANDS, PrefixCommand, SystemAction};
pub use state::{Command, Event, ExitAction, PendingPrefix, SessionOptions, SessionState};
