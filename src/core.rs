//! Core runtime logic for fsc.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [fm]: directory listing and entry metadata (see [list_dir], [Entry], [Listing]).
//! - [filter]: the pure filter from a listing plus filter state to the visible entries.
//! - [worker]: the listing thread and message passing back into the session.
//! - [editor]: resolving and launching an external editor.
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.
//! - [error]: the [FscError] type.

pub mod editor;
pub mod error;
pub mod filter;
pub mod fm;
pub mod terminal;
pub mod worker;

pub use error::FscError;
pub use filter::{FilterFlags, filter_entries};
pub use fm::{Entry, Listing, list_dir, parent_dir};
