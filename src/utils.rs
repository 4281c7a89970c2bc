//! Miscellaneous utility functions for fsc.
//!
//! - [cli]: command-line parsing and the key binding reference
//! - [helpers]: color parsing, home-path shortening, start directory validation

pub mod cli;
pub mod helpers;

pub use helpers::{get_home, parse_color, shorten_home_path, validate_start_dir};
