//! The general configuration settings for fsc.
//!
//! This module defines the [General] struct for deserializing general settings
//! from the fsc.toml configuration file and the [InternalGeneral] struct for internal
//! use within fsc.

use log::LevelFilter;
use serde::Deserialize;

use std::str::FromStr;
use std::time::Duration;

/// The default command prefix character.
pub const DEFAULT_PREFIX_KEY: char = '/';
/// The default time to wait for a command letter after the prefix key.
pub const DEFAULT_PREFIX_TIMEOUT_MS: u64 = 500;
/// Shortest accepted prefix timeout.
pub const MIN_PREFIX_TIMEOUT_MS: u64 = 50;
/// Longest accepted prefix timeout.
pub const MAX_PREFIX_TIMEOUT_MS: u64 = 5000;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    show_hidden: bool,
    dirs_only: bool,
    files_only: bool,
    vim_mode: bool,
    regex_mode: bool,
    prefix_key: String,
    prefix_timeout_ms: u64,
    log_level: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            show_hidden: false,
            dirs_only: false,
            files_only: false,
            vim_mode: false,
            regex_mode: false,
            prefix_key: DEFAULT_PREFIX_KEY.to_string(),
            prefix_timeout_ms: DEFAULT_PREFIX_TIMEOUT_MS,
            log_level: "off".into(),
        }
    }
}

#[derive(Debug)]
pub struct InternalGeneral {
    show_hidden: bool,
    dirs_only: bool,
    files_only: bool,
    vim_mode: bool,
    regex_mode: bool,
    prefix_key: char,
    prefix_timeout: Duration,
    log_level: LevelFilter,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        if g.dirs_only && g.files_only {
            eprintln!("[Warning] dirs_only and files_only are both set, using dirs_only");
        }
        Self {
            show_hidden: g.show_hidden,
            dirs_only: g.dirs_only,
            files_only: g.files_only,
            vim_mode: g.vim_mode,
            regex_mode: g.regex_mode,
            prefix_key: parse_prefix_key(&g.prefix_key),
            prefix_timeout: Duration::from_millis(clamp_prefix_timeout(g.prefix_timeout_ms)),
            log_level: parse_log_level(&g.log_level),
        }
    }
}

impl InternalGeneral {
    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub fn dirs_only(&self) -> bool {
        self.dirs_only
    }

    #[inline]
    pub fn files_only(&self) -> bool {
        self.files_only
    }

    #[inline]
    pub fn vim_mode(&self) -> bool {
        self.vim_mode
    }

    #[inline]
    pub fn regex_mode(&self) -> bool {
        self.regex_mode
    }

    #[inline]
    pub fn prefix_key(&self) -> char {
        self.prefix_key
    }

    #[inline]
    pub fn prefix_timeout(&self) -> Duration {
        self.prefix_timeout
    }

    #[inline]
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

/// The prefix must be a single printable character, anything else falls back to the default.
fn parse_prefix_key(s: &str) -> char {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() && !c.is_whitespace() => c,
        _ => {
            eprintln!(
                "[Warning] prefix_key={:?} is not a single printable character, using '{}'",
                s, DEFAULT_PREFIX_KEY
            );
            DEFAULT_PREFIX_KEY
        }
    }
}

/// Safely clamp the prefix timeout.
pub fn clamp_prefix_timeout(value: u64) -> u64 {
    let clamped = value.clamp(MIN_PREFIX_TIMEOUT_MS, MAX_PREFIX_TIMEOUT_MS);
    if clamped != value {
        eprintln!(
            "[Warning] prefix_timeout_ms={} out of range ({}..={}), clamped to {}",
            value, MIN_PREFIX_TIMEOUT_MS, MAX_PREFIX_TIMEOUT_MS, clamped
        );
    }
    clamped
}

/// Parses a log level name, unknown names disable logging.
pub fn parse_log_level(s: &str) -> LevelFilter {
    LevelFilter::from_str(s.trim()).unwrap_or_else(|_| {
        eprintln!("[Warning] unknown log_level {:?}, logging disabled", s);
        LevelFilter::Off
    })
}
