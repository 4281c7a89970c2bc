//! Filtering of listed entries for fsc.
//!
//! [filter_entries] turns a listing plus the active filter state into the visible subset.
//! It is a pure function: no caching, no side effects, and the result is always sorted by
//! name so the display order never depends on input order.

use crate::core::error::FscError;
use crate::core::fm::Entry;

use regex::Regex;

/// Toggles that shape the visible set besides the query itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterFlags {
    pub show_hidden: bool,
    pub dirs_only: bool,
    pub files_only: bool,
    pub regex_mode: bool,
}

/// How the query is matched against entry names.
enum Matcher {
    All,
    Substring(String),
    Pattern(Regex),
}

impl Matcher {
    /// Builds the matcher for `query`. An invalid pattern matches everything and its
    /// compile error is handed back alongside.
    fn new(query: &str, regex_mode: bool) -> (Self, Option<FscError>) {
        if query.is_empty() {
            return (Matcher::All, None);
        }
        if !regex_mode {
            return (Matcher::Substring(query.to_lowercase()), None);
        }
        match Regex::new(query) {
            Ok(re) => (Matcher::Pattern(re), None),
            Err(source) => {
                log::debug!("invalid filter pattern {query:?}: {source}");
                let err = FscError::InvalidFilterPattern {
                    pattern: query.to_string(),
                    source,
                };
                (Matcher::All, Some(err))
            }
        }
    }

    fn is_match(&self, name: &str) -> bool {
        match self {
            Matcher::All => true,
            Matcher::Substring(needle) => name.to_lowercase().contains(needle.as_str()),
            Matcher::Pattern(re) => re.is_match(name),
        }
    }
}

/// Returns the visible subset of `entries` for the given query and flags.
///
/// - hidden entries (leading `.`) are dropped unless `show_hidden`
/// - exactly one of `dirs_only`/`files_only` keeps only that type, both or neither keep all
/// - an empty query keeps everything, otherwise a case-insensitive substring match,
///   or a regex match in regex mode (an invalid pattern keeps everything)
pub fn filter_entries(entries: &[Entry], query: &str, flags: FilterFlags) -> Vec<Entry> {
    filter_with_error(entries, query, flags).0
}

/// Same as [filter_entries], also returning why the query is not a usable pattern.
///
/// Filtering itself never fails; the error is only there to tell the user.
pub fn filter_with_error(
    entries: &[Entry],
    query: &str,
    flags: FilterFlags,
) -> (Vec<Entry>, Option<FscError>) {
    let (matcher, error) = Matcher::new(query, flags.regex_mode);
    let type_filter = match (flags.dirs_only, flags.files_only) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
    };

    let mut visible: Vec<Entry> = entries
        .iter()
        .filter(|e| flags.show_hidden || !e.is_hidden())
        .filter(|e| type_filter.is_none_or(|want_dir| e.is_dir() == want_dir))
        .filter(|e| matcher.is_match(e.name()))
        .cloned()
        .collect();

    visible.sort_by(|a, b| a.name().cmp(b.name()));
    (visible, error)
}
