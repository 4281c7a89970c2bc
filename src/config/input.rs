//! Input configuration options for fsc
//!
//! This module defines the key binding and editor options which are read from the fsc.toml
//! configuration file.
//! The prefix command letters are not configurable, see [crate::app::keymap::PREFIX_COMMANDS].

use serde::Deserialize;

/// Input configuration options of all single-key bindings
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Keys {
    up: Vec<String>,
    down: Vec<String>,
    activate: Vec<String>,
    parent: Vec<String>,
    erase: Vec<String>,
    quit: Vec<String>,
    vim_up: Vec<String>,
    vim_down: Vec<String>,
    vim_activate: Vec<String>,
    vim_parent: Vec<String>,
}

/// Editor configuration options
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Editor {
    cmd: String,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    up,
    down,
    activate,
    parent,
    erase,
    quit,
    vim_up,
    vim_down,
    vim_activate,
    vim_parent,
);

/// Default input configuration options
///
/// Printable characters are left free so they can be typed into the filter.
impl Default for Keys {
    fn default() -> Self {
        Keys {
            up: vec!["Up".into()],
            down: vec!["Down".into()],
            activate: vec!["Enter".into(), "Right".into()],
            parent: vec!["Left".into()],
            erase: vec!["Backspace".into()],
            quit: vec!["Esc".into(), "Ctrl+c".into()],

            vim_up: vec!["k".into()],
            vim_down: vec!["j".into()],
            vim_activate: vec!["l".into()],
            vim_parent: vec!["h".into()],
        }
    }
}

impl Editor {
    /// The configured editor command, if one was set.
    #[inline]
    pub fn cmd(&self) -> Option<&str> {
        let trimmed = self.cmd.trim();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    }
}
