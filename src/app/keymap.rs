//! Key mapping for fsc
//!
//! Maps single keys to navigation/system actions, parsed from the config, and holds the
//! fixed prefix-command table consulted after the prefix key.

use crate::config::Keys;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use phf::phf_map;
use std::collections::HashMap;

/// Represents any single-key action: navigation or system.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Nav(NavAction),
    System(SystemAction),
}

/// Navigation actions
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavAction {
    GoUp,
    GoDown,
    Activate,
    GoParent,
    Erase,
}

/// System actions (quit)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SystemAction {
    Quit,
}

/// Commands reachable through the prefix key followed by a command letter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PrefixCommand {
    OpenEditor,
    ToggleRegex,
    ToggleVim,
    Quit,
    ToggleHelp,
    PrintPath,
    ToggleHidden,
    ToggleDirsOnly,
    ToggleFilesOnly,
}

/// Command letter to prefix command. Letters not listed here fall back to filter text.
pub static PREFIX_COMMANDS: phf::Map<char, PrefixCommand> = phf_map! {
    'e' => PrefixCommand::OpenEditor,
    'r' => PrefixCommand::ToggleRegex,
    'v' => PrefixCommand::ToggleVim,
    'q' => PrefixCommand::Quit,
    '?' => PrefixCommand::ToggleHelp,
    'p' => PrefixCommand::PrintPath,
    '.' => PrefixCommand::ToggleHidden,
    'd' => PrefixCommand::ToggleDirsOnly,
    'f' => PrefixCommand::ToggleFilesOnly,
};

impl PrefixCommand {
    /// Short description shown in the help overlay.
    pub fn describe(self) -> &'static str {
        match self {
            PrefixCommand::OpenEditor => "open selection in editor",
            PrefixCommand::ToggleRegex => "toggle regex filter",
            PrefixCommand::ToggleVim => "toggle vim keys",
            PrefixCommand::Quit => "quit",
            PrefixCommand::ToggleHelp => "toggle this help",
            PrefixCommand::PrintPath => "print path and exit",
            PrefixCommand::ToggleHidden => "toggle hidden files",
            PrefixCommand::ToggleDirsOnly => "directories only",
            PrefixCommand::ToggleFilesOnly => "files only",
        }
    }
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Stores the mapping from Key to action, built from the config.
///
/// Vim bindings live in their own table and are only consulted while vim mode is on.
#[derive(Clone, Debug)]
pub struct Keymap {
    map: HashMap<Key, Action>,
    vim_map: HashMap<Key, Action>,
}

impl Keymap {
    /// Builds the keymap from the configured key lists
    #[rustfmt::skip]
    pub fn from_keys(keys: &Keys) -> Self {
        let mut map = HashMap::new();
        let mut vim_map = HashMap::new();

        use NavAction as N;
        use SystemAction as S;

        bind(keys.up(),           Action::Nav(N::GoUp),     &mut map);
        bind(keys.down(),         Action::Nav(N::GoDown),   &mut map);
        bind(keys.activate(),     Action::Nav(N::Activate), &mut map);
        bind(keys.parent(),       Action::Nav(N::GoParent), &mut map);
        bind(keys.erase(),        Action::Nav(N::Erase),    &mut map);
        bind(keys.quit(),         Action::System(S::Quit),  &mut map);

        bind(keys.vim_up(),       Action::Nav(N::GoUp),     &mut vim_map);
        bind(keys.vim_down(),     Action::Nav(N::GoDown),   &mut vim_map);
        bind(keys.vim_activate(), Action::Nav(N::Activate), &mut vim_map);
        bind(keys.vim_parent(),   Action::Nav(N::GoParent), &mut vim_map);

        Keymap { map, vim_map }
    }

    /// Looks up the action for a given key event
    pub fn lookup(&self, key: &KeyEvent, vim_mode: bool) -> Option<Action> {
        if let Some(action) = lookup_in(&self.map, key) {
            return Some(action);
        }
        if vim_mode {
            return lookup_in(&self.vim_map, key);
        }
        None
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Keymap::from_keys(&Keys::default())
    }
}

fn lookup_in(map: &HashMap<Key, Action>, key: &KeyEvent) -> Option<Action> {
    let k = Key {
        code: key.code,
        modifiers: key.modifiers,
    };

    if let Some(action) = map.get(&k).copied() {
        return Some(action);
    }

    if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
        let k2 = Key {
            code: key.code,
            modifiers: key.modifiers - KeyModifiers::SHIFT,
        };
        return map.get(&k2).copied();
    }
    None
}

/// Returns the character a key types into the filter, if it is a plain printable key.
pub fn printable_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !c.is_control()
                && !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

pub(crate) fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    // a lone separator character is a key of its own
    if s == "-" || s == "+" {
        return s.chars().next().map(|c| Key {
            code: KeyCode::Char(c),
            modifiers,
        });
    }

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    let normalized = input.replace('-', "+");
    for part in normalized.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "tab" => code = Some(KeyCode::Tab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => log::warn!("ignoring unparsable key binding {k:?}"),
        }
    }
}
