//! The main config loading module for fsc.
//!
//! Handles loading and deserializing settings from `fsc.toml`.
//!
//! Provides the main [Config] struct, as well as the internal [RawConfig] used for parsing.
//!
//! Also implements default config generation for `fsc --init`.

use crate::config::{Display, Editor, General, InternalGeneral, Keys, Theme};
use crate::core::FscError;
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, io, path::Path, path::PathBuf};

/// Raw configuration as read from the toml file
/// This struct is deserialized directly from the toml file and then converted into [Config].
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    display: Display,
    theme: Theme,
    editor: Editor,
    keys: Keys,
}

/// Main configuration struct for fsc
#[derive(Debug)]
pub struct Config {
    general: InternalGeneral,
    display: Display,
    theme: Theme,
    editor: Editor,
    keys: Keys,
}

/// Conversion from RawConfig to Config
impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            display: raw.display,
            theme: raw.theme,
            editor: raw.editor,
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Load configuration from the default path
    /// If the file does not exist, returns the default configuration silently.
    /// If it fails to parse, reports the error and returns the default configuration.
    ///
    /// Called by the entry point to load config at startup.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("fsc: {}", e);
                Self::default()
            }
        }
    }

    /// Load and parse the configuration at `path`.
    pub fn load_from(path: &Path) -> Result<Self, FscError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from toml text.
    pub fn parse(content: &str) -> Result<Self, FscError> {
        toml::from_str::<RawConfig>(content)
            .map(Config::from)
            .map_err(|e| FscError::Config(e.to_string()))
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn display(&self) -> &Display {
        &self.display
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Determine the default configuration file path.
    /// Checks the FSC_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/fsc/fsc.toml,
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("FSC_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("fsc/fsc.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/fsc/fsc.toml");
        }
        PathBuf::from("fsc.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {:?}", path);
        Ok(())
    }
}

/// Default configuration options
impl Default for Config {
    fn default() -> Self {
        Config::from(RawConfig::default())
    }
}

const DEFAULT_TOML: &str = r##"# fsc.toml - default configuration for fsc

# Note:
# Commented values are the internal defaults of fsc
# Use hex codes (eg. "#RRGGBB") or terminal colors ("cyan")

[general]
# show_hidden = false
# dirs_only = false
# files_only = false
# vim_mode = false
# regex_mode = false
# prefix_key = "/"
# prefix_timeout_ms = 500
# log_level = "off"           # off, error, warn, info, debug, trace (FSC_LOG overrides)

[display]
# icons = true
# show_size = true
# show_modified = true
# show_footer = true

# [theme.title]
# fg = "#FAFAFA"
# bg = "#7D56F4"

# [theme.path]
# fg = "#FAFAFA"
# bg = "#1E1E2E"

# [theme.separator]
# fg = "#45475A"

# [theme.selection]
# fg = "#1E1E2E"
# bg = "#89B4FA"

# [theme.directory]
# fg = "#89B4FA"

# [theme.executable]
# fg = "#A6E3A1"

# [theme.filter]
# fg = "#F9E2AF"
# bg = "#1E1E2E"

# [theme.help]
# fg = "#6C7086"
# bg = "#1E1E2E"

# [theme.error]
# fg = "#F38BA8"

# [editor]
# cmd = "nvim"                # tried after $EDITOR and $VISUAL

# [keys]
# up = ["Up"]
# down = ["Down"]
# activate = ["Enter", "Right"]
# parent = ["Left"]
# erase = ["Backspace"]
# quit = ["Esc", "Ctrl+c"]
# vim_up = ["k"]
# vim_down = ["j"]
# vim_activate = ["l"]
# vim_parent = ["h"]
"##;
