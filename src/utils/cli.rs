//! Command-line argument parsing and help for fsc.
//!
//! When invoked with no args (fsc), fsc browses the current directory.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fsc",
    version,
    about = "Finder-like terminal directory browser",
    long_about = "fsc lists a directory and narrows it as you type. Navigate with the arrow \
                  keys, press Enter on a file to print its path, or use the '/' prefix \
                  commands to open an editor, toggle regex filtering and more.",
    after_help = "EXAMPLES:\n  fsc /path/to/dir       Start browsing in the given directory\n  \
                  fsc ~ --hidden         Browse home, showing hidden files\n  \
                  vim \"$(fsc)\"           Pick a file and open it\n\n\
                  ENVIRONMENT:\n  FSC_CONFIG   Override the config file path\n  \
                  FSC_LOG      Log level (error, warn, info, debug, trace)\n  \
                  EDITOR, VISUAL  Preferred editors, consulted in that order"
)]
pub struct Args {
    /// Directory to start in
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    pub directory: PathBuf,

    /// Show hidden (dot) files
    #[arg(short = 'H', long = "hidden")]
    pub hidden: bool,

    /// Show only directories
    #[arg(short = 'd', long = "dirs-only", conflicts_with = "files_only")]
    pub dirs_only: bool,

    /// Show only files
    #[arg(short = 'f', long = "files-only")]
    pub files_only: bool,

    /// Start with vim-style movement keys enabled
    #[arg(long)]
    pub vim: bool,

    /// Start with regex filtering enabled
    #[arg(long)]
    pub regex: bool,

    /// Generate a default configuration file and exit
    #[arg(long)]
    pub init: bool,

    /// Display all the key bindings and exit
    #[arg(long = "keybinds", alias = "keys")]
    pub keybinds: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}

pub const KEYBINDS_TEXT: &str = r##"
=========================
 Key Bindings
=========================
[keys]
  up                        ["Up"]
  down                      ["Down"]
  activate                  ["Enter", "Right"]   (enter directory, or pick file)
  parent                    ["Left"]
  erase                     ["Backspace"]        (delete last filter character)
  quit                      ["Esc", "Ctrl+c"]

  vim_up                    ["k"]   (only in vim mode)
  vim_down                  ["j"]
  vim_activate              ["l"]
  vim_parent                ["h"]

  Any other printable character is typed into the filter.

=========================
 Prefix Commands
=========================
  Press "/" then, within the prefix timeout:

  e     open the selection in $EDITOR and exit
  p     print the selected path and exit
  q     quit
  r     toggle regex filtering
  v     toggle vim mode
  .     toggle hidden files
  d     toggle directories only
  f     toggle files only
  ?     toggle the help overlay

  Any other key types "/" and the key into the filter.
  Letting the timeout pass types "/" alone.

  Syntax Reference:
    Modifiers: <c-x> (Ctrl), <m-x>/<a-x> (Alt/Meta), <s-x> (Shift)
    Standard:  ctrl+x, alt+x, shift+x, meta+x
    Special:   "space", "back", "enter", "esc", "tab"
"##;

pub fn print_keybinds() {
    println!("{}", KEYBINDS_TEXT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_to_current_dir() -> Result<(), Box<dyn std::error::Error>> {
        let args = Args::try_parse_from(["fsc"])?;
        assert_eq!(args.directory, PathBuf::from("."));
        assert!(!args.hidden && !args.dirs_only && !args.files_only);
        Ok(())
    }

    #[test]
    fn flags_and_path() -> Result<(), Box<dyn std::error::Error>> {
        let args = Args::try_parse_from(["fsc", "/tmp", "-H", "-d", "--vim"])?;
        assert_eq!(args.directory, PathBuf::from("/tmp"));
        assert!(args.hidden && args.dirs_only && args.vim);
        assert!(!args.regex);
        Ok(())
    }

    #[test]
    fn dirs_and_files_only_conflict() {
        assert!(Args::try_parse_from(["fsc", "-d", "-f"]).is_err());
        assert!(Args::try_parse_from(["fsc", "a", "b"]).is_err());
    }
}
