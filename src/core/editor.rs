//! External editor launch for fsc.
//!
//! Only ever runs after the session has decided to exit and the terminal has been
//! restored, so the editor owns the terminal exclusively.

use crate::core::error::FscError;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Environment variable consulted first for the preferred editor.
pub const PRIMARY_EDITOR_VAR: &str = "EDITOR";
/// Environment variable consulted second.
pub const SECONDARY_EDITOR_VAR: &str = "VISUAL";
/// Editors tried, in order, when nothing configured is installed.
pub const FALLBACK_EDITORS: &[&str] = &["vim", "nano", "code", "vi", "edit"];

/// An editor command resolved to an installed program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEditor {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Builds the ordered candidate list: primary env, secondary env, configured command,
/// then the built-in fallbacks. Empty values are skipped.
pub fn editor_candidates(
    primary: Option<&str>,
    secondary: Option<&str>,
    configured: Option<&str>,
) -> Vec<String> {
    [primary, secondary, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .chain(FALLBACK_EDITORS.iter().map(|s| s.to_string()))
        .collect()
}

/// Picks the first candidate whose program can be found.
///
/// Candidates may carry arguments (`"code --wait"`); only the first word is looked up.
pub fn resolve_editor<F>(candidates: &[String], lookup: F) -> Result<ResolvedEditor, FscError>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    for candidate in candidates {
        let mut words = candidate.split_whitespace();
        let Some(cmd) = words.next() else {
            continue;
        };
        if let Some(program) = lookup(cmd) {
            return Ok(ResolvedEditor {
                program,
                args: words.map(String::from).collect(),
            });
        }
    }

    Err(FscError::NoEditorAvailable {
        checked: format!(
            "{PRIMARY_EDITOR_VAR}, {SECONDARY_EDITOR_VAR}, {}",
            candidates.join(", ")
        ),
    })
}

/// Opens `path` in the first available editor and waits for it to exit.
pub fn open_in_editor(path: &Path, configured: Option<&str>) -> Result<(), FscError> {
    let primary = std::env::var(PRIMARY_EDITOR_VAR).ok();
    let secondary = std::env::var(SECONDARY_EDITOR_VAR).ok();
    let candidates = editor_candidates(primary.as_deref(), secondary.as_deref(), configured);

    let editor = resolve_editor(&candidates, |cmd| which::which(cmd).ok())?;
    log::info!("opening {} with {}", path.display(), editor.program.display());

    let mut args: Vec<OsString> = editor.args.iter().map(OsString::from).collect();
    args.push(path.as_os_str().to_os_string());

    let status = Command::new(&editor.program)
        .args(&args)
        .status()
        .map_err(|source| FscError::EditorFailed {
            editor: editor.program.display().to_string(),
            source,
        })?;
    check_status(&editor.program, status)
}

/// A non-zero editor exit is reported as an error.
fn check_status(program: &Path, status: ExitStatus) -> Result<(), FscError> {
    if status.success() {
        return Ok(());
    }
    Err(FscError::EditorExited {
        editor: program.display().to_string(),
        status,
    })
}
