//! Directory listing logic for fsc.
//!
//! Provides the [Entry] struct which is used throughout fsc, and [list_dir] which
//! produces a complete, sorted [Listing] for one directory.
//! Listings are always total replacements; nothing in fsc patches them incrementally.

use crate::core::error::FscError;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Represents a single child of a listed directory.
///
/// Immutable once produced by [list_dir].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: String,
    path: PathBuf,
    flags: u8,
    size: u64,
    modified: Option<SystemTime>,
}

impl Entry {
    // Flag bit definitions
    pub(crate) const IS_DIR: u8 = 1 << 0;
    pub(crate) const IS_SYMLINK: u8 = 1 << 1;
    pub(crate) const IS_EXECUTABLE: u8 = 1 << 2;

    #[cfg(unix)]
    const EXEC_FLAG: u32 = 0o111;

    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        flags: u8,
        size: u64,
        modified: Option<SystemTime>,
    ) -> Self {
        Entry {
            name: name.into(),
            path: path.into(),
            flags,
            size,
            modified,
        }
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.flags & Self::IS_DIR != 0
    }

    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.flags & Self::IS_SYMLINK != 0
    }

    #[inline]
    pub fn is_executable(&self) -> bool {
        self.flags & Self::IS_EXECUTABLE != 0
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// The full, sorted set of entries for one directory at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub path: PathBuf,
    pub entries: Vec<Entry>,
}

/// Reads the contents of the provided directory.
///
/// The returned [Listing::path] is absolute with symlinks resolved, so that repeated
/// requests for the parent of the root land on the same path.
/// Children whose metadata cannot be read are skipped instead of failing the listing.
pub fn list_dir(path: &Path) -> Result<Listing, FscError> {
    let listing_err = |source| FscError::Listing {
        path: path.to_path_buf(),
        source,
    };

    let resolved = fs::canonicalize(path).map_err(listing_err)?;
    let read = fs::read_dir(&resolved).map_err(listing_err)?;

    let mut entries = Vec::with_capacity(64);
    for dir_entry in read {
        let Ok(dir_entry) = dir_entry else {
            continue;
        };
        let Ok(ft) = dir_entry.file_type() else {
            continue;
        };

        let mut flags = 0u8;
        if ft.is_symlink() {
            flags |= Entry::IS_SYMLINK;
        }

        let entry_path = dir_entry.path();
        // follow links for the type and size, fall back to the link itself when broken
        let md = match fs::metadata(&entry_path) {
            Ok(md) => md,
            Err(_) => match dir_entry.metadata() {
                Ok(md) => md,
                Err(_) => continue,
            },
        };

        if md.is_dir() {
            flags |= Entry::IS_DIR;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if md.is_file() && md.permissions().mode() & Entry::EXEC_FLAG != 0 {
                flags |= Entry::IS_EXECUTABLE;
            }
        }

        let name = dir_entry.file_name().to_string_lossy().into_owned();
        entries.push(Entry::new(
            name,
            resolved.join(dir_entry.file_name()),
            flags,
            md.len(),
            md.modified().ok(),
        ));
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Listing {
        path: resolved,
        entries,
    })
}

/// Returns the parent of `path`, or `path` itself when it has none (the root).
pub fn parent_dir(path: &Path) -> PathBuf {
    path.parent().unwrap_or(path).to_path_buf()
}
