//! Mod stashes: named snapshots of the profile's mods directory.
//!
//! A stash is a plain subdirectory of `<profile>/stashes/`. Saving moves
//! every file out of the mods directory into a new stash; restoring moves
//! them back and deletes the stash; applying copies them back and keeps the
//! stash. Swapping mod sets between worlds is the intended use.
//!
//! Directory scans classify each file against the repository by local
//! filename, so listings can show full package records for recognized mods
//! and bare filenames for everything else.

use crate::error::{CreepError, Result};
use crate::package::Package;
use crate::repository::Repository;
use crate::strategy::copy_tree;
use std::fs;
use std::path::{Path, PathBuf};

/// Files never treated as mod artifacts when scanning a directory.
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// A scanned file with the registry record that claims it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedMod {
    /// Filename within the scanned directory.
    pub filename: String,
    /// Matching registry record.
    pub package: Package,
}

/// Classification of the files in a mods-style directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryScan {
    /// Recognized artifacts, ordered by package name.
    pub known: Vec<ScannedMod>,
    /// Files no registry record claims, ordered by filename.
    pub unknown: Vec<String>,
}

impl DirectoryScan {
    /// Whether the scan found nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.known.is_empty() && self.unknown.is_empty()
    }

    /// Every scanned filename, sorted.
    #[must_use]
    pub fn filenames(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .known
            .iter()
            .map(|m| m.filename.clone())
            .chain(self.unknown.iter().cloned())
            .collect();
        names.sort();
        names
    }
}

/// Classify every file in `dir` against the repository.
///
/// A missing or unreadable directory yields an empty scan. Entries named in
/// the ignore list are skipped.
///
/// # Errors
///
/// Returns an error if a directory entry cannot be read.
pub fn scan_directory(repository: &Repository, dir: &Path) -> Result<DirectoryScan> {
    let mut scan = DirectoryScan::default();
    let Ok(entries) = fs::read_dir(dir) else {
        return Ok(scan);
    };

    for entry in entries {
        let entry = entry?;
        let filename = entry.file_name().to_string_lossy().into_owned();
        if IGNORED_FILES.contains(&filename.as_str()) {
            continue;
        }
        match repository.resolve_by_local_filename(&filename) {
            Some(package) => scan.known.push(ScannedMod {
                filename,
                package: package.clone(),
            }),
            None => scan.unknown.push(filename),
        }
    }

    scan.known.sort_by(|a, b| a.package.name.cmp(&b.package.name));
    scan.unknown.sort();
    Ok(scan)
}

/// Manages the stash directories of one profile.
pub struct StashManager<'a> {
    repository: &'a Repository,
    profile_dir: PathBuf,
}

impl<'a> StashManager<'a> {
    /// Create a manager for the given profile directory.
    pub fn new(repository: &'a Repository, profile_dir: impl Into<PathBuf>) -> Self {
        Self {
            repository,
            profile_dir: profile_dir.into(),
        }
    }

    /// Directory holding all stashes.
    #[must_use]
    pub fn stashes_dir(&self) -> PathBuf {
        self.profile_dir.join("stashes")
    }

    /// The profile's mods directory.
    #[must_use]
    pub fn mods_dir(&self) -> PathBuf {
        self.profile_dir.join("mods")
    }

    /// Names of the existing stashes, sorted. A missing stashes directory
    /// yields an empty list.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.stashes_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| {
                entry
                    .ok()
                    .map(|e| e.file_name().to_string_lossy().into_owned())
            })
            .collect();
        names.sort();
        names
    }

    /// Move every file from the mods directory into a new stash named
    /// `name`. Returns the moved filenames, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`CreepError::StashExists`] if the name is taken, or an IO
    /// error if a file cannot be moved.
    pub fn save(&self, name: &str) -> Result<Vec<String>> {
        let stashes_dir = self.stashes_dir();
        fs::create_dir_all(&stashes_dir)?;

        let stash_dir = stashes_dir.join(name);
        if stash_dir.exists() {
            return Err(CreepError::StashExists(name.to_string()));
        }
        fs::create_dir(&stash_dir)?;

        let mods_dir = self.mods_dir();
        let files = scan_directory(self.repository, &mods_dir)?.filenames();
        for file in &files {
            fs::rename(mods_dir.join(file), stash_dir.join(file))?;
        }
        Ok(files)
    }

    /// Classify the contents of the stash named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CreepError::StashNotFound`] if no such stash exists.
    pub fn scan(&self, name: &str) -> Result<DirectoryScan> {
        let stash_dir = self.stashes_dir().join(name);
        if !stash_dir.is_dir() {
            return Err(CreepError::StashNotFound(name.to_string()));
        }
        scan_directory(self.repository, &stash_dir)
    }

    /// Bring the files of stash `name` back into the mods directory.
    ///
    /// With `keep_stash` the files are copied and the stash survives;
    /// without it they are moved and the stash directory is deleted.
    /// Returns the restored filenames, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`CreepError::StashNotFound`] if no such stash exists, or an
    /// IO error if a file cannot be placed.
    pub fn restore(&self, name: &str, keep_stash: bool) -> Result<Vec<String>> {
        let stash_dir = self.stashes_dir().join(name);
        if !stash_dir.is_dir() {
            return Err(CreepError::StashNotFound(name.to_string()));
        }

        let mods_dir = self.mods_dir();
        fs::create_dir_all(&mods_dir)?;

        let files = scan_directory(self.repository, &stash_dir)?.filenames();
        for file in &files {
            let from = stash_dir.join(file);
            let to = mods_dir.join(file);
            if keep_stash {
                copy_tree(&from, &to)?;
            } else {
                fs::rename(&from, &to)?;
            }
        }

        if !keep_stash {
            fs::remove_dir_all(&stash_dir)?;
        }
        Ok(files)
    }
}
