//! Install strategy mini-language.
//!
//! A registry record may carry an `installstrategy` string: directives
//! separated by `;`, each tokenized shell-style. Two verbs do work:
//!
//! - `unzip` extracts the cached archive into a scratch directory
//! - `move <path>` relocates `path` (relative to the scratch directory)
//!   into the install destination; a trailing `/*` merges the directory's
//!   contents into the destination, without it the directory is copied in
//!   as a single unit
//!
//! Anything else parses to an inert step, so a registry can carry newer
//! directives without breaking older clients.
//!
//! # Example
//!
//! ```
//! use creep::strategy::{Directive, InstallStrategy};
//!
//! let strategy = InstallStrategy::parse("unzip;move 'extras/*'");
//! assert_eq!(
//!     strategy.directives(),
//!     &[
//!         Directive::Unzip,
//!         Directive::Move {
//!             path: "extras/*".to_string()
//!         }
//!     ]
//! );
//! ```

use crate::error::Result;
use crate::install::InstallEvent;
use crate::package::Package;
use std::fs;
use std::path::Path;

/// One parsed strategy step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Extract the cached archive into the scratch directory.
    Unzip,
    /// Relocate `path` from the scratch directory into the destination.
    Move {
        /// Path argument, possibly ending in `/*`.
        path: String,
    },
    /// Unrecognized verb; parsed and ignored when run.
    Other {
        /// The verb as written.
        verb: String,
    },
}

/// A parsed `installstrategy` value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstallStrategy {
    directives: Vec<Directive>,
}

impl InstallStrategy {
    /// Parse strategy text. Parsing never fails: malformed or empty
    /// directives are dropped and unknown verbs become [`Directive::Other`].
    /// A bare `move` with no path argument is treated as unknown.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut directives = Vec::new();
        for part in text.split(';') {
            let Some(tokens) = shlex::split(part) else {
                continue;
            };
            let Some((verb, args)) = tokens.split_first() else {
                continue;
            };
            directives.push(match (verb.as_str(), args.first()) {
                ("unzip", _) => Directive::Unzip,
                ("move", Some(path)) => Directive::Move { path: path.clone() },
                _ => Directive::Other { verb: verb.clone() },
            });
        }
        Self { directives }
    }

    /// Parsed steps, in order.
    #[must_use]
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Whether no step would do any work.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.directives
            .iter()
            .all(|d| matches!(d, Directive::Other { .. }))
    }

    /// Run the steps for `package`. The cached artifact is read from
    /// `cache_dir`; a scratch directory named after the package is created
    /// under `work_root` (replacing any leftover from an earlier run) and
    /// removed again afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be read or extracted, or a
    /// `move` source does not exist.
    pub fn run(
        &self,
        package: &Package,
        cache_dir: &Path,
        work_root: &Path,
        dest_dir: &Path,
        report: &mut dyn FnMut(InstallEvent),
    ) -> Result<()> {
        let workdir = work_root.join(package.name.replace('/', "_"));
        if workdir.exists() {
            fs::remove_dir_all(&workdir)?;
        }
        fs::create_dir_all(&workdir)?;

        for directive in &self.directives {
            match directive {
                Directive::Unzip => {
                    let archive = cache_dir.join(package.local_filename());
                    report(InstallEvent::Unzipping {
                        archive: archive.clone(),
                    });
                    extract_archive(&archive, &workdir)?;
                }
                Directive::Move { path } => {
                    report(InstallEvent::Moving { path: path.clone() });
                    move_into(&workdir, path, dest_dir)?;
                }
                Directive::Other { .. } => {}
            }
        }

        fs::remove_dir_all(&workdir)?;
        Ok(())
    }
}

/// Extract a zip archive into `dest`.
fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    let file = fs::File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file)?;
    zip.extract(dest)?;
    Ok(())
}

fn move_into(workdir: &Path, path: &str, dest_dir: &Path) -> Result<()> {
    if let Some(stripped) = path.strip_suffix("/*") {
        copy_tree(&workdir.join(stripped), dest_dir)
    } else {
        let source = workdir.join(path);
        match source.file_name() {
            Some(basename) => copy_tree(&source, &dest_dir.join(basename)),
            None => Ok(()),
        }
    }
}

/// Recursively copy a file or directory tree. Existing directories are
/// merged; existing files are overwritten.
pub(crate) fn copy_tree(source: &Path, dest: &Path) -> Result<()> {
    if source.is_dir() {
        fs::create_dir_all(dest)?;
        for entry in fs::read_dir(source)? {
            let entry = entry?;
            copy_tree(&entry.path(), &dest.join(entry.file_name()))?;
        }
    } else {
        fs::copy(source, dest)?;
    }
    Ok(())
}
