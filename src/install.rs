//! Install engine: dependency expansion, artifact download, placement.
//!
//! Installing resolves a query against the repository, walks its `require`
//! entries depth-first, downloads any artifact not already cached under the
//! app cache dir, runs the record's install strategy, and copies the
//! artifact into the profile. Progress surfaces as [`InstallEvent`] values
//! through a caller-supplied callback; the engine itself never prints.
//!
//! Expected failures (unknown package, failed download) are reported events
//! with a [`InstallStatus::Failed`] outcome for that package only. A failed
//! dependency never aborts its parent or siblings. Unexpected filesystem
//! errors propagate.

use crate::download::Downloader;
use crate::error::{CreepError, Result};
use crate::package::Package;
use crate::repository::Repository;
use crate::strategy::InstallStrategy;
use std::fs;
use std::path::{Path, PathBuf};

/// Dependency recursion bound. There is no cycle detection; this stops
/// runaway chains on malformed registry data.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Progress and outcome notices emitted while installing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallEvent {
    /// A package install started.
    Installing {
        /// Package display string (`name (version)`).
        package: String,
    },
    /// A simple-name query matched several vendors.
    AmbiguousPackage {
        /// Queried name.
        name: String,
        /// Comma-separated qualified candidates.
        candidates: String,
    },
    /// A query resolved to nothing; that install is skipped.
    UnknownPackage {
        /// Queried name.
        name: String,
    },
    /// A collection cannot install with dependencies disabled.
    CollectionNeedsDependencies {
        /// Collection name.
        name: String,
    },
    /// Recursing into a dependency.
    InstallingDependency {
        /// Dependency name as written in the record.
        name: String,
    },
    /// Dependency skipped because dependencies are disabled.
    SkippingDependency {
        /// Dependency name as written in the record.
        name: String,
    },
    /// The recursion guard stopped a dependency chain.
    DepthLimitReached {
        /// Query that exceeded the bound.
        name: String,
        /// Depth it was attempted at.
        depth: usize,
    },
    /// Fetching an artifact not present in the cache.
    Downloading {
        /// Package name.
        name: String,
        /// Download URL.
        url: String,
    },
    /// Artifact fetch failed; only this package's install is aborted.
    DownloadFailed {
        /// Download URL.
        url: String,
        /// Failure description.
        reason: String,
    },
    /// Destination directory was missing and is being created.
    CreatingDirectory {
        /// Directory created.
        path: PathBuf,
    },
    /// Running the record's install strategy.
    RunningStrategy {
        /// Raw strategy text.
        strategy: String,
    },
    /// Strategy step: extracting the cached archive.
    Unzipping {
        /// Archive being extracted.
        archive: PathBuf,
    },
    /// Strategy step: relocating files into the destination.
    Moving {
        /// Path argument of the directive.
        path: String,
    },
    /// Artifact copied into the profile.
    InstalledMod {
        /// Package name.
        name: String,
        /// Final artifact path.
        path: PathBuf,
    },
    /// Collection finished; only its dependencies were installed.
    InstalledCollection {
        /// Collection name.
        name: String,
    },
    /// Reading a package list file.
    ReadingListfile {
        /// List file path.
        path: PathBuf,
    },
    /// The package list file does not exist; nothing was installed.
    ListfileMissing {
        /// List file path.
        path: PathBuf,
    },
}

/// Per-package install outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    /// Artifact placed in the profile.
    Installed,
    /// Collection completed; it has no artifact of its own.
    Collection,
    /// Reported failure; see the emitted events.
    Failed,
}

impl InstallStatus {
    /// Whether the install completed.
    #[must_use]
    pub fn succeeded(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

/// Installs packages from a repository into a profile directory.
pub struct InstallEngine<'a> {
    repository: &'a Repository,
    downloader: &'a dyn Downloader,
    cache_root: PathBuf,
    profile_dir: PathBuf,
    install_dependencies: bool,
    max_depth: usize,
}

impl<'a> InstallEngine<'a> {
    /// Create an engine writing artifacts under `cache_root` and installing
    /// into `profile_dir`.
    pub fn new(
        repository: &'a Repository,
        downloader: &'a dyn Downloader,
        cache_root: impl Into<PathBuf>,
        profile_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            repository,
            downloader,
            cache_root: cache_root.into(),
            profile_dir: profile_dir.into(),
            install_dependencies: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Skip dependency installation (`-n` on the command line).
    #[must_use]
    pub fn with_skip_dependencies(mut self, skip: bool) -> Self {
        self.install_dependencies = !skip;
        self
    }

    /// Override the dependency recursion bound.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Install one package (and, unless disabled, its dependencies).
    ///
    /// # Errors
    ///
    /// Returns an error only for unexpected filesystem failures. Unknown
    /// packages, ambiguous names and failed downloads are reported through
    /// `report` and end in `Ok(InstallStatus::Failed)`.
    pub fn install(
        &self,
        query: &str,
        report: &mut dyn FnMut(InstallEvent),
    ) -> Result<InstallStatus> {
        self.install_at_depth(query, 0, report)
    }

    fn install_at_depth(
        &self,
        query: &str,
        depth: usize,
        report: &mut dyn FnMut(InstallEvent),
    ) -> Result<InstallStatus> {
        if depth > self.max_depth {
            report(InstallEvent::DepthLimitReached {
                name: query.to_string(),
                depth,
            });
            return Ok(InstallStatus::Failed);
        }

        let package = match self.repository.resolve(query) {
            Ok(package) => package,
            Err(CreepError::AmbiguousName { name, candidates }) => {
                report(InstallEvent::AmbiguousPackage { name, candidates });
                report(InstallEvent::UnknownPackage {
                    name: query.to_string(),
                });
                return Ok(InstallStatus::Failed);
            }
            Err(CreepError::PackageNotFound { .. }) => {
                report(InstallEvent::UnknownPackage {
                    name: query.to_string(),
                });
                return Ok(InstallStatus::Failed);
            }
            Err(e) => return Err(e),
        };

        if package.is_collection() && !self.install_dependencies {
            report(InstallEvent::CollectionNeedsDependencies {
                name: package.name.clone(),
            });
            return Ok(InstallStatus::Failed);
        }

        report(InstallEvent::Installing {
            package: package.to_string(),
        });

        // Required versions are informational only; each dependency installs
        // at its own latest version for the current target.
        for dependency in package.require.keys() {
            if dependency == "minecraft" || dependency == "forge" {
                continue;
            }
            if self.install_dependencies {
                report(InstallEvent::InstallingDependency {
                    name: dependency.clone(),
                });
                self.install_at_depth(dependency, depth + 1, report)?;
            } else {
                report(InstallEvent::SkippingDependency {
                    name: dependency.clone(),
                });
            }
        }

        if package.is_collection() {
            report(InstallEvent::InstalledCollection {
                name: package.name.clone(),
            });
            return Ok(InstallStatus::Collection);
        }

        self.install_artifact(&package, report)
    }

    fn install_artifact(
        &self,
        package: &Package,
        report: &mut dyn FnMut(InstallEvent),
    ) -> Result<InstallStatus> {
        let cache_dir = self.cache_root.join(&package.install_dir);
        fs::create_dir_all(&cache_dir)?;

        let cached = cache_dir.join(package.local_filename());
        if !cached.is_file() {
            let url = package.download_location();
            report(InstallEvent::Downloading {
                name: package.name.clone(),
                url: url.clone(),
            });
            match self.downloader.fetch(&url) {
                Ok(body) => fs::write(&cached, body)?,
                Err(e) => {
                    report(InstallEvent::DownloadFailed {
                        url,
                        reason: e.to_string(),
                    });
                    return Ok(InstallStatus::Failed);
                }
            }
        }

        let dest_dir = self.profile_dir.join(&package.install_dir);
        if !dest_dir.is_dir() {
            report(InstallEvent::CreatingDirectory {
                path: dest_dir.clone(),
            });
            fs::create_dir_all(&dest_dir)?;
        }

        if !package.install_strategy.is_empty() {
            report(InstallEvent::RunningStrategy {
                strategy: package.install_strategy.clone(),
            });
            let strategy = InstallStrategy::parse(&package.install_strategy);
            let work_root = self.cache_root.join("tmp");
            strategy.run(package, &cache_dir, &work_root, &dest_dir, report)?;
        }

        // The archive itself always lands in the destination, on top of
        // whatever the strategy produced.
        let dest = dest_dir.join(package.local_filename());
        fs::copy(&cached, &dest)?;
        report(InstallEvent::InstalledMod {
            name: package.name.clone(),
            path: dest,
        });

        Ok(InstallStatus::Installed)
    }

    /// Install every package named in a list file, one query per line (the
    /// first whitespace-separated token), in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or an install
    /// hits an unexpected filesystem failure. A missing file is reported and
    /// yields `Ok(InstallStatus::Failed)`.
    pub fn install_from_listfile(
        &self,
        path: &Path,
        report: &mut dyn FnMut(InstallEvent),
    ) -> Result<InstallStatus> {
        report(InstallEvent::ReadingListfile {
            path: path.to_path_buf(),
        });
        if !path.is_file() {
            report(InstallEvent::ListfileMissing {
                path: path.to_path_buf(),
            });
            return Ok(InstallStatus::Failed);
        }

        let contents = fs::read_to_string(path)?;
        let mut any_failed = false;
        for line in contents.lines() {
            let Some(name) = line.split_whitespace().next() else {
                continue;
            };
            if self.install(name, report)? == InstallStatus::Failed {
                any_failed = true;
            }
        }

        Ok(if any_failed {
            InstallStatus::Failed
        } else {
            InstallStatus::Installed
        })
    }

    /// Remove an installed package's artifact from the profile.
    ///
    /// # Errors
    ///
    /// Returns a resolution error for unknown queries, or an IO error if the
    /// artifact is not present in the profile.
    pub fn uninstall(&self, query: &str) -> Result<(Package, PathBuf)> {
        let package = self.repository.resolve(query)?;
        let dest_dir = self.profile_dir.join(&package.install_dir);
        fs::remove_file(dest_dir.join(package.local_filename()))?;
        Ok((package, dest_dir))
    }

    /// Delete every file under the profile's mods directory, recursively.
    /// The directory itself is kept. Returns the removed filenames; a
    /// missing mods directory removes nothing.
    ///
    /// # Errors
    ///
    /// Returns an IO error if a file cannot be deleted.
    pub fn purge(&self) -> Result<Vec<String>> {
        let mods_dir = self.profile_dir.join("mods");
        let mut removed = Vec::new();
        if mods_dir.is_dir() {
            remove_dir_files(&mods_dir, &mut removed)?;
        }
        Ok(removed)
    }
}

fn remove_dir_files(dir: &Path, removed: &mut Vec<String>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            remove_dir_files(&path, removed)?;
            fs::remove_dir(&path)?;
        } else {
            fs::remove_file(&path)?;
            removed.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(())
}
