//! Convenient re-exports for common usage.
//!
//! ```
//! use creep::prelude::*;
//! ```

// Core types
pub use crate::error::{CreepError, Result};
pub use crate::repository::{CacheEvent, PopulateSummary, Repository, SearchPhase, SearchResults};

// Package records
pub use crate::package::{Package, PackageKind, RegistryDocument};

// Version ordering
pub use crate::version::{compare_versions, normalize_version};

// Install pipeline
pub use crate::download::{Downloader, HttpDownloader};
pub use crate::install::{InstallEngine, InstallEvent, InstallStatus};
pub use crate::strategy::{Directive, InstallStrategy};

// Profile management
pub use crate::options::{AppDirs, Options, DEFAULT_TARGET};
pub use crate::stash::{DirectoryScan, ScannedMod, StashManager};
