// Clippy configuration for creep crate
// Allow single char patterns where appropriate
#![allow(clippy::single_char_pattern)]
// Allow map().unwrap_or() pattern
#![allow(clippy::map_unwrap_or)]
// Allow redundant closures for clarity
#![allow(clippy::redundant_closure_for_method_calls)]
// Allow format string style choices
#![allow(clippy::uninlined_format_args)]
// Doc backticks optional
#![allow(clippy::doc_markdown)]
// Allow manual Default implementations
#![allow(clippy::derivable_impls)]
// Allow identical match arms for clarity
#![allow(clippy::match_same_arms)]
// Allow pass-by-value for small types
#![allow(clippy::needless_pass_by_value)]

//! Creep: a package manager for Minecraft mods
//!
//! Creep mirrors a remote package registry into a local cache and installs
//! mod artifacts (and their dependencies) into a Minecraft profile. It keeps
//! a per-user app directory with the registry cache, configured options and
//! downloaded artifacts, and manages the profile's `mods` directory:
//! installing, uninstalling, purging and stashing complete mod sets.
//!
//! # Quick Start
//!
//! ```no_run
//! use creep::prelude::*;
//! use std::path::Path;
//!
//! // Open the repository backed by the app dir's registry cache
//! let mut repository = Repository::new(Path::new("/home/user/.creep"));
//! repository.set_minecraft_target("1.20.1");
//!
//! let downloader = HttpDownloader::new()?;
//! repository.populate(&downloader, None, true)?;
//!
//! // Resolve a package and install it into a profile
//! let engine = InstallEngine::new(
//!     &repository,
//!     &downloader,
//!     "/home/user/.creep/cache",
//!     "/home/user/.minecraft",
//! );
//! let status = engine.install("mezz/jei", &mut |event| println!("{event:?}"))?;
//! println!("{status:?}");
//! # Ok::<(), creep::error::CreepError>(())
//! ```
//!
//! # Architecture
//!
//! - **Repository** - registry cache lifecycle, latest-version and
//!   simple-name indexes, resolution and search
//! - **Install engine** - dependency expansion, artifact download and cache,
//!   install strategies, placement into the profile
//! - **Stashes** - named snapshots of the profile's mods directory that can
//!   be restored or applied later
//!
//! Network access goes through the [`download::Downloader`] trait so the
//! whole pipeline runs against stubs in tests.

pub mod cli;
pub mod download;
pub mod error;
pub mod install;
pub mod options;
pub mod package;
pub mod prelude;
pub mod repository;
pub mod stash;
pub mod strategy;
pub mod version;

pub use error::{CreepError, Result};
pub use package::Package;
pub use repository::Repository;
