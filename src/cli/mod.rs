//! CLI command handlers.
//!
//! This module contains the output formatting and bootstrap logic for CLI
//! commands, separated from argument parsing for testability. The binary
//! parses arguments, calls into the library, and prints whatever these
//! helpers hand back.

use crate::download::Downloader;
use crate::error::Result;
use crate::install::InstallEvent;
use crate::options::{AppDirs, Options};
use crate::package::Package;
use crate::repository::{CacheEvent, Repository, SearchResults};
use crate::stash::DirectoryScan;
use std::fmt::Write;
use std::path::Path;

/// Open the repository for the configured target, layering the optional
/// local package overlay on top of the cached registry.
///
/// # Errors
///
/// Returns an error if the registry cache or overlay file cannot be parsed.
pub fn open_repository(
    dirs: &AppDirs,
    options: &Options,
    downloader: &dyn Downloader,
) -> Result<(Repository, Vec<CacheEvent>)> {
    let mut repository = Repository::new(&dirs.app_dir);
    repository.set_minecraft_target(&options.minecraft_target);

    let local_packages = dirs.app_dir.join("local-packages.json");
    let mut events = Vec::new();
    if local_packages.is_file() {
        events.extend(repository.populate(downloader, None, false)?.events);
        events.extend(
            repository
                .populate(downloader, Some(&local_packages), true)?
                .events,
        );
    } else {
        events.extend(repository.populate(downloader, None, true)?.events);
    }
    Ok((repository, events))
}

/// One line describing a registry cache notice.
#[must_use]
pub fn format_cache_event(event: &CacheEvent) -> String {
    match event {
        CacheEvent::Refreshing { url } => {
            format!("Refreshing registry file from {url}")
        }
        CacheEvent::Unavailable => {
            "Package definition file not found or no internet connection.".to_string()
        }
        CacheEvent::StaleKept { modified } => format!(
            "No internet connection. Using current version of repository. Date: {modified}"
        ),
    }
}

/// One line describing an install progress event.
#[must_use]
pub fn format_install_event(event: &InstallEvent) -> String {
    match event {
        InstallEvent::Installing { package } => {
            format!("Installing package '{package}'")
        }
        InstallEvent::AmbiguousPackage { name, candidates } => {
            format!("Multiple packages exist with name '{name}' ({candidates})")
        }
        InstallEvent::UnknownPackage { name } => format!("Unknown package '{name}'"),
        InstallEvent::CollectionNeedsDependencies { .. } => {
            "Cannot install collection without dependencies. \
             Try again without flag -n / --no-dependencies."
                .to_string()
        }
        InstallEvent::InstallingDependency { name } => {
            format!("Installing dependency '{name}'")
        }
        InstallEvent::SkippingDependency { name } => {
            format!("Skipping dependency '{name}'")
        }
        InstallEvent::DepthLimitReached { name, depth } => {
            format!("Dependency chain too deep at '{name}' (depth {depth}); giving up")
        }
        InstallEvent::Downloading { name, url } => {
            format!("  Downloading mod '{name}' from {url}")
        }
        InstallEvent::DownloadFailed { .. } => "Download failed.".to_string(),
        InstallEvent::CreatingDirectory { path } => {
            format!("Creating directory '{}'", path.display())
        }
        InstallEvent::RunningStrategy { strategy } => {
            format!("Installing with strategy: {strategy}")
        }
        InstallEvent::Unzipping { archive } => {
            format!("Unzipping archive: {}", archive.display())
        }
        InstallEvent::Moving { path } => format!("Moving files: {path}"),
        InstallEvent::InstalledMod { name, path } => {
            format!("  Installed mod '{name}' in '{}'", path.display())
        }
        InstallEvent::InstalledCollection { name } => {
            format!("Installed collection '{name}'")
        }
        InstallEvent::ReadingListfile { path } => {
            format!("Reading packages from file '{}'...", path.display())
        }
        InstallEvent::ListfileMissing { path } => {
            format!("File '{}' not found.", path.display())
        }
    }
}

/// One listing line for a package.
#[must_use]
pub fn format_package_line(package: &Package, short_form: bool) -> String {
    let mut line = if short_form {
        format!("{}:{}", package.name, package.version)
    } else {
        format!(
            "{}:{} - {} [{}]",
            package.name,
            package.version,
            package.description,
            package.minecraft_version()
        )
    };
    if package.is_collection() {
        line.push_str(" [collection]");
    }
    line
}

/// Multi-line detail block for `creep info`.
#[must_use]
pub fn format_package_details(package: &Package) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", package.name);
    out.push_str("--------\n");
    let _ = writeln!(out, "Version: {}", package.version);
    let _ = writeln!(out, "Description: {}", package.description);
    let _ = writeln!(out, "Package Type: {}", package.kind);
    let _ = writeln!(out, "Keywords: {}", package.keywords);
    let _ = writeln!(out, "Homepage: {}", package.homepage);
    let _ = writeln!(out, "Local filename: {}", package.local_filename());
    out.push_str("Dependencies: \n");
    for (name, version) in &package.require {
        let _ = writeln!(out, " - {name}: {version}");
    }
    out
}

/// Listing of a scanned mods directory: recognized packages first, then
/// unclaimed filenames. An empty scan explains where it looked.
#[must_use]
pub fn format_directory_listing(scan: &DirectoryScan, dir: &Path, short_form: bool) -> String {
    let mut out = String::new();
    if scan.is_empty() {
        let _ = writeln!(out, "Looking in {}", dir.display());
        out.push_str("No mods installed\n");
        return out;
    }

    if !short_form {
        let _ = writeln!(out, "Installed mods (in {}):", dir.display());
    }
    for entry in &scan.known {
        let _ = writeln!(out, "{}", format_package_line(&entry.package, short_form));
    }
    for filename in &scan.unknown {
        let _ = writeln!(out, "{filename}");
    }
    out
}

/// Listing lines for search results.
#[must_use]
pub fn format_search_results(results: &SearchResults) -> String {
    let mut out = String::new();
    for package in &results.packages {
        let _ = writeln!(out, "{}", format_package_line(package, false));
    }
    out
}

/// Summary block printed after a registry refresh.
#[must_use]
pub fn format_refresh_summary(repository: &Repository) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Repository updated to version {} ({}).",
        repository.version_hash(),
        repository.version_date()
    );
    let _ = writeln!(out, "Count: {} packages.", repository.count());
    out
}

/// Banner for `creep version`: client version, target, profile.
#[must_use]
pub fn format_version_banner(options: &Options) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Creep v{}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(
        out,
        "Targetting minecraft version {}",
        options.minecraft_target
    );
    let _ = writeln!(out, "Profile path '{}'", options.profile_dir.display());
    out
}
