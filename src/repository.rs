//! Package repository: registry cache lifecycle, indexes, resolution, search.
//!
//! The repository mirrors a remote JSON registry into a local cache file and
//! derives three views from it: every record, the latest record per name for
//! the targeted minecraft version, and a simple-name index for vendor-free
//! lookups. All network access goes through the [`Downloader`] seam; refresh
//! failures degrade to the cached copy rather than erroring out.
//!
//! # Example
//!
//! ```no_run
//! use creep::download::HttpDownloader;
//! use creep::repository::Repository;
//! use std::path::Path;
//!
//! let downloader = HttpDownloader::new().unwrap();
//! let mut repo = Repository::new(Path::new("/home/user/.creep"));
//! repo.set_minecraft_target("1.20.2");
//! repo.populate(&downloader, None, true).unwrap();
//! let package = repo.resolve("mezz/jei").unwrap();
//! println!("{package}");
//! ```

use crate::download::Downloader;
use crate::error::{CreepError, Result};
use crate::options::DEFAULT_TARGET;
use crate::package::{Package, RegistryDocument};
use crate::version::compare_versions;
use chrono::{DateTime, Local};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Canonical registry location. Override with `CREEP_REMOTE_URL`.
const CANONICAL_REMOTE_URL: &str = "http://quantalideas.com/mcpackages/packages.json";

/// Environment variable overriding the registry URL.
const REMOTE_URL_ENV: &str = "CREEP_REMOTE_URL";

/// Cache filename under the app dir.
const REGISTRY_FILE: &str = "packages.json";

/// Local registry cache lifetime.
const CACHE_EXPIRES: Duration = Duration::from_secs(3600);

/// Network timeout for registry refreshes.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Cache lifecycle notices produced while loading the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    /// The cache was missing or stale; a refresh was attempted.
    Refreshing {
        /// Remote URL being fetched.
        url: String,
    },
    /// No usable cache and the refresh failed; the repository is empty.
    Unavailable,
    /// The refresh failed but a stale cache was kept.
    StaleKept {
        /// Last-modified time of the kept file, formatted for display.
        modified: String,
    },
}

/// Outcome of a [`Repository::populate`] call.
#[derive(Debug, Clone, Default)]
pub struct PopulateSummary {
    /// Cache notices, in the order they happened.
    pub events: Vec<CacheEvent>,
    /// Number of records appended by this call.
    pub loaded: usize,
}

/// Which search pass produced the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Token match on name or description, or keyword substring.
    Strict,
    /// Substring fallback over name and description.
    Loose,
}

/// Search results with the phase that produced them.
#[derive(Debug, Clone)]
pub struct SearchResults {
    /// Pass that matched.
    pub phase: SearchPhase,
    /// Matching packages, sorted by name.
    pub packages: Vec<Package>,
}

/// Local mirror of the package registry.
pub struct Repository {
    registry_path: PathBuf,
    remote_url: String,
    minecraft_target: String,
    cache_expires: Duration,
    version_hash: String,
    version_date: String,
    /// Every record, all versions, sorted by name once indexed.
    packages: Vec<Package>,
    /// Latest record per name for the targeted minecraft version.
    latest: Vec<Package>,
    /// Latest records grouped by vendor-free name.
    simple_names: HashMap<String, Vec<Package>>,
}

impl Repository {
    /// Create a repository backed by `app_dir/packages.json`.
    #[must_use]
    pub fn new(app_dir: &Path) -> Self {
        Self {
            registry_path: app_dir.join(REGISTRY_FILE),
            remote_url: env::var(REMOTE_URL_ENV)
                .unwrap_or_else(|_| CANONICAL_REMOTE_URL.to_string()),
            minecraft_target: DEFAULT_TARGET.to_string(),
            cache_expires: CACHE_EXPIRES,
            version_hash: String::new(),
            version_date: String::new(),
            packages: Vec::new(),
            latest: Vec::new(),
            simple_names: HashMap::new(),
        }
    }

    /// Override the cache lifetime.
    #[must_use]
    pub fn with_cache_expires(mut self, expires: Duration) -> Self {
        self.cache_expires = expires;
        self
    }

    /// Override the remote registry URL.
    #[must_use]
    pub fn with_remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = url.into();
        self
    }

    /// Path of the local registry cache file.
    #[must_use]
    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    /// Remote registry URL.
    #[must_use]
    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    /// Currently targeted minecraft version.
    #[must_use]
    pub fn minecraft_target(&self) -> &str {
        &self.minecraft_target
    }

    /// Set the targeted minecraft version. Re-derives the latest and
    /// simple-name indexes when records are already loaded.
    pub fn set_minecraft_target(&mut self, target: impl Into<String>) {
        self.minecraft_target = target.into();
        if !self.packages.is_empty() {
            self.rebuild_indexes();
        }
    }

    /// Registry content hash from the last loaded document.
    #[must_use]
    pub fn version_hash(&self) -> &str {
        &self.version_hash
    }

    /// Registry publication date from the last loaded document.
    #[must_use]
    pub fn version_date(&self) -> &str {
        &self.version_date
    }

    /// Number of records loaded, counting every version.
    #[must_use]
    pub fn count(&self) -> usize {
        self.packages.len()
    }

    /// Latest record per name for the targeted minecraft version.
    #[must_use]
    pub fn latest_packages(&self) -> &[Package] {
        &self.latest
    }

    /// Delete the cache file. Returns whether a file was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear_cache(&self) -> Result<bool> {
        if self.registry_path.is_file() {
            fs::remove_file(&self.registry_path)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Fetch the remote registry and write it verbatim to the cache path.
    ///
    /// # Errors
    ///
    /// Returns [`CreepError::Network`] if the fetch fails, or an IO error if
    /// the cache file cannot be written.
    pub fn download_remote(&self, downloader: &dyn Downloader) -> Result<()> {
        let body = downloader.fetch(&self.remote_url)?;
        fs::write(&self.registry_path, body)?;
        Ok(())
    }

    /// Load registry records and derive the indexes.
    ///
    /// With `source == None` the managed cache is used, downloading or
    /// refreshing it per the freshness policy. With `Some(path)` the given
    /// file is loaded verbatim with no freshness check, appending to any
    /// records already loaded. Index derivation only happens when
    /// `post_process` is set, so a cache load can be chained with a local
    /// overrides file before indexing once.
    ///
    /// # Errors
    ///
    /// Returns an error on unreadable or unparseable registry files. A
    /// failed refresh is not an error; it degrades per [`CacheEvent`].
    pub fn populate(
        &mut self,
        downloader: &dyn Downloader,
        source: Option<&Path>,
        post_process: bool,
    ) -> Result<PopulateSummary> {
        let mut events = Vec::new();
        let document = match source {
            Some(path) => read_registry_file(path)?,
            None => self.load_registry(downloader, &mut events)?,
        };

        self.version_hash = document.repository_version;
        self.version_date = document.date;

        let mut loaded = 0;
        for versions in document.packages.into_values() {
            for package in versions.into_values() {
                self.packages.push(package);
                loaded += 1;
            }
        }

        if post_process {
            self.rebuild_indexes();
        }

        Ok(PopulateSummary { events, loaded })
    }

    /// Read the managed cache, downloading or refreshing it as needed.
    fn load_registry(
        &self,
        downloader: &dyn Downloader,
        events: &mut Vec<CacheEvent>,
    ) -> Result<RegistryDocument> {
        if !self.registry_path.is_file() {
            events.push(CacheEvent::Refreshing {
                url: self.remote_url.clone(),
            });
            if self.download_remote(downloader).is_err() {
                events.push(CacheEvent::Unavailable);
                return Ok(RegistryDocument::default());
            }
            return read_registry_file(&self.registry_path);
        }

        let modified = fs::metadata(&self.registry_path)?.modified()?;
        let stale = SystemTime::now()
            .duration_since(modified)
            .is_ok_and(|age| age > self.cache_expires);
        if stale {
            events.push(CacheEvent::Refreshing {
                url: self.remote_url.clone(),
            });
            if self.download_remote(downloader).is_err() {
                events.push(CacheEvent::StaleKept {
                    modified: format_timestamp(modified),
                });
            }
        }

        read_registry_file(&self.registry_path)
    }

    /// Resolve a package query to a single record.
    ///
    /// `name:version` queries scan every record for an exact version on the
    /// qualified or simple name. Plain queries consult only the latest
    /// records: first by qualified name, then by simple name, which fails as
    /// ambiguous when several vendors publish under the same simple name.
    ///
    /// # Errors
    ///
    /// Returns [`CreepError::PackageNotFound`] or [`CreepError::AmbiguousName`].
    pub fn resolve(&self, query: &str) -> Result<Package> {
        let not_found = || CreepError::PackageNotFound {
            name: query.to_string(),
        };

        if query.is_empty() {
            return Err(not_found());
        }

        if let Some((name, version)) = query.split_once(':') {
            return self
                .packages
                .iter()
                .find(|p| (p.name == name || p.simple_name() == name) && p.version == version)
                .cloned()
                .ok_or_else(not_found);
        }

        if let Some(package) = self.latest.iter().find(|p| p.name == query) {
            return Ok(package.clone());
        }

        if let Some(group) = self.simple_names.get(query) {
            if group.len() > 1 {
                let candidates = group
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(CreepError::AmbiguousName {
                    name: query.to_string(),
                    candidates,
                });
            }
            return Ok(group[0].clone());
        }

        Err(not_found())
    }

    /// Find the record matching a file in a managed directory, by published
    /// or canonical local filename. Scans every version.
    #[must_use]
    pub fn resolve_by_local_filename(&self, filename: &str) -> Option<&Package> {
        self.packages
            .iter()
            .find(|p| p.filename == filename || p.local_filename() == filename)
    }

    /// Two-pass search over the latest records.
    ///
    /// The strict pass token-matches the name (split on `/` and whitespace)
    /// and description (split on whitespace) and substring-matches keywords.
    /// Zero strict hits fall back to a loose substring pass over name and
    /// description. Results are sorted by name.
    #[must_use]
    pub fn search(&self, term: &str) -> SearchResults {
        let mut packages: Vec<Package> = self
            .latest
            .iter()
            .filter(|p| matches_strict(p, term))
            .cloned()
            .collect();
        let mut phase = SearchPhase::Strict;

        if packages.is_empty() {
            phase = SearchPhase::Loose;
            packages = self
                .latest
                .iter()
                .filter(|p| p.name.contains(term) || p.description.contains(term))
                .cloned()
                .collect();
        }

        packages.sort_by(|a, b| a.name.cmp(&b.name));
        SearchResults { phase, packages }
    }

    /// Rebuild the latest and simple-name indexes from the full record list.
    fn rebuild_indexes(&mut self) {
        self.packages.sort_by(|a, b| a.name.cmp(&b.name));

        let mut latest: Vec<Package> = Vec::new();
        {
            let mut by_name: BTreeMap<&str, Vec<&Package>> = BTreeMap::new();
            for package in &self.packages {
                by_name.entry(&package.name).or_default().push(package);
            }

            for versions in by_name.values() {
                let mut best: Option<&Package> = None;
                for &package in versions {
                    if package.minecraft_version() != self.minecraft_target {
                        continue;
                    }
                    // First record wins ties so cache entries shadow later
                    // duplicates from override files.
                    best = match best {
                        None => Some(package),
                        Some(current)
                            if compare_versions(&package.version, &current.version)
                                == Ordering::Greater =>
                        {
                            Some(package)
                        }
                        Some(current) => Some(current),
                    };
                }
                if let Some(package) = best {
                    latest.push(package.clone());
                }
            }
        }
        self.latest = latest;

        let mut simple_names: HashMap<String, Vec<Package>> = HashMap::new();
        for package in &self.latest {
            simple_names
                .entry(package.simple_name().to_string())
                .or_default()
                .push(package.clone());
        }
        self.simple_names = simple_names;
    }
}

fn read_registry_file(path: &Path) -> Result<RegistryDocument> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn matches_strict(package: &Package, term: &str) -> bool {
    if package
        .name
        .split(|c: char| c == '/' || c.is_whitespace())
        .any(|token| token == term)
    {
        return true;
    }
    if package.description.split_whitespace().any(|t| t == term) {
        return true;
    }
    package.keywords.contains(term)
}

fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    /// Downloader returning a canned body, or failing when `body` is `None`.
    struct StubDownloader {
        body: Option<Vec<u8>>,
        calls: Cell<usize>,
    }

    impl StubDownloader {
        fn serving(body: &str) -> Self {
            Self {
                body: Some(body.as_bytes().to_vec()),
                calls: Cell::new(0),
            }
        }

        fn offline() -> Self {
            Self {
                body: None,
                calls: Cell::new(0),
            }
        }
    }

    impl Downloader for StubDownloader {
        fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.calls.set(self.calls.get() + 1);
            match &self.body {
                Some(body) => Ok(body.clone()),
                None => Err(CreepError::Network {
                    url: url.to_string(),
                    reason: "stubbed offline".to_string(),
                }),
            }
        }
    }

    fn sample_registry() -> String {
        r#"{
            "repository_version": "e397849ee30ec3a306b29a9629394a5b",
            "date": "2023-12-29 17:52:10",
            "packages": {
                "mezz/jei": {
                    "1.20.1-forge-15.2.0.27": {
                        "name": "mezz/jei",
                        "version": "1.20.1-forge-15.2.0.27",
                        "description": "View Items and Recipes",
                        "keywords": "jei items recipes map-and-information",
                        "require": {"minecraft": "1.20.1"},
                        "author": "mezz",
                        "type": "mod",
                        "filename": "jei-1.20.1-forge-15.2.0.27.jar"
                    },
                    "1.20.2-forge-16.0.0.28": {
                        "name": "mezz/jei",
                        "version": "1.20.2-forge-16.0.0.28",
                        "description": "View Items and Recipes",
                        "keywords": "jei items recipes map-and-information",
                        "require": {"minecraft": "1.20.2"},
                        "author": "mezz",
                        "type": "mod",
                        "filename": "jei-1.20.2-forge-16.0.0.28.jar"
                    }
                },
                "alasdiablo/jer-integration": {
                    "4.3.1": {
                        "name": "alasdiablo/jer-integration",
                        "version": "4.3.1",
                        "description": "Adds JER support for many mods",
                        "keywords": "jer integration map-and-information",
                        "require": {
                            "minecraft": "1.20.2",
                            "mezz/jei": "*",
                            "way2muchnoise/just-enough-resources-jer": "*"
                        },
                        "author": "alasdiablo",
                        "type": "mod",
                        "filename": "jer-integration-4.3.1.jar"
                    }
                },
                "fork/jei": {
                    "9.9.9": {
                        "name": "fork/jei",
                        "version": "9.9.9",
                        "description": "A fork of the item viewer",
                        "keywords": "fork",
                        "require": {"minecraft": "1.20.2"},
                        "author": "fork",
                        "type": "mod",
                        "filename": "fork-jei-9.9.9.jar"
                    }
                },
                "sumpygump/testing-collection": {
                    "1.0.0": {
                        "name": "sumpygump/testing-collection",
                        "version": "1.0.0",
                        "description": "A testing collection",
                        "keywords": "collection example",
                        "require": {"minecraft": "1.20.2", "mezz/jei": "*"},
                        "author": "sumpygump",
                        "type": "collection"
                    }
                }
            }
        }"#
        .to_string()
    }

    fn seeded_repository() -> (TempDir, Repository) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("packages.json"), sample_registry()).unwrap();
        let mut repo = Repository::new(dir.path());
        repo.set_minecraft_target("1.20.2");
        repo.populate(&StubDownloader::offline(), None, true).unwrap();
        (dir, repo)
    }

    #[test]
    fn test_new_registry_path() {
        let repo = Repository::new(Path::new("/tmp/app"));
        assert_eq!(repo.registry_path(), Path::new("/tmp/app/packages.json"));
        assert_eq!(repo.minecraft_target(), DEFAULT_TARGET);
    }

    #[test]
    fn test_populate_from_fresh_cache_skips_network() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("packages.json"), sample_registry()).unwrap();

        let downloader = StubDownloader::offline();
        let mut repo = Repository::new(dir.path());
        repo.set_minecraft_target("1.20.2");
        let summary = repo.populate(&downloader, None, true).unwrap();

        assert_eq!(downloader.calls.get(), 0);
        assert!(summary.events.is_empty());
        assert_eq!(summary.loaded, 5);
        assert_eq!(repo.count(), 5);
        assert_eq!(repo.version_hash(), "e397849ee30ec3a306b29a9629394a5b");
        assert_eq!(repo.version_date(), "2023-12-29 17:52:10");
    }

    #[test]
    fn test_populate_downloads_when_cache_missing() {
        let dir = TempDir::new().unwrap();
        let downloader = StubDownloader::serving(&sample_registry());

        let mut repo = Repository::new(dir.path());
        let summary = repo.populate(&downloader, None, true).unwrap();

        assert_eq!(downloader.calls.get(), 1);
        assert!(matches!(summary.events[0], CacheEvent::Refreshing { .. }));
        assert_eq!(repo.count(), 5);
        assert!(dir.path().join("packages.json").is_file());
    }

    #[test]
    fn test_populate_unavailable_yields_empty_repository() {
        let dir = TempDir::new().unwrap();
        let downloader = StubDownloader::offline();

        let mut repo = Repository::new(dir.path());
        let summary = repo.populate(&downloader, None, true).unwrap();

        assert_eq!(
            summary.events,
            vec![
                CacheEvent::Refreshing {
                    url: repo.remote_url().to_string()
                },
                CacheEvent::Unavailable
            ]
        );
        assert_eq!(repo.count(), 0);
        assert!(repo.search("jei").packages.is_empty());
        assert!(repo.resolve("jei").is_err());
    }

    #[test]
    fn test_populate_stale_cache_kept_when_refresh_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("packages.json"), sample_registry()).unwrap();

        let downloader = StubDownloader::offline();
        let mut repo = Repository::new(dir.path()).with_cache_expires(Duration::ZERO);
        repo.set_minecraft_target("1.20.2");
        let summary = repo.populate(&downloader, None, true).unwrap();

        assert_eq!(downloader.calls.get(), 1);
        assert!(matches!(summary.events[0], CacheEvent::Refreshing { .. }));
        assert!(matches!(summary.events[1], CacheEvent::StaleKept { .. }));
        assert_eq!(repo.count(), 5);
        assert!(repo.resolve("mezz/jei").is_ok());
    }

    #[test]
    fn test_populate_stale_cache_refreshed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("packages.json"), "{\"packages\": {}}").unwrap();

        let downloader = StubDownloader::serving(&sample_registry());
        let mut repo = Repository::new(dir.path()).with_cache_expires(Duration::ZERO);
        repo.set_minecraft_target("1.20.2");
        let summary = repo.populate(&downloader, None, true).unwrap();

        assert_eq!(downloader.calls.get(), 1);
        assert_eq!(summary.events.len(), 1);
        assert_eq!(repo.count(), 5);
    }

    #[test]
    fn test_populate_from_local_file_appends() {
        let (dir, mut repo) = seeded_repository();

        let local = dir.path().join("local-packages.json");
        fs::write(
            &local,
            r#"{
                "packages": {
                    "local/test-mod": {
                        "0.1.0": {
                            "name": "local/test-mod",
                            "version": "0.1.0",
                            "description": "Local override",
                            "keywords": "",
                            "require": {"minecraft": "1.20.2"},
                            "author": "me",
                            "type": "mod",
                            "filename": "test-mod.jar"
                        }
                    }
                }
            }"#,
        )
        .unwrap();

        let summary = repo
            .populate(&StubDownloader::offline(), Some(&local), true)
            .unwrap();
        assert_eq!(summary.loaded, 1);
        assert_eq!(repo.count(), 6);
        assert!(repo.resolve("local/test-mod").is_ok());
        // Local file carried no metadata, so the header fields reset.
        assert_eq!(repo.version_hash(), "");
    }

    #[test]
    fn test_clear_cache() {
        let (dir, repo) = seeded_repository();
        assert!(dir.path().join("packages.json").is_file());
        assert!(repo.clear_cache().unwrap());
        assert!(!dir.path().join("packages.json").is_file());
        assert!(!repo.clear_cache().unwrap());
    }

    // --- Index derivation ---

    #[test]
    fn test_latest_index_filters_by_target() {
        let (_dir, repo) = seeded_repository();

        // Target 1.20.2: jei appears once, at its 1.20.2 version.
        let names: Vec<&str> = repo.latest_packages().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "alasdiablo/jer-integration",
                "fork/jei",
                "mezz/jei",
                "sumpygump/testing-collection"
            ]
        );
        let jei = repo.resolve("mezz/jei").unwrap();
        assert_eq!(jei.version, "1.20.2-forge-16.0.0.28");
    }

    #[test]
    fn test_set_target_rederives_indexes() {
        let (_dir, mut repo) = seeded_repository();

        repo.set_minecraft_target("1.20.1");
        let names: Vec<&str> = repo.latest_packages().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["mezz/jei"]);
        let jei = repo.resolve("jei").unwrap();
        assert_eq!(jei.version, "1.20.1-forge-15.2.0.27");
    }

    // --- Resolution ---

    #[test]
    fn test_resolve_empty_is_not_found() {
        let (_dir, repo) = seeded_repository();
        assert!(matches!(
            repo.resolve(""),
            Err(CreepError::PackageNotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_by_full_name() {
        let (_dir, repo) = seeded_repository();
        let package = repo.resolve("alasdiablo/jer-integration").unwrap();
        assert_eq!(package.version, "4.3.1");
    }

    #[test]
    fn test_resolve_by_simple_name_unambiguous() {
        let (_dir, repo) = seeded_repository();
        let package = repo.resolve("jer-integration").unwrap();
        assert_eq!(package.name, "alasdiablo/jer-integration");
    }

    #[test]
    fn test_resolve_by_simple_name_ambiguous() {
        let (_dir, repo) = seeded_repository();

        // Both mezz/jei and fork/jei publish under the simple name "jei".
        match repo.resolve("jei") {
            Err(CreepError::AmbiguousName { name, candidates }) => {
                assert_eq!(name, "jei");
                assert!(candidates.contains("mezz/jei"));
                assert!(candidates.contains("fork/jei"));
            }
            other => panic!("expected ambiguous name, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_name_version_scans_all_records() {
        let (_dir, repo) = seeded_repository();

        // The 1.20.1 build is not in the latest index under target 1.20.2,
        // but version queries see every record.
        let package = repo.resolve("mezz/jei:1.20.1-forge-15.2.0.27").unwrap();
        assert_eq!(package.version, "1.20.1-forge-15.2.0.27");

        let by_simple = repo.resolve("jer-integration:4.3.1").unwrap();
        assert_eq!(by_simple.name, "alasdiablo/jer-integration");

        assert!(repo.resolve("mezz/jei:0.0.1").is_err());
    }

    #[test]
    fn test_resolve_unknown_is_not_found() {
        let (_dir, repo) = seeded_repository();
        assert!(matches!(
            repo.resolve("barnacle-fdsa"),
            Err(CreepError::PackageNotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_by_local_filename() {
        let (_dir, repo) = seeded_repository();

        let by_published = repo
            .resolve_by_local_filename("jei-1.20.2-forge-16.0.0.28.jar")
            .unwrap();
        assert_eq!(by_published.name, "mezz/jei");

        let by_canonical = repo
            .resolve_by_local_filename("mezz_jei_1.20.2-forge-16.0.0.28.jar")
            .unwrap();
        assert_eq!(by_canonical.name, "mezz/jei");

        assert!(repo.resolve_by_local_filename("example.jar").is_none());
    }

    // --- Search ---

    #[test]
    fn test_search_strict_name_token() {
        let (_dir, repo) = seeded_repository();
        let results = repo.search("jei");
        assert_eq!(results.phase, SearchPhase::Strict);
        let names: Vec<&str> = results.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["fork/jei", "mezz/jei"]);
    }

    #[test]
    fn test_search_strict_description_token() {
        let (_dir, repo) = seeded_repository();
        let results = repo.search("Recipes");
        assert_eq!(results.phase, SearchPhase::Strict);
        assert_eq!(results.packages.len(), 1);
        assert_eq!(results.packages[0].name, "mezz/jei");
    }

    #[test]
    fn test_search_strict_keyword_substring() {
        let (_dir, repo) = seeded_repository();
        let results = repo.search("map-and-information");
        assert_eq!(results.phase, SearchPhase::Strict);
        let names: Vec<&str> = results.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["alasdiablo/jer-integration", "mezz/jei"]);
    }

    #[test]
    fn test_search_loose_fallback() {
        let (_dir, repo) = seeded_repository();

        // "item" is not a token anywhere but is a substring of "item viewer".
        let results = repo.search("item viewer");
        assert_eq!(results.phase, SearchPhase::Loose);
        assert_eq!(results.packages.len(), 1);
        assert_eq!(results.packages[0].name, "fork/jei");
    }

    #[test]
    fn test_search_no_results() {
        let (_dir, repo) = seeded_repository();
        let results = repo.search("zzz-nothing");
        assert_eq!(results.phase, SearchPhase::Loose);
        assert!(results.packages.is_empty());
    }
}
