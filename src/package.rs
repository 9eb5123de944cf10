//! Package record types and the registry wire format.
//!
//! A package names one downloadable mod artifact (or a collection of other
//! packages) at one version. Records come from the package registry, a JSON
//! document keyed by name and then by version.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fallback download host used when a record carries no explicit `url`.
const FALLBACK_PACKAGE_URL: &str = "http://quantalideas.com/creep/packages/";

/// What a package installs as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    /// A set of dependencies with no artifact of its own.
    Collection,
    /// A single mod artifact. Unrecognized registry values fall back here.
    #[default]
    #[serde(other)]
    Mod,
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collection => write!(f, "collection"),
            Self::Mod => write!(f, "mod"),
        }
    }
}

/// A single package record from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Qualified name, normally `vendor/simple-name`.
    pub name: String,
    /// Free-form version string; ordered by [`crate::version::compare_versions`].
    pub version: String,
    /// Human-readable description.
    pub description: String,
    /// Space-separated keyword list for search.
    pub keywords: String,
    /// Dependencies by name, mapped to an informational version string.
    /// The `minecraft` and `forge` keys mark compatibility, not installables.
    #[serde(default)]
    pub require: BTreeMap<String, String>,
    /// Mod author.
    pub author: String,
    /// Project homepage, if any.
    #[serde(default)]
    pub homepage: String,
    /// Record kind (`type` on the wire).
    #[serde(rename = "type", default)]
    pub kind: PackageKind,
    /// Directory under the profile root where the artifact lands.
    #[serde(rename = "installdir", default = "default_install_dir")]
    pub install_dir: String,
    /// Unpack/relocate directives run before the final copy; empty = none.
    #[serde(rename = "installstrategy", default)]
    pub install_strategy: String,
    /// Artifact filename as published.
    #[serde(default)]
    pub filename: String,
    /// Explicit download URL; empty = use the fallback host.
    #[serde(default)]
    pub url: String,
}

fn default_install_dir() -> String {
    "mods".to_string()
}

impl Default for Package {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: String::new(),
            description: String::new(),
            keywords: String::new(),
            require: BTreeMap::new(),
            author: String::new(),
            homepage: String::new(),
            kind: PackageKind::Mod,
            install_dir: default_install_dir(),
            install_strategy: String::new(),
            filename: String::new(),
            url: String::new(),
        }
    }
}

impl Package {
    /// Name without the vendor prefix.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        match self.name.split_once('/') {
            Some((_, simple)) => simple,
            None => &self.name,
        }
    }

    /// Minecraft version this record is compatible with (empty if unknown).
    #[must_use]
    pub fn minecraft_version(&self) -> &str {
        self.require.get("minecraft").map_or("", String::as_str)
    }

    /// Whether this record is a collection of other packages.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        self.kind == PackageKind::Collection
    }

    /// Filename the artifact is stored under locally.
    ///
    /// Mods get a canonical `vendor_name_version.ext` so different versions
    /// of one mod never collide in the cache or the mods directory. Records
    /// installed outside `mods` keep their published filename, which other
    /// tooling may expect verbatim.
    #[must_use]
    pub fn local_filename(&self) -> String {
        if self.install_dir != "mods" {
            return self.filename.clone();
        }

        let extension = match self.filename.rfind('.') {
            Some(idx) => &self.filename[idx..],
            None => "",
        };
        format!(
            "{}_{}{}",
            self.name.replace('/', "_"),
            self.version.replace(' ', "-"),
            extension
        )
    }

    /// URL to download the artifact from.
    #[must_use]
    pub fn download_location(&self) -> String {
        if self.url.is_empty() {
            format!("{FALLBACK_PACKAGE_URL}{}", self.filename)
        } else {
            self.url.clone()
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.version)
    }
}

/// Top-level registry document: metadata plus packages keyed by name, then
/// by version. `BTreeMap` keeps population order deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryDocument {
    /// Opaque registry content hash.
    #[serde(default)]
    pub repository_version: String,
    /// Publication date as a display string.
    #[serde(default)]
    pub date: String,
    /// All package records.
    pub packages: BTreeMap<String, BTreeMap<String, Package>>,
}
