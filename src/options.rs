//! User options and application paths.
//!
//! Options persist in `options.json` inside the app dir (`~/.creep` unless
//! overridden). Absent file or absent keys fall back to defaults, so a
//! half-written options file still loads.

use crate::error::{CreepError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Minecraft version targeted when the user has not picked one.
pub const DEFAULT_TARGET: &str = "1.20.1";

const OPTIONS_FILE: &str = "options.json";

/// Persisted user options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Minecraft version mods are selected and installed for.
    pub minecraft_target: String,
    /// Profile directory where mods are managed.
    pub profile_dir: PathBuf,
}

#[derive(Default, Deserialize)]
struct RawOptions {
    #[serde(default)]
    minecraft_target: Option<String>,
    #[serde(default)]
    profile_dir: Option<PathBuf>,
}

impl Options {
    /// Load options from `app_dir/options.json`, filling defaults for
    /// anything missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the default profile location cannot be determined.
    pub fn load(app_dir: &Path) -> Result<Self> {
        let path = app_dir.join(OPTIONS_FILE);
        let raw: RawOptions = if path.is_file() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            RawOptions::default()
        };

        let profile_dir = match raw.profile_dir {
            Some(dir) => dir,
            None => default_minecraft_dir()?,
        };
        Ok(Self {
            minecraft_target: raw
                .minecraft_target
                .unwrap_or_else(|| DEFAULT_TARGET.to_string()),
            profile_dir,
        })
    }

    /// Write options to `app_dir/options.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, app_dir: &Path) -> Result<()> {
        let path = app_dir.join(OPTIONS_FILE);
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Application directories, created on demand.
#[derive(Debug, Clone)]
pub struct AppDirs {
    /// Dotfile directory holding options and the registry cache.
    pub app_dir: PathBuf,
    /// Artifact cache root under the app dir.
    pub cache_dir: PathBuf,
}

impl AppDirs {
    /// Resolve the app dir (`~/.creep`, or the given override) and ensure it
    /// and its cache subdirectory exist.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be found or the directories
    /// cannot be created.
    pub fn resolve(override_dir: Option<PathBuf>) -> Result<Self> {
        let app_dir = match override_dir {
            Some(dir) => dir,
            None => home_dir()?.join(".creep"),
        };
        let cache_dir = app_dir.join("cache");
        fs::create_dir_all(&cache_dir)?;
        Ok(Self { app_dir, cache_dir })
    }
}

fn home_dir() -> Result<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .ok_or_else(|| {
            CreepError::Configuration("cannot determine home directory; set HOME".to_string())
        })
}

/// Platform-default minecraft installation directory.
///
/// # Errors
///
/// Returns an error if no home directory can be found.
pub fn default_minecraft_dir() -> Result<PathBuf> {
    let home = home_dir()?;
    let dir = if cfg!(target_os = "windows") {
        home.join("AppData").join("Roaming").join(".minecraft")
    } else if cfg!(target_os = "macos") {
        home.join("Library")
            .join("Application Support")
            .join("minecraft")
    } else {
        home.join(".minecraft")
    };
    Ok(dir)
}
