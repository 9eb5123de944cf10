//! Error types for creep client operations.

use thiserror::Error;

/// Result type alias for creep operations.
pub type Result<T> = std::result::Result<T, CreepError>;

/// Errors that can occur during creep client operations.
#[derive(Error, Debug)]
pub enum CreepError {
    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Archive extraction failed.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Network fetch failed.
    #[error("network error fetching {url}: {reason}")]
    Network {
        /// URL that was requested.
        url: String,
        /// Transport or status failure description.
        reason: String,
    },

    /// Package not present in the repository.
    #[error("package not found: '{name}'")]
    PackageNotFound {
        /// Name or name:version query that failed to resolve.
        name: String,
    },

    /// Simple name matches more than one vendor.
    #[error("package name '{name}' is ambiguous; matches {candidates}")]
    AmbiguousName {
        /// Simple name that was queried.
        name: String,
        /// Comma-separated fully qualified candidates.
        candidates: String,
    },

    /// Stash directory does not exist.
    #[error("no stash named '{0}'")]
    StashNotFound(String),

    /// Stash directory already exists.
    #[error("stash '{0}' already exists")]
    StashExists(String),

    /// Client configuration is unusable.
    #[error("configuration error: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_package_not_found() {
        let err = CreepError::PackageNotFound {
            name: "mezz/jei".to_string(),
        };
        assert_eq!(err.to_string(), "package not found: 'mezz/jei'");
    }

    #[test]
    fn test_error_display_ambiguous_name() {
        let err = CreepError::AmbiguousName {
            name: "jei".to_string(),
            candidates: "mezz/jei, fork/jei".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "package name 'jei' is ambiguous; matches mezz/jei, fork/jei"
        );
    }

    #[test]
    fn test_error_display_network() {
        let err = CreepError::Network {
            url: "http://example.com/packages.json".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "network error fetching http://example.com/packages.json: connection refused"
        );
    }

    #[test]
    fn test_error_display_stash() {
        assert_eq!(
            CreepError::StashNotFound("alpha".to_string()).to_string(),
            "no stash named 'alpha'"
        );
        assert_eq!(
            CreepError::StashExists("alpha".to_string()).to_string(),
            "stash 'alpha' already exists"
        );
    }
}
