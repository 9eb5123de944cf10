//! Version normalization and ordering for package records.
//!
//! Registry versions are free-form strings (`1.20.2-forge-16.0.0.28`,
//! `seven.3.1`), so ordering works on dot-separated segment strings rather
//! than parsed numbers. Trailing all-zero segments are insignificant:
//! `1.2`, `1.2.0` and `1.2.0.0` are the same version.
//!
//! Segments compare as strings, not numbers, so `"9" > "10"`. Registry data
//! has depended on this ordering for years; changing it would silently
//! reorder published versions.
//!
//! # Example
//!
//! ```
//! use creep::version::{compare_versions, normalize_version};
//! use std::cmp::Ordering;
//!
//! assert_eq!(normalize_version("1.2.0.0"), vec!["1", "2"]);
//! assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
//! assert_eq!(compare_versions("1.16.5", "1.8.9"), Ordering::Less);
//! ```

use std::cmp::Ordering;

/// Split a version string into comparison segments.
///
/// Strips any run of trailing `.0`-style segments (one or more zeros), then
/// splits the remainder on `.`. Inner zero segments and leading zeros are
/// kept as written.
#[must_use]
pub fn normalize_version(version: &str) -> Vec<String> {
    let mut trimmed = version;
    while let Some(idx) = trimmed.rfind('.') {
        let segment = &trimmed[idx + 1..];
        if segment.is_empty() || !segment.bytes().all(|b| b == b'0') {
            break;
        }
        trimmed = &trimmed[..idx];
    }
    trimmed.split('.').map(str::to_string).collect()
}

/// Order two version strings by their normalized segment sequences.
///
/// Lexicographic over segment strings: a shorter sequence that is a prefix
/// of a longer one orders first.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    normalize_version(a).cmp(&normalize_version(b))
}
