//! Guard-name derivation.
//!
//! Maps a relative file path to the include-guard macro the file is expected
//! to define, e.g. `c4/error.hpp` becomes `C4_ERROR_HPP_`.

use serde::Serialize;
use std::fmt;

/// A macro-safe include-guard identifier derived from a relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GuardIdentifier(String);

impl GuardIdentifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for GuardIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GuardIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive the guard identifier for `path`.
///
/// Each `.` and `/` becomes `_`, the result is upper-cased and a trailing
/// `_` is appended. Total over any input string.
pub fn derive_guard(path: &str) -> GuardIdentifier {
    let mut guard: String = path
        .chars()
        .map(|c| match c {
            '.' | '/' => '_',
            other => other,
        })
        .collect::<String>()
        .to_uppercase();
    guard.push('_');
    GuardIdentifier(guard)
}
