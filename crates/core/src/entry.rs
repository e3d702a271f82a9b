//! Manifest model — the ordered list of what goes into an amalgamation.

use crate::error::{Error, Result};
use crate::guard::{GuardIdentifier, derive_guard};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// One manifest entry.
///
/// In TOML this is a table tagged by `kind`:
///
/// ```toml
/// [[entries]]
/// kind = "inline"
/// path = "src/c4/error.hpp"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Entry {
    /// Inlined verbatim with include rewriting; compiled sources are wrapped
    /// in the definition-macro conditional.
    #[serde(rename = "inline")]
    InlineFile { path: String },

    /// Inlined with every line commented out. Reference material only.
    #[serde(rename = "commented")]
    CommentedFile { path: String },

    /// Listed for traceability; emits nothing.
    #[serde(rename = "skip")]
    SkippedFile { path: String },

    /// Literal text emitted as comment lines.
    #[serde(rename = "text")]
    LiteralText { text: String },
}

impl Entry {
    pub fn inline(path: impl Into<String>) -> Self {
        Entry::InlineFile { path: path.into() }
    }

    pub fn commented(path: impl Into<String>) -> Self {
        Entry::CommentedFile { path: path.into() }
    }

    pub fn skipped(path: impl Into<String>) -> Self {
        Entry::SkippedFile { path: path.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Entry::LiteralText { text: text.into() }
    }

    /// The relative path of a file-carrying entry.
    pub fn path(&self) -> Option<&str> {
        match self {
            Entry::InlineFile { path }
            | Entry::CommentedFile { path }
            | Entry::SkippedFile { path } => Some(path),
            Entry::LiteralText { .. } => None,
        }
    }

    /// Whether assembly has to read this entry from disk.
    pub fn reads_file(&self) -> bool {
        matches!(self, Entry::InlineFile { .. } | Entry::CommentedFile { .. })
    }

    /// Short label used in logs and listings.
    pub fn kind(&self) -> &'static str {
        match self {
            Entry::InlineFile { .. } => "inline",
            Entry::CommentedFile { .. } => "commented",
            Entry::SkippedFile { .. } => "skip",
            Entry::LiteralText { .. } => "text",
        }
    }
}

/// A path-carrying entry together with its derived guard.
#[derive(Debug, Clone, Serialize)]
pub struct GuardListing {
    pub kind: &'static str,
    pub path: String,
    pub guard: GuardIdentifier,
}

/// Ordered manifest of entries. Order is load-bearing and never changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: Vec<Entry>,
}

impl Manifest {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Paths of every file-carrying entry, in manifest order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(Entry::path)
    }

    /// Every file-carrying entry with its guard identifier.
    pub fn guards(&self) -> Vec<GuardListing> {
        self.entries
            .iter()
            .filter_map(|e| {
                e.path().map(|p| GuardListing {
                    kind: e.kind(),
                    path: p.to_string(),
                    guard: derive_guard(p),
                })
            })
            .collect()
    }

    /// Reject manifests where two distinct paths derive the same guard.
    ///
    /// A path listed twice is not a collision but is logged.
    pub fn validate_guards(&self) -> Result<()> {
        let mut seen: HashMap<GuardIdentifier, &str> = HashMap::new();
        for path in self.paths() {
            let guard = derive_guard(path);
            match seen.get(&guard) {
                Some(first) if *first == path => {
                    warn!(path, "Path listed more than once in manifest");
                }
                Some(first) => {
                    return Err(Error::GuardCollision {
                        guard: guard.into_inner(),
                        first: (*first).to_string(),
                        second: path.to_string(),
                    });
                }
                None => {
                    seen.insert(guard, path);
                }
            }
        }
        Ok(())
    }
}

impl From<Vec<Entry>> for Manifest {
    fn from(entries: Vec<Entry>) -> Self {
        Self::new(entries)
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_parse_from_toml() {
        #[derive(Deserialize)]
        struct Doc {
            entries: Manifest,
        }
        let doc: Doc = toml::from_str(
            r#"
[[entries]]
kind = "text"
text = "hello"

[[entries]]
kind = "commented"
path = "LICENSE.txt"

[[entries]]
kind = "inline"
path = "src/a.h"

[[entries]]
kind = "skip"
path = "src/win.h"
"#,
        )
        .unwrap();

        assert_eq!(
            doc.entries.entries(),
            &[
                Entry::text("hello"),
                Entry::commented("LICENSE.txt"),
                Entry::inline("src/a.h"),
                Entry::skipped("src/win.h"),
            ]
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Doc {
            entries: Manifest,
        }
        let result: std::result::Result<Doc, _> = toml::from_str(
            r#"
[[entries]]
kind = "glob"
path = "src/*.h"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn paths_skip_literal_text() {
        let manifest = Manifest::new(vec![
            Entry::text("banner"),
            Entry::inline("a.h"),
            Entry::skipped("b.h"),
        ]);
        assert_eq!(manifest.paths().collect::<Vec<_>>(), vec!["a.h", "b.h"]);
    }

    #[test]
    fn guard_listing_covers_every_file_entry() {
        let manifest = Manifest::new(vec![
            Entry::commented("README.md"),
            Entry::inline("c4/error.hpp"),
        ]);
        let listing = manifest.guards();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].kind, "commented");
        assert_eq!(listing[0].guard.as_str(), "README_MD_");
        assert_eq!(listing[1].guard.as_str(), "C4_ERROR_HPP_");
    }

    #[test]
    fn distinct_guards_validate() {
        let manifest = Manifest::new(vec![Entry::inline("a.h"), Entry::inline("a.cpp")]);
        assert!(manifest.validate_guards().is_ok());
    }

    #[test]
    fn colliding_guards_are_rejected() {
        let manifest = Manifest::new(vec![
            Entry::inline("a/b.h"),
            Entry::text("between"),
            Entry::skipped("a.b/h"),
        ]);
        match manifest.validate_guards() {
            Err(Error::GuardCollision {
                guard,
                first,
                second,
            }) => {
                assert_eq!(guard, "A_B_H_");
                assert_eq!(first, "a/b.h");
                assert_eq!(second, "a.b/h");
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn repeated_path_is_not_a_collision() {
        let manifest = Manifest::new(vec![Entry::inline("a.h"), Entry::commented("a.h")]);
        assert!(manifest.validate_guards().is_ok());
    }

    #[test]
    fn reads_file_only_for_inline_and_commented() {
        assert!(Entry::inline("a.h").reads_file());
        assert!(Entry::commented("a.md").reads_file());
        assert!(!Entry::skipped("a.h").reads_file());
        assert!(!Entry::text("x").reads_file());
    }
}
