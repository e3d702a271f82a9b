//! Document assembly — one ordered pass over the manifest.
//!
//! Each entry's contribution depends only on the entry itself, and the
//! pieces are appended in manifest order:
//!
//! | entry            | output                                              |
//! |------------------|-----------------------------------------------------|
//! | `LiteralText`    | every line as `// <line>`                           |
//! | `CommentedFile`  | banner, then every file line as `// <line>`         |
//! | `SkippedFile`    | nothing                                             |
//! | `InlineFile`     | banner, rewritten body (definition-wrapped if it is |
//! |                  | compiled source), footer                            |
//!
//! The result is wrapped in the outer include guard. Any error aborts the
//! whole pass; no partial document is ever returned.

use crate::rewriter::{DEFAULT_INCLUDE_ROOT, IncludeRewriter};
use crate::rules::RuleSet;
use crate::template;
use amalgam_core::{Entry, Error, Manifest, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extensions treated as compilation units unless configured otherwise.
pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &["c", "cpp"];

/// Names and locations that parameterize one assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblySettings {
    /// Directory every manifest path is resolved against.
    pub root_dir: PathBuf,
    /// Repository / library name used in banners and guard checks.
    pub repo: String,
    /// Macro that enables compiled-source bodies in exactly one TU.
    pub definition_macro: String,
    /// Include guard around the whole document.
    pub outer_guard: String,
    /// Directory shown between the repo name and included paths.
    pub include_root: String,
    /// Extensions (without the dot) marking compiled-source files.
    pub source_extensions: Vec<String>,
}

impl AssemblySettings {
    pub fn new(
        root_dir: impl Into<PathBuf>,
        repo: impl Into<String>,
        definition_macro: impl Into<String>,
        outer_guard: impl Into<String>,
    ) -> Self {
        Self {
            root_dir: root_dir.into(),
            repo: repo.into(),
            definition_macro: definition_macro.into(),
            outer_guard: outer_guard.into(),
            include_root: DEFAULT_INCLUDE_ROOT.into(),
            source_extensions: DEFAULT_SOURCE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Whether `path` names a compilation unit rather than a header.
    pub fn is_compiled_source(&self, path: &str) -> bool {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.source_extensions.iter().any(|s| s == ext))
    }
}

/// Counters collected during one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyReport {
    pub entries: usize,
    pub inlined_files: usize,
    pub commented_files: usize,
    pub skipped_files: usize,
    pub literal_blocks: usize,
    pub definition_wrapped: usize,
    pub lines_read: usize,
    pub includes_rewritten: usize,
    pub output_bytes: usize,
}

/// A finished document and how it was produced.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub document: String,
    pub report: AssemblyReport,
}

/// Drives the pass over a manifest.
#[derive(Debug, Clone)]
pub struct Assembler {
    settings: AssemblySettings,
    rules: RuleSet,
}

impl Assembler {
    pub fn new(settings: AssemblySettings, rules: RuleSet) -> Self {
        Self { settings, rules }
    }

    pub fn settings(&self) -> &AssemblySettings {
        &self.settings
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Assemble `manifest` into one document.
    ///
    /// Guard uniqueness is checked before any file is read.
    pub fn assemble(&self, manifest: &Manifest) -> Result<Assembly> {
        manifest.validate_guards()?;

        let mut report = AssemblyReport::default();
        let mut body = String::new();
        for entry in manifest {
            self.append_entry(entry, &mut body, &mut report)?;
            report.entries += 1;
        }

        let document = template::outer_guard(&self.settings.outer_guard, &body);
        report.output_bytes = document.len();
        info!(
            repo = %self.settings.repo,
            entries = report.entries,
            inlined = report.inlined_files,
            includes_rewritten = report.includes_rewritten,
            bytes = report.output_bytes,
            "Amalgamation assembled"
        );
        Ok(Assembly { document, report })
    }

    /// Resolve `path` under the root directory and check it is readable.
    pub fn check_exists(&self, path: &str) -> Result<PathBuf> {
        let full = self.settings.root_dir.join(path);
        std::fs::metadata(&full).map_err(|e| Error::read(&full, e))?;
        Ok(full)
    }

    fn append_entry(
        &self,
        entry: &Entry,
        out: &mut String,
        report: &mut AssemblyReport,
    ) -> Result<()> {
        let repo = self.settings.repo.as_str();
        match entry {
            Entry::LiteralText { text } => {
                debug!(lines = text.split('\n').count(), "Appending literal text");
                for line in text.split('\n') {
                    out.push_str(&template::comment_line(line));
                    out.push('\n');
                }
                report.literal_blocks += 1;
            }
            Entry::CommentedFile { path } => {
                debug!(path = %path, "Appending commented file");
                let content = self.read(path)?;
                out.push_str(&template::banner(path, repo));
                for line in content.split_inclusive('\n') {
                    out.push_str(&template::comment_line(line));
                    if !line.ends_with('\n') {
                        out.push('\n');
                    }
                    report.lines_read += 1;
                }
                report.commented_files += 1;
            }
            Entry::SkippedFile { path } => {
                debug!(path = %path, "Skipping file");
                report.skipped_files += 1;
            }
            Entry::InlineFile { path } => {
                let content = self.read(path)?;
                let rewritten = IncludeRewriter::new(&self.rules, repo)
                    .with_include_root(&self.settings.include_root)
                    .rewrite_text(&content)?;
                let compiled = self.settings.is_compiled_source(path);
                debug!(
                    path = %path,
                    lines = rewritten.lines,
                    includes = rewritten.rewritten,
                    compiled,
                    "Inlining file"
                );

                out.push_str(&template::banner(path, repo));
                if compiled {
                    out.push_str(&template::definition_block(
                        &self.settings.definition_macro,
                        &rewritten.text,
                    ));
                    report.definition_wrapped += 1;
                } else {
                    out.push_str(&rewritten.text);
                }
                out.push_str(&template::footer(path, repo));

                report.inlined_files += 1;
                report.lines_read += rewritten.lines;
                report.includes_rewritten += rewritten.rewritten;
            }
        }
        Ok(())
    }

    fn read(&self, path: &str) -> Result<String> {
        let full = self.settings.root_dir.join(path);
        std::fs::read_to_string(&full).map_err(|e| Error::read(full, e))
    }
}

/// Assemble `manifest` with default include root and source extensions,
/// returning only the document.
pub fn assemble(
    manifest: &Manifest,
    root_dir: &Path,
    rules: &RuleSet,
    definition_macro: &str,
    repo: &str,
    outer_guard: &str,
) -> Result<String> {
    let settings = AssemblySettings::new(root_dir, repo, definition_macro, outer_guard);
    let assembly = Assembler::new(settings, rules.clone()).assemble(manifest)?;
    Ok(assembly.document)
}
