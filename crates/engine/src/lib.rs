//! Amalgam engine — include rewriting and single-file document assembly.
//!
//! Concatenating a library's files removes the `#include` lines between
//! them, and with them the compiler's chance to notice a wrong file order.
//! The engine replaces each such line with a preprocessor check that the
//! included file's guard is already defined, so a misordered manifest fails
//! the consumer's build instead of miscompiling it.
//!
//! # Pipeline
//!
//! ```text
//! ┌────────────┐    ┌──────────────┐    ┌──────────────────┐
//! │  Manifest   │───▶│  Assembler   │───▶│  #ifndef OUTER    │
//! │  (ordered)  │    │  per entry   │    │  ...document...   │
//! └────────────┘    └──────┬───────┘    │  #endif           │
//!                          │            └──────────────────┘
//!                   ┌──────┴───────┐
//!                   │  Rewriter    │  per line, against a
//!                   │  (RuleSet)   │  precompiled RuleSet
//!                   └──────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use amalgam_core::{Entry, IncludeRule, Manifest};
//! use amalgam_engine::{Assembler, AssemblySettings, RuleSet};
//!
//! let rules = RuleSet::compile(&[IncludeRule::new(r#"^\s*#\s*include "(c4/.*)".*$"#)])?;
//! let settings = AssemblySettings::new("c4core", "c4core", "C4CORE_SINGLE_HDR_DEFINE_NOW", "C4CORE_ALL_HPP_");
//! let manifest = Manifest::new(vec![
//!     Entry::text("c4core - single header"),
//!     Entry::inline("src/c4/export.hpp"),
//!     Entry::inline("src/c4/error.cpp"),
//! ]);
//! let assembly = Assembler::new(settings, rules).assemble(&manifest)?;
//! println!("{}", assembly.document);
//! # Ok::<(), amalgam_core::Error>(())
//! ```

mod assembler;
mod rewriter;
mod rules;
pub mod template;

pub use assembler::{
    Assembler, Assembly, AssemblyReport, AssemblySettings, DEFAULT_SOURCE_EXTENSIONS, assemble,
};
pub use rewriter::{DEFAULT_INCLUDE_ROOT, IncludeRewriter, RewrittenText, rewrite_line};
pub use rules::{CompiledRule, IncludeMatch, RuleSet};
