//! # Amalgam Core
//!
//! Domain types and error definitions for the Amalgam source amalgamator,
//! which merges an ordered manifest of C/C++ files into one single-file
//! distribution.
//!
//! This crate holds the pieces every other crate agrees on:
//! - the manifest model ([`Entry`], [`Manifest`])
//! - guard-name derivation ([`derive_guard`])
//! - include-rewrite rule definitions ([`IncludeRule`])
//! - the error taxonomy ([`Error`])

pub mod entry;
pub mod error;
pub mod guard;
pub mod rule;

// Re-export key types at crate root for ergonomics
pub use entry::{Entry, GuardListing, Manifest};
pub use error::{Error, Result};
pub use guard::{GuardIdentifier, derive_guard};
pub use rule::IncludeRule;
