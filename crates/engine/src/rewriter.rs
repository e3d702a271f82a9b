//! Include rewriting.
//!
//! A line matching one of the configured include rules is replaced by a
//! commented copy of itself followed by a preprocessor block that fails the
//! build unless the included file's guard is already defined. The include
//! target is never opened: ordering is verified by the consumer's
//! preprocessor.

use crate::rules::RuleSet;
use crate::template;
use amalgam_core::{Result, derive_guard};
use std::borrow::Cow;
use tracing::debug;

/// Default directory between the repository name and the included path in
/// generated location comments.
pub const DEFAULT_INCLUDE_ROOT: &str = "src";

/// Rewrites include lines against a compiled [`RuleSet`].
#[derive(Debug, Clone, Copy)]
pub struct IncludeRewriter<'a> {
    rules: &'a RuleSet,
    repo: &'a str,
    include_root: &'a str,
}

/// Text produced by rewriting a whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewrittenText {
    pub text: String,
    pub lines: usize,
    pub rewritten: usize,
}

impl<'a> IncludeRewriter<'a> {
    pub fn new(rules: &'a RuleSet, repo: &'a str) -> Self {
        Self {
            rules,
            repo,
            include_root: DEFAULT_INCLUDE_ROOT,
        }
    }

    pub fn with_include_root(mut self, include_root: &'a str) -> Self {
        self.include_root = include_root;
        self
    }

    /// Rewrite one physical line.
    ///
    /// `line` may carry its terminator; it is stripped before matching and
    /// put back after the generated block, leaving a blank line behind it.
    /// Lines matching no rule are returned borrowed and unchanged.
    pub fn rewrite_line<'l>(&self, line: &'l str) -> Result<Cow<'l, str>> {
        let (content, ending) = split_terminator(line);
        let Some(m) = self.rules.first_match(content)? else {
            return Ok(Cow::Borrowed(line));
        };

        let guard = derive_guard(m.included);
        debug!(included = m.included, guard = %guard, "Rewriting include");

        let mut out = String::with_capacity(content.len() + 256);
        out.push_str("//");
        out.push_str(content.trim_end());
        out.push('\n');
        out.push_str(&template::guard_check(
            &guard,
            m.included,
            self.repo,
            self.include_root,
        ));
        out.push_str(ending);
        Ok(Cow::Owned(out))
    }

    /// Rewrite every line of `text`, preserving line terminators.
    pub fn rewrite_text(&self, text: &str) -> Result<RewrittenText> {
        let mut result = RewrittenText {
            text: String::with_capacity(text.len()),
            ..RewrittenText::default()
        };
        for line in text.split_inclusive('\n') {
            result.lines += 1;
            let rewritten = self.rewrite_line(line)?;
            if matches!(rewritten, Cow::Owned(_)) {
                result.rewritten += 1;
            }
            result.text.push_str(&rewritten);
        }
        Ok(result)
    }
}

/// Rewrite one line using the default include root.
pub fn rewrite_line<'l>(line: &'l str, rules: &RuleSet, repo: &str) -> Result<Cow<'l, str>> {
    IncludeRewriter::new(rules, repo).rewrite_line(line)
}

fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(stripped) = line.strip_suffix("\r\n") {
        (stripped, "\r\n")
    } else if let Some(stripped) = line.strip_suffix('\n') {
        (stripped, "\n")
    } else {
        (line, "")
    }
}
