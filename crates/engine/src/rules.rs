//! Precompiled include-rewrite rules.

use amalgam_core::{Error, IncludeRule, Result};
use regex_lite::Regex;

/// A rule with its pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    regex: Regex,
    group: usize,
}

/// A successful rule match on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeMatch<'l> {
    /// The included path extracted by the rule's capture group.
    pub included: &'l str,
    /// Index of the rule that matched, in configured order.
    pub rule_index: usize,
}

impl CompiledRule {
    pub fn compile(rule: &IncludeRule) -> Result<Self> {
        let regex = Regex::new(&rule.pattern).map_err(|e| Error::InvalidRule {
            pattern: rule.pattern.clone(),
            reason: e.to_string(),
        })?;
        // captures_len counts the implicit whole-match group 0.
        if rule.group >= regex.captures_len() {
            return Err(Error::InvalidRule {
                pattern: rule.pattern.clone(),
                reason: format!(
                    "capture group {} does not exist (pattern has {})",
                    rule.group,
                    regex.captures_len() - 1
                ),
            });
        }
        Ok(Self {
            regex,
            group: rule.group,
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn group(&self) -> usize {
        self.group
    }

    /// Match `line` from its first character.
    ///
    /// Returns `Ok(None)` when the pattern does not match at the start of the
    /// line, and an error when it matches but the capture group is absent.
    pub fn extract<'l>(&self, line: &'l str) -> Result<Option<&'l str>> {
        let Some(caps) = self.regex.captures(line) else {
            return Ok(None);
        };
        if caps.get(0).is_none_or(|m| m.start() != 0) {
            return Ok(None);
        }
        match caps.get(self.group) {
            Some(m) => Ok(Some(m.as_str())),
            None => Err(Error::MalformedRule {
                pattern: self.pattern().to_string(),
                group: self.group,
                line: line.to_string(),
            }),
        }
    }
}

/// The configured rules, compiled once and evaluated per line in order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every rule; the first invalid one aborts.
    pub fn compile(rules: &[IncludeRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter()
    }

    /// First rule matching `line`, in configured order.
    pub fn first_match<'l>(&self, line: &'l str) -> Result<Option<IncludeMatch<'l>>> {
        for (rule_index, rule) in self.rules.iter().enumerate() {
            if let Some(included) = rule.extract(line)? {
                return Ok(Some(IncludeMatch {
                    included,
                    rule_index,
                }));
            }
        }
        Ok(None)
    }
}
