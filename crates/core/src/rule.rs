//! Include-rewrite rule definitions.

use serde::{Deserialize, Serialize};

/// A pattern recognising an `#include` line plus the capture group holding
/// the included path.
///
/// ```toml
/// [[include_rules]]
/// pattern = '^\s*#\s*include "(c4/.*)".*$'
/// group = 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeRule {
    /// Regular expression, matched from the start of each line.
    pub pattern: String,

    /// Capture group that extracts the included path.
    #[serde(default = "default_group")]
    pub group: usize,
}

fn default_group() -> usize {
    1
}

impl IncludeRule {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            group: default_group(),
        }
    }

    pub fn with_group(mut self, group: usize) -> Self {
        self.group = group;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_defaults_to_one() {
        let rule: IncludeRule = toml::from_str(r#"pattern = '^#include "(.*)"'"#).unwrap();
        assert_eq!(rule.group, 1);
        assert_eq!(rule, IncludeRule::new(r#"^#include "(.*)""#));
    }

    #[test]
    fn explicit_group_is_kept() {
        let rule: IncludeRule =
            toml::from_str("pattern = '^#(\\s*)include <(.*)>'\ngroup = 2").unwrap();
        assert_eq!(rule.group, 2);
    }
}
