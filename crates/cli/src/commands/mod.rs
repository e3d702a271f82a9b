//! Subcommand implementations.

pub mod build;
pub mod check;
pub mod guards;
pub mod init;

use amalgam_config::{AmalgamConfig, ConfigError};
use amalgam_engine::{Assembler, AssemblySettings, RuleSet};
use std::path::PathBuf;

/// Where the configuration comes from, plus command-line overrides.
pub struct ConfigSource {
    pub path: PathBuf,
    pub root_dir: Option<PathBuf>,
}

impl ConfigSource {
    pub fn load(&self) -> Result<AmalgamConfig, ConfigError> {
        let config = AmalgamConfig::load_from(&self.path)?;
        Ok(match &self.root_dir {
            Some(root) => config.with_root_dir(root),
            None => config,
        })
    }
}

/// Compile the config's rules and build an assembler for it.
pub fn build_assembler(config: &AmalgamConfig) -> amalgam_core::Result<Assembler> {
    let rules = RuleSet::compile(&config.include_rules)?;
    let settings = AssemblySettings {
        root_dir: config.root_dir.clone(),
        repo: config.repo.clone(),
        definition_macro: config.definition_macro.clone(),
        outer_guard: config.outer_guard.clone(),
        include_root: config.include_root.clone(),
        source_extensions: config.source_extensions.clone(),
    };
    Ok(Assembler::new(settings, rules))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembler_mirrors_config() {
        let config = AmalgamConfig::default();
        let assembler = build_assembler(&config).unwrap();
        assert_eq!(assembler.settings().repo, "mylib");
        assert_eq!(assembler.settings().include_root, "src");
        assert_eq!(assembler.rules().len(), 1);
    }

    #[test]
    fn invalid_rule_fails_assembler_build() {
        let mut config = AmalgamConfig::default();
        config.include_rules = vec![amalgam_core::IncludeRule::new("(")];
        assert!(matches!(
            build_assembler(&config),
            Err(amalgam_core::Error::InvalidRule { .. })
        ));
    }
}
