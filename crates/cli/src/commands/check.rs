//! `amalgam check` — Validate configuration, rules and manifest files.

use super::{ConfigSource, build_assembler};

pub fn run(source: &ConfigSource) -> Result<(), Box<dyn std::error::Error>> {
    println!("Checking {}", source.path.display());

    let config = match source.load() {
        Ok(config) => config,
        Err(e) => {
            println!("  ❌ Config error: {e}");
            return Err(e.into());
        }
    };
    println!("  ✅ Config parsed ({} entries)", config.entries.len());
    println!("  ✅ Guard identifiers unique");

    let assembler = match build_assembler(&config) {
        Ok(assembler) => assembler,
        Err(e) => {
            println!("  ❌ {e}");
            return Err(e.into());
        }
    };
    println!("  ✅ {} include rule(s) compiled", assembler.rules().len());

    let mut missing = Vec::new();
    for entry in &config.entries {
        if !entry.reads_file() {
            continue;
        }
        if let Some(path) = entry.path()
            && let Err(e) = assembler.check_exists(path)
        {
            println!("  ❌ {e}");
            missing.push(path.to_string());
        }
    }

    println!();
    println!("  Repo:         {}", config.repo);
    println!("  Root dir:     {}", config.root_dir.display());
    println!("  Definition:   {}", config.definition_macro);
    println!("  Outer guard:  {}", config.outer_guard);

    if missing.is_empty() {
        println!("\n  🎉 All checks passed!");
        Ok(())
    } else {
        Err(format!("{} manifest file(s) missing", missing.len()).into())
    }
}
