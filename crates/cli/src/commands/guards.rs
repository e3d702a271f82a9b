//! `amalgam guards` — List manifest paths with their guard identifiers.

use super::ConfigSource;

pub fn run(source: &ConfigSource, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = source.load()?;
    let listing = config.entries.guards();

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if listing.is_empty() {
        println!("No file entries in manifest.");
        return Ok(());
    }

    let width = listing.iter().map(|l| l.path.len()).max().unwrap_or(0);
    for (i, l) in listing.iter().enumerate() {
        println!(
            "  {:>3}. [{:<9}] {:<width$}  {}",
            i + 1,
            l.kind,
            l.path,
            l.guard
        );
    }
    Ok(())
}
