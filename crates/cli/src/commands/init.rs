//! `amalgam init` — Print a starter configuration.

use amalgam_config::AmalgamConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("# Amalgam configuration. Entries are emitted in the order listed.");
    println!("# kinds: inline | commented | skip | text");
    println!();
    print!("{}", AmalgamConfig::default_toml());
    Ok(())
}
