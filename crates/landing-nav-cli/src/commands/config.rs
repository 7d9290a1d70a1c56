use std::path::Path;

use anyhow::Result;

use landing_nav_core::PageConfig;

pub fn run(path: &Path, write: bool) -> Result<()> {
    let defaults = PageConfig::default();

    if !write {
        print!("{}", defaults.to_toml_string()?);
        return Ok(());
    }

    if path.exists() {
        println!("Configuration already exists at {}", path.display());
        return Ok(());
    }

    defaults.save(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
