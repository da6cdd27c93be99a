use almanac_core::config::AlmanacConfig;
use anyhow::Result;
use owo_colors::OwoColorize;

use crate::app::App;

pub fn run(app: &App) -> Result<()> {
    let config_path = AlmanacConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:   {}", config_path.display());
    println!("  Storage:  {}", app.storage_path().display());
    println!("  Exports:  {}", app.config.export_dir().display());

    println!();
    println!("{}", "Effective settings".bold());
    print!("{}", app.config.to_toml()?);

    Ok(())
}
