use std::path::PathBuf;

use almanac_core::Intent;
use anyhow::Result;

use crate::app::App;

pub fn run(app: &mut App, out: Option<PathBuf>) -> Result<()> {
    if let Some(dir) = out {
        app.set_export_dir(dir);
    }
    app.dispatch(Intent::Export)?;
    Ok(())
}
