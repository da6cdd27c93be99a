use almanac_core::Intent;
use anyhow::Result;

use crate::app::App;

pub fn run(app: &mut App, months: i32) -> Result<()> {
    app.dispatch(Intent::Navigate(months))?;
    super::show::run(app)
}

pub fn today(app: &mut App) -> Result<()> {
    app.dispatch(Intent::ResetToToday)?;
    super::show::run(app)
}
