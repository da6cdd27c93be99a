use anyhow::Result;

use crate::app::{App, today};
use crate::render::render_month;

pub fn run(app: &App) -> Result<()> {
    println!("{}", render_month(&app.state.view(today())));
    Ok(())
}
