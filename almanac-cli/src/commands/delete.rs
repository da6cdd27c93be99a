use almanac_core::Intent;
use anyhow::{Result, bail};
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::app::App;
use crate::render::render_session;

pub fn run(app: &mut App, raw_id: &str, yes: bool) -> Result<()> {
    let id = super::parse_id(raw_id)?;

    let Some(appointment) = app.state.store.get(id).cloned() else {
        bail!("No appointment with id {}", id);
    };

    app.dispatch_all(vec![Intent::ClickAppointment(id), Intent::RequestDelete])?;

    if let Some(modal) = render_session(&app.state.session) {
        println!("{}", modal);
    }
    let confirmed = yes
        || Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?;

    if confirmed {
        app.dispatch(Intent::ConfirmDelete)?;
        println!("{} {}", "Deleted".red(), appointment.name);
    } else {
        app.dispatch_all(vec![Intent::CancelDelete, Intent::CloseModal])?;
        println!("{}", "Kept".dimmed());
    }
    Ok(())
}
