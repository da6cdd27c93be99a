use almanac_core::Intent;
use anyhow::{Result, bail};
use owo_colors::OwoColorize;

use crate::FormArgs;
use crate::app::App;
use crate::render::{Render, render_session};

/// Open an existing appointment; with no fields given just show it.
pub fn run(app: &mut App, raw_id: &str, fields: FormArgs) -> Result<()> {
    let id = super::parse_id(raw_id)?;

    app.dispatch(Intent::ClickAppointment(id))?;
    let Some(form) = app.state.session.form().cloned() else {
        bail!("No appointment with id {}", id);
    };

    let form = super::add::apply_fields(form, fields)?;
    if Some(&form) == app.state.session.form() {
        if let Some(summary) = render_session(&app.state.session) {
            println!("{}", summary);
        }
        return Ok(());
    }

    app.dispatch_all(vec![Intent::EditForm(form), Intent::SaveForm])?;
    if app.state.session.is_open() {
        bail!("Appointment was not saved");
    }

    if let Some(updated) = app.state.store.get(id) {
        println!("{} {}", "Updated".yellow(), updated.render());
    }
    Ok(())
}
