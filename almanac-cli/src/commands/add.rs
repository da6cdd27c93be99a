use almanac_core::{AppointmentForm, Intent};
use anyhow::{Result, bail};
use owo_colors::OwoColorize;

use crate::FormArgs;
use crate::app::App;
use crate::render::Render;

/// Open a blank form on `day`, fill it in and save it.
pub fn run(app: &mut App, day: u32, fields: FormArgs) -> Result<()> {
    app.dispatch(Intent::ClickDay(day))?;
    if !app.state.session.is_open() {
        bail!(
            "{} has no day {}",
            almanac_core::grid::month_title(app.state.reference),
            day
        );
    }

    let form = apply_fields(AppointmentForm::default(), fields)?;
    app.dispatch_all(vec![Intent::EditForm(form), Intent::SaveForm])?;

    if app.state.session.is_open() {
        bail!("Appointment was not saved");
    }

    if let Some(created) = app.state.store.iter().last() {
        println!("{} {}", "Created".green(), created.render());
    }
    Ok(())
}

/// Overlay the given command-line fields on `form`.
pub(crate) fn apply_fields(mut form: AppointmentForm, fields: FormArgs) -> Result<AppointmentForm> {
    if let Some(name) = fields.name {
        form.name = name;
    }
    if let Some(start) = fields.start {
        form.start_time = start;
    }
    if let Some(end) = fields.end {
        form.end_time = end;
    }
    if let Some(description) = fields.description {
        form.description = description;
    }
    if let Some(location) = fields.location {
        form.location = location;
    }
    if let Some(category) = fields.category {
        form.category = category.parse()?;
    }
    if let Some(reminder) = fields.reminder {
        form.reminder = reminder.parse()?;
    }
    Ok(form)
}
