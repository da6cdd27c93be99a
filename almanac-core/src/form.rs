//! The editable appointment form backing the modal.

use chrono::NaiveTime;

use crate::appointment::{Appointment, Category, Reminder};
use crate::error::ValidationError;

/// Field values as the user typed them; nothing here is trusted until
/// [`validate`](AppointmentForm::validate).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentForm {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
    pub location: String,
    pub category: Category,
    pub reminder: Reminder,
}

impl AppointmentForm {
    /// Check required fields, the `HH:MM` shape of both times and their ordering.
    ///
    /// Times are compared as strings; that is only sound for zero-padded
    /// 24-hour values, which is why the shape is checked first.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.start_time.is_empty() {
            return Err(ValidationError::MissingField("start time"));
        }
        if self.end_time.is_empty() {
            return Err(ValidationError::MissingField("end time"));
        }

        check_time("start time", &self.start_time)?;
        check_time("end time", &self.end_time)?;

        if self.start_time >= self.end_time {
            return Err(ValidationError::EndNotAfterStart {
                start: self.start_time.clone(),
                end: self.end_time.clone(),
            });
        }

        Ok(())
    }
}

impl From<&Appointment> for AppointmentForm {
    fn from(appointment: &Appointment) -> Self {
        AppointmentForm {
            name: appointment.name.clone(),
            start_time: appointment.start_time.clone(),
            end_time: appointment.end_time.clone(),
            description: appointment.description.clone(),
            location: appointment.location.clone(),
            category: appointment.category,
            reminder: appointment.reminder,
        }
    }
}

fn check_time(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let well_formed = value.len() == 5 && NaiveTime::parse_from_str(value, "%H:%M").is_ok();
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::MalformedTime {
            field,
            value: value.to_string(),
        })
    }
}
