//! The single appointment modal and what it is currently doing.

use chrono::NaiveDate;

use crate::appointment::AppointmentId;
use crate::form::AppointmentForm;

/// Editing session state. At most one session exists at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Closed,
    /// Blank form for a new appointment on `anchor`
    Creating { anchor: NaiveDate, form: AppointmentForm },
    /// Form prefilled from an existing appointment, untouched so far
    Viewing { id: AppointmentId, form: AppointmentForm },
    /// Prefilled form the user has changed
    Editing { id: AppointmentId, form: AppointmentForm },
    /// Waiting for a yes/no answer before deleting `id`
    Deleting { id: AppointmentId, form: AppointmentForm },
}

impl EditSession {
    pub fn is_open(&self) -> bool {
        !matches!(self, EditSession::Closed)
    }

    pub fn form(&self) -> Option<&AppointmentForm> {
        match self {
            EditSession::Closed => None,
            EditSession::Creating { form, .. }
            | EditSession::Viewing { form, .. }
            | EditSession::Editing { form, .. }
            | EditSession::Deleting { form, .. } => Some(form),
        }
    }

    pub fn is_confirming_delete(&self) -> bool {
        matches!(self, EditSession::Deleting { .. })
    }

    /// Modal heading.
    pub fn heading(&self) -> &'static str {
        match self {
            EditSession::Creating { .. } => "New Event",
            _ => "Edit Event",
        }
    }
}
