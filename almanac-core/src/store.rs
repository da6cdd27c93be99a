//! The canonical appointment collection.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::appointment::{Appointment, AppointmentId, CategoryFilter, anchor_instant};
use crate::error::{AlmanacError, AlmanacResult};
use crate::form::AppointmentForm;

/// Appointments in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentStore {
    appointments: Vec<Appointment>,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments.iter()
    }

    pub fn get(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    fn ids(&self) -> Vec<AppointmentId> {
        self.appointments.iter().map(|a| a.id).collect()
    }

    /// Validate `form` and append a new appointment anchored to `anchor`.
    ///
    /// The store is left untouched when validation fails.
    pub fn create(
        &mut self,
        form: &AppointmentForm,
        anchor: NaiveDate,
        now: DateTime<Utc>,
    ) -> AlmanacResult<&Appointment> {
        form.validate()?;

        let appointment = Appointment {
            id: AppointmentId::next(now, &self.ids()),
            time: anchor_instant(anchor),
            name: form.name.clone(),
            start_time: form.start_time.clone(),
            end_time: form.end_time.clone(),
            description: form.description.clone(),
            location: form.location.clone(),
            category: form.category,
            reminder: form.reminder,
        };

        debug!(id = %appointment.id, day = %anchor, "Created appointment");
        self.appointments.push(appointment);
        Ok(&self.appointments[self.appointments.len() - 1])
    }

    /// Replace every editable field of an existing appointment, keeping its id and anchor.
    pub fn update(
        &mut self,
        id: AppointmentId,
        form: &AppointmentForm,
    ) -> AlmanacResult<&Appointment> {
        form.validate()?;

        let Some(existing) = self.appointments.iter_mut().find(|a| a.id == id) else {
            warn!(%id, "Update target not found");
            return Err(AlmanacError::NotFound(id));
        };

        existing.name = form.name.clone();
        existing.start_time = form.start_time.clone();
        existing.end_time = form.end_time.clone();
        existing.description = form.description.clone();
        existing.location = form.location.clone();
        existing.category = form.category;
        existing.reminder = form.reminder;

        debug!(%id, "Updated appointment");
        Ok(existing)
    }

    /// Remove an appointment outright. Missing ids are a no-op.
    pub fn remove(&mut self, id: AppointmentId) -> Option<Appointment> {
        match self.appointments.iter().position(|a| a.id == id) {
            Some(index) => {
                debug!(%id, "Deleted appointment");
                Some(self.appointments.remove(index))
            }
            None => {
                warn!(%id, "Delete target not found");
                None
            }
        }
    }

    /// Appointments on day number `day` of the month shown by `reference`.
    pub fn query(&self, reference: NaiveDate, day: u32) -> Vec<&Appointment> {
        match reference.with_day(day) {
            Some(date) => self.on_day(date),
            None => Vec::new(),
        }
    }

    pub fn on_day(&self, date: NaiveDate) -> Vec<&Appointment> {
        self.appointments.iter().filter(|a| a.is_on(date)).collect()
    }

    /// Case-insensitive substring search over name and description, narrowed by category.
    pub fn search(&self, term: &str, filter: CategoryFilter) -> Vec<&Appointment> {
        let needle = term.to_lowercase();
        self.appointments
            .iter()
            .filter(|a| {
                a.name.to_lowercase().contains(&needle)
                    || a.description.to_lowercase().contains(&needle)
            })
            .filter(|a| filter.matches(a.category))
            .collect()
    }

    /// Appointments anchored in the given month (1-based).
    pub fn in_month(&self, year: i32, month: u32) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| {
                let day = a.anchor_day();
                day.year() == year && day.month() == month
            })
            .collect()
    }

    pub fn to_json(&self) -> AlmanacResult<String> {
        Ok(serde_json::to_string(&self.appointments)?)
    }

    /// Decode a stored JSON array. Records that do not decode are skipped
    /// one by one; only a payload that is not an array at all is an error.
    pub fn from_json(json: &str) -> AlmanacResult<Self> {
        let records: Vec<serde_json::Value> = serde_json::from_str(json)
            .map_err(|e| AlmanacError::StorageRead(format!("appointments: {e}")))?;

        let appointments = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                serde_json::from_value::<Appointment>(record)
                    .inspect_err(|e| warn!(index, error = %e, "Skipping unreadable appointment"))
                    .ok()
            })
            .collect();

        Ok(AppointmentStore { appointments })
    }
}
