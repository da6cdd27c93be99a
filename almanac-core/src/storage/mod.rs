//! Durable key-value persistence.
//!
//! Two string entries are kept: the displayed month under [`CURRENT_DATE_KEY`]
//! and the appointment list under [`APPOINTMENTS_KEY`]. Reads never fail;
//! anything missing or unreadable falls back to a default.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use chrono::{DateTime, Local, NaiveDate};
use tracing::warn;

use crate::appointment::anchor_instant;
use crate::error::{AlmanacError, AlmanacResult};
use crate::store::AppointmentStore;

pub const CURRENT_DATE_KEY: &str = "currentDate";
pub const APPOINTMENTS_KEY: &str = "appointments";

/// A string-keyed store of string values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> AlmanacResult<()>;
}

/// ISO-8601 timestamp stored for a reference date.
pub fn encode_reference(reference: NaiveDate) -> String {
    anchor_instant(reference).to_rfc3339()
}

fn decode_reference(raw: &str) -> AlmanacResult<NaiveDate> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Local).date_naive())
        .map_err(|e| AlmanacError::StorageRead(format!("{CURRENT_DATE_KEY}: {e}")))
}

/// Stored reference date, or `today` when absent or malformed.
pub fn load_reference(storage: &dyn KeyValueStore, today: NaiveDate) -> NaiveDate {
    let Some(raw) = storage.get(CURRENT_DATE_KEY) else {
        return today;
    };
    decode_reference(&raw).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring stored reference date");
        today
    })
}

/// Stored appointments, or an empty store when absent or malformed.
pub fn load_appointments(storage: &dyn KeyValueStore) -> AppointmentStore {
    let Some(raw) = storage.get(APPOINTMENTS_KEY) else {
        return AppointmentStore::new();
    };
    AppointmentStore::from_json(&raw).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring stored appointments");
        AppointmentStore::new()
    })
}
