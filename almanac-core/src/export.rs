//! Monthly JSON export.

use std::path::PathBuf;

use serde::Serialize;

use crate::appointment::Appointment;
use crate::error::AlmanacResult;
use crate::store::AppointmentStore;

/// A ready-to-save export: file name plus pretty-printed JSON bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthExport {
    pub file_name: String,
    pub payload: Vec<u8>,
}

/// Name of the export file for a month (1-based), e.g. `appointments_2024_6.json`.
pub fn export_file_name(year: i32, month: u32) -> String {
    format!("appointments_{}_{}.json", year, month)
}

/// Collect the appointments anchored in `year`/`month` and encode them.
///
/// `month` is 1-based like chrono's (June is 6), so June 2024 is
/// `export_month(store, 2024, 6)`. Callers used to 0-based month indices
/// must add one; the file name carries the same 1-based number.
pub fn export_month(store: &AppointmentStore, year: i32, month: u32) -> AlmanacResult<MonthExport> {
    let appointments = store.in_month(year, month);
    Ok(MonthExport {
        file_name: export_file_name(year, month),
        payload: to_pretty_json(&appointments)?,
    })
}

/// Pretty JSON with two-space indentation.
fn to_pretty_json<T: Serialize>(value: &T) -> AlmanacResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(value)?)
}

/// Parse an export payload back into appointments.
pub fn parse_export(payload: &[u8]) -> AlmanacResult<Vec<Appointment>> {
    Ok(serde_json::from_slice(payload)?)
}

/// Host-side "save as file" collaborator.
pub trait ExportSink {
    /// Save the export, returning where it ended up.
    fn save(&mut self, export: &MonthExport) -> AlmanacResult<PathBuf>;
}

/// Writes exports as files into a directory.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink { dir: dir.into() }
    }
}

impl ExportSink for DirectorySink {
    fn save(&mut self, export: &MonthExport) -> AlmanacResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&export.file_name);
        std::fs::write(&path, &export.payload)?;
        Ok(path)
    }
}
