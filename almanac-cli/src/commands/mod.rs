pub mod add;
pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod navigate;
pub mod show;

use almanac_core::AppointmentId;
use anyhow::{Context, Result};

pub(crate) fn parse_id(raw: &str) -> Result<AppointmentId> {
    raw.trim_start_matches('#')
        .parse::<AppointmentId>()
        .with_context(|| format!("'{}' is not an appointment id", raw))
}
