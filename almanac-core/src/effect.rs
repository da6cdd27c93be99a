//! Side effects requested by state transitions and their execution.

use std::path::PathBuf;

use crate::error::AlmanacResult;
use crate::export::{ExportSink, MonthExport};
use crate::storage::KeyValueStore;

/// Something the host has to do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write `value` under `key` in durable storage
    Persist { key: &'static str, value: String },
    /// Hand an export to the "save as file" collaborator
    Export(MonthExport),
    /// Show a blocking notice to the user
    Notice(String),
}

/// What the user should hear about once effects have run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Notice(String),
    Exported(PathBuf),
}

/// Run effects in order, stopping at the first storage or export failure.
pub fn apply_effects(
    effects: &[Effect],
    storage: &mut dyn KeyValueStore,
    sink: &mut dyn ExportSink,
) -> AlmanacResult<Vec<Feedback>> {
    let mut feedback = Vec::new();

    for effect in effects {
        match effect {
            Effect::Persist { key, value } => storage.set(key, value)?,
            Effect::Export(export) => feedback.push(Feedback::Exported(sink.save(export)?)),
            Effect::Notice(message) => feedback.push(Feedback::Notice(message.clone())),
        }
    }

    Ok(feedback)
}
