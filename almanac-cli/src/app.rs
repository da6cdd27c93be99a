//! Host-side glue: owns the state, runs intents through it and performs
//! the resulting effects against the storage file and export directory.

use std::path::PathBuf;

use almanac_core::config::AlmanacConfig;
use almanac_core::effect::{Feedback, apply_effects};
use almanac_core::export::DirectorySink;
use almanac_core::storage::FileStore;
use almanac_core::{CalendarState, Intent};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;
use tracing::debug;

pub struct App {
    pub config: AlmanacConfig,
    pub state: CalendarState,
    storage: FileStore,
    sink: DirectorySink,
}

impl App {
    /// Load config and rehydrate state. `storage_override` replaces the configured storage path.
    pub fn load(storage_override: Option<PathBuf>) -> Result<Self> {
        let config = AlmanacConfig::load().context("Failed to load configuration")?;
        let storage_path = storage_override.unwrap_or_else(|| config.storage_path());

        let storage = FileStore::open(storage_path);
        let state = CalendarState::rehydrate(&storage, today());
        let sink = DirectorySink::new(config.export_dir());

        Ok(App {
            config,
            state,
            storage,
            sink,
        })
    }

    pub fn storage_path(&self) -> PathBuf {
        self.storage.path().to_path_buf()
    }

    pub fn set_export_dir(&mut self, dir: PathBuf) {
        self.sink = DirectorySink::new(dir);
    }

    /// Run one intent and perform its effects. Notices are printed and returned.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Vec<Feedback>> {
        debug!(?intent, "Dispatching");
        let transition = self.state.clone().update(intent, Local::now());
        self.state = transition.state;

        let feedback = apply_effects(&transition.effects, &mut self.storage, &mut self.sink)
            .with_context(|| format!("Failed to save to {}", self.storage.path().display()))?;

        for item in &feedback {
            match item {
                Feedback::Notice(message) => eprintln!("{} {}", "!".red(), message.red()),
                Feedback::Exported(path) => {
                    println!("{} {}", "Exported to".dimmed(), path.display())
                }
            }
        }

        Ok(feedback)
    }

    pub fn dispatch_all(&mut self, intents: Vec<Intent>) -> Result<Vec<Feedback>> {
        let mut feedback = Vec::new();
        for intent in intents {
            feedback.extend(self.dispatch(intent)?);
        }
        Ok(feedback)
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
