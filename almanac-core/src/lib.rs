//! Core of the almanac month calendar.
//!
//! - `grid` lays out a month as Sunday-first weeks
//! - `store` owns the appointment collection (create, update, query, search)
//! - `state` is the owned UI state; user intents go in, the next state and
//!   the storage/export effects to perform come out
//! - `storage` and `export` are the durable-storage and "save as file" seams

pub mod appointment;
pub mod config;
pub mod effect;
pub mod error;
pub mod export;
pub mod form;
pub mod grid;
pub mod session;
pub mod state;
pub mod storage;
pub mod store;

pub use appointment::{Appointment, AppointmentId, Category, CategoryFilter, Reminder};
pub use error::{AlmanacError, AlmanacResult, ValidationError};
pub use form::AppointmentForm;
pub use state::{CalendarState, Intent, Transition};
pub use store::AppointmentStore;
