//! Owned calendar state and its update function.
//!
//! The host feeds user intents into [`CalendarState::update`] and gets back
//! the next state plus the effects it has to perform (storage writes,
//! exports, notices). Nothing in here touches storage directly.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::appointment::{Appointment, AppointmentId, CategoryFilter};
use crate::effect::Effect;
use crate::error::AlmanacError;
use crate::export::export_month;
use crate::form::AppointmentForm;
use crate::grid::{self, DAYS_PER_WEEK, GridCell, Week};
use crate::session::EditSession;
use crate::storage::{self, APPOINTMENTS_KEY, CURRENT_DATE_KEY, KeyValueStore};
use crate::store::AppointmentStore;

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Move the displayed month by this many months
    Navigate(i32),
    ResetToToday,
    OpenSidebar,
    CloseSidebar,
    SetSearchTerm(String),
    SetFilterCategory(CategoryFilter),
    /// Click on an in-month day number of the displayed month
    ClickDay(u32),
    ClickAppointment(AppointmentId),
    EditForm(AppointmentForm),
    SaveForm,
    CloseModal,
    RequestDelete,
    ConfirmDelete,
    CancelDelete,
    /// Export the displayed month
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    pub reference: NaiveDate,
    pub store: AppointmentStore,
    pub session: EditSession,
    pub sidebar_open: bool,
    pub search_term: String,
    pub filter: CategoryFilter,
}

/// Result of [`CalendarState::update`].
#[derive(Debug)]
pub struct Transition {
    pub state: CalendarState,
    pub effects: Vec<Effect>,
}

impl CalendarState {
    pub fn new(reference: NaiveDate, store: AppointmentStore) -> Self {
        CalendarState {
            reference,
            store,
            session: EditSession::Closed,
            sidebar_open: false,
            search_term: String::new(),
            filter: CategoryFilter::All,
        }
    }

    /// Rebuild the durable part of the state from storage.
    pub fn rehydrate(storage: &dyn KeyValueStore, today: NaiveDate) -> Self {
        let reference = storage::load_reference(storage, today);
        let store = storage::load_appointments(storage);
        debug!(%reference, appointments = store.len(), "Rehydrated calendar state");
        CalendarState::new(reference, store)
    }

    pub fn update(mut self, intent: Intent, now: DateTime<Local>) -> Transition {
        let mut effects = Vec::new();
        let today = now.date_naive();

        match intent {
            Intent::Navigate(delta) => {
                self.reference = grid::shift_month(self.reference, delta);
                effects.push(self.persist_reference());
            }
            Intent::ResetToToday => {
                self.reference = today;
                effects.push(self.persist_reference());
            }
            Intent::OpenSidebar => self.sidebar_open = true,
            Intent::CloseSidebar => self.sidebar_open = false,
            Intent::SetSearchTerm(term) => self.search_term = term,
            Intent::SetFilterCategory(filter) => self.filter = filter,
            Intent::ClickDay(day) => self.open_day(day),
            Intent::ClickAppointment(id) => self.open_appointment(id),
            Intent::EditForm(form) => self.edit_form(form),
            Intent::SaveForm => self.save_form(now.with_timezone(&Utc), &mut effects),
            Intent::CloseModal => self.session = EditSession::Closed,
            Intent::RequestDelete => self.request_delete(),
            Intent::ConfirmDelete => self.confirm_delete(&mut effects),
            Intent::CancelDelete => self.cancel_delete(),
            Intent::Export => {
                match export_month(&self.store, self.reference.year(), self.reference.month()) {
                    Ok(export) => effects.push(Effect::Export(export)),
                    Err(e) => effects.push(Effect::Notice(e.to_string())),
                }
            }
        }

        Transition {
            state: self,
            effects,
        }
    }

    fn persist_reference(&self) -> Effect {
        Effect::Persist {
            key: CURRENT_DATE_KEY,
            value: storage::encode_reference(self.reference),
        }
    }

    fn persist_appointments(&self, effects: &mut Vec<Effect>) {
        match self.store.to_json() {
            Ok(value) => effects.push(Effect::Persist {
                key: APPOINTMENTS_KEY,
                value,
            }),
            Err(e) => warn!(error = %e, "Could not encode appointments"),
        }
    }

    fn open_day(&mut self, day: u32) {
        if self.session.is_open() {
            debug!(day, "Ignoring day click while the modal is open");
            return;
        }
        match self.reference.with_day(day) {
            Some(anchor) => {
                self.session = EditSession::Creating {
                    anchor,
                    form: AppointmentForm::default(),
                }
            }
            None => debug!(day, "Ignoring click outside the displayed month"),
        }
    }

    fn open_appointment(&mut self, id: AppointmentId) {
        if self.session.is_open() {
            debug!(%id, "Ignoring appointment click while the modal is open");
            return;
        }
        match self.store.get(id) {
            Some(appointment) => {
                self.session = EditSession::Viewing {
                    id,
                    form: AppointmentForm::from(appointment),
                }
            }
            None => warn!(%id, "Clicked appointment does not exist"),
        }
    }

    fn edit_form(&mut self, new_form: AppointmentForm) {
        self.session = match std::mem::take(&mut self.session) {
            EditSession::Creating { anchor, .. } => EditSession::Creating {
                anchor,
                form: new_form,
            },
            EditSession::Viewing { id, .. } | EditSession::Editing { id, .. } => {
                EditSession::Editing { id, form: new_form }
            }
            other => other,
        };
    }

    fn save_form(&mut self, now: DateTime<Utc>, effects: &mut Vec<Effect>) {
        let result = match &self.session {
            EditSession::Creating { anchor, form } => {
                self.store.create(form, *anchor, now).map(|_| ())
            }
            EditSession::Viewing { id, form } | EditSession::Editing { id, form } => {
                self.store.update(*id, form).map(|_| ())
            }
            EditSession::Closed | EditSession::Deleting { .. } => return,
        };

        match result {
            Ok(()) => {
                self.session = EditSession::Closed;
                self.persist_appointments(effects);
            }
            Err(AlmanacError::Validation(e)) => effects.push(Effect::Notice(e.to_string())),
            Err(AlmanacError::NotFound(id)) => {
                debug!(%id, "Closing modal for an appointment that no longer exists");
                self.session = EditSession::Closed;
            }
            Err(e) => effects.push(Effect::Notice(e.to_string())),
        }
    }

    fn request_delete(&mut self) {
        self.session = match std::mem::take(&mut self.session) {
            EditSession::Viewing { id, form } | EditSession::Editing { id, form } => {
                EditSession::Deleting { id, form }
            }
            other => other,
        };
    }

    fn confirm_delete(&mut self, effects: &mut Vec<Effect>) {
        let EditSession::Deleting { id, .. } = self.session else {
            return;
        };
        self.session = EditSession::Closed;
        if self.store.remove(id).is_some() {
            self.persist_appointments(effects);
        }
    }

    fn cancel_delete(&mut self) {
        self.session = match std::mem::take(&mut self.session) {
            EditSession::Deleting { id, form } => {
                let untouched = self
                    .store
                    .get(id)
                    .is_some_and(|a| AppointmentForm::from(a) == form);
                if untouched {
                    EditSession::Viewing { id, form }
                } else {
                    EditSession::Editing { id, form }
                }
            }
            other => other,
        };
    }

    /// Everything the host needs to draw one frame.
    pub fn view(&self, today: NaiveDate) -> View<'_> {
        let weeks = grid::compute_grid_weeks(self.reference, today)
            .into_iter()
            .map(|week| self.day_views(week))
            .collect();

        View {
            title: grid::month_title(self.reference),
            weeks,
            sidebar_open: self.sidebar_open,
            sidebar: self.store.search(&self.search_term, self.filter),
            session: &self.session,
        }
    }

    fn day_views(&self, week: Week) -> [DayView<'_>; DAYS_PER_WEEK] {
        week.map(|cell| DayView {
            cell,
            appointments: if cell.in_month {
                self.store.query(self.reference, cell.nominal as u32)
            } else {
                Vec::new()
            },
        })
    }
}

/// One day box with the appointments shown in it.
#[derive(Debug)]
pub struct DayView<'a> {
    pub cell: GridCell,
    pub appointments: Vec<&'a Appointment>,
}

/// A full frame: month grid, sidebar list and modal.
#[derive(Debug)]
pub struct View<'a> {
    pub title: String,
    pub weeks: Vec<[DayView<'a>; DAYS_PER_WEEK]>,
    pub sidebar_open: bool,
    pub sidebar: Vec<&'a Appointment>,
    pub session: &'a EditSession,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::Category;
    use crate::effect::{Feedback, apply_effects};
    use crate::export::{ExportSink, MonthExport, parse_export};
    use crate::storage::MemoryStore;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn form(name: &str, start: &str, end: &str) -> AppointmentForm {
        AppointmentForm {
            name: name.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            ..Default::default()
        }
    }

    fn run(state: CalendarState, intents: Vec<Intent>) -> (CalendarState, Vec<Effect>) {
        let mut state = state;
        let mut effects = Vec::new();
        for intent in intents {
            let transition = state.update(intent, now());
            state = transition.state;
            effects.extend(transition.effects);
        }
        (state, effects)
    }

    fn with_appointment(name: &str, day: u32) -> (CalendarState, AppointmentId) {
        let state = CalendarState::new(date(2024, 6, 15), AppointmentStore::new());
        let (state, _) = run(
            state,
            vec![
                Intent::ClickDay(day),
                Intent::EditForm(form(name, "10:00", "11:00")),
                Intent::SaveForm,
            ],
        );
        let id = state.store.iter().last().unwrap().id;
        (state, id)
    }

    fn persisted_keys(effects: &[Effect]) -> Vec<&'static str> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Persist { key, .. } => Some(*key),
                _ => None,
            })
            .collect()
    }

    struct RecordingSink(Vec<MonthExport>);

    impl ExportSink for RecordingSink {
        fn save(&mut self, export: &MonthExport) -> crate::error::AlmanacResult<PathBuf> {
            self.0.push(export.clone());
            Ok(PathBuf::from(&export.file_name))
        }
    }

    #[test]
    fn test_navigation_persists_reference() {
        let state = CalendarState::new(date(2024, 6, 15), AppointmentStore::new());

        let transition = state.update(Intent::Navigate(1), now());
        assert_eq!(transition.state.reference, date(2024, 7, 15));
        assert_eq!(
            transition.effects,
            vec![Effect::Persist {
                key: CURRENT_DATE_KEY,
                value: storage::encode_reference(date(2024, 7, 15)),
            }]
        );

        let (state, _) = run(transition.state, vec![Intent::Navigate(-1), Intent::Navigate(-1)]);
        assert_eq!(state.reference, date(2024, 5, 15));
    }

    #[test]
    fn test_reset_to_today() {
        let state = CalendarState::new(date(2020, 1, 1), AppointmentStore::new());
        let transition = state.update(Intent::ResetToToday, now());

        assert_eq!(transition.state.reference, date(2024, 6, 15));
        assert_eq!(persisted_keys(&transition.effects), vec![CURRENT_DATE_KEY]);
    }

    #[test]
    fn test_create_flow_persists_and_closes() {
        let state = CalendarState::new(date(2024, 6, 15), AppointmentStore::new());
        let (state, effects) = run(
            state,
            vec![
                Intent::ClickDay(20),
                Intent::EditForm(form("Dentist", "10:00", "11:00")),
                Intent::SaveForm,
            ],
        );

        assert_eq!(state.session, EditSession::Closed);
        assert_eq!(state.store.len(), 1);
        assert_eq!(state.store.query(state.reference, 20)[0].name, "Dentist");
        assert_eq!(persisted_keys(&effects), vec![APPOINTMENTS_KEY]);
    }

    #[test]
    fn test_validation_failure_keeps_modal_open() {
        let state = CalendarState::new(date(2024, 6, 15), AppointmentStore::new());
        let (state, effects) = run(
            state,
            vec![
                Intent::ClickDay(20),
                Intent::EditForm(form("Dentist", "10:00", "09:00")),
                Intent::SaveForm,
            ],
        );

        assert!(matches!(state.session, EditSession::Creating { .. }));
        assert!(state.store.is_empty());
        assert_eq!(effects.len(), 1);
        assert!(matches!(
            &effects[0],
            Effect::Notice(msg) if msg.contains("End time must be after start time")
        ));
    }

    #[test]
    fn test_click_outside_month_does_nothing() {
        let state = CalendarState::new(date(2024, 6, 15), AppointmentStore::new());
        let (state, effects) = run(state, vec![Intent::ClickDay(31)]);

        assert_eq!(state.session, EditSession::Closed);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_view_then_edit_preserves_id_and_anchor() {
        let (state, id) = with_appointment("Dentist", 20);
        let before = state.store.get(id).unwrap().clone();

        let (state, _) = run(state, vec![Intent::ClickAppointment(id)]);
        assert!(matches!(state.session, EditSession::Viewing { .. }));
        assert_eq!(state.session.form().unwrap().name, "Dentist");

        let mut changed = form("Checkup", "12:00", "12:30");
        changed.category = Category::Personal;
        let (state, effects) = run(state, vec![Intent::EditForm(changed), Intent::SaveForm]);

        let after = state.store.get(id).unwrap();
        assert_eq!(state.store.len(), 1);
        assert_eq!(after.id, before.id);
        assert_eq!(after.time, before.time);
        assert_eq!(after.name, "Checkup");
        assert_eq!(after.category, Category::Personal);
        assert_eq!(persisted_keys(&effects), vec![APPOINTMENTS_KEY]);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (state, id) = with_appointment("Dentist", 20);

        let (state, effects) = run(
            state,
            vec![Intent::ClickAppointment(id), Intent::RequestDelete, Intent::CancelDelete],
        );
        assert_eq!(state.store.len(), 1);
        assert!(effects.is_empty());
        assert!(matches!(state.session, EditSession::Viewing { .. }));

        let (state, effects) = run(state, vec![Intent::RequestDelete, Intent::ConfirmDelete]);
        assert!(state.store.get(id).is_none());
        assert_eq!(state.session, EditSession::Closed);
        assert_eq!(persisted_keys(&effects), vec![APPOINTMENTS_KEY]);
    }

    #[test]
    fn test_confirm_without_request_is_ignored() {
        let (state, id) = with_appointment("Dentist", 20);
        let (state, effects) =
            run(state, vec![Intent::ClickAppointment(id), Intent::ConfirmDelete]);

        assert_eq!(state.store.len(), 1);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_delete_removes_only_target() {
        let (state, first) = with_appointment("first", 3);
        let (state, _) = run(
            state,
            vec![
                Intent::ClickDay(4),
                Intent::EditForm(form("second", "10:00", "11:00")),
                Intent::SaveForm,
            ],
        );

        let (state, _) = run(
            state,
            vec![Intent::ClickAppointment(first), Intent::RequestDelete, Intent::ConfirmDelete],
        );

        let names: Vec<&str> = state.store.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["second"]);
    }

    #[test]
    fn test_only_one_session_at_a_time() {
        let (state, id) = with_appointment("Dentist", 20);
        let (state, _) = run(state, vec![Intent::ClickDay(5), Intent::ClickAppointment(id)]);

        assert!(matches!(
            state.session,
            EditSession::Creating { anchor, .. } if anchor == date(2024, 6, 5)
        ));
    }

    #[test]
    fn test_view_places_appointments_in_cells() {
        let (state, id) = with_appointment("Dentist", 20);
        let view = state.view(date(2024, 6, 15));

        assert_eq!(view.title, "2024 June");
        let cells: Vec<&DayView> = view.weeks.iter().flatten().collect();
        let with_appointments: Vec<&&DayView> =
            cells.iter().filter(|d| !d.appointments.is_empty()).collect();
        assert_eq!(with_appointments.len(), 1);
        assert_eq!(with_appointments[0].cell.day, 20);
        assert_eq!(with_appointments[0].appointments[0].id, id);
        assert_eq!(cells.iter().filter(|d| d.cell.is_today).count(), 1);
    }

    #[test]
    fn test_sidebar_uses_search_and_filter() {
        let (state, _) = with_appointment("Dentist", 20);
        let (state, _) = run(
            state,
            vec![
                Intent::OpenSidebar,
                Intent::SetSearchTerm("DENT".to_string()),
                Intent::SetFilterCategory(CategoryFilter::Only(Category::Meeting)),
            ],
        );
        let view = state.view(date(2024, 6, 15));
        assert!(view.sidebar_open);
        assert_eq!(view.sidebar.len(), 1);

        let (state, _) = run(
            state,
            vec![Intent::SetFilterCategory(CategoryFilter::Only(Category::Birthday))],
        );
        assert!(state.view(date(2024, 6, 15)).sidebar.is_empty());
    }

    #[test]
    fn test_export_uses_displayed_month() {
        let (state, _) = with_appointment("Dentist", 20);
        let (state, effects) = run(
            state,
            vec![Intent::Navigate(1), Intent::Navigate(-1), Intent::Export],
        );

        let Some(Effect::Export(export)) = effects.last() else {
            panic!("expected an export effect, got {:?}", effects);
        };
        assert_eq!(export.file_name, "appointments_2024_6.json");
        let exported = parse_export(&export.payload).unwrap();
        assert_eq!(exported.len(), 1);
        assert_eq!(state.store.len(), 1);
    }

    #[test]
    fn test_effects_round_trip_through_storage() {
        let mut storage = MemoryStore::new();
        let mut sink = RecordingSink(Vec::new());

        let (state, _) = with_appointment("Dentist", 20);
        let (state, effects) = run(
            state,
            vec![
                Intent::Navigate(2),
                Intent::ClickDay(1),
                Intent::EditForm(form("Trip", "06:00", "07:00")),
                Intent::SaveForm,
                Intent::Export,
            ],
        );
        let feedback = apply_effects(&effects, &mut storage, &mut sink).unwrap();

        assert_eq!(
            feedback,
            vec![Feedback::Exported(PathBuf::from("appointments_2024_8.json"))]
        );
        assert_eq!(sink.0.len(), 1);

        let restored = CalendarState::rehydrate(&storage, date(2030, 1, 1));
        assert_eq!(restored.reference, date(2024, 8, 15));
        assert_eq!(restored.store, state.store);
    }

    #[test]
    fn test_save_after_rehydrating_max_id() {
        let mut storage = MemoryStore::new();
        storage
            .set(
                APPOINTMENTS_KEY,
                r#"[{"id":9223372036854775807,"time":"2024-06-10T00:00:00Z","name":"max",
                    "startTime":"10:00","endTime":"11:00"}]"#,
            )
            .unwrap();
        let state = CalendarState::rehydrate(&storage, date(2024, 6, 15));
        assert_eq!(state.store.len(), 1);

        let (state, effects) = run(
            state,
            vec![
                Intent::ClickDay(3),
                Intent::EditForm(form("Standup", "09:00", "09:15")),
                Intent::SaveForm,
            ],
        );

        assert_eq!(state.store.len(), 2);
        assert_eq!(state.session, EditSession::Closed);
        assert_eq!(persisted_keys(&effects), vec![APPOINTMENTS_KEY]);
    }

    #[test]
    fn test_notices_are_reported_as_feedback() {
        let mut storage = MemoryStore::new();
        let mut sink = RecordingSink(Vec::new());
        let effects = vec![Effect::Notice("Please fill out all required fields!".to_string())];

        let feedback = apply_effects(&effects, &mut storage, &mut sink).unwrap();
        assert_eq!(
            feedback,
            vec![Feedback::Notice("Please fill out all required fields!".to_string())]
        );
    }
}
