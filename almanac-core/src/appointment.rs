//! Appointment records and their closed vocabularies.
//!
//! The serialized shape (camelCase keys, string reminders, ISO timestamps)
//! is what ends up in storage and in exported files, so it must stay stable.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Identifier of an appointment, derived from the creation timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(pub i64);

impl AppointmentId {
    /// Next id given the ids already `taken`: the current millisecond
    /// timestamp, or one past the largest taken id when the clock has not
    /// moved beyond it. If that would overflow, the smallest unused
    /// non-negative id is used instead.
    pub fn next(now: DateTime<Utc>, taken: &[AppointmentId]) -> Self {
        let stamp = now.timestamp_millis();
        match taken.iter().max() {
            Some(&AppointmentId(last)) if last >= stamp => match last.checked_add(1) {
                Some(id) => AppointmentId(id),
                None => Self::smallest_unused(taken),
            },
            _ => AppointmentId(stamp),
        }
    }

    fn smallest_unused(taken: &[AppointmentId]) -> Self {
        let mut ids: Vec<i64> = taken.iter().map(|id| id.0).filter(|id| *id >= 0).collect();
        ids.sort_unstable();
        ids.dedup();

        let mut candidate = 0;
        for id in ids {
            if id != candidate {
                break;
            }
            candidate += 1;
        }
        AppointmentId(candidate)
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AppointmentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(AppointmentId)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Meeting,
    Personal,
    Birthday,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Meeting, Category::Personal, Category::Birthday];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Meeting => "meeting",
            Category::Personal => "personal",
            Category::Birthday => "birthday",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

/// Category restriction used by the sidebar search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(c) => c.fmt(f),
        }
    }
}

/// How long before the start an appointment reminds, stored as a string of minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reminder {
    #[serde(rename = "5")]
    Five,
    #[default]
    #[serde(rename = "15")]
    Fifteen,
    #[serde(rename = "30")]
    Thirty,
    #[serde(rename = "60")]
    Sixty,
}

impl Reminder {
    pub const ALL: [Reminder; 4] = [
        Reminder::Five,
        Reminder::Fifteen,
        Reminder::Thirty,
        Reminder::Sixty,
    ];

    pub fn minutes(&self) -> u32 {
        match self {
            Reminder::Five => 5,
            Reminder::Fifteen => 15,
            Reminder::Thirty => 30,
            Reminder::Sixty => 60,
        }
    }
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Reminder::Sixty => f.write_str("1 hour before"),
            other => write!(f, "{} minutes before", other.minutes()),
        }
    }
}

impl FromStr for Reminder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let minutes: u32 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::UnknownReminder(s.to_string()))?;
        Reminder::ALL
            .into_iter()
            .find(|r| r.minutes() == minutes)
            .ok_or_else(|| ValidationError::UnknownReminder(s.to_string()))
    }
}

/// A time-boxed appointment anchored to one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    /// Local midnight of the anchor day, as a UTC instant
    pub time: DateTime<Utc>,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub reminder: Reminder,
}

impl Appointment {
    /// The local calendar day this appointment belongs to.
    pub fn anchor_day(&self) -> NaiveDate {
        self.time.with_timezone(&Local).date_naive()
    }

    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.anchor_day() == day
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.start_time, self.name)
    }
}

/// Local midnight of `day` as a UTC instant.
///
/// When midnight does not exist locally (a DST gap), the earliest valid
/// local time on that day is used; failing that, midnight UTC.
pub fn anchor_instant(day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_hms_opt(0, 0, 0).unwrap_or_default();
    match Local.from_local_datetime(&midnight).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => (1..=3)
            .filter_map(|h| day.and_hms_opt(h, 0, 0))
            .find_map(|dt| Local.from_local_datetime(&dt).earliest())
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| midnight.and_utc()),
    }
}
