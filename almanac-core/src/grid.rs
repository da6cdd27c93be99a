//! Month grid computation.
//!
//! A month is laid out as whole Sunday-to-Saturday weeks. Cells before the
//! first and after the last day of the month show the neighbouring months'
//! day numbers and are flagged as not in-month.

use chrono::{Datelike, Months, NaiveDate};

pub const DAYS_PER_WEEK: usize = 7;

pub const DAY_NAMES: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One day box of the month view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// Day number relative to the displayed month; <= 0 or past the month's
    /// length for cells belonging to a neighbouring month.
    pub nominal: i32,
    /// Day number to display.
    pub day: u32,
    pub in_month: bool,
    pub is_today: bool,
}

pub type Week = [GridCell; DAYS_PER_WEEK];

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Weekday of the 1st of the month, 0 = Sunday.
pub fn first_weekday_of_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

pub fn last_day_of_prev_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// Lay out the month containing `reference` as a list of full weeks.
///
/// `today` only influences the `is_today` flag, and only for an in-month cell
/// when the displayed month is today's month.
pub fn compute_grid_weeks(reference: NaiveDate, today: NaiveDate) -> Vec<Week> {
    let (year, month) = (reference.year(), reference.month());
    let days = days_in_month(year, month) as i32;
    let first_weekday = first_weekday_of_month(year, month) as i32;
    let prev_last = last_day_of_prev_month(year, month) as i32;
    let showing_today_month = today.year() == year && today.month() == month;

    let week_count = (days + first_weekday + 6) / 7;

    (0..week_count)
        .map(|week| {
            let cells: Week = std::array::from_fn(|weekday| {
                let nominal = week * 7 + weekday as i32 + 1 - first_weekday;
                let in_month = nominal > 0 && nominal <= days;
                let day = if nominal < 1 {
                    prev_last + nominal
                } else if nominal > days {
                    nominal - days
                } else {
                    nominal
                };

                GridCell {
                    nominal,
                    day: day as u32,
                    in_month,
                    is_today: in_month && showing_today_month && nominal as u32 == today.day(),
                }
            });
            cells
        })
        .collect()
}

/// Move `reference` by `delta` months.
///
/// The day of month is kept where possible and clamped to the end of shorter
/// months (Jan 31 + 1 month = Feb 28/29).
pub fn shift_month(reference: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        reference.checked_add_months(months)
    } else {
        reference.checked_sub_months(months)
    };
    shifted.unwrap_or(reference)
}

/// Heading for the month view, e.g. "2024 June".
pub fn month_title(reference: NaiveDate) -> String {
    reference.format("%Y %B").to_string()
}
