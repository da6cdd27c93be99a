//! Terminal rendering of the month view.

use almanac_core::grid::DAY_NAMES;
use almanac_core::session::EditSession;
use almanac_core::state::{DayView, View};
use almanac_core::{Appointment, Category};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Category {
    fn render(&self) -> String {
        let tag = format!("[{}]", self);
        match self {
            Category::Meeting => tag.blue().to_string(),
            Category::Personal => tag.green().to_string(),
            Category::Birthday => tag.magenta().to_string(),
        }
    }
}

impl Render for Appointment {
    fn render(&self) -> String {
        let time = format!("{}-{}", self.start_time, self.end_time);
        let mut line = format!("{} {} {}", time, self.name.bold(), self.category.render());
        if !self.location.is_empty() {
            line.push_str(&format!(" @ {}", self.location));
        }
        line.push_str(&format!(" {}", format!("#{}", self.id).dimmed()));
        line
    }
}

impl Render for DayView<'_> {
    fn render(&self) -> String {
        let number = format!("{:>3}", self.cell.day);
        let number = if !self.cell.in_month {
            number.dimmed().to_string()
        } else if self.cell.is_today {
            number.reversed().bold().to_string()
        } else {
            number
        };

        let marker = match self.appointments.first() {
            None => " ".to_string(),
            Some(first) => match first.category {
                Category::Meeting => "•".blue().to_string(),
                Category::Personal => "•".green().to_string(),
                Category::Birthday => "•".magenta().to_string(),
            },
        };

        format!("{}{}", number, marker)
    }
}

/// Month grid followed by the appointments of each in-month day.
pub fn render_month(view: &View) -> String {
    let mut lines = vec![view.title.bold().to_string()];

    lines.push(
        DAY_NAMES
            .iter()
            .map(|d| format!("{:>4}", d).dimmed().to_string())
            .collect::<Vec<_>>()
            .join(" "),
    );

    for week in &view.weeks {
        lines.push(week.iter().map(Render::render).collect::<Vec<_>>().join(" "));
    }

    let agenda: Vec<&DayView> = view
        .weeks
        .iter()
        .flatten()
        .filter(|d| !d.appointments.is_empty())
        .collect();

    if !agenda.is_empty() {
        lines.push(String::new());
    }
    for day in agenda {
        lines.push(format!("{}", day.cell.day.to_string().bold()));
        for appointment in &day.appointments {
            lines.push(format!("  {}", appointment.render()));
        }
    }

    lines.join("\n")
}

/// The sidebar list: every matching appointment with its date.
pub fn render_list(appointments: &[&Appointment]) -> String {
    if appointments.is_empty() {
        return "No events found".dimmed().to_string();
    }

    appointments
        .iter()
        .map(|a| format!("{} {}", a.anchor_day().format("%a %b %-d %Y").dimmed(), a.render()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The modal as a short summary of what is being edited.
pub fn render_session(session: &EditSession) -> Option<String> {
    let form = session.form()?;
    let mut lines = vec![session.heading().bold().to_string()];
    lines.push(format!("  Name:        {}", form.name));
    lines.push(format!("  Time:        {} - {}", form.start_time, form.end_time));
    if !form.location.is_empty() {
        lines.push(format!("  Location:    {}", form.location));
    }
    lines.push(format!("  Category:    {}", form.category.render()));
    lines.push(format!("  Reminder:    {}", form.reminder));
    if !form.description.is_empty() {
        lines.push(format!("  Description: {}", form.description));
    }
    if session.is_confirming_delete() {
        lines.push(format!("  {}", "Delete this event?".red()));
    }
    Some(lines.join("\n"))
}
