use chrono::{Datelike, Months, NaiveDate};

use crate::model::{Attendance, AttendanceStatus};

use super::dashboard::rate;

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Every calendar day of the month containing `anchor`.
pub fn days_in_month(anchor: NaiveDate) -> Vec<NaiveDate> {
    let first = month_start(anchor);
    first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .collect()
}

/// `October 2026`
pub fn month_label(anchor: NaiveDate) -> String {
    anchor.format("%B %Y").to_string()
}

pub fn shift_month(anchor: NaiveDate, forward: bool) -> Option<NaiveDate> {
    if forward {
        anchor.checked_add_months(Months::new(1))
    } else {
        anchor.checked_sub_months(Months::new(1))
    }
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Records whose `date` falls in the month of `anchor`.
pub fn in_month(records: &[Attendance], anchor: NaiveDate) -> impl Iterator<Item = &Attendance> {
    records.iter().filter(move |r| same_month(r.date, anchor))
}

/// Calendar-day equality lookup.
pub fn record_for_date(records: &[Attendance], date: NaiveDate) -> Option<&Attendance> {
    records.iter().find(|r| r.date == date)
}

/// `None` when the day has no record.
pub fn status_for_date(records: &[Attendance], date: NaiveDate) -> Option<AttendanceStatus> {
    record_for_date(records, date).map(Attendance::status)
}

pub fn has_attendance_for_date(records: &[Attendance], date: NaiveDate) -> bool {
    record_for_date(records, date).is_some()
}

/// Summary line under the calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct MonthStats {
    pub days_present: usize,
    pub days_late: usize,
    pub average_hours: f64,
    /// Present days over calendar days in the month.
    pub attendance_rate: f64,
}

impl MonthStats {
    pub fn compute(records: &[Attendance], anchor: NaiveDate) -> Self {
        let mut days_present = 0;
        let mut days_late = 0;
        let mut hours_total = 0.0;
        let mut hours_samples = 0usize;

        for record in in_month(records, anchor) {
            days_present += 1;
            if record.status().is_late() {
                days_late += 1;
            }
            if let Some(hours) = record.hours_worked() {
                hours_total += hours;
                hours_samples += 1;
            }
        }

        let average_hours = if hours_samples == 0 {
            0.0
        } else {
            hours_total / hours_samples as f64
        };

        MonthStats {
            days_present,
            days_late,
            average_hours,
            attendance_rate: rate(days_present, days_in_month(anchor).len()),
        }
    }
}
