use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// Work starts at 9:00.
pub const ON_TIME_LIMIT_MINUTES: u32 = 9 * 60;
/// Grace period ends at 9:15.
pub const SLIGHTLY_LATE_LIMIT_MINUTES: u32 = 9 * 60 + 15;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttendanceStatus {
    OnTime,
    SlightlyLate,
    Late,
    /// Only ever derived from a missing record, never from a timestamp.
    Absent,
}

impl AttendanceStatus {
    /// Classifies a check-in by minutes since local midnight.
    pub fn classify(check_in: NaiveDateTime) -> Self {
        let minutes = check_in.hour() * 60 + check_in.minute();
        if minutes <= ON_TIME_LIMIT_MINUTES {
            AttendanceStatus::OnTime
        } else if minutes <= SLIGHTLY_LATE_LIMIT_MINUTES {
            AttendanceStatus::SlightlyLate
        } else {
            AttendanceStatus::Late
        }
    }

    pub fn is_late(&self) -> bool {
        matches!(self, AttendanceStatus::SlightlyLate | AttendanceStatus::Late)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AttendanceStatus::OnTime => "On Time",
            AttendanceStatus::SlightlyLate => "Slightly Late",
            AttendanceStatus::Late => "Late",
            AttendanceStatus::Absent => "Absent",
        }
    }
}

/// One calendar day's check-in/check-out pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: Uuid,
    pub user_id: Uuid,
    pub check_in_time: NaiveDateTime,
    pub check_out_time: Option<NaiveDateTime>,
    pub date: NaiveDate,
}

impl Attendance {
    /// Opens a new record for the day of `now`.
    pub fn open(user_id: Uuid, now: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            check_in_time: now,
            check_out_time: None,
            date: now.date(),
        }
    }

    /// Closes an open record. Fails if it is already checked out or if
    /// `now` precedes the check-in.
    pub fn close(&mut self, now: NaiveDateTime) -> DomainResult<()> {
        if self.check_out_time.is_some() {
            return Err(DomainError::transition("attendance", "checked_out", "check out"));
        }
        if now < self.check_in_time {
            return Err(DomainError::validation(
                "Check-out time cannot be before check-in time",
            ));
        }
        self.check_out_time = Some(now);
        Ok(())
    }

    pub fn is_checked_out(&self) -> bool {
        self.check_out_time.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.check_out_time.is_none()
    }

    /// Fractional hours between check-in and check-out; `None` while open.
    pub fn hours_worked(&self) -> Option<f64> {
        self.check_out_time
            .map(|out| (out - self.check_in_time).num_seconds() as f64 / 3600.0)
    }

    pub fn status(&self) -> AttendanceStatus {
        AttendanceStatus::classify(self.check_in_time)
    }
}
