use serde::{Deserialize, Serialize};

use crate::utils::text::format_time;

use super::attendance::{Attendance, AttendanceStatus};
use super::user::User;

/// An employee paired with today's record, if any, as shown to admins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeAttendance {
    pub employee: User,
    pub attendance: Option<Attendance>,
}

impl EmployeeAttendance {
    /// Checked in and not yet checked out.
    pub fn is_present(&self) -> bool {
        self.attendance.as_ref().is_some_and(Attendance::is_open)
    }

    pub fn is_absent(&self) -> bool {
        self.attendance.is_none()
    }

    pub fn is_checked_out(&self) -> bool {
        self.attendance
            .as_ref()
            .is_some_and(Attendance::is_checked_out)
    }

    pub fn status(&self) -> AttendanceStatus {
        self.attendance
            .as_ref()
            .map(Attendance::status)
            .unwrap_or(AttendanceStatus::Absent)
    }

    pub fn status_text(&self) -> &'static str {
        match &self.attendance {
            Some(a) if a.is_checked_out() => "Checked out",
            Some(_) => "Present",
            None => "Absent",
        }
    }

    pub fn check_in_time_text(&self) -> String {
        self.attendance
            .as_ref()
            .map(|a| format_time(a.check_in_time))
            .unwrap_or_else(|| "--".to_string())
    }
}
