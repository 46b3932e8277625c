use serde::Serialize;

use crate::model::EmployeeAttendance;

/// Today's roll-up for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_employees: usize,
    /// Checked in, not yet checked out.
    pub present: usize,
    /// No record at all.
    pub absent: usize,
    pub checked_out: usize,
    pub late_arrivals: usize,
    /// `(present + checked_out) / total * 100`, 0 for an empty roster.
    pub attendance_rate: f64,
}

impl DashboardStats {
    pub fn compute(rows: &[EmployeeAttendance]) -> Self {
        let mut stats = DashboardStats {
            total_employees: rows.len(),
            ..Default::default()
        };

        for row in rows {
            match &row.attendance {
                None => stats.absent += 1,
                Some(a) => {
                    if a.is_checked_out() {
                        stats.checked_out += 1;
                    } else {
                        stats.present += 1;
                    }
                    if a.status().is_late() {
                        stats.late_arrivals += 1;
                    }
                }
            }
        }

        stats.attendance_rate = rate(stats.present + stats.checked_out, stats.total_employees);
        stats
    }
}

/// Percentage with a zero guard.
pub fn rate(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}
