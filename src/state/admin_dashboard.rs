use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::{ScreenStatus, Store, tracked};
use crate::aggregate::{DashboardStats, filter_by_query};
use crate::data::AttendanceSource;
use crate::error::DomainResult;
use crate::model::EmployeeAttendance;
use crate::utils::clock::Clock;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    pub rows: Vec<EmployeeAttendance>,
    pub search_text: String,
    pub screen: ScreenStatus,
}

screen_state!(DashboardState);

impl DashboardState {
    /// Counts always cover the whole roster, not the filtered view.
    pub fn stats(&self) -> DashboardStats {
        DashboardStats::compute(&self.rows)
    }

    pub fn filtered_employees(&self) -> Vec<EmployeeAttendance> {
        filter_by_query(&self.rows, &self.search_text)
    }
}

/// Admin overview of today's attendance.
pub struct AdminDashboard<D> {
    source: Arc<D>,
    clock: Arc<dyn Clock>,
    store: Store<DashboardState>,
}

impl<D: AttendanceSource> AdminDashboard<D> {
    pub fn new(source: Arc<D>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            store: Store::default(),
        }
    }

    pub fn store(&self) -> &Store<DashboardState> {
        &self.store
    }

    pub fn set_search_text(&self, text: &str) {
        self.store.update(|s| s.search_text = text.to_string());
    }

    pub async fn fetch_attendance_data(&self) -> DomainResult<Vec<EmployeeAttendance>> {
        let rows = tracked(
            &self.store,
            self.source.roster_for_day(self.clock.today()),
            |s, rows: &Vec<EmployeeAttendance>| s.rows = rows.clone(),
        )
        .await?;

        let stats = DashboardStats::compute(&rows);
        info!(
            total = stats.total_employees,
            present = stats.present,
            absent = stats.absent,
            rate = stats.attendance_rate,
            "Attendance board loaded"
        );
        Ok(rows)
    }

    pub async fn refresh(&self) -> DomainResult<Vec<EmployeeAttendance>> {
        self.fetch_attendance_data().await
    }
}
