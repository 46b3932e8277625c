use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::{ScreenStatus, Store, tracked};
use crate::aggregate::history::{self, MonthStats};
use crate::data::AttendanceSource;
use crate::error::DomainResult;
use crate::model::{Attendance, AttendanceStatus};
use crate::utils::clock::Clock;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryState {
    /// Newest first.
    pub records: Vec<Attendance>,
    /// Any day inside the month being shown.
    pub selected_month: NaiveDate,
    pub selected_date: Option<NaiveDate>,
    pub screen: ScreenStatus,
}

screen_state!(HistoryState);

impl HistoryState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            records: Vec::new(),
            selected_month: today,
            selected_date: None,
            screen: ScreenStatus::default(),
        }
    }

    pub fn month_label(&self) -> String {
        history::month_label(self.selected_month)
    }

    pub fn days_in_month(&self) -> Vec<NaiveDate> {
        history::days_in_month(self.selected_month)
    }

    pub fn stats(&self) -> MonthStats {
        MonthStats::compute(&self.records, self.selected_month)
    }

    pub fn selected_date_attendance(&self) -> Option<&Attendance> {
        self.selected_date
            .and_then(|date| history::record_for_date(&self.records, date))
    }

    pub fn status_for_date(&self, date: NaiveDate) -> Option<AttendanceStatus> {
        history::status_for_date(&self.records, date)
    }

    pub fn has_attendance_for_date(&self, date: NaiveDate) -> bool {
        history::has_attendance_for_date(&self.records, date)
    }
}

/// Calendar of past attendance with month navigation.
pub struct HistoryScreen<D> {
    source: Arc<D>,
    user_id: Uuid,
    store: Store<HistoryState>,
}

impl<D: AttendanceSource> HistoryScreen<D> {
    pub fn new(source: Arc<D>, clock: Arc<dyn Clock>, user_id: Uuid) -> Self {
        Self {
            source,
            user_id,
            store: Store::new(HistoryState::new(clock.today())),
        }
    }

    pub fn store(&self) -> &Store<HistoryState> {
        &self.store
    }

    pub async fn fetch_history(&self) -> DomainResult<Vec<Attendance>> {
        tracked(
            &self.store,
            self.source.attendance_history(self.user_id),
            |s, records: &Vec<Attendance>| s.records = records.clone(),
        )
        .await
    }

    pub fn previous_month(&self) {
        self.shift(false);
    }

    pub fn next_month(&self) {
        self.shift(true);
    }

    fn shift(&self, forward: bool) {
        self.store.update(|s| {
            if let Some(month) = history::shift_month(s.selected_month, forward) {
                debug!(%month, "Month changed");
                s.selected_month = month;
            }
        });
    }

    pub fn select_date(&self, date: Option<NaiveDate>) {
        self.store.update(|s| s.selected_date = date);
    }
}
