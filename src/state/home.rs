use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::{ScreenStatus, Store, tracked};
use crate::data::AttendanceSource;
use crate::error::DomainResult;
use crate::model::{Attendance, AttendanceStatus};
use crate::utils::clock::Clock;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeState {
    pub today: Option<Attendance>,
    pub screen: ScreenStatus,
}

screen_state!(HomeState);

impl HomeState {
    /// `Absent` until a record exists for today.
    pub fn status(&self) -> AttendanceStatus {
        self.today
            .as_ref()
            .map(Attendance::status)
            .unwrap_or(AttendanceStatus::Absent)
    }

    pub fn hours_worked(&self) -> Option<f64> {
        self.today.as_ref().and_then(Attendance::hours_worked)
    }
}

/// Employee landing screen: today's attendance at a glance.
pub struct HomeScreen<D> {
    source: Arc<D>,
    clock: Arc<dyn Clock>,
    user_id: Uuid,
    store: Store<HomeState>,
}

impl<D: AttendanceSource> HomeScreen<D> {
    pub fn new(source: Arc<D>, clock: Arc<dyn Clock>, user_id: Uuid) -> Self {
        Self {
            source,
            clock,
            user_id,
            store: Store::default(),
        }
    }

    pub fn store(&self) -> &Store<HomeState> {
        &self.store
    }

    pub async fn fetch_today_status(&self) -> DomainResult<Option<Attendance>> {
        tracked(
            &self.store,
            self.source.attendance_for_day(self.user_id, self.clock.today()),
            |s, today: &Option<Attendance>| s.today = today.clone(),
        )
        .await
    }

    pub async fn refresh(&self) -> DomainResult<Option<Attendance>> {
        self.fetch_today_status().await
    }
}
