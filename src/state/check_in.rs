use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{ScreenStatus, Store, tracked};
use crate::data::AttendanceSource;
use crate::error::DomainResult;
use crate::model::Attendance;
use crate::utils::clock::Clock;
use crate::utils::text::format_time;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckInState {
    pub current: Option<Attendance>,
    /// Raised after a successful check-in/out until dismissed.
    pub show_success: bool,
    pub screen: ScreenStatus,
}

screen_state!(CheckInState);

impl CheckInState {
    pub fn is_checked_in(&self) -> bool {
        self.current.as_ref().is_some_and(Attendance::is_open)
    }

    pub fn today_status_text(&self) -> String {
        match &self.current {
            None => "Not checked in yet".to_string(),
            Some(Attendance {
                check_out_time: Some(out),
                ..
            }) => format!("Checked out at {}", format_time(*out)),
            Some(a) => format!("Checked in at {}", format_time(a.check_in_time)),
        }
    }
}

/// Check-in / check-out for one employee.
pub struct CheckInScreen<D> {
    source: Arc<D>,
    clock: Arc<dyn Clock>,
    user_id: Uuid,
    store: Store<CheckInState>,
}

impl<D: AttendanceSource> CheckInScreen<D> {
    pub fn new(source: Arc<D>, clock: Arc<dyn Clock>, user_id: Uuid) -> Self {
        Self {
            source,
            clock,
            user_id,
            store: Store::default(),
        }
    }

    pub fn store(&self) -> &Store<CheckInState> {
        &self.store
    }

    /// Picks up a record already made today, if any.
    pub async fn load_today(&self) -> DomainResult<Option<Attendance>> {
        let today = self.clock.today();
        tracked(
            &self.store,
            self.source.attendance_for_day(self.user_id, today),
            |s, found: &Option<Attendance>| s.current = found.clone(),
        )
        .await
    }

    /// Opens today's record. A day already holding a record, open or
    /// closed, cannot be checked into again.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn check_in(&self) -> DomainResult<Attendance> {
        let record = Attendance::open(self.user_id, self.clock.now());
        let op = self.source.open_attendance(record);

        let record = tracked(&self.store, op, |s, record: &Attendance| {
            s.current = Some(record.clone());
            s.show_success = true;
        })
        .await?;

        info!(status = %record.status(), "Checked in");
        Ok(record)
    }

    /// Closes the open record, even one opened before midnight.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn check_out(&self) -> DomainResult<Attendance> {
        let op = self.source.close_attendance(self.user_id, self.clock.now());

        let record = tracked(&self.store, op, |s, record: &Attendance| {
            s.current = Some(record.clone());
            s.show_success = true;
        })
        .await?;

        info!(hours = record.hours_worked().unwrap_or_default(), "Checked out");
        Ok(record)
    }

    pub fn dismiss_success(&self) {
        self.store.update(|s| s.show_success = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MockDataSource, fixtures, mock::MockOptions};
    use crate::error::DomainError;
    use crate::model::AttendanceStatus;
    use crate::utils::clock::FixedClock;
    use chrono::Duration;

    fn setup(hour: u32, minute: u32) -> (Arc<FixedClock>, CheckInScreen<MockDataSource>) {
        let morning = fixtures::fixture_now()
            .date()
            .and_hms_opt(hour, minute, 0)
            .unwrap();
        let clock = Arc::new(FixedClock::new(morning));
        let source = Arc::new(MockDataSource::new(clock.clone(), MockOptions::default()));
        let screen = CheckInScreen::new(source, clock.clone(), fixtures::DEMO_EMPLOYEE_ID);
        (clock, screen)
    }

    #[tokio::test]
    async fn check_in_then_out() {
        let (clock, screen) = setup(8, 55);
        assert_eq!(screen.store().snapshot().today_status_text(), "Not checked in yet");

        let record = screen.check_in().await.unwrap();
        assert_eq!(record.status(), AttendanceStatus::OnTime);
        let state = screen.store().snapshot();
        assert!(state.is_checked_in() && state.show_success);
        assert_eq!(state.today_status_text(), "Checked in at 8:55 AM");

        screen.dismiss_success();
        clock.advance(Duration::hours(8) + Duration::minutes(35));

        let record = screen.check_out().await.unwrap();
        assert!((record.hours_worked().unwrap() - 8.5833).abs() < 1e-3);
        let state = screen.store().snapshot();
        assert!(!state.is_checked_in());
        assert_eq!(state.today_status_text(), "Checked out at 5:30 PM");
    }

    #[tokio::test]
    async fn late_check_in_is_classified() {
        let (_clock, screen) = setup(9, 30);
        let record = screen.check_in().await.unwrap();
        assert_eq!(record.status(), AttendanceStatus::Late);
    }

    #[tokio::test]
    async fn double_check_in_is_rejected() {
        let (_clock, screen) = setup(9, 0);
        screen.check_in().await.unwrap();

        let err = screen.check_in().await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidStateTransition { .. }));
        assert!(screen.store().snapshot().screen.error_message.is_some());
    }

    #[tokio::test]
    async fn check_out_without_check_in_fails() {
        let (_clock, screen) = setup(17, 0);
        let err = screen.check_out().await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(screen.store().snapshot().current.is_none());
    }

    #[tokio::test]
    async fn check_out_after_midnight_closes_last_nights_record() {
        let (clock, screen) = setup(23, 30);
        let opened = screen.check_in().await.unwrap();

        clock.advance(Duration::minutes(40));
        let closed = screen.check_out().await.unwrap();
        assert_eq!(closed.id, opened.id);
        assert_eq!(closed.date, fixtures::fixture_now().date());
        assert_eq!(closed.check_out_time, Some(clock.now()));
        assert!((closed.hours_worked().unwrap() - 0.6667).abs() < 1e-3);
        assert!(!screen.store().snapshot().is_checked_in());
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_check_ins_store_one_record() {
        let clock = Arc::new(FixedClock::new(fixtures::fixture_now()));
        let options = MockOptions {
            latency: std::time::Duration::from_millis(300),
            ..MockOptions::default()
        };
        let source = Arc::new(MockDataSource::new(clock.clone(), options));
        let screen = CheckInScreen::new(source.clone(), clock.clone(), fixtures::DEMO_EMPLOYEE_ID);

        let (first, second) = tokio::join!(screen.check_in(), screen.check_in());
        assert!(first.is_ok() != second.is_ok());

        let today = clock.today();
        let history = source.attendance_history(fixtures::DEMO_EMPLOYEE_ID).await.unwrap();
        assert_eq!(history.iter().filter(|r| r.date == today).count(), 1);
    }

    #[tokio::test]
    async fn load_today_restores_open_record() {
        let (_clock, screen) = setup(9, 5);
        screen.check_in().await.unwrap();
        screen.store().update(|s| s.current = None);

        let found = screen.load_today().await.unwrap();
        assert!(found.is_some());
        assert!(screen.store().snapshot().is_checked_in());
    }
}
