//! End-to-end flows across screens sharing one in-process data source.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDateTime};
use hrm_presence::DomainError;
use hrm_presence::data::mock::MockOptions;
use hrm_presence::data::{MockDataSource, fixtures};
use hrm_presence::model::{AttendanceStatus, LeaveType, NewLeave, RequestStatus};
use hrm_presence::session::{Session, Workspace};
use hrm_presence::state::admin_dashboard::AdminDashboard;
use hrm_presence::state::admin_requests::AdminRequestsScreen;
use hrm_presence::state::auth::AuthScreen;
use hrm_presence::state::check_in::CheckInScreen;
use hrm_presence::state::requests::RequestsScreen;
use hrm_presence::utils::clock::{Clock, FixedClock};

fn at(h: u32, m: u32) -> NaiveDateTime {
    fixtures::fixture_now().date().and_hms_opt(h, m, 0).unwrap()
}

fn world(now: NaiveDateTime) -> (Arc<FixedClock>, Arc<MockDataSource>) {
    let clock = Arc::new(FixedClock::new(now));
    let source = Arc::new(MockDataSource::new(clock.clone(), MockOptions::default()));
    (clock, source)
}

#[tokio::test]
async fn check_in_times_are_classified() {
    for (h, m, expected) in [
        (8, 55, AttendanceStatus::OnTime),
        (9, 0, AttendanceStatus::OnTime),
        (9, 15, AttendanceStatus::SlightlyLate),
        (9, 20, AttendanceStatus::Late),
        (9, 30, AttendanceStatus::Late),
    ] {
        let (clock, source) = world(at(h, m));
        let screen = CheckInScreen::new(source, clock, fixtures::DEMO_EMPLOYEE_ID);
        let record = screen.check_in().await.unwrap();
        assert_eq!(record.status(), expected, "check-in at {h}:{m:02}");
    }
}

#[tokio::test]
async fn employee_check_in_shows_on_admin_board() {
    let (clock, source) = world(at(9, 10));
    let board = AdminDashboard::new(source.clone(), clock.clone());
    board.fetch_attendance_data().await.unwrap();
    let before = board.store().snapshot().stats();

    let screen = CheckInScreen::new(source.clone(), clock.clone(), fixtures::DEMO_EMPLOYEE_ID);
    screen.check_in().await.unwrap();

    board.refresh().await.unwrap();
    let after = board.store().snapshot().stats();
    assert_eq!(after.present, before.present + 1);
    assert_eq!(after.absent, before.absent - 1);
    assert_eq!(after.late_arrivals, before.late_arrivals + 1);
    assert!(after.attendance_rate > before.attendance_rate);
}

#[tokio::test]
async fn leave_request_round_trip_between_roles() {
    let (clock, source) = world(fixtures::fixture_now());
    let start = clock.today() + Duration::days(1);

    let employee = RequestsScreen::new(source.clone(), clock.clone(), fixtures::demo_employee());
    let created = employee
        .create_leave_request(NewLeave {
            leave_type: LeaveType::Vacation,
            start_date: start,
            end_date: start + Duration::days(2),
            reason: "Long weekend".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.days_count(), Some(3));

    clock.advance(Duration::hours(1));
    let admin = AdminRequestsScreen::new(source.clone(), clock.clone(), fixtures::admin());
    admin.fetch_requests().await.unwrap();
    let approved = admin.approve_request(created.id, Some("ok")).await.unwrap();
    assert_eq!(approved.status, RequestStatus::Approved);
    assert_eq!(approved.admin_comment.as_deref(), Some("ok"));
    assert_eq!(approved.reviewed_at, Some(clock.now()));

    employee.fetch_requests().await.unwrap();
    let tabs = employee.tabs();
    assert_eq!(tabs.approved[0].id, created.id);
    for request in employee.store().snapshot().requests {
        assert_eq!(
            request.reviewed_at.is_some() && request.reviewed_by.is_some(),
            request.status != RequestStatus::Pending
        );
    }

    let err = employee.delete_request(created.id).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidStateTransition { .. }));
}

#[tokio::test]
async fn login_resolves_the_admin_workspace() {
    let (clock, source) = world(fixtures::fixture_now());
    let auth = AuthScreen::new(source.clone());
    auth.set_email("admin@testsolz.com");
    auth.set_password("admin123");
    let user = auth.login().await.unwrap();

    let session = Session::open(user, source, clock);
    session.load().await.unwrap();
    let Session::Admin(admin) = &session else {
        panic!("admin credentials must open the admin workspace");
    };
    assert_eq!(admin.user().name, "Admin User");
    assert_eq!(admin.dashboard.store().snapshot().stats().total_employees, 5);
}

#[tokio::test(start_paused = true)]
async fn latency_is_simulated() {
    let clock = Arc::new(FixedClock::new(fixtures::fixture_now()));
    let options = MockOptions {
        latency: StdDuration::from_millis(800),
        ..MockOptions::default()
    };
    let source = Arc::new(MockDataSource::new(clock.clone(), options));
    let screen = CheckInScreen::new(source, clock, fixtures::DEMO_EMPLOYEE_ID);

    let started = tokio::time::Instant::now();
    screen.load_today().await.unwrap();
    assert!(started.elapsed() >= StdDuration::from_millis(800));
    assert!(!screen.store().snapshot().screen.is_loading);
}

#[tokio::test]
async fn subscribers_observe_loading_then_data() {
    let (clock, source) = world(fixtures::fixture_now());
    let board = AdminDashboard::new(source, clock);
    let mut rx = board.store().subscribe();

    board.fetch_attendance_data().await.unwrap();
    assert!(rx.has_changed().unwrap());
    let seen = rx.borrow_and_update().clone();
    assert!(!seen.screen.is_loading);
    assert_eq!(seen.rows.len(), 5);
}
