//! The seam between state containers and wherever records live.
//!
//! Containers only ever talk to these traits. [`mock::MockDataSource`] backs
//! them with seeded in-process fixtures and a fixed artificial latency; a
//! real backend would implement the same traits.

pub mod fixtures;
pub mod mock;

use std::future::Future;

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::error::DomainResult;
use crate::model::{Attendance, EmployeeAttendance, LeaveRequest, Project, Review, TaskItem, User};

pub use mock::MockDataSource;

pub trait Directory: Send + Sync {
    /// Resolves credentials to a user, or `Validation("Invalid email or password")`.
    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = DomainResult<User>> + Send;

    fn employees(&self) -> impl Future<Output = DomainResult<Vec<User>>> + Send;
}

pub trait AttendanceSource: Send + Sync {
    fn attendance_for_day(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> impl Future<Output = DomainResult<Option<Attendance>>> + Send;

    /// All of a user's records, newest date first.
    fn attendance_history(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = DomainResult<Vec<Attendance>>> + Send;

    /// Stores a fresh check-in. Fails with `InvalidStateTransition` when the
    /// user already has a record for that date; the check and the insert
    /// happen under one write.
    fn open_attendance(
        &self,
        record: Attendance,
    ) -> impl Future<Output = DomainResult<Attendance>> + Send;

    /// Closes the user's most recent open record at `at`, whatever its date.
    fn close_attendance(
        &self,
        user_id: Uuid,
        at: NaiveDateTime,
    ) -> impl Future<Output = DomainResult<Attendance>> + Send;

    /// Inserts a new record or replaces the one with the same id.
    fn save_attendance(
        &self,
        record: Attendance,
    ) -> impl Future<Output = DomainResult<Attendance>> + Send;

    /// Every employee paired with their record for `date`.
    fn roster_for_day(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = DomainResult<Vec<EmployeeAttendance>>> + Send;
}

pub trait RequestSource: Send + Sync {
    fn requests_for_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = DomainResult<Vec<LeaveRequest>>> + Send;

    fn all_requests(&self) -> impl Future<Output = DomainResult<Vec<LeaveRequest>>> + Send;

    fn create_request(
        &self,
        request: LeaveRequest,
    ) -> impl Future<Output = DomainResult<LeaveRequest>> + Send;

    /// Applies a review to a pending request and returns the stored result.
    fn review_request(
        &self,
        id: Uuid,
        review: Review,
    ) -> impl Future<Output = DomainResult<LeaveRequest>> + Send;

    /// Removes a pending request written by `author_id`. Someone else's
    /// request reads as `NotFound`.
    fn delete_request(
        &self,
        author_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = DomainResult<()>> + Send;
}

pub trait TaskSource: Send + Sync {
    fn current_project(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = DomainResult<Option<Project>>> + Send;

    fn save_project(
        &self,
        user_id: Uuid,
        project: Project,
    ) -> impl Future<Output = DomainResult<Project>> + Send;

    fn tasks_for_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = DomainResult<Vec<TaskItem>>> + Send;

    fn create_task(&self, task: TaskItem) -> impl Future<Output = DomainResult<TaskItem>> + Send;

    fn update_task(&self, task: TaskItem) -> impl Future<Output = DomainResult<TaskItem>> + Send;

    fn delete_task(&self, id: Uuid) -> impl Future<Output = DomainResult<()>> + Send;
}

/// Everything a full session needs from one backend.
pub trait DataSource: Directory + AttendanceSource + RequestSource + TaskSource {}

impl<T> DataSource for T where T: Directory + AttendanceSource + RequestSource + TaskSource {}
