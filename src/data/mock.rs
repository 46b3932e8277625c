use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use moka::future::Cache;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::{AttendanceSource, Directory, RequestSource, TaskSource, fixtures};
use crate::error::{DomainError, DomainResult};
use crate::model::{Attendance, EmployeeAttendance, LeaveRequest, Project, Review, TaskItem, User};
use crate::utils::clock::Clock;

/// Tunables for [`MockDataSource`].
#[derive(Debug, Clone)]
pub struct MockOptions {
    /// Artificial delay applied to every call.
    pub latency: Duration,
    /// Days of generated history before today.
    pub history_days: u32,
    pub cache_ttl: Duration,
}

impl Default for MockOptions {
    fn default() -> Self {
        Self {
            latency: Duration::ZERO,
            history_days: 90,
            cache_ttl: Duration::from_secs(300),
        }
    }
}

/// In-process backend seeded from [`fixtures`]. Calls never fail for
/// infrastructure reasons; they only report domain errors.
pub struct MockDataSource {
    options: MockOptions,
    clock: Arc<dyn Clock>,
    users: Vec<User>,
    attendance: RwLock<Vec<Attendance>>,
    requests: RwLock<Vec<LeaveRequest>>,
    projects: RwLock<HashMap<Uuid, Project>>,
    tasks: RwLock<Vec<TaskItem>>,
    /// Merged (generated + recorded) history per user.
    history: Cache<Uuid, Arc<Vec<Attendance>>>,
}

impl MockDataSource {
    pub fn new(clock: Arc<dyn Clock>, options: MockOptions) -> Self {
        let now = clock.now();
        let demo = fixtures::demo_employee();

        let mut users = vec![demo.clone(), fixtures::admin()];
        users.extend(fixtures::roster());

        let mut requests = fixtures::employee_requests(&demo, now);
        requests.extend(fixtures::admin_requests(now));

        let mut projects = HashMap::new();
        projects.insert(demo.id, fixtures::project());

        let history = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(options.cache_ttl)
            .build();

        info!(
            users = users.len(),
            requests = requests.len(),
            latency_ms = options.latency.as_millis() as u64,
            "Mock data source seeded"
        );

        Self {
            clock,
            users,
            attendance: RwLock::new(fixtures::roster_attendance(now.date())),
            requests: RwLock::new(requests),
            projects: RwLock::new(projects),
            tasks: RwLock::new(fixtures::tasks(demo.id, now)),
            history,
            options,
        }
    }

    async fn simulate_latency(&self) {
        if !self.options.latency.is_zero() {
            tokio::time::sleep(self.options.latency).await;
        }
    }

    fn employees_only(&self) -> impl Iterator<Item = &User> {
        self.users.iter().filter(|u| !u.role.is_admin())
    }

    async fn build_history(&self, user_id: Uuid) -> Vec<Attendance> {
        let today = self.clock.today();
        let mut merged = fixtures::generated_history(user_id, today, self.options.history_days);

        let recorded = self.attendance.read().await;
        for record in recorded.iter().filter(|r| r.user_id == user_id) {
            merged.retain(|g| g.date != record.date);
            merged.push(record.clone());
        }
        merged.sort_by(|a, b| b.date.cmp(&a.date));
        debug!(%user_id, records = merged.len(), "Built attendance history");
        merged
    }
}

impl Directory for MockDataSource {
    async fn authenticate(&self, email: &str, password: &str) -> DomainResult<User> {
        self.simulate_latency().await;

        let email = email.trim().to_lowercase();
        if email == fixtures::ADMIN_EMAIL && password == fixtures::ADMIN_PASSWORD {
            return Ok(fixtures::admin());
        }
        if email.ends_with(fixtures::COMPANY_DOMAIN) && password == fixtures::EMPLOYEE_PASSWORD {
            return Ok(fixtures::demo_employee());
        }
        Err(DomainError::validation("Invalid email or password"))
    }

    async fn employees(&self) -> DomainResult<Vec<User>> {
        self.simulate_latency().await;
        Ok(self.employees_only().cloned().collect())
    }
}

impl AttendanceSource for MockDataSource {
    async fn attendance_for_day(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> DomainResult<Option<Attendance>> {
        self.simulate_latency().await;
        let records = self.attendance.read().await;
        Ok(records
            .iter()
            .find(|r| r.user_id == user_id && r.date == date)
            .cloned())
    }

    async fn attendance_history(&self, user_id: Uuid) -> DomainResult<Vec<Attendance>> {
        self.simulate_latency().await;
        let history = self
            .history
            .get_with(user_id, async { Arc::new(self.build_history(user_id).await) })
            .await;
        Ok(history.as_ref().clone())
    }

    async fn open_attendance(&self, record: Attendance) -> DomainResult<Attendance> {
        self.simulate_latency().await;
        {
            let mut records = self.attendance.write().await;
            if let Some(existing) = records
                .iter()
                .find(|r| r.user_id == record.user_id && r.date == record.date)
            {
                let state = if existing.is_open() { "checked_in" } else { "checked_out" };
                return Err(DomainError::transition("attendance", state, "check in"));
            }
            records.push(record.clone());
        }
        self.history.invalidate(&record.user_id).await;
        Ok(record)
    }

    async fn close_attendance(&self, user_id: Uuid, at: NaiveDateTime) -> DomainResult<Attendance> {
        self.simulate_latency().await;
        let closed = {
            let mut records = self.attendance.write().await;
            let record = records
                .iter_mut()
                .filter(|r| r.user_id == user_id && r.is_open())
                .max_by_key(|r| r.check_in_time)
                .ok_or_else(|| DomainError::not_found("open attendance", user_id))?;
            record.close(at)?;
            record.clone()
        };
        self.history.invalidate(&user_id).await;
        Ok(closed)
    }

    async fn save_attendance(&self, record: Attendance) -> DomainResult<Attendance> {
        self.simulate_latency().await;
        {
            let mut records = self.attendance.write().await;
            match records.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => *existing = record.clone(),
                None => records.push(record.clone()),
            }
        }
        self.history.invalidate(&record.user_id).await;
        Ok(record)
    }

    async fn roster_for_day(&self, date: NaiveDate) -> DomainResult<Vec<EmployeeAttendance>> {
        self.simulate_latency().await;
        let records = self.attendance.read().await;
        Ok(self
            .employees_only()
            .map(|employee| EmployeeAttendance {
                attendance: records
                    .iter()
                    .find(|r| r.user_id == employee.id && r.date == date)
                    .cloned(),
                employee: employee.clone(),
            })
            .collect())
    }
}

impl RequestSource for MockDataSource {
    async fn requests_for_user(&self, user_id: Uuid) -> DomainResult<Vec<LeaveRequest>> {
        self.simulate_latency().await;
        let requests = self.requests.read().await;
        Ok(requests.iter().filter(|r| r.user_id == user_id).cloned().collect())
    }

    async fn all_requests(&self) -> DomainResult<Vec<LeaveRequest>> {
        self.simulate_latency().await;
        Ok(self.requests.read().await.clone())
    }

    async fn create_request(&self, request: LeaveRequest) -> DomainResult<LeaveRequest> {
        self.simulate_latency().await;
        self.requests.write().await.insert(0, request.clone());
        Ok(request)
    }

    async fn review_request(&self, id: Uuid, review: Review) -> DomainResult<LeaveRequest> {
        self.simulate_latency().await;
        let mut requests = self.requests.write().await;
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::not_found("leave request", id))?;
        request.review(review)?;
        Ok(request.clone())
    }

    async fn delete_request(&self, author_id: Uuid, id: Uuid) -> DomainResult<()> {
        self.simulate_latency().await;
        let mut requests = self.requests.write().await;
        let index = requests
            .iter()
            .position(|r| r.id == id && r.user_id == author_id)
            .ok_or_else(|| DomainError::not_found("leave request", id))?;
        requests[index].ensure_deletable()?;
        requests.remove(index);
        Ok(())
    }
}

impl TaskSource for MockDataSource {
    async fn current_project(&self, user_id: Uuid) -> DomainResult<Option<Project>> {
        self.simulate_latency().await;
        Ok(self.projects.read().await.get(&user_id).cloned())
    }

    async fn save_project(&self, user_id: Uuid, project: Project) -> DomainResult<Project> {
        self.simulate_latency().await;
        self.projects.write().await.insert(user_id, project.clone());
        Ok(project)
    }

    async fn tasks_for_user(&self, user_id: Uuid) -> DomainResult<Vec<TaskItem>> {
        self.simulate_latency().await;
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().filter(|t| t.user_id == user_id).cloned().collect())
    }

    async fn create_task(&self, task: TaskItem) -> DomainResult<TaskItem> {
        self.simulate_latency().await;
        self.tasks.write().await.insert(0, task.clone());
        Ok(task)
    }

    async fn update_task(&self, task: TaskItem) -> DomainResult<TaskItem> {
        self.simulate_latency().await;
        let mut tasks = self.tasks.write().await;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| DomainError::not_found("task", task.id))?;
        *slot = task.clone();
        Ok(task)
    }

    async fn delete_task(&self, id: Uuid) -> DomainResult<()> {
        self.simulate_latency().await;
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(DomainError::not_found("task", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Decision, RequestStatus};
    use crate::utils::clock::FixedClock;

    fn source() -> MockDataSource {
        MockDataSource::new(
            Arc::new(FixedClock::new(fixtures::fixture_now())),
            MockOptions::default(),
        )
    }

    #[tokio::test]
    async fn authenticates_known_accounts() {
        let src = source();
        let admin = src.authenticate("ADMIN@testsolz.com", "admin123").await.unwrap();
        assert!(admin.role.is_admin());

        let employee = src.authenticate("someone@testsolz.com", "test123").await.unwrap();
        assert_eq!(employee.id, fixtures::DEMO_EMPLOYEE_ID);

        let err = src.authenticate("someone@elsewhere.com", "test123").await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid email or password");
    }

    #[tokio::test]
    async fn history_reflects_saved_records() {
        let src = source();
        let before = src.attendance_history(fixtures::DEMO_EMPLOYEE_ID).await.unwrap();
        assert!(before.iter().all(|r| r.date < fixtures::fixture_now().date()));

        let today = Attendance::open(fixtures::DEMO_EMPLOYEE_ID, fixtures::fixture_now());
        src.save_attendance(today.clone()).await.unwrap();

        let after = src.attendance_history(fixtures::DEMO_EMPLOYEE_ID).await.unwrap();
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after[0].id, today.id);
    }

    #[tokio::test]
    async fn roster_excludes_admins() {
        let src = source();
        let rows = src.roster_for_day(fixtures::fixture_now().date()).await.unwrap();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| !r.employee.role.is_admin()));
    }

    #[tokio::test]
    async fn review_is_guarded_by_state() {
        let src = source();
        let approved = src
            .all_requests()
            .await
            .unwrap()
            .into_iter()
            .find(|r| r.status == RequestStatus::Approved)
            .unwrap();

        let review = Review {
            decision: Decision::Reject,
            comment: None,
            reviewer: "Admin User".into(),
            at: fixtures::fixture_now(),
        };
        let err = src.review_request(approved.id, review.clone()).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidStateTransition { .. }));

        let err = src.review_request(Uuid::new_v4(), review).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let err = src.delete_request(approved.user_id, approved.id).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidStateTransition { .. }));
    }

    #[tokio::test]
    async fn delete_is_scoped_to_the_author() {
        let src = source();
        let foreign = src
            .all_requests()
            .await
            .unwrap()
            .into_iter()
            .find(|r| r.user_id == fixtures::SARAH_WILSON_ID)
            .unwrap();

        let err = src
            .delete_request(fixtures::DEMO_EMPLOYEE_ID, foreign.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(src.all_requests().await.unwrap().iter().any(|r| r.id == foreign.id));

        src.delete_request(fixtures::SARAH_WILSON_ID, foreign.id).await.unwrap();
        assert!(src.all_requests().await.unwrap().iter().all(|r| r.id != foreign.id));
    }

    #[tokio::test]
    async fn open_attendance_keeps_one_record_per_day() {
        let src = source();
        let now = fixtures::fixture_now();
        src.open_attendance(Attendance::open(fixtures::DEMO_EMPLOYEE_ID, now))
            .await
            .unwrap();

        let err = src
            .open_attendance(Attendance::open(fixtures::DEMO_EMPLOYEE_ID, now))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidStateTransition { .. }));

        let closed = src
            .close_attendance(fixtures::DEMO_EMPLOYEE_ID, now + chrono::Duration::hours(6))
            .await
            .unwrap();
        assert!(closed.is_checked_out());
        let err = src
            .close_attendance(fixtures::DEMO_EMPLOYEE_ID, now + chrono::Duration::hours(7))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
