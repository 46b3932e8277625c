//! Seed records for the in-process data source. Timestamps are laid out
//! relative to a caller-supplied `now` so every fixture stays "current".

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{Days, Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::model::{
    Attendance, EmployeeAttendance, LeaveRequest, LeaveType, Project, RequestStatus, RequestType,
    Role, TaskItem, TaskPriority, User,
};

const fn fixture_id(n: u8) -> Uuid {
    Uuid::from_bytes([0, 0, 0, 0, 0, 0, 0x40, 0, 0x80, 0, 0, 0, 0, 0, 0, n])
}

pub const DEMO_EMPLOYEE_ID: Uuid = fixture_id(1);
pub const ADMIN_ID: Uuid = fixture_id(2);
pub const JOHN_ID: Uuid = fixture_id(11);
pub const JANE_ID: Uuid = fixture_id(12);
pub const MIKE_ID: Uuid = fixture_id(13);
pub const SARAH_ID: Uuid = fixture_id(14);
pub const SARAH_WILSON_ID: Uuid = fixture_id(15);
pub const PROJECT_ID: Uuid = fixture_id(31);

pub const ADMIN_EMAIL: &str = "admin@testsolz.com";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const EMPLOYEE_PASSWORD: &str = "test123";
pub const COMPANY_DOMAIN: &str = "@testsolz.com";

fn user(id: Uuid, email: &str, name: &str, role: Role, department: &str) -> User {
    User {
        id,
        email: email.to_string(),
        name: name.to_string(),
        role,
        department: Some(department.to_string()),
        avatar_url: None,
    }
}

static DEMO_EMPLOYEE: Lazy<User> = Lazy::new(|| {
    user(
        DEMO_EMPLOYEE_ID,
        "mashaal@testsolz.com",
        "Mashaal Khan",
        Role::Employee,
        "Engineering",
    )
});

static ADMIN: Lazy<User> =
    Lazy::new(|| user(ADMIN_ID, ADMIN_EMAIL, "Admin User", Role::Admin, "HR"));

static ROSTER: Lazy<Vec<User>> = Lazy::new(|| {
    vec![
        user(JOHN_ID, "john@testsolz.com", "John Doe", Role::Employee, "Engineering"),
        user(JANE_ID, "jane@testsolz.com", "Jane Smith", Role::Employee, "Design"),
        user(MIKE_ID, "mike@testsolz.com", "Mike Johnson", Role::Employee, "Marketing"),
        user(SARAH_ID, "sarah@testsolz.com", "Sarah Williams", Role::Employee, "Engineering"),
    ]
});

/// Reference instant used by tests: Monday 2026-10-12, 11:00.
pub fn fixture_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 12)
        .and_then(|d| d.and_hms_opt(11, 0, 0))
        .unwrap_or_default()
}

pub fn demo_employee() -> User {
    DEMO_EMPLOYEE.clone()
}

pub fn admin() -> User {
    ADMIN.clone()
}

/// The four employees on the admin attendance board.
pub fn roster() -> Vec<User> {
    ROSTER.clone()
}

fn record(user_id: Uuid, check_in: NaiveDateTime, check_out: Option<NaiveDateTime>) -> Attendance {
    Attendance {
        id: Uuid::new_v4(),
        user_id,
        check_in_time: check_in,
        check_out_time: check_out,
        date: check_in.date(),
    }
}

/// Today's records for the roster at fixed wall-clock times: two present
/// (one of them late), one absent, one already checked out.
pub fn roster_attendance(today: NaiveDate) -> Vec<Attendance> {
    let at = |h, m| today.and_hms_opt(h, m, 0);
    [
        (JOHN_ID, at(9, 0), None),
        (JANE_ID, at(9, 20), None),
        (SARAH_ID, at(7, 30), at(10, 30)),
    ]
    .into_iter()
    .filter_map(|(user_id, check_in, check_out)| Some(record(user_id, check_in?, check_out)))
    .collect()
}

/// Roster joined with [`roster_attendance`].
pub fn employee_attendance(today: NaiveDate) -> Vec<EmployeeAttendance> {
    let records = roster_attendance(today);
    roster()
        .into_iter()
        .map(|employee| EmployeeAttendance {
            attendance: records.iter().find(|r| r.user_id == employee.id).cloned(),
            employee,
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn request(
    author: &User,
    request_type: RequestType,
    leave_type: Option<LeaveType>,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    expected_time: Option<&str>,
    reason: &str,
    created_at: NaiveDateTime,
) -> LeaveRequest {
    LeaveRequest {
        id: Uuid::new_v4(),
        user_id: author.id,
        user_name: author.name.clone(),
        user_department: author.department.clone(),
        request_type,
        leave_type,
        start_date,
        end_date,
        expected_time: expected_time.map(str::to_string),
        reason: reason.to_string(),
        status: RequestStatus::Pending,
        admin_comment: None,
        created_at,
        reviewed_at: None,
        reviewed_by: None,
    }
}

fn approved(
    mut req: LeaveRequest,
    comment: &str,
    reviewed_at: NaiveDateTime,
) -> LeaveRequest {
    req.status = RequestStatus::Approved;
    req.admin_comment = Some(comment.to_string());
    req.reviewed_at = Some(reviewed_at);
    req.reviewed_by = Some(ADMIN.name.clone());
    req
}

/// Requests from other employees awaiting or past review.
pub fn admin_requests(now: NaiveDateTime) -> Vec<LeaveRequest> {
    let today = now.date();
    let sarah = user(
        SARAH_WILSON_ID,
        "sarah.wilson@testsolz.com",
        "Sarah Wilson",
        Role::Employee,
        "Design",
    );
    let roster = &*ROSTER;

    vec![
        request(
            &sarah,
            RequestType::Leave,
            Some(LeaveType::Sick),
            today,
            Some(today + Duration::days(2)),
            None,
            "Flu",
            now,
        ),
        request(
            &roster[2],
            RequestType::LateArrival,
            None,
            today,
            None,
            Some("11:00 AM"),
            "Car trouble",
            now,
        ),
        approved(
            request(
                &roster[0],
                RequestType::Leave,
                Some(LeaveType::Vacation),
                today - Duration::days(5),
                Some(today - Duration::days(3)),
                None,
                "Beach trip",
                now - Duration::days(7),
            ),
            "Enjoy!",
            now - Duration::days(6),
        ),
    ]
}

/// The signed-in employee's own requests.
pub fn employee_requests(author: &User, now: NaiveDateTime) -> Vec<LeaveRequest> {
    let today = now.date();
    vec![
        request(
            author,
            RequestType::Leave,
            Some(LeaveType::Vacation),
            today + Duration::days(7),
            Some(today + Duration::days(9)),
            None,
            "Family vacation",
            now,
        ),
        request(
            author,
            RequestType::LateArrival,
            None,
            today,
            None,
            Some("10:30 AM"),
            "Doctor's appointment",
            now - Duration::hours(2),
        ),
        approved(
            request(
                author,
                RequestType::Leave,
                Some(LeaveType::Sick),
                today - Duration::days(5),
                Some(today - Duration::days(3)),
                None,
                "Flu",
                now - Duration::days(6),
            ),
            "Get well soon!",
            now - Duration::days(5),
        ),
    ]
}

pub fn project() -> Project {
    Project {
        id: PROJECT_ID,
        name: "Mobile App Redesign".to_string(),
        description: Some("Redesigning the company mobile application".to_string()),
        color: "#00D9D9".to_string(),
    }
}

pub fn tasks(user_id: Uuid, now: NaiveDateTime) -> Vec<TaskItem> {
    let task = |title: &str, description: Option<&str>, created_at, done: bool, priority| TaskItem {
        id: Uuid::new_v4(),
        user_id,
        project_id: PROJECT_ID,
        title: title.to_string(),
        description: description.map(str::to_string),
        is_completed: done,
        created_at,
        completed_at: done.then_some(now),
        priority,
    };

    vec![
        task("Design login screen", Some("Create mockups"), now, false, TaskPriority::High),
        task(
            "Implement API integration",
            Some("Connect to backend"),
            now - Duration::days(1),
            false,
            TaskPriority::Medium,
        ),
        task("Write unit tests", None, now - Duration::days(2), true, TaskPriority::Low),
    ]
}

fn day_seed(user_id: Uuid, date: NaiveDate) -> u64 {
    let mut hasher = DefaultHasher::new();
    user_id.hash(&mut hasher);
    date.hash(&mut hasher);
    hasher.finish()
}

/// Past attendance for `user_id`, one entry per worked day in the
/// `days_back` days before `today` (today itself excluded), newest first.
///
/// Deterministic per (user, date): roughly 2 days in 11 are skipped as
/// absences, check-in falls between 8:00 and 9:59 and check-out between
/// 17:00 and 19:59.
pub fn generated_history(user_id: Uuid, today: NaiveDate, days_back: u32) -> Vec<Attendance> {
    (1..=u64::from(days_back))
        .map_while(|offset| today.checked_sub_days(Days::new(offset)))
        .filter_map(|date| {
            let seed = day_seed(user_id, date);
            if seed % 11 > 8 {
                return None;
            }

            let in_hour = 8 + ((seed >> 8) % 2) as u32;
            let in_minute = ((seed >> 16) % 60) as u32;
            let out_hour = 17 + ((seed >> 24) % 3) as u32;
            let out_minute = ((seed >> 32) % 60) as u32;

            let check_in = date.and_hms_opt(in_hour, in_minute, 0)?;
            let check_out = date.and_hms_opt(out_hour, out_minute, 0)?;
            Some(record(user_id, check_in, Some(check_out)))
        })
        .collect()
}
