pub mod attendance;
pub mod employee_attendance;
pub mod leave_request;
pub mod project;
pub mod role;
pub mod task;
pub mod user;

pub use attendance::{Attendance, AttendanceStatus};
pub use employee_attendance::EmployeeAttendance;
pub use leave_request::{
    Decision, LeaveRequest, LeaveType, NewLateArrival, NewLeave, RequestStatus, RequestType, Review,
};
pub use project::Project;
pub use role::Role;
pub use task::{NewTask, TaskItem, TaskPriority};
pub use user::User;
