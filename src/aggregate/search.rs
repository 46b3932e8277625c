use crate::model::{EmployeeAttendance, LeaveRequest, User};
use crate::utils::text::contains_ignore_case;

/// Anything a search box can match by person name and department.
pub trait Searchable {
    fn search_name(&self) -> &str;
    fn search_department(&self) -> Option<&str>;

    fn matches(&self, query: &str) -> bool {
        contains_ignore_case(self.search_name(), query)
            || self
                .search_department()
                .is_some_and(|dept| contains_ignore_case(dept, query))
    }
}

impl Searchable for User {
    fn search_name(&self) -> &str {
        &self.name
    }

    fn search_department(&self) -> Option<&str> {
        self.department.as_deref()
    }
}

impl Searchable for EmployeeAttendance {
    fn search_name(&self) -> &str {
        &self.employee.name
    }

    fn search_department(&self) -> Option<&str> {
        self.employee.department.as_deref()
    }
}

impl Searchable for LeaveRequest {
    fn search_name(&self) -> &str {
        &self.user_name
    }

    fn search_department(&self) -> Option<&str> {
        self.user_department.as_deref()
    }
}

/// Keeps items whose name or department contains `query`, preserving order.
/// An empty query returns everything unchanged.
pub fn filter_by_query<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    if query.is_empty() {
        return items.to_vec();
    }
    items.iter().filter(|item| item.matches(query)).cloned().collect()
}
