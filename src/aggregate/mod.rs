//! Pure derivations over entity collections. Nothing here touches a data
//! source or a clock; callers pass `now` where recency matters.

pub mod dashboard;
pub mod history;
pub mod requests;
pub mod search;
pub mod tasks;

pub use dashboard::DashboardStats;
pub use history::MonthStats;
pub use requests::{StatusBuckets, StatusCounts};
pub use search::{Searchable, filter_by_query};
