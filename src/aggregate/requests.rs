use chrono::NaiveDateTime;
use serde::Serialize;

use crate::model::{LeaveRequest, RequestStatus};

use super::search::filter_by_query;

/// Requests split into the three status tabs, each newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusBuckets {
    pub pending: Vec<LeaveRequest>,
    pub approved: Vec<LeaveRequest>,
    pub rejected: Vec<LeaveRequest>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusBuckets {
    /// `now` stands in for a missing `reviewed_at` on terminal requests.
    pub fn partition(requests: &[LeaveRequest], now: NaiveDateTime) -> Self {
        let mut buckets = StatusBuckets::default();
        for request in requests {
            let bucket = match request.status {
                RequestStatus::Pending => &mut buckets.pending,
                RequestStatus::Approved => &mut buckets.approved,
                RequestStatus::Rejected => &mut buckets.rejected,
            };
            bucket.push(request.clone());
        }

        for bucket in [&mut buckets.pending, &mut buckets.approved, &mut buckets.rejected] {
            bucket.sort_by(|a, b| b.recency(now).cmp(&a.recency(now)));
        }
        buckets
    }

    /// Partition after applying the search box to every tab.
    pub fn partition_matching(
        requests: &[LeaveRequest],
        query: &str,
        now: NaiveDateTime,
    ) -> Self {
        Self::partition(&filter_by_query(requests, query), now)
    }

    pub fn tab(&self, status: RequestStatus) -> &[LeaveRequest] {
        match status {
            RequestStatus::Pending => &self.pending,
            RequestStatus::Approved => &self.approved,
            RequestStatus::Rejected => &self.rejected,
        }
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts {
            pending: self.pending.len(),
            approved: self.approved.len(),
            rejected: self.rejected.len(),
        }
    }
}
