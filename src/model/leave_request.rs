use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::utils::text::{format_date, non_blank, require_non_blank};

use super::user::User;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestType {
    Leave,
    LateArrival,
}

impl RequestType {
    pub fn display_name(&self) -> &'static str {
        match self {
            RequestType::Leave => "Leave",
            RequestType::LateArrival => "Late Arrival",
        }
    }
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveType {
    Sick,
    Vacation,
    Personal,
    Emergency,
}

impl LeaveType {
    pub fn display_name(&self) -> &'static str {
        match self {
            LeaveType::Sick => "Sick",
            LeaveType::Vacation => "Vacation",
            LeaveType::Personal => "Personal",
            LeaveType::Emergency => "Emergency",
        }
    }
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

/// Admin verdict on a pending request.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    fn target(self) -> RequestStatus {
        match self {
            Decision::Approve => RequestStatus::Approved,
            Decision::Reject => RequestStatus::Rejected,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
        }
    }
}

/// Everything a review writes onto a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub decision: Decision,
    pub comment: Option<String>,
    pub reviewer: String,
    pub at: NaiveDateTime,
}

/// Leave or late-arrival notice awaiting an admin decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_department: Option<String>,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    /// Only for `RequestType::Leave`.
    pub leave_type: Option<LeaveType>,
    pub start_date: NaiveDate,
    /// Only for `RequestType::Leave`.
    pub end_date: Option<NaiveDate>,
    /// Only for `RequestType::LateArrival`, e.g. `10:30 AM`.
    pub expected_time: Option<String>,
    pub reason: String,
    pub status: RequestStatus,
    pub admin_comment: Option<String>,
    pub created_at: NaiveDateTime,
    pub reviewed_at: Option<NaiveDateTime>,
    pub reviewed_by: Option<String>,
}

/// Employee input for a leave request.
#[derive(Debug, Clone)]
pub struct NewLeave {
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

/// Employee input for a late-arrival notice.
#[derive(Debug, Clone)]
pub struct NewLateArrival {
    pub date: NaiveDate,
    pub expected_time: String,
    pub reason: String,
}

impl LeaveRequest {
    pub fn new_leave(author: &User, input: NewLeave, now: NaiveDateTime) -> DomainResult<Self> {
        let reason = require_non_blank(&input.reason, "Please enter a reason")?;
        if input.start_date > input.end_date {
            return Err(DomainError::validation("Start date cannot be after end date"));
        }

        Ok(Self::pending(
            author,
            RequestType::Leave,
            Some(input.leave_type),
            input.start_date,
            Some(input.end_date),
            None,
            reason,
            now,
        ))
    }

    pub fn new_late_arrival(
        author: &User,
        input: NewLateArrival,
        now: NaiveDateTime,
    ) -> DomainResult<Self> {
        let reason = require_non_blank(&input.reason, "Please enter a reason")?;
        let expected = require_non_blank(&input.expected_time, "Please enter an expected time")?;

        Ok(Self::pending(
            author,
            RequestType::LateArrival,
            None,
            input.date,
            None,
            Some(expected.to_string()),
            reason,
            now,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    fn pending(
        author: &User,
        request_type: RequestType,
        leave_type: Option<LeaveType>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        expected_time: Option<String>,
        reason: &str,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: author.id,
            user_name: author.name.clone(),
            user_department: author.department.clone(),
            request_type,
            leave_type,
            start_date,
            end_date,
            expected_time,
            reason: reason.to_string(),
            status: RequestStatus::Pending,
            admin_comment: None,
            created_at: now,
            reviewed_at: None,
            reviewed_by: None,
        }
    }

    /// Moves a pending request to its terminal state. Terminal requests are
    /// left untouched and reported as an invalid transition.
    pub fn review(&mut self, review: Review) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::transition(
                "leave request",
                self.status,
                review.decision.verb(),
            ));
        }

        self.status = review.decision.target();
        self.admin_comment = non_blank(review.comment.as_deref());
        self.reviewed_at = Some(review.at);
        self.reviewed_by = Some(review.reviewer);
        Ok(())
    }

    /// Only pending requests may be withdrawn.
    pub fn ensure_deletable(&self) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::transition("leave request", self.status, "delete"));
        }
        Ok(())
    }

    /// Inclusive calendar days; `None` for late arrivals.
    pub fn days_count(&self) -> Option<i64> {
        self.end_date
            .map(|end| (end - self.start_date).num_days() + 1)
    }

    pub fn formatted_date_range(&self) -> String {
        match self.end_date {
            Some(end) => format!("{} - {}", format_date(self.start_date), format_date(end)),
            None => format_date(self.start_date),
        }
    }

    /// Recency key for status tabs: `created_at` while pending, otherwise
    /// `reviewed_at` with `now` standing in when it is missing.
    pub fn recency(&self, now: NaiveDateTime) -> NaiveDateTime {
        match self.status {
            RequestStatus::Pending => self.created_at,
            _ => self.reviewed_at.unwrap_or(now),
        }
    }
}
