use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{ScreenStatus, Store, tracked};
use crate::aggregate::{StatusBuckets, StatusCounts};
use crate::data::RequestSource;
use crate::error::DomainResult;
use crate::model::{Decision, LeaveRequest, RequestStatus, Review, User};
use crate::utils::clock::Clock;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdminRequestsState {
    pub requests: Vec<LeaveRequest>,
    pub search_text: String,
    pub selected_tab: Option<RequestStatus>,
    pub screen: ScreenStatus,
}

screen_state!(AdminRequestsState);

impl AdminRequestsState {
    /// Status tabs with the search box applied to each.
    pub fn tabs(&self, now: NaiveDateTime) -> StatusBuckets {
        StatusBuckets::partition_matching(&self.requests, &self.search_text, now)
    }

    pub fn counts(&self, now: NaiveDateTime) -> StatusCounts {
        self.tabs(now).counts()
    }

    /// Rows for the selected tab (pending when none is chosen).
    pub fn current_requests(&self, now: NaiveDateTime) -> Vec<LeaveRequest> {
        let tab = self.selected_tab.unwrap_or(RequestStatus::Pending);
        self.tabs(now).tab(tab).to_vec()
    }
}

/// Admin review queue for every employee's requests.
pub struct AdminRequestsScreen<D> {
    source: Arc<D>,
    clock: Arc<dyn Clock>,
    reviewer: User,
    store: Store<AdminRequestsState>,
}

impl<D: RequestSource> AdminRequestsScreen<D> {
    pub fn new(source: Arc<D>, clock: Arc<dyn Clock>, reviewer: User) -> Self {
        Self {
            source,
            clock,
            reviewer,
            store: Store::default(),
        }
    }

    pub fn store(&self) -> &Store<AdminRequestsState> {
        &self.store
    }

    pub fn tabs(&self) -> StatusBuckets {
        let now = self.clock.now();
        self.store.with(|s| s.tabs(now))
    }

    pub fn set_search_text(&self, text: &str) {
        self.store.update(|s| s.search_text = text.to_string());
    }

    pub fn select_tab(&self, tab: RequestStatus) {
        self.store.update(|s| s.selected_tab = Some(tab));
    }

    pub async fn fetch_requests(&self) -> DomainResult<Vec<LeaveRequest>> {
        tracked(
            &self.store,
            self.source.all_requests(),
            |s, requests: &Vec<LeaveRequest>| s.requests = requests.clone(),
        )
        .await
    }

    pub async fn approve_request(&self, id: Uuid, comment: Option<&str>) -> DomainResult<LeaveRequest> {
        self.review(id, Decision::Approve, comment).await
    }

    pub async fn reject_request(&self, id: Uuid, comment: Option<&str>) -> DomainResult<LeaveRequest> {
        self.review(id, Decision::Reject, comment).await
    }

    #[instrument(skip(self, comment), fields(reviewer = %self.reviewer.name))]
    async fn review(
        &self,
        id: Uuid,
        decision: Decision,
        comment: Option<&str>,
    ) -> DomainResult<LeaveRequest> {
        let review = Review {
            decision,
            comment: comment.map(str::to_string),
            reviewer: self.reviewer.name.clone(),
            at: self.clock.now(),
        };

        let updated = tracked(
            &self.store,
            self.source.review_request(id, review),
            |s, updated: &LeaveRequest| {
                if let Some(slot) = s.requests.iter_mut().find(|r| r.id == updated.id) {
                    *slot = updated.clone();
                }
            },
        )
        .await?;

        info!(request_id = %updated.id, status = %updated.status, "Request reviewed");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MockDataSource, fixtures, mock::MockOptions};
    use crate::error::DomainError;
    use crate::utils::clock::FixedClock;

    fn screen() -> AdminRequestsScreen<MockDataSource> {
        let clock = Arc::new(FixedClock::new(fixtures::fixture_now()));
        let source = Arc::new(MockDataSource::new(clock.clone(), MockOptions::default()));
        AdminRequestsScreen::new(source, clock, fixtures::admin())
    }

    #[tokio::test]
    async fn sees_every_employee() {
        let admin = screen();
        admin.fetch_requests().await.unwrap();
        assert_eq!(
            admin.tabs().counts(),
            StatusCounts { pending: 4, approved: 2, rejected: 0 }
        );

        admin.set_search_text("design");
        assert_eq!(
            admin.tabs().counts(),
            StatusCounts { pending: 1, approved: 0, rejected: 0 }
        );
    }

    #[tokio::test]
    async fn approve_then_reapprove() {
        let admin = screen();
        admin.fetch_requests().await.unwrap();
        let target = admin.tabs().pending[0].clone();

        let approved = admin.approve_request(target.id, Some("ok")).await.unwrap();
        assert_eq!(approved.status, RequestStatus::Approved);
        assert_eq!(approved.admin_comment.as_deref(), Some("ok"));
        assert_eq!(approved.reviewed_by.as_deref(), Some("Admin User"));
        assert_eq!(approved.reviewed_at, Some(fixtures::fixture_now()));

        let err = admin.reject_request(target.id, None).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidStateTransition { .. }));

        let state = admin.store().snapshot();
        let stored = state.requests.iter().find(|r| r.id == target.id).unwrap();
        assert_eq!(stored.status, RequestStatus::Approved);
        assert!(state.screen.error_message.is_some());
    }

    #[tokio::test]
    async fn reject_with_blank_comment() {
        let admin = screen();
        admin.fetch_requests().await.unwrap();
        let target = admin.tabs().pending[0].clone();

        let rejected = admin.reject_request(target.id, Some("   ")).await.unwrap();
        assert_eq!(rejected.status, RequestStatus::Rejected);
        assert_eq!(rejected.admin_comment, None);

        admin.select_tab(RequestStatus::Rejected);
        let now = fixtures::fixture_now();
        let rows = admin.store().with(|s| s.current_requests(now));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, target.id);
    }
}
