use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{ScreenStatus, Store, reject, tracked};
use crate::aggregate::{StatusBuckets, StatusCounts};
use crate::data::RequestSource;
use crate::error::DomainResult;
use crate::model::{LeaveRequest, NewLateArrival, NewLeave, User};
use crate::utils::clock::Clock;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestsState {
    pub requests: Vec<LeaveRequest>,
    pub screen: ScreenStatus,
}

screen_state!(RequestsState);

impl RequestsState {
    pub fn tabs(&self, now: NaiveDateTime) -> StatusBuckets {
        StatusBuckets::partition(&self.requests, now)
    }

    pub fn counts(&self, now: NaiveDateTime) -> StatusCounts {
        self.tabs(now).counts()
    }
}

/// An employee's own leave and late-arrival requests.
pub struct RequestsScreen<D> {
    source: Arc<D>,
    clock: Arc<dyn Clock>,
    author: User,
    store: Store<RequestsState>,
}

impl<D: RequestSource> RequestsScreen<D> {
    pub fn new(source: Arc<D>, clock: Arc<dyn Clock>, author: User) -> Self {
        Self {
            source,
            clock,
            author,
            store: Store::default(),
        }
    }

    pub fn store(&self) -> &Store<RequestsState> {
        &self.store
    }

    /// Tabs as of the current clock reading.
    pub fn tabs(&self) -> StatusBuckets {
        let now = self.clock.now();
        self.store.with(|s| s.tabs(now))
    }

    pub async fn fetch_requests(&self) -> DomainResult<Vec<LeaveRequest>> {
        tracked(
            &self.store,
            self.source.requests_for_user(self.author.id),
            |s, requests: &Vec<LeaveRequest>| s.requests = requests.clone(),
        )
        .await
    }

    #[instrument(skip(self, input), fields(user_id = %self.author.id))]
    pub async fn create_leave_request(&self, input: NewLeave) -> DomainResult<LeaveRequest> {
        match LeaveRequest::new_leave(&self.author, input, self.clock.now()) {
            Ok(request) => self.submit(request).await,
            Err(err) => reject(&self.store, err),
        }
    }

    #[instrument(skip(self, input), fields(user_id = %self.author.id))]
    pub async fn create_late_request(&self, input: NewLateArrival) -> DomainResult<LeaveRequest> {
        match LeaveRequest::new_late_arrival(&self.author, input, self.clock.now()) {
            Ok(request) => self.submit(request).await,
            Err(err) => reject(&self.store, err),
        }
    }

    async fn submit(&self, request: LeaveRequest) -> DomainResult<LeaveRequest> {
        let created = tracked(
            &self.store,
            self.source.create_request(request),
            |s, created: &LeaveRequest| s.requests.insert(0, created.clone()),
        )
        .await?;
        info!(request_id = %created.id, kind = %created.request_type, "Request submitted");
        Ok(created)
    }

    /// Withdraws one of the author's own pending requests.
    #[instrument(skip(self), fields(user_id = %self.author.id))]
    pub async fn delete_request(&self, id: Uuid) -> DomainResult<()> {
        tracked(
            &self.store,
            self.source.delete_request(self.author.id, id),
            |s, _: &()| s.requests.retain(|r| r.id != id),
        )
        .await
    }
}
