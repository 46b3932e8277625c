//! Per-screen state containers.
//!
//! Each container owns a [`Store`] holding its collection plus transient UI
//! state, exposes pure queries on that state, and performs mutations by
//! calling the data source and then folding the result into the store.

macro_rules! screen_state {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl AsMut<$crate::state::ScreenStatus> for $ty {
                fn as_mut(&mut self) -> &mut $crate::state::ScreenStatus {
                    &mut self.screen
                }
            }
        )+
    };
}

pub mod admin_dashboard;
pub mod admin_requests;
pub mod auth;
pub mod check_in;
pub mod history;
pub mod home;
pub mod requests;
pub mod store;
pub mod tasks;

use std::future::Future;

use serde::Serialize;
use tracing::warn;

use crate::error::{DomainError, DomainResult};

pub use store::Store;

/// Loading flag and last error shown by every screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScreenStatus {
    pub is_loading: bool,
    pub error_message: Option<String>,
}

/// Runs `op` with the loading flag raised, then folds a successful result
/// into the state with `apply` (or records the error) in a single update.
pub(crate) async fn tracked<S, T, F>(
    store: &Store<S>,
    op: F,
    apply: impl FnOnce(&mut S, &T),
) -> DomainResult<T>
where
    S: Clone + AsMut<ScreenStatus>,
    F: Future<Output = DomainResult<T>>,
{
    store.update(|s| {
        let status = s.as_mut();
        status.is_loading = true;
        status.error_message = None;
    });

    let result = op.await;

    store.update(|s| {
        match &result {
            Ok(value) => apply(s, value),
            Err(err) => s.as_mut().error_message = Some(err.user_message()),
        }
        s.as_mut().is_loading = false;
    });

    if let Err(err) = &result {
        warn!(error = %err, "Screen operation failed");
    }
    result
}

/// Records an error that was caught before reaching the data source.
pub(crate) fn reject<S, T>(store: &Store<S>, err: DomainError) -> DomainResult<T>
where
    S: Clone + AsMut<ScreenStatus>,
{
    warn!(error = %err, "Rejected before submission");
    store.update(|s| s.as_mut().error_message = Some(err.user_message()));
    Err(err)
}
