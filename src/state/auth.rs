use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use super::{ScreenStatus, Store, reject, tracked};
use crate::data::Directory;
use crate::error::{DomainError, DomainResult};
use crate::model::User;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuthState {
    pub email: String,
    #[serde(skip)]
    pub password: String,
    pub current_user: Option<User>,
    pub screen: ScreenStatus,
}

screen_state!(AuthState);

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}

/// Login form.
pub struct AuthScreen<D> {
    source: Arc<D>,
    store: Store<AuthState>,
}

impl<D: Directory> AuthScreen<D> {
    pub fn new(source: Arc<D>) -> Self {
        Self {
            source,
            store: Store::default(),
        }
    }

    pub fn store(&self) -> &Store<AuthState> {
        &self.store
    }

    pub fn set_email(&self, email: &str) {
        self.store.update(|s| s.email = email.to_string());
    }

    pub fn set_password(&self, password: &str) {
        self.store.update(|s| s.password = password.to_string());
    }

    #[instrument(name = "auth_login", skip(self))]
    pub async fn login(&self) -> DomainResult<User> {
        let (email, password) = self.store.with(|s| (s.email.clone(), s.password.clone()));

        if email.trim().is_empty() {
            return reject(&self.store, DomainError::validation("Please enter your email"));
        }
        if password.is_empty() {
            return reject(&self.store, DomainError::validation("Please enter your password"));
        }

        let user = tracked(
            &self.store,
            self.source.authenticate(&email, &password),
            |s, user: &User| s.current_user = Some(user.clone()),
        )
        .await?;

        info!(user_id = %user.id, role = %user.role, "Login succeeded");
        Ok(user)
    }

    pub fn logout(&self) {
        self.store.update(|s| *s = AuthState::default());
        info!("Logged out");
    }

    pub fn clear_error(&self) {
        self.store.update(|s| s.screen.error_message = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MockDataSource, fixtures, mock::MockOptions};
    use crate::utils::clock::FixedClock;

    fn screen() -> AuthScreen<MockDataSource> {
        let clock = Arc::new(FixedClock::new(fixtures::fixture_now()));
        AuthScreen::new(Arc::new(MockDataSource::new(clock, MockOptions::default())))
    }

    #[tokio::test]
    async fn blank_fields_are_rejected_in_order() {
        let auth = screen();
        let err = auth.login().await.unwrap_err();
        assert_eq!(err.user_message(), "Please enter your email");

        auth.set_email("admin@testsolz.com");
        let err = auth.login().await.unwrap_err();
        assert_eq!(err.user_message(), "Please enter your password");
        assert_eq!(
            auth.store().snapshot().screen.error_message.as_deref(),
            Some("Please enter your password")
        );
    }

    #[tokio::test]
    async fn login_and_logout() {
        let auth = screen();
        auth.set_email("admin@testsolz.com");
        auth.set_password("admin123");

        let user = auth.login().await.unwrap();
        let state = auth.store().snapshot();
        assert!(state.is_authenticated());
        assert!(!state.screen.is_loading);
        assert_eq!(state.current_user, Some(user));

        auth.logout();
        let state = auth.store().snapshot();
        assert!(!state.is_authenticated());
        assert!(state.email.is_empty() && state.password.is_empty());
    }

    #[tokio::test]
    async fn wrong_password_sets_error() {
        let auth = screen();
        auth.set_email("mashaal@testsolz.com");
        auth.set_password("nope");
        assert!(auth.login().await.is_err());
        assert_eq!(
            auth.store().snapshot().screen.error_message.as_deref(),
            Some("Invalid email or password")
        );

        auth.clear_error();
        assert!(auth.store().snapshot().screen.error_message.is_none());
    }
}
