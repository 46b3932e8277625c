//! Role-specific workspaces, resolved once at login.

use std::sync::Arc;

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter};
use tracing::info;

use crate::data::DataSource;
use crate::error::DomainResult;
use crate::model::{Role, User};
use crate::state::admin_dashboard::AdminDashboard;
use crate::state::admin_requests::AdminRequestsScreen;
use crate::state::check_in::CheckInScreen;
use crate::state::history::HistoryScreen;
use crate::state::home::HomeScreen;
use crate::state::requests::RequestsScreen;
use crate::state::tasks::TaskBoard;
use crate::utils::clock::Clock;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Display, EnumIter, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AppTab {
    Home,
    History,
    Requests,
    Dashboard,
    Employees,
    AdminRequests,
}

impl AppTab {
    pub fn title(&self) -> &'static str {
        match self {
            AppTab::Home => "Home",
            AppTab::History => "History",
            AppTab::Requests | AppTab::AdminRequests => "Requests",
            AppTab::Dashboard => "Dashboard",
            AppTab::Employees => "Employees",
        }
    }
}

/// What every signed-in workspace offers.
pub trait Workspace {
    fn user(&self) -> &User;

    fn tabs(&self) -> &'static [AppTab];

    /// Loads every screen's initial data.
    fn load(&self) -> impl std::future::Future<Output = DomainResult<()>> + Send;
}

pub struct EmployeeSession<D> {
    user: User,
    pub home: HomeScreen<D>,
    pub check_in: CheckInScreen<D>,
    pub history: HistoryScreen<D>,
    pub requests: RequestsScreen<D>,
    pub tasks: TaskBoard<D>,
}

impl<D: DataSource> EmployeeSession<D> {
    pub fn new(user: User, source: Arc<D>, clock: Arc<dyn Clock>) -> Self {
        Self {
            home: HomeScreen::new(source.clone(), clock.clone(), user.id),
            check_in: CheckInScreen::new(source.clone(), clock.clone(), user.id),
            history: HistoryScreen::new(source.clone(), clock.clone(), user.id),
            requests: RequestsScreen::new(source.clone(), clock.clone(), user.clone()),
            tasks: TaskBoard::new(source, clock, user.id),
            user,
        }
    }
}

impl<D: DataSource> Workspace for EmployeeSession<D> {
    fn user(&self) -> &User {
        &self.user
    }

    fn tabs(&self) -> &'static [AppTab] {
        &[AppTab::Home, AppTab::History, AppTab::Requests]
    }

    async fn load(&self) -> DomainResult<()> {
        futures::try_join!(
            self.home.fetch_today_status(),
            self.check_in.load_today(),
            self.history.fetch_history(),
            self.requests.fetch_requests(),
            self.tasks.fetch_project_and_tasks(),
        )?;
        Ok(())
    }
}

pub struct AdminSession<D> {
    user: User,
    pub dashboard: AdminDashboard<D>,
    pub requests: AdminRequestsScreen<D>,
}

impl<D: DataSource> AdminSession<D> {
    pub fn new(user: User, source: Arc<D>, clock: Arc<dyn Clock>) -> Self {
        Self {
            dashboard: AdminDashboard::new(source.clone(), clock.clone()),
            requests: AdminRequestsScreen::new(source, clock, user.clone()),
            user,
        }
    }
}

impl<D: DataSource> Workspace for AdminSession<D> {
    fn user(&self) -> &User {
        &self.user
    }

    fn tabs(&self) -> &'static [AppTab] {
        &[AppTab::Dashboard, AppTab::Employees, AppTab::AdminRequests]
    }

    async fn load(&self) -> DomainResult<()> {
        futures::try_join!(
            self.dashboard.fetch_attendance_data(),
            self.requests.fetch_requests(),
        )?;
        Ok(())
    }
}

/// A signed-in user's workspace, chosen by role exactly once.
pub enum Session<D> {
    Employee(EmployeeSession<D>),
    Admin(AdminSession<D>),
}

impl<D: DataSource> Session<D> {
    pub fn open(user: User, source: Arc<D>, clock: Arc<dyn Clock>) -> Self {
        info!(user_id = %user.id, role = %user.role, "Opening session");
        match user.role {
            Role::Employee => Session::Employee(EmployeeSession::new(user, source, clock)),
            Role::Admin => Session::Admin(AdminSession::new(user, source, clock)),
        }
    }

    pub fn user(&self) -> &User {
        match self {
            Session::Employee(s) => s.user(),
            Session::Admin(s) => s.user(),
        }
    }

    pub fn tabs(&self) -> &'static [AppTab] {
        match self {
            Session::Employee(s) => s.tabs(),
            Session::Admin(s) => s.tabs(),
        }
    }

    pub async fn load(&self) -> DomainResult<()> {
        match self {
            Session::Employee(s) => s.load().await,
            Session::Admin(s) => s.load().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MockDataSource, fixtures, mock::MockOptions};
    use crate::utils::clock::FixedClock;

    fn open(user: User) -> Session<MockDataSource> {
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(fixtures::fixture_now()));
        let source = Arc::new(MockDataSource::new(clock.clone(), MockOptions::default()));
        Session::open(user, source, clock)
    }

    #[tokio::test]
    async fn role_picks_the_workspace() {
        let session = open(fixtures::admin());
        assert!(matches!(session, Session::Admin(_)));
        assert_eq!(session.tabs()[2].title(), "Requests");
        assert_eq!(session.tabs()[2], AppTab::AdminRequests);
        session.load().await.unwrap();

        let session = open(fixtures::demo_employee());
        let Session::Employee(employee) = &session else {
            panic!("expected employee workspace");
        };
        session.load().await.unwrap();
        assert_eq!(session.tabs(), &[AppTab::Home, AppTab::History, AppTab::Requests]);
        assert_eq!(employee.requests.store().snapshot().requests.len(), 3);
        assert!(!employee.history.store().snapshot().records.is_empty());
    }
}
