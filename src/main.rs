use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{info, warn};
use tracing_appender::rolling;

use hrm_presence::config::Config;
use hrm_presence::data::MockDataSource;
use hrm_presence::session::{AdminSession, EmployeeSession, Session, Workspace};
use hrm_presence::state::auth::AuthScreen;
use hrm_presence::utils::clock::{Clock, SystemClock};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "presence.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!("Presence demo starting...");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let source = Arc::new(MockDataSource::new(clock.clone(), config.mock_options()));

    let auth = AuthScreen::new(source.clone());
    auth.set_email(&config.demo_email);
    auth.set_password(&config.demo_password);
    let user = auth
        .login()
        .await
        .with_context(|| format!("demo login failed for {}", config.demo_email))?;

    let session = Session::open(user, source, clock);
    session.load().await.context("initial load failed")?;

    let summary = match &session {
        Session::Employee(employee) => employee_summary(employee).await,
        Session::Admin(admin) => admin_summary(admin),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    auth.logout();
    info!("Presence demo finished");
    Ok(())
}

async fn employee_summary(session: &EmployeeSession<MockDataSource>) -> serde_json::Value {
    if !session.check_in.store().snapshot().is_checked_in() {
        if let Err(e) = session.check_in.check_in().await {
            warn!(error = %e, "Demo check-in skipped");
        }
    }
    let check_in = session.check_in.store().snapshot();
    let history = session.history.store().snapshot();
    let tabs = session.requests.tabs();
    let board = session.tasks.store().snapshot();

    json!({
        "user": session.user().name,
        "tabs": session.tabs().iter().map(|t| t.title()).collect::<Vec<_>>(),
        "today": check_in.today_status_text(),
        "month": history.month_label(),
        "month_stats": history.stats(),
        "requests": tabs.counts(),
        "tasks": {
            "project": board.project.as_ref().map(|p| p.name.clone()),
            "pending": board.pending_tasks_count(),
            "completed": board.completed_tasks_count(),
        },
    })
}

fn admin_summary(session: &AdminSession<MockDataSource>) -> serde_json::Value {
    let board = session.dashboard.store().snapshot();
    let tabs = session.requests.tabs();

    json!({
        "user": session.user().name,
        "tabs": session.tabs().iter().map(|t| t.title()).collect::<Vec<_>>(),
        "attendance": board.stats(),
        "employees": board
            .rows
            .iter()
            .map(|r| json!({
                "name": r.employee.name,
                "initials": r.employee.initials(),
                "status": r.status_text(),
                "arrival": r.status().display_name(),
                "check_in": r.check_in_time_text(),
            }))
            .collect::<Vec<_>>(),
        "requests": tabs.counts(),
    })
}
