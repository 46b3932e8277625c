use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{ScreenStatus, Store, reject, tracked};
use crate::aggregate::tasks;
use crate::data::TaskSource;
use crate::error::{DomainError, DomainResult};
use crate::model::{NewTask, Project, TaskItem};
use crate::utils::clock::Clock;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskBoardState {
    pub project: Option<Project>,
    pub tasks: Vec<TaskItem>,
    pub screen: ScreenStatus,
}

screen_state!(TaskBoardState);

impl TaskBoardState {
    pub fn pending_tasks_count(&self) -> usize {
        tasks::pending_count(&self.tasks)
    }

    pub fn completed_tasks_count(&self) -> usize {
        tasks::completed_count(&self.tasks)
    }

    pub fn active_tasks(&self) -> Vec<TaskItem> {
        tasks::active_tasks(&self.tasks)
    }

    pub fn completed_tasks(&self, now: NaiveDateTime) -> Vec<TaskItem> {
        tasks::completed_tasks(&self.tasks, now)
    }

    fn task(&self, id: Uuid) -> DomainResult<TaskItem> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("task", id))
    }
}

/// An employee's current project and its tasks.
pub struct TaskBoard<D> {
    source: Arc<D>,
    clock: Arc<dyn Clock>,
    user_id: Uuid,
    store: Store<TaskBoardState>,
}

impl<D: TaskSource> TaskBoard<D> {
    pub fn new(source: Arc<D>, clock: Arc<dyn Clock>, user_id: Uuid) -> Self {
        Self {
            source,
            clock,
            user_id,
            store: Store::default(),
        }
    }

    pub fn store(&self) -> &Store<TaskBoardState> {
        &self.store
    }

    pub async fn fetch_project_and_tasks(&self) -> DomainResult<(Option<Project>, Vec<TaskItem>)> {
        let op = async {
            futures::try_join!(
                self.source.current_project(self.user_id),
                self.source.tasks_for_user(self.user_id),
            )
        };
        tracked(
            &self.store,
            op,
            |s, (project, tasks): &(Option<Project>, Vec<TaskItem>)| {
                s.project = project.clone();
                s.tasks = tasks.clone();
            },
        )
        .await
    }

    #[instrument(skip(self, input), fields(user_id = %self.user_id))]
    pub async fn create_task(&self, input: NewTask) -> DomainResult<TaskItem> {
        let Some(project_id) = self.store.with(|s| s.project.as_ref().map(|p| p.id)) else {
            return reject(&self.store, DomainError::not_found("project", self.user_id));
        };
        let task = match TaskItem::create(self.user_id, project_id, input, self.clock.now()) {
            Ok(task) => task,
            Err(err) => return reject(&self.store, err),
        };

        let created = tracked(
            &self.store,
            self.source.create_task(task),
            |s, created: &TaskItem| s.tasks.insert(0, created.clone()),
        )
        .await?;
        info!(task_id = %created.id, priority = %created.priority, "Task created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn toggle_task_completion(&self, id: Uuid) -> DomainResult<TaskItem> {
        let mut task = match self.store.with(|s| s.task(id)) {
            Ok(task) => task,
            Err(err) => return reject(&self.store, err),
        };
        task.toggle(self.clock.now());

        tracked(&self.store, self.source.update_task(task), |s, updated: &TaskItem| {
            if let Some(slot) = s.tasks.iter_mut().find(|t| t.id == updated.id) {
                *slot = updated.clone();
            }
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: Uuid) -> DomainResult<()> {
        tracked(&self.store, self.source.delete_task(id), |s, _: &()| {
            s.tasks.retain(|t| t.id != id)
        })
        .await
    }

    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn update_project_name(&self, name: &str) -> DomainResult<Project> {
        let Some(mut project) = self.store.with(|s| s.project.clone()) else {
            return reject(&self.store, DomainError::not_found("project", self.user_id));
        };
        if let Err(err) = project.rename(name) {
            return reject(&self.store, err);
        }

        tracked(
            &self.store,
            self.source.save_project(self.user_id, project),
            |s, saved: &Project| s.project = Some(saved.clone()),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MockDataSource, fixtures, mock::MockOptions};
    use crate::model::TaskPriority;
    use crate::utils::clock::FixedClock;
    use chrono::Duration;

    fn board(user_id: Uuid) -> (Arc<FixedClock>, TaskBoard<MockDataSource>) {
        let clock = Arc::new(FixedClock::new(fixtures::fixture_now()));
        let source = Arc::new(MockDataSource::new(clock.clone(), MockOptions::default()));
        (clock.clone(), TaskBoard::new(source, clock, user_id))
    }

    #[tokio::test]
    async fn create_toggle_delete() {
        let (clock, board) = board(fixtures::DEMO_EMPLOYEE_ID);
        board.fetch_project_and_tasks().await.unwrap();
        assert_eq!(board.store().snapshot().pending_tasks_count(), 2);

        clock.advance(Duration::minutes(5));
        let created = board
            .create_task(NewTask {
                title: "Review PR".into(),
                description: None,
                priority: TaskPriority::Medium,
            })
            .await
            .unwrap();
        assert_eq!(created.project_id, fixtures::PROJECT_ID);
        assert_eq!(board.store().snapshot().active_tasks()[0].id, created.id);

        clock.advance(Duration::minutes(5));
        let done = board.toggle_task_completion(created.id).await.unwrap();
        assert_eq!(done.completed_at, Some(clock.now()));
        let state = board.store().snapshot();
        assert_eq!(state.completed_tasks_count(), 2);
        assert_eq!(state.completed_tasks(clock.now())[0].id, created.id);

        let reopened = board.toggle_task_completion(created.id).await.unwrap();
        assert!(reopened.completed_at.is_none());

        board.delete_task(created.id).await.unwrap();
        assert_eq!(board.store().snapshot().tasks.len(), 3);
    }

    #[tokio::test]
    async fn no_project_means_no_tasks() {
        let (_clock, board) = board(fixtures::JOHN_ID);
        board.fetch_project_and_tasks().await.unwrap();

        let err = board
            .create_task(NewTask {
                title: "Anything".into(),
                description: None,
                priority: TaskPriority::Low,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn rename_project() {
        let (_clock, board) = board(fixtures::DEMO_EMPLOYEE_ID);
        board.fetch_project_and_tasks().await.unwrap();

        assert!(board.update_project_name("  ").await.is_err());
        let saved = board.update_project_name("Client Dashboard").await.unwrap();
        assert_eq!(saved.name, "Client Dashboard");
        assert_eq!(
            board.store().snapshot().project.map(|p| p.name).as_deref(),
            Some("Client Dashboard")
        );
    }
}
