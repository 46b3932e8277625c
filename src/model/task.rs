use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::error::DomainResult;
use crate::utils::text::{non_blank, require_non_blank};

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn display_name(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub created_at: NaiveDateTime,
    /// Set iff `is_completed`.
    pub completed_at: Option<NaiveDateTime>,
    pub priority: TaskPriority,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
}

impl TaskItem {
    pub fn create(
        user_id: Uuid,
        project_id: Uuid,
        input: NewTask,
        now: NaiveDateTime,
    ) -> DomainResult<Self> {
        let title = require_non_blank(&input.title, "Please enter a task title")?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            project_id,
            title: title.to_string(),
            description: non_blank(input.description.as_deref()),
            is_completed: false,
            created_at: now,
            completed_at: None,
            priority: input.priority,
        })
    }

    pub fn toggle(&mut self, now: NaiveDateTime) {
        self.is_completed = !self.is_completed;
        self.completed_at = self.is_completed.then_some(now);
    }
}
