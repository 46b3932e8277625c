use chrono::NaiveDateTime;

use crate::model::TaskItem;

/// Open tasks, newest first.
pub fn active_tasks(tasks: &[TaskItem]) -> Vec<TaskItem> {
    let mut active: Vec<_> = tasks.iter().filter(|t| !t.is_completed).cloned().collect();
    active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    active
}

/// Finished tasks, most recently completed first.
pub fn completed_tasks(tasks: &[TaskItem], now: NaiveDateTime) -> Vec<TaskItem> {
    let mut done: Vec<_> = tasks.iter().filter(|t| t.is_completed).cloned().collect();
    done.sort_by(|a, b| b.completed_at.unwrap_or(now).cmp(&a.completed_at.unwrap_or(now)));
    done
}

pub fn pending_count(tasks: &[TaskItem]) -> usize {
    tasks.iter().filter(|t| !t.is_completed).count()
}

pub fn completed_count(tasks: &[TaskItem]) -> usize {
    tasks.iter().filter(|t| t.is_completed).count()
}
