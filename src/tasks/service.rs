//! Task service — existence checks and update semantics.
//!
//! Sits between the REST layer and the store. Read, update, and delete fail
//! with [`TaskError::NotFound`] when the id has no record; that is the only
//! error kind this layer raises.

use std::sync::Arc;

use super::store::TaskStore;
use super::{Task, TaskError};

pub struct TaskService {
    store: Arc<TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<TaskStore>) -> Self {
        Self { store }
    }

    pub async fn get_all_tasks(&self) -> Vec<Task> {
        self.store.find_all().await
    }

    pub async fn get_task_by_id(&self, id: i64) -> Result<Task, TaskError> {
        self.store
            .find_by_id(id)
            .await
            .ok_or(TaskError::NotFound(id))
    }

    /// Persist a new task. Any client-supplied id is discarded — assignment
    /// is store-controlled.
    pub async fn create_task(&self, mut task: Task) -> Task {
        task.id = None;
        self.store.save(task).await
    }

    /// Overwrite all mutable fields of an existing task from `details`.
    /// The id is preserved.
    pub async fn update_task(&self, id: i64, details: Task) -> Result<Task, TaskError> {
        let mut task = self.get_task_by_id(id).await?;

        task.title = details.title;
        task.description = details.description;
        task.status = details.status;
        task.due_date = details.due_date;

        Ok(self.store.save(task).await)
    }

    /// Set only `status`, leaving every other field untouched.
    pub async fn update_task_status(
        &self,
        id: i64,
        status: impl Into<String>,
    ) -> Result<Task, TaskError> {
        let mut task = self.get_task_by_id(id).await?;
        task.status = status.into();
        Ok(self.store.save(task).await)
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), TaskError> {
        let task = self.get_task_by_id(id).await?;
        self.store.delete(&task).await;
        Ok(())
    }
}

/// Thread-safe wrapper for use in `AppContext`.
pub type SharedTaskService = Arc<TaskService>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::DUE_DATE_FORMAT;
    use chrono::NaiveDateTime;

    fn service() -> TaskService {
        TaskService::new(Arc::new(TaskStore::new()))
    }

    fn due(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, DUE_DATE_FORMAT).unwrap()
    }

    fn task(title: &str, status: &str) -> Task {
        Task::new(
            title,
            Some(format!("{title} description")),
            status,
            due("2025-01-01 10:00:00"),
        )
    }

    #[tokio::test]
    async fn created_task_is_readable_with_all_fields() {
        let svc = service();
        let created = svc.create_task(task("Task 1", "PENDING")).await;
        let id = created.id.unwrap();

        let fetched = svc.get_task_by_id(id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "Task 1");
        assert_eq!(fetched.status, "PENDING");
    }

    #[tokio::test]
    async fn create_discards_client_supplied_id() {
        let svc = service();
        let mut rogue = task("rogue", "PENDING");
        rogue.id = Some(9000);

        let created = svc.create_task(rogue).await;
        assert_eq!(created.id, Some(1));
    }

    #[tokio::test]
    async fn get_missing_task_fails_with_not_found() {
        let svc = service();
        let err = svc.get_task_by_id(99).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(99)));
    }

    #[tokio::test]
    async fn update_replaces_mutable_fields_and_keeps_id() {
        let svc = service();
        let created = svc.create_task(task("Task 1", "PENDING")).await;
        let id = created.id.unwrap();

        let details = Task::new(
            "Renamed",
            None,
            "IN_PROGRESS",
            due("2026-02-02 08:30:00"),
        );
        let updated = svc.update_task(id, details).await.unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description, None);
        assert_eq!(updated.status, "IN_PROGRESS");
        assert_eq!(updated.due_date, due("2026-02-02 08:30:00"));

        assert_eq!(svc.get_task_by_id(id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_missing_task_fails_with_not_found() {
        let svc = service();
        let err = svc.update_task(5, task("x", "DONE")).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(5)));
    }

    #[tokio::test]
    async fn status_update_changes_only_status() {
        let svc = service();
        let created = svc.create_task(task("Task 1", "PENDING")).await;
        let id = created.id.unwrap();

        let updated = svc.update_task_status(id, "DONE").await.unwrap();

        assert_eq!(updated.status, "DONE");
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.due_date, created.due_date);
    }

    #[tokio::test]
    async fn status_update_on_missing_task_fails_with_not_found() {
        let svc = service();
        let err = svc.update_task_status(3, "DONE").await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(3)));
    }

    #[tokio::test]
    async fn deleted_task_is_gone() {
        let svc = service();
        let created = svc.create_task(task("Task 1", "PENDING")).await;
        let id = created.id.unwrap();

        svc.delete_task(id).await.unwrap();

        let err = svc.get_task_by_id(id).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
        assert!(svc.get_all_tasks().await.is_empty());
    }

    #[tokio::test]
    async fn delete_missing_task_fails_with_not_found() {
        let svc = service();
        let err = svc.delete_task(1).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(1)));
    }
}
