//! In-memory task store.
//!
//! Owns the task records and id assignment. A mutex-guarded map holds the
//! records; an atomic counter hands out ids. Ids are store-wide monotonic and
//! never reused, even after a delete.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use super::Task;

pub struct TaskStore {
    tasks: Mutex<BTreeMap<i64, Task>>,
    next_id: AtomicI64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Every stored task, in id order.
    pub async fn find_all(&self) -> Vec<Task> {
        self.tasks.lock().await.values().cloned().collect()
    }

    pub async fn find_by_id(&self, id: i64) -> Option<Task> {
        self.tasks.lock().await.get(&id).cloned()
    }

    /// Insert or replace a task.
    ///
    /// A task without an id gets the next counter value before insertion; a
    /// task with an id replaces the record under that id (upsert — prior
    /// existence is not required). Returns the persisted record, id populated.
    pub async fn save(&self, mut task: Task) -> Task {
        let id = match task.id {
            Some(id) => id,
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                task.id = Some(id);
                id
            }
        };
        self.tasks.lock().await.insert(id, task.clone());
        task
    }

    /// Remove the record matching `task.id`. Silent when absent — the
    /// service verifies existence before calling this.
    pub async fn delete(&self, task: &Task) {
        if let Some(id) = task.id {
            self.tasks.lock().await.remove(&id);
        }
    }

    /// Number of live tasks.
    pub async fn len(&self) -> usize {
        self.tasks.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.lock().await.is_empty()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe wrapper for use in `AppContext`.
pub type SharedTaskStore = Arc<TaskStore>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::DUE_DATE_FORMAT;
    use chrono::NaiveDateTime;

    fn task(title: &str) -> Task {
        Task::new(
            title,
            None,
            "PENDING",
            NaiveDateTime::parse_from_str("2025-01-01 10:00:00", DUE_DATE_FORMAT).unwrap(),
        )
    }

    #[tokio::test]
    async fn save_assigns_ids_starting_at_one() {
        let store = TaskStore::new();
        let a = store.save(task("a")).await;
        let b = store.save(task("b")).await;
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
    }

    #[tokio::test]
    async fn ids_are_monotonic_and_never_reused_after_delete() {
        let store = TaskStore::new();
        let a = store.save(task("a")).await;
        let b = store.save(task("b")).await;
        store.delete(&a).await;
        store.delete(&b).await;
        assert!(store.is_empty().await);

        let c = store.save(task("c")).await;
        assert_eq!(c.id, Some(3));
    }

    #[tokio::test]
    async fn save_with_id_replaces_existing_record() {
        let store = TaskStore::new();
        let saved = store.save(task("before")).await;

        let mut updated = saved.clone();
        updated.title = "after".to_string();
        let result = store.save(updated).await;

        assert_eq!(result.id, saved.id);
        assert_eq!(store.len().await, 1);
        assert_eq!(
            store.find_by_id(saved.id.unwrap()).await.unwrap().title,
            "after"
        );
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_missing() {
        let store = TaskStore::new();
        assert!(store.find_by_id(99).await.is_none());
    }

    #[tokio::test]
    async fn delete_is_silent_when_absent() {
        let store = TaskStore::new();
        let mut ghost = task("ghost");
        ghost.id = Some(7);
        store.delete(&ghost).await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn find_all_returns_tasks_in_id_order() {
        let store = TaskStore::new();
        store.save(task("a")).await;
        store.save(task("b")).await;
        store.save(task("c")).await;

        let all = store.find_all().await;
        let ids: Vec<i64> = all.iter().filter_map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn concurrent_saves_get_unique_ids() {
        let store = Arc::new(TaskStore::new());
        let mut handles = Vec::new();
        for i in 0..50 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.save(task(&format!("t{i}"))).await.id.unwrap()
            }));
        }

        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);
        assert_eq!(store.len().await, 50);
    }
}
