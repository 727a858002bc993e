pub mod config;
pub mod rest;
pub mod tasks;

use std::sync::Arc;

use config::DaemonConfig;
use tasks::TaskService;

/// Shared application state passed to every REST handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<DaemonConfig>,
    /// Task service — existence checks and update semantics over the store.
    pub task_service: Arc<TaskService>,
    pub started_at: std::time::Instant,
}
