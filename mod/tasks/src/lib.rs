pub mod api;
pub mod model;
pub mod store;

use std::sync::Arc;

use axum::Router;
use taskhub_core::Module;
use taskhub_sql::SQLStore;

use store::TaskStore;

/// The tasks module — CRUD persistence and HTTP surface for task records.
pub struct TasksModule {
    store: Arc<TaskStore>,
}

impl TasksModule {
    /// Create the module and initialise storage.
    pub fn new(db: Arc<dyn SQLStore>) -> Result<Self, taskhub_core::ServiceError> {
        let store = Arc::new(TaskStore::new(db)?);
        Ok(Self { store })
    }

    /// Direct store access, for embedding and tests.
    pub fn store(&self) -> &Arc<TaskStore> {
        &self.store
    }
}

impl Module for TasksModule {
    fn name(&self) -> &str {
        "tasks"
    }

    fn routes(&self) -> Router {
        api::router(Arc::clone(&self.store))
    }
}
