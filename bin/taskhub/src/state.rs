//! Session state container — immutable snapshots, pure transitions.
//!
//! The CLI holds one [`SessionState`] per invocation and moves it forward
//! with [`Action`]s. Mutating actions apply the minimal local patch
//! (prepend / replace-by-id / remove-by-id) instead of refetching; a failed
//! action records an error and leaves everything else untouched.

use taskhub_tasks::model::Task;

/// One immutable snapshot of the session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// The in-memory task list, server order (newest first).
    pub tasks: Vec<Task>,
    /// A fetch is in flight.
    pub loading: bool,
    /// User-facing error message from the last failed action.
    pub error: Option<String>,
    /// Id of the task currently being edited, if any.
    pub editing: Option<String>,
}

/// State transitions.
#[derive(Debug, Clone)]
pub enum Action {
    FetchStarted,
    FetchSucceeded(Vec<Task>),
    FetchFailed(String),
    TaskCreated(Task),
    TaskUpdated(Task),
    TaskDeleted(String),
    MutationFailed(String),
    EditStarted(String),
    EditFinished,
    ErrorDismissed,
}

/// Pure reducer: every transition builds the next snapshot.
pub fn reduce(state: &SessionState, action: Action) -> SessionState {
    let mut next = state.clone();
    match action {
        Action::FetchStarted => {
            next.loading = true;
            next.error = None;
        }
        Action::FetchSucceeded(tasks) => {
            next.loading = false;
            next.tasks = tasks;
        }
        Action::FetchFailed(message) => {
            next.loading = false;
            next.error = Some(message);
        }
        Action::TaskCreated(task) => {
            next.error = None;
            next.tasks.insert(0, task);
        }
        Action::TaskUpdated(task) => {
            next.error = None;
            if let Some(slot) = next.tasks.iter_mut().find(|t| t.id == task.id) {
                *slot = task;
            }
        }
        Action::TaskDeleted(id) => {
            next.error = None;
            next.tasks.retain(|t| t.id != id);
            if next.editing.as_deref() == Some(id.as_str()) {
                next.editing = None;
            }
        }
        Action::MutationFailed(message) => {
            next.error = Some(message);
        }
        Action::EditStarted(id) => {
            next.editing = Some(id);
        }
        Action::EditFinished => {
            next.editing = None;
        }
        Action::ErrorDismissed => {
            next.error = None;
        }
    }
    next
}

/// Holds the current snapshot and applies actions.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: SessionState,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        self.state = reduce(&self.state, action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskhub_tasks::model::CreateTaskRequest;

    fn task(title: &str) -> Task {
        Task::from_request(CreateTaskRequest {
            title: title.into(),
            description: None,
            priority: None,
        })
        .unwrap()
    }

    #[test]
    fn fetch_cycle() {
        let s0 = SessionState::default();
        let s1 = reduce(&s0, Action::FetchStarted);
        assert!(s1.loading);
        assert!(s1.error.is_none());

        let s2 = reduce(&s1, Action::FetchSucceeded(vec![task("a"), task("b")]));
        assert!(!s2.loading);
        assert_eq!(s2.tasks.len(), 2);
    }

    #[test]
    fn fetch_failure_sets_error_and_keeps_tasks() {
        let mut store = SessionStore::new();
        store.dispatch(Action::FetchSucceeded(vec![task("a")]));
        store.dispatch(Action::FetchFailed("network error".into()));
        assert_eq!(store.state().error.as_deref(), Some("network error"));
        assert_eq!(store.state().tasks.len(), 1);
    }

    #[test]
    fn created_prepends() {
        let mut store = SessionStore::new();
        store.dispatch(Action::FetchSucceeded(vec![task("old")]));
        store.dispatch(Action::TaskCreated(task("new")));
        assert_eq!(store.state().tasks[0].title, "new");
        assert_eq!(store.state().tasks[1].title, "old");
    }

    #[test]
    fn updated_replaces_by_id() {
        let a = task("a");
        let mut changed = a.clone();
        changed.completed = true;

        let mut store = SessionStore::new();
        store.dispatch(Action::FetchSucceeded(vec![a, task("b")]));
        store.dispatch(Action::TaskUpdated(changed));
        assert!(store.state().tasks[0].completed);
        assert!(!store.state().tasks[1].completed);
    }

    #[test]
    fn update_for_unknown_id_leaves_list_unchanged() {
        let mut store = SessionStore::new();
        store.dispatch(Action::FetchSucceeded(vec![task("a")]));
        let before = store.state().tasks.clone();
        store.dispatch(Action::TaskUpdated(task("ghost")));
        assert_eq!(store.state().tasks, before);
    }

    #[test]
    fn deleted_removes_by_id_and_ends_edit() {
        let a = task("a");
        let id = a.id.clone();

        let mut store = SessionStore::new();
        store.dispatch(Action::FetchSucceeded(vec![a, task("b")]));
        store.dispatch(Action::EditStarted(id.clone()));
        store.dispatch(Action::TaskDeleted(id));
        assert_eq!(store.state().tasks.len(), 1);
        assert!(store.state().editing.is_none());
    }

    #[test]
    fn mutation_failure_preserves_prior_state() {
        let mut store = SessionStore::new();
        store.dispatch(Action::FetchSucceeded(vec![task("a")]));
        let before = store.state().tasks.clone();
        store.dispatch(Action::MutationFailed("Validation failed".into()));
        assert_eq!(store.state().tasks, before);
        assert_eq!(store.state().error.as_deref(), Some("Validation failed"));
    }

    #[test]
    fn success_clears_previous_error() {
        let mut store = SessionStore::new();
        store.dispatch(Action::MutationFailed("boom".into()));
        store.dispatch(Action::TaskCreated(task("a")));
        assert!(store.state().error.is_none());
    }

    #[test]
    fn error_dismissed() {
        let mut store = SessionStore::new();
        store.dispatch(Action::MutationFailed("boom".into()));
        store.dispatch(Action::ErrorDismissed);
        assert!(store.state().error.is_none());
    }
}
