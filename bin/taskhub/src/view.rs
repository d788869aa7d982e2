//! Pure derivations over the task list: filter, sort, statistics, form.
//!
//! Everything here is a function of its inputs — no clock, no I/O — so the
//! list transforms can be tested without rendering or a server.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use taskhub_tasks::model::{CreateTaskRequest, Priority, Task, UpdateTaskRequest};

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    fn keeps(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

// ---------------------------------------------------------------------------
// Sort
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Priority,
    Title,
}

impl SortKey {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "newest" => Some(Self::Newest),
            "oldest" => Some(Self::Oldest),
            "priority" => Some(Self::Priority),
            "title" => Some(Self::Title),
            _ => None,
        }
    }
}

/// Filter then sort. The sort is stable, so ties keep the underlying
/// (server, newest-first) order.
pub fn visible_tasks<'a>(tasks: &'a [Task], filter: Filter, sort: SortKey) -> Vec<&'a Task> {
    let mut out: Vec<&Task> = tasks.iter().filter(|t| filter.keeps(t)).collect();
    match sort {
        SortKey::Newest => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => out.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::Priority => out.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank())),
        SortKey::Title => {
            out.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityStats {
    pub total: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    /// Rounded percentage; 0 for an empty list.
    pub completion_pct: u32,
    pub low: PriorityStats,
    pub medium: PriorityStats,
    pub high: PriorityStats,
    /// Tasks created on `today` (caller supplies the calendar day).
    pub created_today: usize,
}

/// Aggregate the list. `today` is the local calendar day to count
/// fresh tasks against.
pub fn stats(tasks: &[Task], today: NaiveDate) -> Stats {
    let mut s = Stats {
        total: tasks.len(),
        ..Default::default()
    };

    for task in tasks {
        let slot = match task.priority {
            Priority::Low => &mut s.low,
            Priority::Medium => &mut s.medium,
            Priority::High => &mut s.high,
        };
        slot.total += 1;
        if task.completed {
            slot.completed += 1;
            s.completed += 1;
        }
        if created_on(task, today) {
            s.created_today += 1;
        }
    }

    s.active = s.total - s.completed;
    s.completion_pct = if s.total == 0 {
        0
    } else {
        ((s.completed * 100) as f64 / s.total as f64).round() as u32
    };
    s
}

fn created_on(task: &Task, day: NaiveDate) -> bool {
    DateTime::parse_from_rfc3339(&task.created_at)
        .map(|dt| dt.with_timezone(&chrono::Local).date_naive() == day)
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 250;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing the task with this id.
    Edit(String),
}

/// The create/edit form: collects fields, validates before submission.
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub mode: FormMode,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl TaskForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            description: String::new(),
            priority: Priority::default(),
        }
    }

    /// Prefill from an existing task for editing.
    pub fn edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id.clone()),
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
        }
    }

    /// Client-side validation on trimmed contents. All violations are
    /// reported at once; a failing form never reaches the network.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let title_len = self.title.trim().chars().count();
        if title_len < TITLE_MIN {
            errors.push(format!("title must be at least {TITLE_MIN} characters"));
        } else if title_len > TITLE_MAX {
            errors.push(format!("title must be at most {TITLE_MAX} characters"));
        }

        if self.description.trim().chars().count() > DESCRIPTION_MAX {
            errors.push(format!(
                "description must be at most {DESCRIPTION_MAX} characters"
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Trim and convert into the create request body.
    pub fn to_create_request(&self) -> CreateTaskRequest {
        let description = self.description.trim();
        CreateTaskRequest {
            title: self.title.trim().to_string(),
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
            priority: Some(self.priority.as_str().to_string()),
        }
    }

    /// Build an update body containing only the fields that differ from
    /// `original` — the server merges, so nothing else is sent.
    pub fn changed_fields(&self, original: &Task) -> UpdateTaskRequest {
        let mut req = UpdateTaskRequest::default();
        let title = self.title.trim();
        if title != original.title {
            req.title = Some(title.to_string());
        }
        let description = self.description.trim();
        if description != original.description {
            req.description = Some(description.to_string());
        }
        if self.priority != original.priority {
            req.priority = Some(self.priority.as_str().to_string());
        }
        req
    }

    /// Clear the form after a successful creation. Edits keep their content.
    pub fn reset(&mut self) {
        if self.mode == FormMode::Create {
            self.title.clear();
            self.description.clear();
            self.priority = Priority::default();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
