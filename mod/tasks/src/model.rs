use serde::{Deserialize, Serialize};

use taskhub_core::{ServiceError, merge_patch, new_id, now_rfc3339};

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Task priority level.
///
/// Stored and serialized as lowercase strings. `rank()` gives the sort
/// weight: high > medium > low.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Sort weight; higher sorts first under priority ordering.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Task — the core data model
// ---------------------------------------------------------------------------

/// A single task record.
///
/// The whole record is stored as a JSON document; `completed`, `priority`
/// and `created_at` are additionally indexed as SQL columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub priority: Priority,

    // --- timestamps, RFC 3339 ---
    pub created_at: String,
    pub updated_at: String,
}

// ---------------------------------------------------------------------------
// API request types
// ---------------------------------------------------------------------------

/// Body for `POST /api/tasks` — create a new task.
///
/// Serialized by the client, deserialized by the server; absent optional
/// fields are omitted from the wire form.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Priority name; validated against the enum before persistence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

/// Body for `PUT /api/tasks/{id}` — partial update, merge semantics.
///
/// Only fields present in the body are applied; the server merges them into
/// the stored record and re-validates the result.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

// ---------------------------------------------------------------------------
// Validation and construction
// ---------------------------------------------------------------------------

/// Parse a priority name, failing validation on unknown values.
fn parse_priority(s: &str) -> Result<Priority, ServiceError> {
    Priority::from_str(s)
        .ok_or_else(|| ServiceError::Validation(format!("unknown priority '{s}'")))
}

/// Check that an identifier has the shape assigned by `new_id()`
/// (32 hex chars). Anything else is malformed input, not a miss.
pub fn ensure_well_formed_id(id: &str) -> Result<(), ServiceError> {
    if id.len() == 32 && id.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(ServiceError::MalformedId(format!("'{id}' is not a valid task id")))
    }
}

impl Task {
    /// Build a new task from a create request.
    ///
    /// Trims text fields, validates the title and priority, and assigns
    /// id and timestamps. Fails before anything is persisted.
    pub fn from_request(req: CreateTaskRequest) -> Result<Self, ServiceError> {
        let title = req.title.trim();
        if title.is_empty() {
            return Err(ServiceError::Validation("title must not be empty".into()));
        }

        let priority = match req.priority.as_deref() {
            Some(p) => parse_priority(p)?,
            None => Priority::default(),
        };

        let now = now_rfc3339();
        Ok(Self {
            id: new_id(),
            title: title.to_string(),
            description: req
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            completed: false,
            priority,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Apply a partial update to this task, returning the merged record.
    ///
    /// Only fields present in the request are changed. `id` and `createdAt`
    /// are immutable; `updatedAt` is stamped here. The merged result is
    /// re-validated under the same constraints as creation.
    pub fn apply_update(&self, req: UpdateTaskRequest) -> Result<Self, ServiceError> {
        let mut patch = serde_json::Map::new();
        if let Some(title) = req.title {
            patch.insert("title".into(), serde_json::json!(title.trim()));
        }
        if let Some(desc) = req.description {
            patch.insert("description".into(), serde_json::json!(desc.trim()));
        }
        if let Some(completed) = req.completed {
            patch.insert("completed".into(), serde_json::json!(completed));
        }
        if let Some(p) = req.priority.as_deref() {
            patch.insert("priority".into(), serde_json::json!(parse_priority(p)?));
        }
        patch.insert("updatedAt".into(), serde_json::json!(now_rfc3339()));

        let mut merged = serde_json::to_value(self)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        merge_patch(&mut merged, &serde_json::Value::Object(patch));

        let updated: Task = serde_json::from_value(merged)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        if updated.title.is_empty() {
            return Err(ServiceError::Validation("title must not be empty".into()));
        }
        Ok(updated)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
