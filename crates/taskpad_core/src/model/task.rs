//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and the draft shape used to build it.
//! - Derive the combined schedule timestamp from its date and time parts.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is non-empty after trimming.
//! - `scheduled_at` is present exactly when both `date` and `time` are set.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Ids are canonically UUIDs; callers parse external input once at the
/// boundary instead of normalizing at every comparison site.
pub type TaskId = Uuid;

/// Draft rejection reasons surfaced to the submitting caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only after trimming.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Unsaved field values a user is composing or editing.
///
/// Drafts carry raw optional schedule parts; the combined timestamp is
/// derived, never stored independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

impl TaskDraft {
    /// Checks draft-level invariants before any record is touched.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Combined schedule timestamp, present only when both parts are set.
    ///
    /// The result is zone-free: it encodes exactly the local date and time
    /// the user picked, in a sortable encoding.
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        match (self.date, self.time) {
            (Some(date), Some(time)) => Some(date.and_time(time)),
            _ => None,
        }
    }
}

/// Canonical task record.
///
/// Serialized field names follow the external camelCase schema of the
/// persisted payload; absent optional fields are encoded as explicit `null`
/// for stable round-tripping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable id assigned at creation, immutable afterwards.
    pub id: TaskId,
    /// Required short summary, trimmed, never empty.
    pub title: String,
    /// Optional longer text, trimmed, may be empty.
    pub description: String,
    /// Calendar date half of the schedule.
    pub date: Option<NaiveDate>,
    /// Time-of-day half of the schedule.
    pub time: Option<NaiveTime>,
    /// Derived from `date` + `time`; present iff both are.
    pub scheduled_at: Option<NaiveDateTime>,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Absent until the first edit, refreshed on every edit.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Materializes a validated draft into a brand-new record.
    pub fn from_draft(draft: &TaskDraft) -> Result<Self, TaskValidationError> {
        draft.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            date: draft.date,
            time: draft.time,
            scheduled_at: draft.scheduled_at(),
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    /// Replaces every editable field at once from a validated draft.
    ///
    /// # Invariants
    /// - `id` and `created_at` are untouched.
    /// - `updated_at` is refreshed to the current time.
    pub fn apply_draft(&mut self, draft: &TaskDraft) -> Result<(), TaskValidationError> {
        draft.validate()?;
        self.title = draft.title.trim().to_string();
        self.description = draft.description.trim().to_string();
        self.date = draft.date;
        self.time = draft.time;
        self.scheduled_at = draft.scheduled_at();
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    /// Returns whether this record carries a combined schedule timestamp.
    pub fn is_scheduled(&self) -> bool {
        self.scheduled_at.is_some()
    }
}
