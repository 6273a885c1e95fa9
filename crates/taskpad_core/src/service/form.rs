//! Form controller for composing and editing task drafts.
//!
//! # Responsibility
//! - Hold transient input field state between user-triggered events.
//! - Translate submissions into task store operations.
//!
//! # Invariants
//! - Exactly two states: Creating (`editing` absent) and Editing.
//! - A successful submit clears every transient field.
//! - The controller holds copies of field values, never a live reference to
//!   a stored record.

use crate::model::task::{Task, TaskDraft, TaskId};
use crate::repo::kv_repo::KvRepository;
use crate::service::task_store::{StoreError, TaskStore};
use chrono::{NaiveDate, NaiveTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
// HTML-style time inputs emit HH:MM; chrono prints HH:MM:SS. Accept both so
// a value copied back out of a record survives resubmission.
const TIME_INPUT_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S"];

/// Submission error surfaced to the presentation layer.
#[derive(Debug)]
pub enum FormError {
    /// Date field is present but not a valid `YYYY-MM-DD` value.
    InvalidDate(String),
    /// Time field is present but not a valid `HH:MM` value.
    InvalidTime(String),
    /// The store rejected the operation.
    Store(StoreError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidTime(value) => {
                write!(f, "invalid time `{value}`; expected HH:MM")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for FormError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Transient field state plus the add-vs-update submit dispatch.
///
/// Title validation authority stays with the store; this controller only
/// rejects what the store cannot interpret at all (malformed date/time).
#[derive(Debug, Default)]
pub struct FormController {
    title: String,
    description: String,
    date: String,
    time: String,
    editing: Option<TaskId>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.title = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    pub fn set_date(&mut self, value: impl Into<String>) {
        self.date = value.into();
    }

    pub fn set_time(&mut self, value: impl Into<String>) {
        self.time = value.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    /// Id of the record being edited, when in the Editing state.
    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Copies the record's current fields into the transient fields and
    /// enters the Editing state.
    pub fn begin_edit(&mut self, task: &Task) {
        self.editing = Some(task.id);
        self.title = task.title.clone();
        self.description = task.description.clone();
        self.date = task
            .date
            .map(|date| date.format(DATE_INPUT_FORMAT).to_string())
            .unwrap_or_default();
        self.time = task
            .time
            .map(|time| time.format("%H:%M").to_string())
            .unwrap_or_default();
    }

    /// Returns to the Creating state without touching the store.
    pub fn cancel_edit(&mut self) {
        self.reset();
    }

    /// Submits the current fields: update when editing, add otherwise.
    ///
    /// On success all transient fields clear and the controller is back in
    /// the Creating state. On any error the fields are kept so the user can
    /// correct and resubmit.
    pub fn submit<R: KvRepository>(&mut self, store: &mut TaskStore<R>) -> Result<Task, FormError> {
        let draft = self.draft()?;
        let submitted = match self.editing {
            Some(id) => store.update(id, &draft),
            None => store.add(&draft),
        }?;

        self.reset();
        Ok(submitted)
    }

    /// Parses the transient text fields into a draft the store accepts.
    fn draft(&self) -> Result<TaskDraft, FormError> {
        Ok(TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            date: parse_date_field(&self.date)?,
            time: parse_time_field(&self.time)?,
        })
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

fn parse_date_field(value: &str) -> Result<Option<NaiveDate>, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT)
        .map(Some)
        .map_err(|_| FormError::InvalidDate(trimmed.to_string()))
}

fn parse_time_field(value: &str) -> Result<Option<NaiveTime>, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    TIME_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .map(Some)
        .ok_or_else(|| FormError::InvalidTime(trimmed.to_string()))
}
