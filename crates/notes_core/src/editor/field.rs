//! Editable task fields: seeding and lenient coercion.

use crate::dates::{format_date, parse_date_input};
use crate::model::task::{Priority, Task, TaskStatus};
use crate::model::{join_tags, split_tags};
use chrono::{Local, TimeZone};

pub const FIELD_COUNT: usize = 6;

/// Editable fields in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditField {
    Title,
    Description,
    Priority,
    Status,
    DueDate,
    Tags,
}

impl EditField {
    pub const ALL: [EditField; FIELD_COUNT] = [
        EditField::Title,
        EditField::Description,
        EditField::Priority,
        EditField::Status,
        EditField::DueDate,
        EditField::Tags,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Title => 0,
            Self::Description => 1,
            Self::Priority => 2,
            Self::Status => 3,
            Self::DueDate => 4,
            Self::Tags => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Priority => "Priority",
            Self::Status => "Status",
            Self::DueDate => "Due date",
            Self::Tags => "Tags",
        }
    }

    /// Input hint shown next to the field.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Title | Self::Description => "",
            Self::Priority => "low|medium|high|urgent",
            Self::Status => "pending|in-progress|completed|cancelled",
            Self::DueDate => "YYYY-MM-DD, today, tomorrow, next week",
            Self::Tags => "comma separated",
        }
    }

    /// Whether an empty value means "absent" rather than "invalid".
    pub fn clearable(self) -> bool {
        matches!(self, Self::Description | Self::DueDate | Self::Tags)
    }

    /// Current value of this field rendered as editable text.
    pub fn seed(self, task: &Task) -> String {
        match self {
            Self::Title => task.title.clone(),
            Self::Description => task.description.clone().unwrap_or_default(),
            Self::Priority => task.priority.as_str().to_string(),
            Self::Status => task.status.as_str().to_string(),
            Self::DueDate => task.due_at.map(format_date).unwrap_or_default(),
            Self::Tags => join_tags(&task.tags),
        }
    }
}

pub(crate) fn seed_all(task: &Task) -> [String; FIELD_COUNT] {
    EditField::ALL.map(|field| field.seed(task))
}

/// Writes `values` (indexed like `EditField::ALL`) into `task`.
pub(crate) fn coerce_into(task: &mut Task, values: &[String; FIELD_COUNT], now: i64) {
    let reference = Local
        .timestamp_millis_opt(now)
        .single()
        .unwrap_or_else(Local::now);

    let title = values[EditField::Title.index()].trim();
    if !title.is_empty() {
        task.title = title.to_string();
    }

    let description = values[EditField::Description.index()].trim();
    task.description = (!description.is_empty()).then(|| description.to_string());

    let priority_text = values[EditField::Priority.index()].trim().to_lowercase();
    if let Some(priority) = Priority::parse(&priority_text) {
        task.priority = priority;
    }

    let status_text = values[EditField::Status.index()].trim().to_lowercase();
    if let Some(status) = TaskStatus::parse(&status_text) {
        if status != task.status {
            task.set_status(status, now);
        }
    }

    let due_text = values[EditField::DueDate.index()].trim();
    if due_text.is_empty() {
        task.due_at = None;
    } else if due_text != EditField::DueDate.seed(task) {
        // The seed is date-only; an untouched seed keeps the stored time.
        if let Ok(due_at) = parse_date_input(due_text, reference) {
            task.due_at = Some(due_at);
        }
    }

    task.tags = split_tags(&values[EditField::Tags.index()]);
    task.updated_at = now;
}
