//! Assignment Entity
//!
//! A coursework assignment with a due instant, plus the deadline views the
//! tracker derives from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::Entity;

/// A coursework assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Unique identifier
    pub id: Uuid,
    pub title: String,
    pub subject: String,
    /// Due instant
    pub due_date: DateTime<Utc>,
    /// Optional free-text notes
    pub description: Option<String>,
    pub is_completed: bool,
}

impl Assignment {
    pub fn new(title: String, subject: String, due_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            subject,
            due_date,
            description: None,
            is_completed: false,
        }
    }
}

impl Entity for Assignment {
    type Id = Uuid;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Deadline state shown next to an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Completed,
    Overdue,
    /// Due within one day
    DueSoon { days: i64 },
    DueIn { days: i64 },
}

/// Derive the deadline state at `now`.
///
/// A completed assignment is `Completed` regardless of its due date. Days are
/// whole days between `now` and the due instant, truncated toward zero.
pub fn due_status(assignment: &Assignment, now: DateTime<Utc>) -> DueStatus {
    if assignment.is_completed {
        return DueStatus::Completed;
    }
    if assignment.due_date < now {
        return DueStatus::Overdue;
    }
    let days = (assignment.due_date - now).num_days();
    if days <= 1 {
        DueStatus::DueSoon { days }
    } else {
        DueStatus::DueIn { days }
    }
}

/// Sort for the tracker list: incomplete first, then soonest due first.
pub fn sort_assignments(assignments: &mut [Assignment]) {
    assignments.sort_by(|a, b| {
        a.is_completed
            .cmp(&b.is_completed)
            .then_with(|| a.due_date.cmp(&b.due_date))
    });
}
