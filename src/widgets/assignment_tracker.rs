//! Assignment Tracker Widget
//!
//! CRUD state machine over the `assignments` collection: list view, a draft
//! form for create/edit, completion toggling and the sorted deadline view.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    due_status, sort_assignments, Assignment, DomainError, DomainResult, DueStatus,
};
use crate::store::{Collection, SlotCollection, SlotStore, SlotWatcher};

/// Slot holding the assignment collection
pub const ASSIGNMENTS_SLOT: &str = "assignments";

/// In-progress form state for a create or edit
#[derive(Debug, Clone)]
pub struct AssignmentDraft {
    pub title: String,
    pub subject: String,
    pub due_date: DateTime<Utc>,
    pub description: String,
    is_completed: bool,
    editing: Option<Uuid>,
}

pub struct AssignmentTracker {
    assignments: SlotCollection<Assignment>,
    draft: Option<AssignmentDraft>,
}

impl AssignmentTracker {
    pub fn new(store: &SlotStore) -> Self {
        Self {
            assignments: SlotCollection::new(store.clone(), ASSIGNMENTS_SLOT),
            draft: None,
        }
    }

    /// Open the form with a blank draft due `now`
    pub fn open_create(&mut self, now: DateTime<Utc>) {
        self.draft = Some(AssignmentDraft {
            title: String::new(),
            subject: String::new(),
            due_date: now,
            description: String::new(),
            is_completed: false,
            editing: None,
        });
    }

    /// Open the form pre-filled with an existing assignment
    pub async fn open_edit(&mut self, id: Uuid) -> DomainResult<()> {
        let existing = self
            .assignments
            .find_by_id(id)
            .await
            .ok_or_else(|| DomainError::NotFound(format!("Assignment {} not found", id)))?;
        self.draft = Some(AssignmentDraft {
            title: existing.title,
            subject: existing.subject,
            due_date: existing.due_date,
            description: existing.description.unwrap_or_default(),
            is_completed: existing.is_completed,
            editing: Some(id),
        });
        Ok(())
    }

    /// Discard the draft without touching the collection
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    pub fn draft(&self) -> Option<&AssignmentDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut AssignmentDraft> {
        self.draft.as_mut()
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.draft, Some(AssignmentDraft { editing: Some(_), .. }))
    }

    /// Validate the draft and persist it: append a new record or replace the
    /// one being edited. The draft is kept open when validation fails.
    pub async fn submit(&mut self) -> DomainResult<Assignment> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| DomainError::InvalidInput("No form open".to_string()))?;
        if draft.title.trim().is_empty() || draft.subject.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "Title and subject are required".to_string(),
            ));
        }

        let description = match draft.description.trim() {
            "" => None,
            text => Some(text.to_string()),
        };
        let record = Assignment {
            id: draft.editing.unwrap_or_else(Uuid::new_v4),
            title: draft.title.trim().to_string(),
            subject: draft.subject.trim().to_string(),
            due_date: draft.due_date,
            description,
            is_completed: draft.is_completed,
        };

        let saved = match draft.editing {
            Some(_) => self.assignments.replace(record).await?,
            None => {
                self.assignments.append(record.clone()).await;
                record
            }
        };
        self.draft = None;
        Ok(saved)
    }

    /// Flip completion on one assignment
    pub async fn toggle_complete(&self, id: Uuid) -> DomainResult<Assignment> {
        let mut assignment = self
            .assignments
            .find_by_id(id)
            .await
            .ok_or_else(|| DomainError::NotFound(format!("Assignment {} not found", id)))?;
        assignment.is_completed = !assignment.is_completed;
        self.assignments.replace(assignment).await
    }

    /// Delete by ID; deleting an absent ID is a no-op
    pub async fn delete(&self, id: Uuid) {
        self.assignments.remove(id).await;
    }

    /// Assignments for the list view: incomplete first, then soonest due
    pub async fn list(&self) -> Vec<Assignment> {
        let mut all = self.assignments.list().await;
        sort_assignments(&mut all);
        all
    }

    /// Deadline state of one assignment at `now`
    pub async fn deadline(&self, id: Uuid, now: DateTime<Utc>) -> DomainResult<DueStatus> {
        let assignment = self
            .assignments
            .find_by_id(id)
            .await
            .ok_or_else(|| DomainError::NotFound(format!("Assignment {} not found", id)))?;
        Ok(due_status(&assignment, now))
    }

    /// Subscribe to changes of the assignment collection
    pub fn watch(&self) -> SlotWatcher {
        self.assignments.watch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn tracker() -> AssignmentTracker {
        let store = SlotStore::open_in_memory().unwrap();
        AssignmentTracker::new(&store)
    }

    async fn add(tracker: &mut AssignmentTracker, title: &str, due_in: Duration) -> Assignment {
        let now = Utc::now();
        tracker.open_create(now);
        {
            let draft = tracker.draft_mut().unwrap();
            draft.title = title.to_string();
            draft.subject = "Physics".to_string();
            draft.due_date = now + due_in;
        }
        tracker.submit().await.expect("submit failed")
    }

    #[tokio::test]
    async fn test_create_adds_exactly_one_with_unique_id() {
        let mut tracker = tracker();

        let first = add(&mut tracker, "Lab report", Duration::days(2)).await;
        assert_eq!(tracker.list().await.len(), 1);

        let second = add(&mut tracker, "Worksheet", Duration::days(1)).await;
        let all = tracker.list().await;
        assert_eq!(all.len(), 2);
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_submit_requires_title_and_subject() {
        let mut tracker = tracker();
        tracker.open_create(Utc::now());

        let result = tracker.submit().await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
        // Draft stays open, nothing persisted
        assert!(tracker.draft().is_some());
        assert!(tracker.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_edit_changes_only_target() {
        let mut tracker = tracker();
        let keep = add(&mut tracker, "Keep", Duration::days(3)).await;
        let edit = add(&mut tracker, "Old title", Duration::days(4)).await;

        tracker.open_edit(edit.id).await.unwrap();
        tracker.draft_mut().unwrap().title = "New title".to_string();
        let saved = tracker.submit().await.unwrap();
        assert_eq!(saved.id, edit.id);

        let all = tracker.list().await;
        let kept = all.iter().find(|a| a.id == keep.id).unwrap();
        assert_eq!(kept.title, "Keep");
        assert_eq!(kept.due_date, keep.due_date);
        let edited = all.iter().find(|a| a.id == edit.id).unwrap();
        assert_eq!(edited.title, "New title");
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let mut tracker = tracker();
        let existing = add(&mut tracker, "Untouched", Duration::days(1)).await;

        tracker.open_edit(existing.id).await.unwrap();
        tracker.draft_mut().unwrap().title = "Edited but abandoned".to_string();
        tracker.cancel();

        assert!(tracker.draft().is_none());
        assert_eq!(tracker.list().await[0].title, "Untouched");
    }

    #[tokio::test]
    async fn test_toggle_and_sort() {
        let mut tracker = tracker();
        let urgent = add(&mut tracker, "Urgent", Duration::days(1)).await;
        let relaxed = add(&mut tracker, "Relaxed", Duration::days(9)).await;

        tracker.toggle_complete(urgent.id).await.unwrap();

        // Completed sinks below incomplete regardless of due date
        let all = tracker.list().await;
        assert_eq!(all[0].id, relaxed.id);
        assert_eq!(all[1].id, urgent.id);
        assert!(all[1].is_completed);
    }

    #[tokio::test]
    async fn test_delete_twice_is_safe() {
        let mut tracker = tracker();
        let doomed = add(&mut tracker, "Doomed", Duration::days(1)).await;

        tracker.delete(doomed.id).await;
        tracker.delete(doomed.id).await;
        assert!(tracker.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_deadline_view() {
        let mut tracker = tracker();
        let now = Utc::now();
        let a = add(&mut tracker, "Due soon", Duration::hours(12)).await;
        assert_eq!(
            tracker.deadline(a.id, now).await.unwrap(),
            DueStatus::DueSoon { days: 0 }
        );
    }
}
