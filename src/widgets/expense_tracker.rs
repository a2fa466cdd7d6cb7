//! Expense Tracker Widget
//!
//! CRUD state machine over the `expenses` collection plus the monthly
//! report: month navigation, filtered list, total and category breakdown.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    expenses_in_month, monthly_total, totals_by_category, Category, CategoryTotal, DomainError,
    DomainResult, Expense, MonthSelection, CATEGORIES,
};
use crate::store::{Collection, SlotCollection, SlotStore, SlotWatcher};

/// Slot holding the expense collection
pub const EXPENSES_SLOT: &str = "expenses";

/// In-progress form state for a create or edit
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub category: Category,
    editing: Option<Uuid>,
}

pub struct ExpenseTracker {
    expenses: SlotCollection<Expense>,
    draft: Option<ExpenseDraft>,
    month: MonthSelection,
}

impl ExpenseTracker {
    /// Tracker with the report window on the month containing `now`
    pub fn new(store: &SlotStore, now: DateTime<Utc>) -> Self {
        Self {
            expenses: SlotCollection::new(store.clone(), EXPENSES_SLOT),
            draft: None,
            month: MonthSelection::containing(now),
        }
    }

    pub fn selected_month(&self) -> MonthSelection {
        self.month
    }

    pub fn prev_month(&mut self) {
        self.month = self.month.prev();
    }

    pub fn next_month(&mut self) {
        self.month = self.month.next();
    }

    pub fn select_month(&mut self, month: MonthSelection) {
        self.month = month;
    }

    /// Open the form with a blank draft dated `now`
    pub fn open_create(&mut self, now: DateTime<Utc>) {
        self.draft = Some(ExpenseDraft {
            description: String::new(),
            amount: 0.0,
            date: now,
            category: CATEGORIES[0],
            editing: None,
        });
    }

    /// Open the form pre-filled with an existing expense
    pub async fn open_edit(&mut self, id: Uuid) -> DomainResult<()> {
        let existing = self
            .expenses
            .find_by_id(id)
            .await
            .ok_or_else(|| DomainError::NotFound(format!("Expense {} not found", id)))?;
        self.draft = Some(ExpenseDraft {
            description: existing.description,
            amount: existing.amount,
            date: existing.date,
            category: existing.category,
            editing: Some(id),
        });
        Ok(())
    }

    /// Discard the draft without touching the collection
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    pub fn draft(&self) -> Option<&ExpenseDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut ExpenseDraft> {
        self.draft.as_mut()
    }

    /// Validate the draft and persist it. Requires a non-empty description
    /// and a positive amount.
    pub async fn submit(&mut self) -> DomainResult<Expense> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| DomainError::InvalidInput("No form open".to_string()))?;
        if draft.description.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "Description is required".to_string(),
            ));
        }
        if draft.amount <= 0.0 {
            return Err(DomainError::InvalidInput(
                "Amount must be positive".to_string(),
            ));
        }

        let record = Expense {
            id: draft.editing.unwrap_or_else(Uuid::new_v4),
            description: draft.description.trim().to_string(),
            amount: draft.amount,
            date: draft.date,
            category: draft.category,
        };

        let saved = match draft.editing {
            Some(_) => self.expenses.replace(record).await?,
            None => {
                self.expenses.append(record.clone()).await;
                record
            }
        };
        self.draft = None;
        Ok(saved)
    }

    /// Delete by ID; deleting an absent ID is a no-op
    pub async fn delete(&self, id: Uuid) {
        self.expenses.remove(id).await;
    }

    /// Expenses in the selected month, newest first
    pub async fn monthly_expenses(&self) -> Vec<Expense> {
        expenses_in_month(&self.expenses.list().await, self.month)
    }

    /// Sum of the selected month's expenses
    pub async fn monthly_total(&self) -> f64 {
        monthly_total(&self.monthly_expenses().await)
    }

    /// Category breakdown of the selected month, largest first
    pub async fn by_category(&self) -> Vec<CategoryTotal> {
        totals_by_category(&self.monthly_expenses().await)
    }

    /// Subscribe to changes of the expense collection
    pub fn watch(&self) -> SlotWatcher {
        self.expenses.watch()
    }
}
