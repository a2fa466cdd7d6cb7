//! Expense Entity
//!
//! A single logged expense and the monthly report views: month window
//! filtering, totals and per-category breakdown.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::Entity;

/// Fixed expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Utilities,
    Entertainment,
    Shopping,
    Education,
    Health,
    Other,
}

/// All categories in form order
pub const CATEGORIES: [Category; 8] = [
    Category::Food,
    Category::Transport,
    Category::Utilities,
    Category::Entertainment,
    Category::Shopping,
    Category::Education,
    Category::Health,
    Category::Other,
];

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Education => "Education",
            Category::Health => "Health",
            Category::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Food" => Category::Food,
            "Transport" => Category::Transport,
            "Utilities" => Category::Utilities,
            "Entertainment" => Category::Entertainment,
            "Shopping" => Category::Shopping,
            "Education" => Category::Education,
            "Health" => Category::Health,
            _ => Category::Other,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single logged expense
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier
    pub id: Uuid,
    pub description: String,
    /// Positive amount in the user's currency
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub category: Category,
}

impl Expense {
    pub fn new(description: String, amount: f64, date: DateTime<Utc>, category: Category) -> Self {
        Self {
            id: Uuid::new_v4(),
            description,
            amount,
            date,
            category,
        }
    }
}

impl Entity for Expense {
    type Id = Uuid;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// A calendar month used as the report window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSelection {
    pub year: i32,
    /// 1-based month
    pub month: u32,
}

impl MonthSelection {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Month containing the given instant
    pub fn containing(instant: DateTime<Utc>) -> Self {
        Self {
            year: instant.year(),
            month: instant.month(),
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// First instant of the month
    pub fn start(&self) -> DateTime<Utc> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default();
        Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
    }

    /// First instant of the following month
    pub fn end_exclusive(&self) -> DateTime<Utc> {
        self.next().start()
    }

    /// Whether the instant falls inside this month
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start() && instant < self.end_exclusive()
    }

    /// Header label, e.g. "July 2024"
    pub fn label(&self) -> String {
        self.start().format("%B %Y").to_string()
    }
}

/// Expenses inside the month window, newest first
pub fn expenses_in_month(expenses: &[Expense], month: MonthSelection) -> Vec<Expense> {
    let mut selected: Vec<Expense> = expenses
        .iter()
        .filter(|e| month.contains(e.date))
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.date.cmp(&a.date));
    selected
}

pub fn monthly_total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Per-category sum for the report chart
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Group the given expenses by category, largest total first.
pub fn totals_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for expense in expenses {
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(entry) => entry.total += expense.amount,
            None => totals.push(CategoryTotal {
                category: expense.category,
                total: expense.amount,
            }),
        }
    }
    totals.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));
    totals
}
