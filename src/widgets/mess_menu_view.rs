//! Mess Menu View Widget
//!
//! Read-only view over the weekly menu fixture, with the day-tab selection
//! defaulting to today when the mess publishes a menu for it.

use crate::domain::{default_day, menu_for, weekly_menu, DailyMessMenu, Weekday};

pub struct MessMenuView {
    week: Vec<DailyMessMenu>,
}

impl MessMenuView {
    pub fn new() -> Self {
        Self::with_week(weekly_menu())
    }

    pub fn with_week(week: Vec<DailyMessMenu>) -> Self {
        Self { week }
    }

    /// Days with a published menu, in fixture order
    pub fn days(&self) -> Vec<Weekday> {
        self.week.iter().map(|d| d.day).collect()
    }

    pub fn menu_for(&self, day: Weekday) -> Option<&DailyMessMenu> {
        menu_for(&self.week, day)
    }

    /// The day tab to open by default
    pub fn default_day(&self, today: Weekday) -> Option<Weekday> {
        default_day(&self.week, today)
    }
}

impl Default for MessMenuView {
    fn default() -> Self {
        Self::new()
    }
}
