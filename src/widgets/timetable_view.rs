//! Timetable View Widget
//!
//! Read-only view over the weekly schedule fixture: the day/hour grid and
//! the subject legend.

use crate::domain::{
    entries_for_slot, sample_timetable, subjects, time_slots, TimetableEntry, Weekday, DAYS_ORDER,
};

pub struct TimetableView {
    entries: Vec<TimetableEntry>,
}

impl TimetableView {
    pub fn new() -> Self {
        Self::with_entries(sample_timetable())
    }

    pub fn with_entries(entries: Vec<TimetableEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[TimetableEntry] {
        &self.entries
    }

    /// Days shown in the grid (Monday through Friday)
    pub fn weekdays(&self) -> &'static [Weekday] {
        &DAYS_ORDER[..5]
    }

    /// Row labels for the grid
    pub fn time_slots(&self) -> Vec<String> {
        time_slots()
    }

    /// Entries occupying one grid cell
    pub fn cell(&self, day: Weekday, slot: &str) -> Vec<&TimetableEntry> {
        entries_for_slot(&self.entries, day, slot)
    }

    /// Distinct subjects for the legend
    pub fn legend(&self) -> Vec<String> {
        subjects(&self.entries)
    }
}

impl Default for TimetableView {
    fn default() -> Self {
        Self::new()
    }
}
