//! Timetable Entities
//!
//! The weekly class schedule. Entries are fixture data, never mutated at
//! runtime; the view derives a day/hour grid and a subject legend from them.

use serde::{Deserialize, Serialize};

use super::week::Weekday;

/// One scheduled class
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub id: String,
    pub day: Weekday,
    /// "HH:mm"
    pub start_time: String,
    /// "HH:mm"
    pub end_time: String,
    pub subject: String,
    pub location: Option<String>,
    pub instructor: Option<String>,
    /// Hue token for visual distinction
    pub color: Option<String>,
}

impl TimetableEntry {
    #[allow(clippy::too_many_arguments)]
    fn fixture(
        id: &str,
        day: Weekday,
        start_time: &str,
        end_time: &str,
        subject: &str,
        location: &str,
        instructor: &str,
        color: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            day,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            subject: subject.to_string(),
            location: Some(location.to_string()),
            instructor: Some(instructor.to_string()),
            color: Some(color.to_string()),
        }
    }
}

/// The sample weekly schedule
pub fn sample_timetable() -> Vec<TimetableEntry> {
    vec![
        TimetableEntry::fixture(
            "1",
            Weekday::Monday,
            "09:00",
            "10:00",
            "Mathematics 101",
            "Room A101",
            "Dr. Smith",
            "blue",
        ),
        TimetableEntry::fixture(
            "2",
            Weekday::Monday,
            "11:00",
            "12:00",
            "Physics 101",
            "Lab B203",
            "Prof. Jones",
            "green",
        ),
        TimetableEntry::fixture(
            "3",
            Weekday::Tuesday,
            "10:00",
            "11:30",
            "Computer Science Introduction",
            "CS Hub",
            "Dr. Lee",
            "yellow",
        ),
        TimetableEntry::fixture(
            "4",
            Weekday::Wednesday,
            "14:00",
            "15:00",
            "Literature Seminar",
            "Lib Hall",
            "Ms. Davis",
            "purple",
        ),
        TimetableEntry::fixture(
            "5",
            Weekday::Thursday,
            "09:00",
            "10:30",
            "Mathematics 101 - Tutorial",
            "Room A102",
            "Dr. Smith",
            "blue",
        ),
        TimetableEntry::fixture(
            "6",
            Weekday::Friday,
            "13:00",
            "14:30",
            "Physics 101 - Lab",
            "Lab B203",
            "Prof. Jones",
            "green",
        ),
    ]
}

/// The grid's row labels: "08:00" through "19:00"
pub fn time_slots() -> Vec<String> {
    (8..20).map(|hour| format!("{:02}:00", hour)).collect()
}

/// Entries occupying one grid cell. A cell holds every entry on `day` whose
/// start hour matches the slot's hour.
pub fn entries_for_slot<'a>(
    entries: &'a [TimetableEntry],
    day: Weekday,
    slot: &str,
) -> Vec<&'a TimetableEntry> {
    let slot_hour = slot.get(..2);
    entries
        .iter()
        .filter(|entry| entry.day == day && entry.start_time.get(..2) == slot_hour)
        .collect()
}

/// Distinct subjects in first-seen order, for the legend
pub fn subjects(entries: &[TimetableEntry]) -> Vec<String> {
    let mut seen = Vec::new();
    for entry in entries {
        if !seen.contains(&entry.subject) {
            seen.push(entry.subject.clone());
        }
    }
    seen
}
