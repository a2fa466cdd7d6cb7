//! Laundry Entities
//!
//! Machines, hourly slots and the generate-then-overlay model: the canonical
//! slot grid for a (machine, day) pair is computed fresh, then any persisted
//! bookings matching the same machine and start instant replace the generated
//! defaults. Only bookings are ever persisted.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::Entity;

/// First bookable hour of the day
pub const OPENING_HOUR: u32 = 8;
/// Hour the last slot ends
pub const CLOSING_HOUR: u32 = 20;

/// A laundry machine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaundryMachine {
    pub id: String,
    pub name: String,
    pub location: String,
}

impl LaundryMachine {
    pub fn new(id: &str, name: &str, location: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            location: location.to_string(),
        }
    }
}

/// The hostel machine catalog
pub fn default_machines() -> Vec<LaundryMachine> {
    vec![
        LaundryMachine::new("machine1", "Washer A", "Hostel Block 1"),
        LaundryMachine::new("machine2", "Dryer A", "Hostel Block 1"),
        LaundryMachine::new("machine3", "Washer B", "Hostel Block 2"),
    ]
}

/// A one-hour slot on a machine. Generated slots have `is_booked == false`;
/// persisted bookings carry the booker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaundrySlot {
    /// Unique identifier
    pub id: Uuid,
    pub machine_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_booked: bool,
    /// Display name of the booker
    pub booked_by: Option<String>,
    pub user_id: Option<String>,
}

impl Entity for LaundrySlot {
    type Id = Uuid;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl LaundrySlot {
    /// An unbooked slot starting at the given instant
    pub fn open(machine_id: &str, start_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            machine_id: machine_id.to_string(),
            start_time,
            end_time: start_time + Duration::hours(1),
            is_booked: false,
            booked_by: None,
            user_id: None,
        }
    }

    /// Mark this slot booked by the given user
    pub fn booked(mut self, user: &str) -> Self {
        self.is_booked = true;
        self.booked_by = Some(user.to_string());
        self.user_id = Some(user.to_string());
        self
    }
}

/// The canonical slot grid for one machine on one day: 1-hour slots from
/// 08:00 to 20:00.
pub fn generate_slots_for_day(machine_id: &str, day: NaiveDate) -> Vec<LaundrySlot> {
    (OPENING_HOUR..CLOSING_HOUR)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .map(|time| {
            let start = Utc.from_utc_datetime(&day.and_time(time));
            LaundrySlot::open(machine_id, start)
        })
        .collect()
}

/// Overlay persisted bookings onto a generated grid. A booking replaces the
/// generated slot that shares its machine and start instant; bookings for
/// other machines or instants are ignored.
pub fn overlay_bookings(mut slots: Vec<LaundrySlot>, bookings: &[LaundrySlot]) -> Vec<LaundrySlot> {
    for slot in &mut slots {
        if let Some(booking) = bookings
            .iter()
            .find(|b| b.machine_id == slot.machine_id && b.start_time == slot.start_time)
        {
            *slot = booking.clone();
        }
    }
    slots
}
