//! Laundry Booking Widget
//!
//! Slot grid for a selected machine and day, with booking rules: a slot must
//! be free and in the future, one booking per user per calendar day, and
//! cancellation only by the booker and not inside the final hour before the
//! slot starts. Only bookings are persisted; the grid itself is regenerated
//! on every read.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::{
    default_machines, generate_slots_for_day, overlay_bookings, DomainError, DomainResult,
    LaundryMachine, LaundrySlot,
};
use crate::store::{Collection, SlotCollection, SlotStore, SlotWatcher};

use super::toast::{Toast, ToastQueue};

/// Slot holding the booking collection
pub const LAUNDRY_BOOKINGS_SLOT: &str = "laundryBookings";

pub struct LaundryBooking {
    bookings: SlotCollection<LaundrySlot>,
    machines: Vec<LaundryMachine>,
    selected_machine: String,
    selected_day: NaiveDate,
    user_name: String,
    toasts: ToastQueue,
}

impl LaundryBooking {
    /// `user_name` identifies the booker. Callers resolve it up front (see
    /// `widgets::identity`) and pass it in; the widget never reads global
    /// state for it.
    pub fn new(store: &SlotStore, user_name: impl Into<String>, today: NaiveDate) -> Self {
        let machines = default_machines();
        let selected_machine = machines.first().map(|m| m.id.clone()).unwrap_or_default();
        Self {
            bookings: SlotCollection::new(store.clone(), LAUNDRY_BOOKINGS_SLOT),
            machines,
            selected_machine,
            selected_day: today,
            user_name: user_name.into(),
            toasts: ToastQueue::default(),
        }
    }

    pub fn machines(&self) -> &[LaundryMachine] {
        &self.machines
    }

    pub fn selected_machine(&self) -> &str {
        &self.selected_machine
    }

    pub fn select_machine(&mut self, id: &str) -> DomainResult<()> {
        if self.machines.iter().any(|m| m.id == id) {
            self.selected_machine = id.to_string();
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("Machine {} not found", id)))
        }
    }

    pub fn selected_day(&self) -> NaiveDate {
        self.selected_day
    }

    pub fn select_day(&mut self, day: NaiveDate) {
        self.selected_day = day;
    }

    pub fn prev_day(&mut self) {
        if let Some(day) = self.selected_day.pred_opt() {
            self.selected_day = day;
        }
    }

    pub fn next_day(&mut self) {
        if let Some(day) = self.selected_day.succ_opt() {
            self.selected_day = day;
        }
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// The day's slot grid for the selected machine, with persisted bookings
    /// overlaid onto the generated defaults
    pub async fn daily_slots(&self) -> Vec<LaundrySlot> {
        let generated = generate_slots_for_day(&self.selected_machine, self.selected_day);
        let bookings = self.bookings.list().await;
        overlay_bookings(generated, &bookings)
    }

    /// Book the slot starting at `start_time` on the selected machine/day.
    ///
    /// Rejected when the slot is already booked, already started, or the
    /// user holds another booking that calendar day.
    pub async fn book(
        &mut self,
        start_time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> DomainResult<LaundrySlot> {
        let slot = match self
            .daily_slots()
            .await
            .into_iter()
            .find(|s| s.start_time == start_time)
        {
            Some(slot) => slot,
            None => {
                return Err(self.reject(
                    "Booking Failed",
                    "Slot is unavailable or in the past.",
                    DomainError::NotFound("no slot at that time".to_string()),
                ))
            }
        };
        if slot.is_booked || slot.start_time <= now {
            return Err(self.reject(
                "Booking Failed",
                "Slot is unavailable or in the past.",
                DomainError::Conflict("slot unavailable".to_string()),
            ));
        }

        let bookings = self.bookings.list().await;
        let holds_one_today = bookings.iter().any(|b| {
            b.booked_by.as_deref() == Some(self.user_name.as_str())
                && b.start_time.date_naive() == self.selected_day
        });
        if holds_one_today {
            return Err(self.reject(
                "Booking Limit Reached",
                "You already have a booking for this day.",
                DomainError::Conflict("booking limit reached".to_string()),
            ));
        }

        let booking = slot.booked(&self.user_name);
        // Drop any stale record for the same machine and start, then append
        let mut records = bookings;
        records.retain(|b| {
            !(b.machine_id == booking.machine_id && b.start_time == booking.start_time)
        });
        records.push(booking.clone());
        self.bookings.save_all(records).await;

        self.toasts.push(Toast::success(
            "Booking Successful!",
            format!(
                "Slot from {} to {} booked.",
                booking.start_time.format("%H:%M"),
                booking.end_time.format("%H:%M")
            ),
        ));
        Ok(booking)
    }

    /// Cancel a booking. Only the booker may cancel, and not within the
    /// final hour before the slot starts.
    pub async fn cancel(&mut self, booking_id: Uuid, now: DateTime<Utc>) -> DomainResult<()> {
        let bookings = self.bookings.list().await;
        let booking = match bookings.iter().find(|b| b.id == booking_id) {
            Some(booking) => booking.clone(),
            None => {
                return Err(self.reject(
                    "Cancellation Failed",
                    "You can only cancel your own bookings.",
                    DomainError::NotFound(format!("Booking {} not found", booking_id)),
                ))
            }
        };
        if booking.booked_by.as_deref() != Some(self.user_name.as_str()) {
            return Err(self.reject(
                "Cancellation Failed",
                "You can only cancel your own bookings.",
                DomainError::Conflict("not the booker".to_string()),
            ));
        }
        if now >= booking.start_time - Duration::hours(1) {
            return Err(self.reject(
                "Cancellation Failed",
                "Too late to cancel this booking.",
                DomainError::Conflict("too late to cancel".to_string()),
            ));
        }

        self.bookings.remove(booking_id).await;
        self.toasts.push(Toast::info(
            "Booking Cancelled",
            "Your laundry slot has been cancelled.",
        ));
        Ok(())
    }

    /// Take every pending notice, oldest first
    pub fn take_toasts(&mut self) -> Vec<Toast> {
        self.toasts.drain()
    }

    /// Subscribe to changes of the booking collection
    pub fn watch(&self) -> SlotWatcher {
        self.bookings.watch()
    }

    fn reject(&mut self, title: &str, description: &str, err: DomainError) -> DomainError {
        self.toasts.push(Toast::error(title, description));
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::toast::ToastKind;
    use chrono::TimeZone;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 15, hour, minute, 0).single().unwrap()
    }

    fn widget(user: &str) -> (SlotStore, LaundryBooking) {
        let store = SlotStore::open_in_memory().unwrap();
        let booking = LaundryBooking::new(&store, user, day());
        (store, booking)
    }

    #[tokio::test]
    async fn test_book_then_limit_then_late_cancel() {
        let (_store, mut laundry) = widget("Asha");
        let early = at(7, 0);

        let booking = laundry.book(at(9, 0), early).await.expect("booking failed");
        assert_eq!(booking.booked_by.as_deref(), Some("Asha"));

        // Second booking the same calendar day is rejected
        let second = laundry.book(at(10, 0), early).await;
        assert!(matches!(second, Err(DomainError::Conflict(_))));

        // 30 minutes before the start is inside the final hour
        let late = laundry.cancel(booking.id, at(8, 30)).await;
        assert!(matches!(late, Err(DomainError::Conflict(_))));

        let toasts = laundry.take_toasts();
        assert_eq!(toasts.len(), 3);
        assert_eq!(toasts[0].kind, ToastKind::Success);
        assert_eq!(toasts[1].title, "Booking Limit Reached");
        assert_eq!(toasts[2].description, "Too late to cancel this booking.");
    }

    #[tokio::test]
    async fn test_booked_slot_appears_in_overlay() {
        let (_store, mut laundry) = widget("Asha");
        let booking = laundry.book(at(9, 0), at(7, 0)).await.unwrap();

        let slots = laundry.daily_slots().await;
        assert_eq!(slots.len(), 12);
        let nine = slots.iter().find(|s| s.start_time == at(9, 0)).unwrap();
        assert!(nine.is_booked);
        assert_eq!(nine.id, booking.id);
        assert!(slots.iter().filter(|s| s.is_booked).count() == 1);
    }

    #[tokio::test]
    async fn test_booking_a_taken_or_past_slot_fails() {
        let (store, mut laundry) = widget("Asha");
        laundry.book(at(9, 0), at(7, 0)).await.unwrap();

        // Another user cannot take the same slot
        let mut rival = LaundryBooking::new(&store, "Ravi", day());
        let taken = rival.book(at(9, 0), at(7, 0)).await;
        assert!(matches!(taken, Err(DomainError::Conflict(_))));

        // A slot whose start has passed cannot be booked
        let past = rival.book(at(8, 0), at(8, 30)).await;
        assert!(matches!(past, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_cancel_rules() {
        let (store, mut laundry) = widget("Asha");
        let booking = laundry.book(at(9, 0), at(7, 0)).await.unwrap();

        // Only the booker may cancel
        let mut rival = LaundryBooking::new(&store, "Ravi", day());
        let foreign = rival.cancel(booking.id, at(7, 0)).await;
        assert!(matches!(foreign, Err(DomainError::Conflict(_))));

        // The booker can cancel while more than an hour remains
        laundry.cancel(booking.id, at(7, 30)).await.expect("cancel failed");
        let slots = laundry.daily_slots().await;
        assert!(slots.iter().all(|s| !s.is_booked));

        // Cancelling again is rejected: the booking is gone
        let gone = laundry.cancel(booking.id, at(7, 30)).await;
        assert!(matches!(gone, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_rebooking_after_cancel_and_day_navigation() {
        let (_store, mut laundry) = widget("Asha");
        let booking = laundry.book(at(9, 0), at(7, 0)).await.unwrap();
        laundry.cancel(booking.id, at(7, 0)).await.unwrap();

        // The day limit no longer applies once the booking is cancelled
        laundry.book(at(11, 0), at(7, 0)).await.expect("rebooking failed");

        laundry.next_day();
        assert_eq!(laundry.selected_day(), day().succ_opt().unwrap());
        // The next day's grid carries no bookings
        assert!(laundry.daily_slots().await.iter().all(|s| !s.is_booked));
    }

    #[tokio::test]
    async fn test_machine_selection() {
        let (_store, mut laundry) = widget("Asha");
        assert_eq!(laundry.selected_machine(), "machine1");
        assert_eq!(laundry.machines().len(), 3);

        laundry.select_machine("machine3").unwrap();
        assert_eq!(laundry.selected_machine(), "machine3");
        assert!(laundry.select_machine("machine9").is_err());
    }
}
