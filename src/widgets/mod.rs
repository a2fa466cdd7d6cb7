//! Widgets Layer
//!
//! The feature state machines. Each widget owns one store-backed collection
//! and its CRUD/view logic; widgets do not interact with each other.

mod assignment_tracker;
mod expense_tracker;
pub mod identity;
mod laundry_booking;
mod mess_menu_view;
mod timetable_view;
mod toast;

pub use assignment_tracker::{AssignmentDraft, AssignmentTracker, ASSIGNMENTS_SLOT};
pub use expense_tracker::{ExpenseDraft, ExpenseTracker, EXPENSES_SLOT};
pub use laundry_booking::{LaundryBooking, LAUNDRY_BOOKINGS_SLOT};
pub use mess_menu_view::MessMenuView;
pub use timetable_view::TimetableView;
pub use toast::{Toast, ToastKind, ToastQueue};
