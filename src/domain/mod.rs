//! Domain Layer
//!
//! Contains all domain entities, their validation rules and the pure
//! derived-view functions. This layer has NO dependency on the store.

mod assignment;
mod entity;
mod expense;
mod laundry;
mod mess_menu;
mod timetable;
mod week;

pub use assignment::{due_status, sort_assignments, Assignment, DueStatus};
pub use entity::{DomainError, DomainResult, Entity};
pub use expense::{
    expenses_in_month, monthly_total, totals_by_category, Category, CategoryTotal, Expense,
    MonthSelection, CATEGORIES,
};
pub use laundry::{
    default_machines, generate_slots_for_day, overlay_bookings, LaundryMachine, LaundrySlot,
    CLOSING_HOUR, OPENING_HOUR,
};
pub use mess_menu::{default_day, menu_for, weekly_menu, DailyMessMenu, MealType, MessMenuItem};
pub use timetable::{entries_for_slot, sample_timetable, subjects, time_slots, TimetableEntry};
pub use week::{Weekday, DAYS_ORDER};
