//! StudentHub Core
//!
//! Layered architecture:
//! - domain: Core entities, validation rules and derived views
//! - store: Persistent keyed slot store with change notification
//! - widgets: Feature state machines (assignments, expenses, laundry,
//!   timetable, mess menu)
//!
//! All state lives in named slots of the [`store::SlotStore`], one
//! JSON-serialized collection per feature. Widgets mutate their collection
//! through the store; every subscribed consumer of the same slot observes
//! the change.

pub mod domain;
pub mod store;
pub mod widgets;

pub use store::SlotStore;
