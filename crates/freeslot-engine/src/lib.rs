//! # freeslot-engine
//!
//! Free/busy slot computation across calendars with DST-aware daily
//! availability windows.
//!
//! Given a date range, a daily availability window (e.g. 08:00–18:00 in
//! `America/Los_Angeles`), and a minimum slot length, the engine asks a
//! [`BusyTimeProvider`] for each day's busy periods, merges them, and returns
//! the remaining gaps that are long enough to book.
//!
//! ## Modules
//!
//! - [`scheduler`] — Day-by-day search with per-day failure isolation
//! - [`freebusy`] — Merge busy periods and compute free slots for one window
//! - [`provider`] — The busy time source contract and an in-memory provider
//! - [`params`] — Validated search parameters
//! - [`interval`] — Busy and free interval types
//! - [`dst`] — DST gap policies for building daily windows
//! - [`error`] — Error types

pub mod dst;
pub mod error;
pub mod freebusy;
pub mod interval;
pub mod params;
pub mod provider;
pub mod scheduler;

pub use dst::DstPolicy;
pub use error::EngineError;
pub use freebusy::{
    first_free_slot, free_slots_for_day, is_slot_long_enough, merge_busy_intervals,
};
pub use interval::{BusyInterval, FreeInterval};
pub use params::SearchParameters;
pub use provider::{BusyTimeProvider, StaticBusyTimes};
pub use scheduler::{DayReport, FreeSlotReport, Scheduler};
