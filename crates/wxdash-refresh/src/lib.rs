//! Refresh pipeline for the station dashboard
//!
//! The [`RefreshController`] pulls snapshots from a source on demand and
//! merges them into the displayed state; the [`Scheduler`] drives it from a
//! timer.

pub mod controller;
pub mod scheduler;

pub use controller::*;
pub use scheduler::*;
