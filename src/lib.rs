//! This crate provides a way to display and manage dated tasks.
//!
//! Tasks are owned by a remote [`TaskStore`](traits::TaskStore), usually reached with the REST [`client`]. \
//! An in-memory store is provided in the [`memory_store`] module, that can be used for tests.
//!
//! The working set of tasks is held by a [`Workspace`](workspace::Workspace), that fetches the whole list again after every change.
//!
//! Tasks are classified relative to an explicit "now" instant by the [`bucketing`] module
//! (overdue, upcoming, grouped per local calendar day), and laid out on month grids by the [`calendar`] module. \
//! The [`views`] module turns these into dashboards, lists and calendars.

pub mod traits;
pub mod error;

mod timestamp;
pub use timestamp::Timestamp;
pub mod task;
pub use task::{Priority, Task, TaskId};

pub mod bucketing;
pub mod calendar;
pub use calendar::{MonthCursor, MonthGrid};
pub mod form;
pub use form::{NewTask, TaskDraft};

pub mod client;
pub mod memory_store;
pub mod mock_behaviour;
pub mod workspace;
pub use workspace::Workspace;

pub mod views;
pub mod config;
pub mod utils;
