//! `mp-schedule` — per-agent travel schedules.
//!
//! # Crate layout
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`travel`]     | `Destination`, `TravelSchedule`                       |
//! | [`preset`]     | `ScheduleKind` (stationary, mobile, remoteTravel, returnTrip) |
//! | [`loader`]     | `load_schedules_csv`, `load_schedules_reader`         |
//! | [`error`]      | `ScheduleError`, `ScheduleResult<T>`                  |
//!
//! # Resolution model (summary)
//!
//! A schedule is an ordered map from effective tick to destination.  At
//! tick `t`:
//!
//! ```text
//! key          = t % cycle_ticks     (cyclic)   |  t   (one-off)
//! destination  = last entry whose tick ≤ key
//!                else last entry     (cyclic, wraps to the previous cycle)
//!                else None           (one-off, not started: stay put)
//! ```
//!
//! Stationary schedules are never resolved; the agent stays where it is.

pub mod error;
pub mod loader;
pub mod preset;
pub mod travel;


pub use error::{ScheduleError, ScheduleResult};
pub use loader::{load_schedules_csv, load_schedules_reader};
pub use preset::ScheduleKind;
pub use travel::{Destination, TravelSchedule};
