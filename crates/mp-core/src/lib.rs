//! `mp-core` — foundational types for the `mopatop` epidemic simulation.
//!
//! This crate is a dependency of every other `mp-*` crate.  It has no `mp-*`
//! dependencies and few external ones (`rand`, `chrono`, `thiserror`, `log`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `PlaceId`                                  |
//! | [`time`]        | `Tick`, `TimeStepUnit`, `SimClock`                    |
//! | [`calendar`]    | `CalendarDate` (chrono-backed), `Weekday`            |
//! | [`rng`]         | `RandomSource`, `SeededRandom`, `EntropyRandom`, `FixedRandom` |
//! | [`params`]      | `ParameterStore`, `SimConfig`                         |
//! | [`transport`]   | `TransportMode` enum                                  |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to public value types.      |

pub mod calendar;
pub mod error;
pub mod ids;
pub mod params;
pub mod rng;
pub mod time;
pub mod transport;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use calendar::{CalendarDate, Weekday};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, PlaceId};
pub use params::{ParameterStore, SimConfig};
pub use rng::{EntropyRandom, FixedRandom, RandomSource, SeededRandom};
pub use time::{SimClock, Tick, TimeStepUnit};
pub use transport::TransportMode;
