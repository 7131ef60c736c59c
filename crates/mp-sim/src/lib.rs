//! `mp-sim` — step loop orchestrator for `mopatop`.
//!
//! # One step
//!
//! ```text
//! step():
//!   ① Clock         — advance one step.
//!   ② Relocation    — resolve every living, non-stationary agent's schedule
//!                     and move it between occupant sets.
//!   ③ Transmission  — per place with a living Diseased occupant: shed into
//!                     the place, one infection draw per Susceptible occupant
//!                     (parallel over places with the `parallel` feature).
//!   ④ Progression   — recovery/death draws for agents that were Diseased
//!                     when the step began.
//!   ⑤ Contamination — decay (or keep) every place's contamination.
//!   ⑥ Report        — snapshot to the Reporter if the interval has elapsed.
//! ```
//!
//! Each phase is a full barrier.  Within a phase everything is planned from
//! a frozen view first and committed second, so a rejected transition leaves
//! that phase's entities untouched.  Commits run in ascending ID order.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the transmission phase on Rayon's thread pool.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mp_core::ParameterStore;
//! use mp_sim::{ModelFactorySelector, NoopReporter};
//!
//! let params = ParameterStore::new();
//! let mut sim = ModelFactorySelector::select(&params)?;
//! sim.run(24, &mut NoopReporter)?;
//! println!("{}", sim.report());
//! ```

pub mod builder;
pub mod error;
pub mod factory;
pub mod model;
pub mod phase;
pub mod reporter;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use builder::ModelBuilder;
pub use error::{PhaseError, SimError, SimResult};
pub use factory::{ModelFactorySelector, PopulationLayout, Simulation};
pub use model::Model;
pub use phase::Phase;
pub use reporter::{NoopReporter, ReportSchedule, Reporter};
pub use snapshot::Snapshot;

pub use mp_agent::HealthCounts;
