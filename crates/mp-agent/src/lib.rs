//! `mp-agent` — Structure-of-Arrays agent storage for `mopatop`.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`health`]     | `HealthState`, `HealthStatus`, `HealthChange`, `HealthCounts` |
//! | [`location`]   | `LocationChange`                                           |
//! | [`store`]      | `AgentStore` (SoA arrays)                                  |
//! | [`builder`]    | `AgentStoreBuilder` (fluent construction)                  |
//! | [`error`]      | `AgentError`, `AgentResult`                                |
//!
//! Agents are always created Susceptible and alive.  Every later health
//! change goes through [`AgentStore::apply_health`], and every change to an
//! agent's home/work/transport/remote references goes through
//! [`AgentStore::assign`].

pub mod builder;
pub mod error;
pub mod health;
pub mod location;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use error::{AgentError, AgentResult};
pub use health::{HealthChange, HealthCounts, HealthState, HealthStatus};
pub use location::LocationChange;
pub use store::AgentStore;
