//! `mp-disease` — disease parameters and the rules that apply them.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                   |
//! |-------------------|------------------------------------------------------------|
//! | [`disease`]       | `Disease` (validated per-hour rates), `per_step_probability` |
//! | [`transmission`]  | `TransmissionModel` trait, `ContaminationTransmission`, `ContactTransmission` |
//! | [`exposure`]      | `expose_place` → `PlaceExposure` (one place, one step)      |
//! | [`progression`]   | `progress` (recovery/death draw for one Diseased agent)     |
//!
//! # Design notes
//!
//! Every rule here is a pure function of its inputs plus draws from a
//! caller-supplied `RandomSource`.  None of them mutate agents or places;
//! they return what *should* change and the simulation layer commits it.
//! That keeps a place's evaluation independent of every other place, which
//! is what lets `mp-sim` fan places out over threads.

pub mod disease;
pub mod exposure;
pub mod progression;
pub mod transmission;


pub use disease::{Disease, per_step_probability};
pub use exposure::{PlaceExposure, expose_place, occupant_health};
pub use progression::progress;
pub use transmission::{ContactTransmission, ContaminationTransmission, TransmissionModel};
