//! `mp-place` — shared locations where agents meet.
//!
//! A [`Place`] is anything agents can occupy together: a home, a workplace,
//! a bus, a remote destination.  Each place tracks its current occupants and
//! a contamination level that infectious occupants raise and that decays
//! over time.
//!
//! | Module        | Contents                                  |
//! |---------------|-------------------------------------------|
//! | [`place`]     | `Place`, `PlaceCategory`, `PlaceSnapshot` |
//! | [`store`]     | `PlaceStore`                              |
//! | [`error`]     | `PlaceError`, `PlaceResult`               |

pub mod error;
pub mod place;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::{PlaceError, PlaceResult};
pub use place::{Place, PlaceCategory, PlaceSnapshot};
pub use store::PlaceStore;
