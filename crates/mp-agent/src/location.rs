use mp_core::{PlaceId, TransportMode};

/// One change to an agent's location references.
///
/// These set where the agent's `Home`/`Work`/`Transport`/`Remote` schedule
/// sentinels point; they never move the agent or touch its health.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationChange {
    Home(PlaceId),
    Work(PlaceId),
    Transport(PlaceId),
    Remote(PlaceId),
    Mode(TransportMode),
}

impl LocationChange {
    /// The place this change refers to, if any.
    pub fn place(self) -> Option<PlaceId> {
        match self {
            LocationChange::Home(p)
            | LocationChange::Work(p)
            | LocationChange::Transport(p)
            | LocationChange::Remote(p) => Some(p),
            LocationChange::Mode(_) => None,
        }
    }
}
