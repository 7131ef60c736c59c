//! How an agent travels when its schedule sends it to a vehicle.

use std::str::FromStr;

use crate::CoreError;

/// Transport mode recorded on each agent.  The vehicle itself is an ordinary
/// place (the agent's transport place); the mode only labels it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportMode {
    /// Agent does not travel.
    #[default]
    None,
    Bus,
    Car,
    Walk,
    Plane,
}

impl TransportMode {
    /// `true` for any mode that moves the agent through a vehicle place.
    #[inline]
    pub fn is_moving(self) -> bool {
        !matches!(self, TransportMode::None)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::None  => "none",
            TransportMode::Bus   => "bus",
            TransportMode::Car   => "car",
            TransportMode::Walk  => "walk",
            TransportMode::Plane => "plane",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none"  => Ok(TransportMode::None),
            "bus"   => Ok(TransportMode::Bus),
            "car"   => Ok(TransportMode::Car),
            "walk"  => Ok(TransportMode::Walk),
            "plane" => Ok(TransportMode::Plane),
            other => Err(CoreError::Parse(format!("unknown transport mode {other:?}"))),
        }
    }
}
