//! Backend connectivity indicator.

use serde::{Deserialize, Serialize};

/// Readiness of the assistant backend as observed by the health probe.
///
/// The value is advisory: it is shown to the user but never gates
/// message dispatch.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConnectivityState {
    /// The probe has not completed yet.
    #[default]
    Checking,
    /// The health endpoint answered with a success status.
    Online,
    /// The health endpoint failed or could not be reached.
    Offline,
}

impl ConnectivityState {
    /// Map the outcome of a health probe to a state.
    pub fn from_probe(healthy: bool) -> Self {
        if healthy {
            Self::Online
        } else {
            Self::Offline
        }
    }

    /// Whether the probe has completed (online or offline).
    pub fn is_settled(self) -> bool {
        self != Self::Checking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_probe_maps_outcome() {
        assert_eq!(ConnectivityState::from_probe(true), ConnectivityState::Online);
        assert_eq!(ConnectivityState::from_probe(false), ConnectivityState::Offline);
    }

    #[test]
    fn checking_is_default_and_unsettled() {
        let state = ConnectivityState::default();
        assert_eq!(state, ConnectivityState::Checking);
        assert!(!state.is_settled());
        assert!(ConnectivityState::Offline.is_settled());
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(ConnectivityState::Online.to_string(), "online");
        assert_eq!("offline".parse::<ConnectivityState>().unwrap(), ConnectivityState::Offline);
    }
}
