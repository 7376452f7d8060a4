//! Pod record and status enumeration.

use crate::error::FleetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Speed domain (km/h)
pub const SPEED_MIN_KMH: f64 = 0.0;
pub const SPEED_MAX_KMH: f64 = 1000.0;

/// Battery domain (%)
pub const BATTERY_MIN_PCT: f64 = 0.0;
pub const BATTERY_MAX_PCT: f64 = 100.0;

/// Operating status of a pod. Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PodStatus {
    Operational,
    Maintenance,
    Docked,
}

impl PodStatus {
    pub const ALL: [PodStatus; 3] = [
        PodStatus::Operational,
        PodStatus::Maintenance,
        PodStatus::Docked,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PodStatus::Operational => "Operational",
            PodStatus::Maintenance => "Maintenance",
            PodStatus::Docked => "Docked",
        }
    }
}

impl fmt::Display for PodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PodStatus {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PodStatus::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FleetError::InvalidStatus(s.to_string()))
    }
}

/// One simulated hyperloop vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pod {
    pub name: String,
    pub speed_kmh: f64,
    pub battery_pct: f64,
    pub status: PodStatus,
}

impl Pod {
    /// Build a pod with its metrics clamped into their domains.
    pub fn new(
        name: impl Into<String>,
        speed_kmh: f64,
        battery_pct: f64,
        status: PodStatus,
    ) -> Self {
        Self {
            name: name.into(),
            speed_kmh: clamp_speed(speed_kmh),
            battery_pct: clamp_battery(battery_pct),
            status,
        }
    }

    pub fn is_operational(&self) -> bool {
        self.status == PodStatus::Operational
    }
}

pub fn clamp_speed(speed_kmh: f64) -> f64 {
    speed_kmh.clamp(SPEED_MIN_KMH, SPEED_MAX_KMH)
}

pub fn clamp_battery(battery_pct: f64) -> f64 {
    battery_pct.clamp(BATTERY_MIN_PCT, BATTERY_MAX_PCT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("operational".parse::<PodStatus>(), Ok(PodStatus::Operational));
        assert_eq!(" Docked ".parse::<PodStatus>(), Ok(PodStatus::Docked));
        assert_eq!("MAINTENANCE".parse::<PodStatus>(), Ok(PodStatus::Maintenance));
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert_eq!(
            "Cruising".parse::<PodStatus>(),
            Err(FleetError::InvalidStatus("Cruising".into()))
        );
    }

    #[test]
    fn test_new_pod_clamps_metrics() {
        let pod = Pod::new("Avishkar-9", 1250.0, -3.0, PodStatus::Docked);
        assert_eq!(pod.speed_kmh, SPEED_MAX_KMH);
        assert_eq!(pod.battery_pct, BATTERY_MIN_PCT);
        assert!(!pod.is_operational());
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&PodStatus::Maintenance).unwrap();
        assert_eq!(json, "\"Maintenance\"");
    }
}
