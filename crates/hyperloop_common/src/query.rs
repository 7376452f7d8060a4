//! Selector values for the tracker table and comparison chart.

use crate::error::FleetError;
use crate::pod::{Pod, PodStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel label meaning "no status filter"
pub const ALL_LABEL: &str = "All";

/// Status selector: either every pod or one exact status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(PodStatus),
}

impl StatusFilter {
    pub fn matches(&self, pod: &Pod) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => pod.status == *status,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => ALL_LABEL,
            StatusFilter::Only(status) => status.label(),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StatusFilter {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_LABEL) {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.label().to_string()
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = FleetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Column the tracker table is sorted by (always descending)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "speed_kmh")]
    Speed,
    #[serde(rename = "battery_pct")]
    Battery,
}

impl SortKey {
    pub const ALL: [SortKey; 2] = [SortKey::Speed, SortKey::Battery];

    pub fn value_of(&self, pod: &Pod) -> f64 {
        match self {
            SortKey::Speed => pod.speed_kmh,
            SortKey::Battery => pod.battery_pct,
        }
    }

    /// Column heading shown by the table and the chart
    pub fn column_label(&self) -> &'static str {
        match self {
            SortKey::Speed => "Speed (km/h)",
            SortKey::Battery => "Battery (%)",
        }
    }

    pub fn toggled(&self) -> SortKey {
        match self {
            SortKey::Speed => SortKey::Battery,
            SortKey::Battery => SortKey::Speed,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Speed => f.write_str("speed_kmh"),
            SortKey::Battery => f.write_str("battery_pct"),
        }
    }
}

impl FromStr for SortKey {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "speed_kmh" | "speed" | "speed (km/h)" => Ok(SortKey::Speed),
            "battery_pct" | "battery" | "battery (%)" => Ok(SortKey::Battery),
            _ => Err(FleetError::InvalidSortKey(s.to_string())),
        }
    }
}

/// Selector state for one interaction cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub status_filter: StatusFilter,
    #[serde(default)]
    pub sort_key: SortKey,
    /// First compared pod; defaults to the first pod of the fleet
    #[serde(default)]
    pub pod_a: Option<String>,
    /// Second compared pod; defaults to the second pod of the fleet
    #[serde(default)]
    pub pod_b: Option<String>,
}

impl DashboardQuery {
    pub fn with_filter(mut self, status_filter: StatusFilter) -> Self {
        self.status_filter = status_filter;
        self
    }

    pub fn with_sort(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    pub fn with_pods(mut self, pod_a: impl Into<String>, pod_b: impl Into<String>) -> Self {
        self.pod_a = Some(pod_a.into());
        self.pod_b = Some(pod_b.into());
        self
    }
}
