//! Dashboard frame: everything one interaction cycle renders.

use crate::error::Result;
use crate::fleet::{Fleet, PodMetrics};
use crate::pod::Pod;
use crate::query::{SortKey, StatusFilter};
use crate::weather::WeatherPanel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const COMPARISON_TITLE: &str = "Pod Performance Comparison";

/// Series colors: first pod bright green, second dark green
pub const PRIMARY_SERIES_COLOR: &str = "#00ff00";
pub const SECONDARY_SERIES_COLOR: &str = "#004400";

/// Pod tracker table content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerView {
    pub status_filter: StatusFilter,
    pub sort_key: SortKey,
    pub status_options: Vec<StatusFilter>,
    pub rows: Vec<Pod>,
}

impl TrackerView {
    pub fn build(fleet: &Fleet, status_filter: StatusFilter, sort_key: SortKey) -> Self {
        Self {
            status_filter,
            sort_key,
            status_options: fleet.status_options(),
            rows: fleet.filter_and_sort(status_filter, sort_key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub pod: String,
    /// One value per entry of `ComparisonChart::parameters`
    pub values: Vec<f64>,
    pub color: String,
}

/// Grouped bar chart of two pods over speed and battery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonChart {
    pub title: String,
    pub parameters: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ComparisonChart {
    pub fn build(fleet: &Fleet, pod_a: &str, pod_b: &str) -> Result<Self> {
        let (a, b) = fleet.compare(pod_a, pod_b)?;
        Ok(Self::from_metrics(a, b))
    }

    pub fn from_metrics(a: PodMetrics, b: PodMetrics) -> Self {
        let series = |m: PodMetrics, color: &str| ChartSeries {
            pod: m.name,
            values: vec![m.speed_kmh, m.battery_pct],
            color: color.to_string(),
        };

        Self {
            title: COMPARISON_TITLE.to_string(),
            parameters: SortKey::ALL
                .iter()
                .map(|key| key.column_label().to_string())
                .collect(),
            series: vec![
                series(a, PRIMARY_SERIES_COLOR),
                series(b, SECONDARY_SERIES_COLOR),
            ],
        }
    }
}

/// Output of one interaction cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFrame {
    pub session_id: Uuid,
    /// Completed update cycles, including the one that produced this frame
    pub cycle: u64,
    pub generated_at: DateTime<Utc>,
    pub tracker: TrackerView,
    /// Every pod name in fleet order, for the comparison selectors
    pub pod_names: Vec<String>,
    pub weather: WeatherPanel,
    pub energy_tip: String,
    /// Absent only when the fleet has no pods to select
    pub comparison: Option<ComparisonChart>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pod::PodStatus;

    #[test]
    fn test_comparison_chart_layout() {
        let fleet = Fleet::from_pods(vec![
            Pod::new("A", 700.0, 80.0, PodStatus::Operational),
            Pod::new("B", 900.0, 50.0, PodStatus::Docked),
        ])
        .unwrap();

        let chart = ComparisonChart::build(&fleet, "B", "A").unwrap();
        assert_eq!(chart.title, COMPARISON_TITLE);
        assert_eq!(chart.parameters, vec!["Speed (km/h)", "Battery (%)"]);
        assert_eq!(chart.series[0].pod, "B");
        assert_eq!(chart.series[0].values, vec![900.0, 50.0]);
        assert_eq!(chart.series[0].color, PRIMARY_SERIES_COLOR);
        assert_eq!(chart.series[1].color, SECONDARY_SERIES_COLOR);
    }

    #[test]
    fn test_same_pod_on_both_sides() {
        let fleet = Fleet::from_pods(vec![Pod::new("A", 700.0, 80.0, PodStatus::Docked)]).unwrap();
        let chart = ComparisonChart::build(&fleet, "A", "A").unwrap();
        assert_eq!(chart.series[0].values, chart.series[1].values);
    }
}
