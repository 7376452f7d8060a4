//! Telemetry store and updater.
//!
//! The fleet is the only state that survives between interaction cycles.
//! Every random draw goes through the caller's `Rng` so seeded generators
//! give reproducible fleets.

use crate::error::{FleetError, Result};
use crate::pod::{clamp_battery, clamp_speed, Pod, PodStatus};
use crate::query::{SortKey, StatusFilter};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Number of pods in a fresh fleet
pub const FLEET_SIZE: usize = 3;

/// Pod names are `Avishkar-1`, `Avishkar-2`, ...
pub const POD_NAME_PREFIX: &str = "Avishkar";

/// Initial draw ranges
pub const INITIAL_SPEED_KMH: (f64, f64) = (600.0, 1000.0);
pub const INITIAL_BATTERY_PCT: (f64, f64) = (60.0, 100.0);

/// Per-cycle speed perturbation (symmetric walk)
pub const SPEED_STEP_KMH: f64 = 50.0;

/// Per-cycle battery drain upper bound (one-sided)
pub const BATTERY_DRAIN_MAX_PCT: f64 = 1.0;

/// Stored metrics of one pod, as shown side by side in the comparison chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodMetrics {
    pub name: String,
    pub speed_kmh: f64,
    pub battery_pct: f64,
}

impl From<&Pod> for PodMetrics {
    fn from(pod: &Pod) -> Self {
        Self {
            name: pod.name.clone(),
            speed_kmh: pod.speed_kmh,
            battery_pct: pod.battery_pct,
        }
    }
}

/// Ordered set of pods keyed by unique name.
///
/// On the wire a fleet is a plain list of pods; deserializing goes through
/// `from_pods`, so duplicate names are rejected and metrics are clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Pod>", into = "Vec<Pod>")]
pub struct Fleet {
    pods: Vec<Pod>,
}

impl Fleet {
    /// Fresh session fleet: `Avishkar-1..3` with random speed, battery and status.
    pub fn initialize<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let pods = (1..=FLEET_SIZE)
            .map(|i| {
                let speed = rng.gen_range(INITIAL_SPEED_KMH.0..=INITIAL_SPEED_KMH.1);
                let battery = rng.gen_range(INITIAL_BATTERY_PCT.0..=INITIAL_BATTERY_PCT.1);
                let status = PodStatus::ALL[rng.gen_range(0..PodStatus::ALL.len())];
                Pod::new(format!("{}-{}", POD_NAME_PREFIX, i), speed, battery, status)
            })
            .collect();

        Self { pods }
    }

    /// Build a fleet from explicit pods, keeping their order.
    pub fn from_pods(pods: Vec<Pod>) -> Result<Self> {
        let mut seen = HashSet::new();
        for pod in &pods {
            if !seen.insert(pod.name.as_str()) {
                return Err(FleetError::DuplicatePod(pod.name.clone()));
            }
        }

        let pods = pods
            .into_iter()
            .map(|pod| Pod::new(pod.name, pod.speed_kmh, pod.battery_pct, pod.status))
            .collect();
        Ok(Self { pods })
    }

    pub fn pods(&self) -> &[Pod] {
        &self.pods
    }

    pub fn len(&self) -> usize {
        self.pods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pods.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Pod> {
        self.pods.iter().find(|pod| pod.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Pod names in fleet order; these populate the comparison selectors.
    pub fn names(&self) -> Vec<String> {
        self.pods.iter().map(|pod| pod.name.clone()).collect()
    }

    /// One update step. Operational pods take a symmetric speed step and a
    /// one-sided battery drain; everything else is frozen.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for pod in self.pods.iter_mut().filter(|pod| pod.is_operational()) {
            let speed_step = rng.gen_range(-SPEED_STEP_KMH..=SPEED_STEP_KMH);
            let drain = rng.gen_range(0.0..=BATTERY_DRAIN_MAX_PCT);

            pod.speed_kmh = clamp_speed(pod.speed_kmh + speed_step);
            pod.battery_pct = clamp_battery(pod.battery_pct - drain);

            debug!(
                "  {} -> {:.2} km/h, {:.2}%",
                pod.name, pod.speed_kmh, pod.battery_pct
            );
        }
    }

    /// Filtered view sorted descending by `sort_key`. The sort is stable, so
    /// ties keep fleet order.
    pub fn filter_and_sort(&self, status_filter: StatusFilter, sort_key: SortKey) -> Vec<Pod> {
        let mut view: Vec<Pod> = self
            .pods
            .iter()
            .filter(|pod| status_filter.matches(pod))
            .cloned()
            .collect();

        view.sort_by(|a, b| sort_key.value_of(b).total_cmp(&sort_key.value_of(a)));
        view
    }

    /// Stored metrics for two pods, side by side.
    pub fn compare(&self, name_a: &str, name_b: &str) -> Result<(PodMetrics, PodMetrics)> {
        let a = self.lookup(name_a)?;
        let b = self.lookup(name_b)?;
        Ok((PodMetrics::from(a), PodMetrics::from(b)))
    }

    /// `All` followed by each distinct status present, in first-appearance order.
    pub fn status_options(&self) -> Vec<StatusFilter> {
        let mut options = vec![StatusFilter::All];
        for pod in &self.pods {
            let option = StatusFilter::Only(pod.status);
            if !options.contains(&option) {
                options.push(option);
            }
        }
        options
    }

    fn lookup(&self, name: &str) -> Result<&Pod> {
        self.get(name)
            .ok_or_else(|| FleetError::UnknownPod(name.to_string()))
    }
}

impl TryFrom<Vec<Pod>> for Fleet {
    type Error = FleetError;

    fn try_from(pods: Vec<Pod>) -> Result<Self> {
        Fleet::from_pods(pods)
    }
}

impl From<Fleet> for Vec<Pod> {
    fn from(fleet: Fleet) -> Self {
        fleet.pods
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixture() -> Fleet {
        Fleet::from_pods(vec![
            Pod::new("A", 700.0, 80.0, PodStatus::Operational),
            Pod::new("B", 900.0, 50.0, PodStatus::Docked),
            Pod::new("C", 650.0, 90.0, PodStatus::Operational),
        ])
        .unwrap()
    }

    #[test]
    fn test_initialize_names_and_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let fleet = Fleet::initialize(&mut rng);

        assert_eq!(fleet.names(), vec!["Avishkar-1", "Avishkar-2", "Avishkar-3"]);
        for pod in fleet.pods() {
            assert!((600.0..=1000.0).contains(&pod.speed_kmh));
            assert!((60.0..=100.0).contains(&pod.battery_pct));
        }
    }

    #[test]
    fn test_initialize_is_deterministic_with_seed() {
        let a = Fleet::initialize(&mut StdRng::seed_from_u64(42));
        let b = Fleet::initialize(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_initialize_reaches_every_status() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut seen = HashSet::new();
        for _ in 0..100 {
            for pod in Fleet::initialize(&mut rng).pods() {
                seen.insert(pod.status);
            }
        }
        assert_eq!(seen.len(), PodStatus::ALL.len());
    }

    #[test]
    fn test_deserialize_rejects_duplicate_names() {
        let json = r#"[
            {"name": "A", "speed_kmh": 700.0, "battery_pct": 80.0, "status": "Operational"},
            {"name": "A", "speed_kmh": 650.0, "battery_pct": 90.0, "status": "Docked"}
        ]"#;
        let err = serde_json::from_str::<Fleet>(json).unwrap_err();
        assert!(err.to_string().contains("A"));
    }

    #[test]
    fn test_deserialize_clamps_metrics() {
        let json = r#"[
            {"name": "A", "speed_kmh": 5000.0, "battery_pct": -7.0, "status": "Operational"}
        ]"#;
        let fleet: Fleet = serde_json::from_str(json).unwrap();
        let pod = fleet.get("A").unwrap();
        assert_eq!(pod.speed_kmh, 1000.0);
        assert_eq!(pod.battery_pct, 0.0);
    }

    #[test]
    fn test_serialized_fleet_reads_back() {
        let fleet = fixture();
        let json = serde_json::to_string(&fleet).unwrap();
        assert!(json.starts_with('['));
        assert_eq!(serde_json::from_str::<Fleet>(&json).unwrap(), fleet);
    }

    #[test]
    fn test_from_pods_rejects_duplicates() {
        let result = Fleet::from_pods(vec![
            Pod::new("A", 700.0, 80.0, PodStatus::Operational),
            Pod::new("A", 600.0, 70.0, PodStatus::Docked),
        ]);
        assert_eq!(result, Err(FleetError::DuplicatePod("A".into())));
    }

    #[test]
    fn test_filter_operational_by_speed() {
        let view =
            fixture().filter_and_sort(StatusFilter::Only(PodStatus::Operational), SortKey::Speed);
        let names: Vec<_> = view.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_filter_all_by_battery() {
        let view = fixture().filter_and_sort(StatusFilter::All, SortKey::Battery);
        let names: Vec<_> = view.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_filter_with_no_match_is_empty() {
        let view =
            fixture().filter_and_sort(StatusFilter::Only(PodStatus::Maintenance), SortKey::Speed);
        assert!(view.is_empty());
    }

    #[test]
    fn test_compare_unknown_pod() {
        let fleet = fixture();
        assert_eq!(
            fleet.compare("A", "Z").unwrap_err(),
            FleetError::UnknownPod("Z".into())
        );
    }

    #[test]
    fn test_status_options_first_appearance_order() {
        let options = fixture().status_options();
        assert_eq!(
            options,
            vec![
                StatusFilter::All,
                StatusFilter::Only(PodStatus::Operational),
                StatusFilter::Only(PodStatus::Docked),
            ]
        );
    }

    #[test]
    fn test_update_clamps_at_domain_edges() {
        let mut fleet = Fleet::from_pods(vec![
            Pod::new("top", 1000.0, 0.0, PodStatus::Operational),
            Pod::new("bottom", 0.0, 100.0, PodStatus::Operational),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..500 {
            fleet.update(&mut rng);
            for pod in fleet.pods() {
                assert!((0.0..=1000.0).contains(&pod.speed_kmh));
                assert!((0.0..=100.0).contains(&pod.battery_pct));
            }
        }
    }
}
