//! One user session: a fleet, its random source, and the interaction cycle.

use crate::error::{FleetError, Result};
use crate::fleet::Fleet;
use crate::frame::{ComparisonChart, DashboardFrame, TrackerView};
use crate::query::{DashboardQuery, SortKey, StatusFilter};
use crate::tips::random_energy_tip;
use crate::weather::{sample_weather, WeatherPanel};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

pub struct Session {
    id: Uuid,
    fleet: Fleet,
    rng: StdRng,
    cycle: u64,
    created_at: DateTime<Utc>,
    last_seen: Instant,
}

impl Session {
    /// New session with a freshly initialized fleet. A seed makes every
    /// draw of the session reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let fleet = Fleet::initialize(&mut rng);
        Self::from_parts(fleet, rng)
    }

    /// Session over a caller-provided fleet
    pub fn with_fleet(fleet: Fleet, seed: u64) -> Self {
        Self::from_parts(fleet, StdRng::seed_from_u64(seed))
    }

    fn from_parts(fleet: Fleet, rng: StdRng) -> Self {
        let id = Uuid::new_v4();
        info!("  Session {} started with {} pods", id, fleet.len());
        Self {
            id,
            fleet,
            rng,
            cycle: 0,
            created_at: Utc::now(),
            last_seen: Instant::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_seen(&self) -> Instant {
        self.last_seen
    }

    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    /// Run one interaction cycle: a single fleet update, then a full frame.
    ///
    /// Comparison selectors are checked before the update, so a rejected
    /// query leaves the fleet and the cycle counter untouched.
    pub fn cycle(&mut self, query: &DashboardQuery) -> Result<DashboardFrame> {
        let pair = self.resolve_pair(query)?;

        self.fleet.update(&mut self.rng);
        self.cycle += 1;
        self.touch();
        debug!("  Session {} cycle {}", self.id, self.cycle);

        let comparison = match pair {
            Some((a, b)) => Some(ComparisonChart::build(&self.fleet, &a, &b)?),
            None => None,
        };

        Ok(DashboardFrame {
            session_id: self.id,
            cycle: self.cycle,
            generated_at: Utc::now(),
            tracker: TrackerView::build(&self.fleet, query.status_filter, query.sort_key),
            pod_names: self.fleet.names(),
            weather: WeatherPanel::from_sample(sample_weather(&mut self.rng)),
            energy_tip: random_energy_tip(&mut self.rng).to_string(),
            comparison,
        })
    }

    /// Tracker table without advancing the simulation
    pub fn view(&mut self, status_filter: StatusFilter, sort_key: SortKey) -> TrackerView {
        self.touch();
        TrackerView::build(&self.fleet, status_filter, sort_key)
    }

    /// Comparison chart without advancing the simulation
    pub fn compare(&mut self, pod_a: &str, pod_b: &str) -> Result<ComparisonChart> {
        self.touch();
        ComparisonChart::build(&self.fleet, pod_a, pod_b)
    }

    /// Fill in default selectors: first pod vs second pod (or the first pod
    /// twice when there is only one).
    fn resolve_pair(&self, query: &DashboardQuery) -> Result<Option<(String, String)>> {
        let names = self.fleet.names();
        let default_a = names.first().cloned();
        let default_b = names.get(1).cloned().or_else(|| default_a.clone());

        let (a, b) = match (query.pod_a.clone().or(default_a), query.pod_b.clone().or(default_b)) {
            (Some(a), Some(b)) => (a, b),
            (None, None) => return Ok(None),
            (Some(name), None) | (None, Some(name)) => {
                return Err(FleetError::UnknownPod(name));
            }
        };

        for name in [&a, &b] {
            if !self.fleet.contains(name) {
                return Err(FleetError::UnknownPod(name.clone()));
            }
        }
        Ok(Some((a, b)))
    }
}
