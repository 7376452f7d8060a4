//! Route weather sampling and the derived speed advisory.

use crate::error::FleetError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recommended limits (km/h)
pub const CLEAR_SPEED_LIMIT_KMH: u32 = 1000;
pub const REDUCED_SPEED_LIMIT_KMH: u32 = 700;

pub const TEMPERATURE_RANGE_C: (f64, f64) = (20.0, 35.0);
pub const HUMIDITY_RANGE_PCT: (f64, f64) = (40.0, 90.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    Rain,
    Cloudy,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 3] = [
        WeatherCondition::Clear,
        WeatherCondition::Rain,
        WeatherCondition::Cloudy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Cloudy => "Cloudy",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WeatherCondition {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeatherCondition::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FleetError::InvalidCondition(s.to_string()))
    }
}

/// One render's worth of weather. Not stored anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub condition: WeatherCondition,
    pub temperature_c: f64,
    pub humidity_pct: f64,
}

/// Weather widget content: the sample plus its advisory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPanel {
    pub sample: WeatherSample,
    pub speed_limit_kmh: u32,
    pub advisory: String,
}

impl WeatherPanel {
    pub fn from_sample(sample: WeatherSample) -> Self {
        let speed_limit_kmh = speed_limit_for(sample.condition);
        Self {
            sample,
            speed_limit_kmh,
            advisory: speed_limit_advisory(speed_limit_kmh),
        }
    }
}

pub fn sample_weather<R: Rng + ?Sized>(rng: &mut R) -> WeatherSample {
    WeatherSample {
        condition: WeatherCondition::ALL[rng.gen_range(0..WeatherCondition::ALL.len())],
        temperature_c: rng.gen_range(TEMPERATURE_RANGE_C.0..=TEMPERATURE_RANGE_C.1),
        humidity_pct: rng.gen_range(HUMIDITY_RANGE_PCT.0..=HUMIDITY_RANGE_PCT.1),
    }
}

/// Full speed only in clear weather.
pub fn speed_limit_for(condition: WeatherCondition) -> u32 {
    match condition {
        WeatherCondition::Clear => CLEAR_SPEED_LIMIT_KMH,
        WeatherCondition::Rain | WeatherCondition::Cloudy => REDUCED_SPEED_LIMIT_KMH,
    }
}

pub fn speed_limit_advisory(speed_limit_kmh: u32) -> String {
    format!("Recommended Speed Limit: {} km/h", speed_limit_kmh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_speed_limits() {
        assert_eq!(speed_limit_for(WeatherCondition::Clear), 1000);
        assert_eq!(speed_limit_for(WeatherCondition::Rain), 700);
        assert_eq!(speed_limit_for(WeatherCondition::Cloudy), 700);
    }

    #[test]
    fn test_samples_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let sample = sample_weather(&mut rng);
            assert!((20.0..=35.0).contains(&sample.temperature_c));
            assert!((40.0..=90.0).contains(&sample.humidity_pct));
        }
    }

    #[test]
    fn test_every_condition_is_reachable() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..300 {
            seen.insert(sample_weather(&mut rng).condition);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_panel_advisory() {
        let panel = WeatherPanel::from_sample(WeatherSample {
            condition: WeatherCondition::Rain,
            temperature_c: 24.0,
            humidity_pct: 80.0,
        });
        assert_eq!(panel.speed_limit_kmh, 700);
        assert_eq!(panel.advisory, "Recommended Speed Limit: 700 km/h");
    }

    #[test]
    fn test_condition_parse() {
        assert_eq!("clear".parse::<WeatherCondition>(), Ok(WeatherCondition::Clear));
        assert!("Snow".parse::<WeatherCondition>().is_err());
    }
}
