//! Shared types and simulation core for the Avishkar hyperloop control center.
//!
//! Pure data functions live here (fleet update, filtering, comparison,
//! weather and tips); the daemon and the control client only call them and
//! format the results.

pub mod error;
pub mod fleet;
pub mod frame;
pub mod pod;
pub mod query;
pub mod render;
pub mod session;
pub mod tips;
pub mod weather;

pub use error::FleetError;
pub use fleet::{Fleet, PodMetrics};
pub use frame::{ChartSeries, ComparisonChart, DashboardFrame, TrackerView};
pub use pod::{Pod, PodStatus};
pub use query::{DashboardQuery, SortKey, StatusFilter};
pub use session::Session;
pub use tips::random_energy_tip;
pub use weather::{sample_weather, speed_limit_for, WeatherCondition, WeatherPanel, WeatherSample};

/// Version shared by the daemon and the control client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default daemon address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:7870";
