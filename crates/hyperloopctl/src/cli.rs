//! Command-line definition for hyperloopctl.

use clap::{Parser, Subcommand};
use hyperloop_common::{DashboardQuery, SortKey, StatusFilter, DEFAULT_BIND_ADDR};

#[derive(Parser, Debug)]
#[command(name = "hyperloopctl")]
#[command(about = "Avishkar Hyperloop Control Center", long_about = None)]
#[command(version = hyperloop_common::VERSION)]
pub struct Cli {
    /// Daemon base URL
    #[arg(long, global = true, default_value_t = format!("http://{}", DEFAULT_BIND_ADDR))]
    pub url: String,

    /// Simulate in-process instead of talking to hyperloopd
    #[arg(long, global = true)]
    pub local: bool,

    /// Seed for local simulation (reproducible fleets)
    #[arg(long, global = true, requires = "local")]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive dashboard
    Dashboard {
        /// Seconds between automatic update cycles
        #[arg(long, default_value_t = 2)]
        refresh_secs: u64,
    },

    /// Run one update cycle and print the pod tracker
    Status {
        /// "All", "Operational", "Maintenance" or "Docked"
        #[arg(long, default_value = "All")]
        status: StatusFilter,

        /// "speed_kmh" or "battery_pct" (descending)
        #[arg(long, default_value = "speed_kmh")]
        sort: SortKey,
    },

    /// Compare two pods side by side
    Compare {
        pod_a: String,
        pod_b: String,
    },

    /// Sample route weather and the recommended speed limit
    Weather,

    /// Show an energy optimization tip
    Tip,

    /// Show daemon health
    Health,
}

impl Commands {
    pub fn query(&self) -> DashboardQuery {
        match self {
            Commands::Status { status, sort } => DashboardQuery::default()
                .with_filter(*status)
                .with_sort(*sort),
            _ => DashboardQuery::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperloop_common::PodStatus;

    #[test]
    fn test_status_args() {
        let cli = Cli::parse_from([
            "hyperloopctl", "status", "--status", "Operational", "--sort", "battery",
        ]);
        let query = cli.command.query();
        assert_eq!(query.status_filter, StatusFilter::Only(PodStatus::Operational));
        assert_eq!(query.sort_key, SortKey::Battery);
        assert!(!cli.local);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["hyperloopctl", "status"]);
        assert_eq!(cli.url, "http://127.0.0.1:7870");
        assert_eq!(cli.command.query(), DashboardQuery::default());
    }

    #[test]
    fn test_local_seed() {
        let cli = Cli::parse_from(["hyperloopctl", "--local", "--seed", "9", "dashboard"]);
        assert!(cli.local);
        assert_eq!(cli.seed, Some(9));
        assert!(matches!(cli.command, Commands::Dashboard { refresh_secs: 2 }));
    }

    #[test]
    fn test_seed_requires_local() {
        assert!(Cli::try_parse_from(["hyperloopctl", "--seed", "9", "tip"]).is_err());
    }

    #[test]
    fn test_bad_status_rejected() {
        assert!(Cli::try_parse_from(["hyperloopctl", "status", "--status", "Flying"]).is_err());
    }

    #[test]
    fn test_compare_args() {
        let cli = Cli::parse_from(["hyperloopctl", "compare", "Avishkar-1", "Avishkar-3"]);
        match cli.command {
            Commands::Compare { pod_a, pod_b } => {
                assert_eq!(pod_a, "Avishkar-1");
                assert_eq!(pod_b, "Avishkar-3");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
