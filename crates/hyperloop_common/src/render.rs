//! Text formatting shared by the terminal dashboard and one-shot commands.

use crate::frame::ComparisonChart;
use crate::pod::{Pod, BATTERY_MAX_PCT, BATTERY_MIN_PCT};
use crate::weather::WeatherPanel;

pub const PAGE_TITLE: &str = "Avishkar Hyperloop Control Center";
pub const TRACKER_HEADER: &str = "Pod Tracker";
pub const WEATHER_HEADER: &str = "Route Weather Monitor";
pub const ENERGY_HEADER: &str = "Energy Optimization";
pub const COMPARISON_HEADER: &str = "Pod Comparison";

pub const TABLE_COLUMNS: [&str; 4] = ["Pod Name", "Speed (km/h)", "Battery (%)", "Status"];

/// Width of the text battery indicator
pub const BATTERY_BAR_WIDTH: usize = 20;

pub fn format_speed(speed_kmh: f64) -> String {
    format!("{:.2}", speed_kmh)
}

pub fn format_temperature(temperature_c: f64) -> String {
    format!("{:.1}°C", temperature_c)
}

pub fn format_humidity(humidity_pct: f64) -> String {
    format!("{:.1}%", humidity_pct)
}

/// Battery as a 0..=1 ratio for gauge widgets
pub fn battery_ratio(battery_pct: f64) -> f64 {
    (battery_pct.clamp(BATTERY_MIN_PCT, BATTERY_MAX_PCT) - BATTERY_MIN_PCT)
        / (BATTERY_MAX_PCT - BATTERY_MIN_PCT)
}

/// Bounded text indicator, e.g. `[#########-----------]  45%`
pub fn battery_bar(battery_pct: f64, width: usize) -> String {
    let filled = (battery_ratio(battery_pct) * width as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        battery_pct.clamp(BATTERY_MIN_PCT, BATTERY_MAX_PCT)
    )
}

/// Plain-text tracker table
pub fn tracker_table(rows: &[Pod]) -> String {
    let name_width = rows
        .iter()
        .map(|pod| pod.name.len())
        .chain(std::iter::once(TABLE_COLUMNS[0].len()))
        .max()
        .unwrap_or(0);

    let mut out = format!(
        "{:<nw$}  {:>12}  {:<bw$}  {}\n",
        TABLE_COLUMNS[0],
        TABLE_COLUMNS[1],
        TABLE_COLUMNS[2],
        TABLE_COLUMNS[3],
        nw = name_width,
        bw = BATTERY_BAR_WIDTH + 7,
    );

    for pod in rows {
        out.push_str(&format!(
            "{:<nw$}  {:>12}  {:<bw$}  {}\n",
            pod.name,
            format_speed(pod.speed_kmh),
            battery_bar(pod.battery_pct, BATTERY_BAR_WIDTH),
            pod.status,
            nw = name_width,
            bw = BATTERY_BAR_WIDTH + 7,
        ));
    }
    out
}

/// The three weather metrics followed by the advisory
pub fn weather_lines(panel: &WeatherPanel) -> Vec<String> {
    vec![
        format!("Weather:     {}", panel.sample.condition),
        format!("Temperature: {}", format_temperature(panel.sample.temperature_c)),
        format!("Humidity:    {}", format_humidity(panel.sample.humidity_pct)),
        panel.advisory.clone(),
    ]
}

/// One line per parameter with both pods' values
pub fn comparison_lines(chart: &ComparisonChart) -> Vec<String> {
    let mut lines = vec![chart.title.clone()];
    for (i, parameter) in chart.parameters.iter().enumerate() {
        let values: Vec<String> = chart
            .series
            .iter()
            .map(|s| format!("{} {:.2}", s.pod, s.values.get(i).copied().unwrap_or_default()))
            .collect();
        lines.push(format!("  {:<14} {}", parameter, values.join("  |  ")));
    }
    lines
}
