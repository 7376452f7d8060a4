//! Interactive TUI Dashboard for the hyperloop control center
//!
//! Every selector change or refresh is one interaction cycle: the fleet is
//! updated once and the whole frame is redrawn from the result.

use crate::source::FrameSource;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use hyperloop_common::render::{
    battery_bar, format_humidity, format_speed, format_temperature, COMPARISON_HEADER,
    ENERGY_HEADER, PAGE_TITLE, TABLE_COLUMNS, TRACKER_HEADER, WEATHER_HEADER,
};
use hyperloop_common::{ComparisonChart, DashboardFrame, DashboardQuery, PodStatus, StatusFilter};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Theme: green on black
const ACCENT: Color = Color::Rgb(0, 255, 0);
const DIM: Color = Color::Rgb(0, 68, 0);

const TABLE_BATTERY_WIDTH: usize = 10;

/// Dashboard state and data
pub struct DashboardState {
    /// Current selector values
    pub query: DashboardQuery,
    /// Last rendered frame
    pub frame: Option<DashboardFrame>,
    pub last_error: Option<String>,
    pub last_update: Instant,
    /// A selector changed; run a cycle on the next loop pass
    pub refresh_requested: bool,
    pub should_quit: bool,
    pub source_label: &'static str,
}

impl DashboardState {
    pub fn new(source_label: &'static str) -> Self {
        Self {
            query: DashboardQuery::default(),
            frame: None,
            last_error: None,
            last_update: Instant::now(),
            refresh_requested: true,
            should_quit: false,
            source_label,
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('f') => self.next_filter(),
            KeyCode::Char('s') => {
                self.query.sort_key = self.query.sort_key.toggled();
                self.refresh_requested = true;
            }
            KeyCode::Char('a') => self.next_pod(true),
            KeyCode::Char('b') => self.next_pod(false),
            KeyCode::Char('r') => self.refresh_requested = true,
            _ => {}
        }
    }

    pub fn apply_frame(&mut self, frame: DashboardFrame) {
        // Keep the selectors pointing at what the frame actually compared
        if let Some(chart) = &frame.comparison {
            if let [a, b] = chart.series.as_slice() {
                self.query.pod_a = Some(a.pod.clone());
                self.query.pod_b = Some(b.pod.clone());
            }
        }
        self.frame = Some(frame);
        self.last_error = None;
        self.last_update = Instant::now();
    }

    fn next_filter(&mut self) {
        let options = match &self.frame {
            Some(frame) => frame.tracker.status_options.clone(),
            None => return,
        };
        let pos = options.iter().position(|o| *o == self.query.status_filter);
        let next = match pos {
            Some(i) => options[(i + 1) % options.len()],
            None => StatusFilter::All,
        };
        self.query.status_filter = next;
        self.refresh_requested = true;
    }

    fn next_pod(&mut self, first: bool) {
        let names = match &self.frame {
            Some(frame) if !frame.pod_names.is_empty() => frame.pod_names.clone(),
            _ => return,
        };
        let slot = if first {
            &mut self.query.pod_a
        } else {
            &mut self.query.pod_b
        };
        let pos = slot
            .as_ref()
            .and_then(|current| names.iter().position(|n| n == current));
        let next = match pos {
            Some(i) => names[(i + 1) % names.len()].clone(),
            None => names[0].clone(),
        };
        *slot = Some(next);
        self.refresh_requested = true;
    }
}

fn status_color(status: PodStatus) -> Color {
    match status {
        PodStatus::Operational => ACCENT,
        PodStatus::Maintenance => Color::Yellow,
        PodStatus::Docked => Color::Gray,
    }
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
}

/// Draw the dashboard UI
pub fn draw(f: &mut Frame, state: &DashboardState) {
    let tracker_height = state
        .frame
        .as_ref()
        .map(|frame| frame.tracker.rows.len() as u16 + 5)
        .unwrap_or(6);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),              // Header
            Constraint::Length(tracker_height), // Pod tracker
            Constraint::Length(7),              // Weather + energy
            Constraint::Min(10),                // Comparison chart
            Constraint::Length(3),              // Footer
        ])
        .split(f.size());

    draw_header(f, chunks[0], state);

    let Some(frame) = &state.frame else {
        let loading = Paragraph::new(state.last_error.as_deref().unwrap_or("Loading..."))
            .style(Style::default().fg(ACCENT))
            .block(panel(TRACKER_HEADER));
        f.render_widget(loading, chunks[1]);
        draw_footer(f, chunks[4], state);
        return;
    };

    draw_tracker(f, chunks[1], frame);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    draw_weather(f, middle[0], frame);
    draw_energy(f, middle[1], frame);

    draw_comparison(f, chunks[3], frame.comparison.as_ref());
    draw_footer(f, chunks[4], state);
}

/// Draw header with title and cycle info
fn draw_header(f: &mut Frame, area: Rect, state: &DashboardState) {
    let cycle = state
        .frame
        .as_ref()
        .map(|frame| format!("cycle {}", frame.cycle))
        .unwrap_or_else(|| "connecting".to_string());
    let time_str = chrono::Local::now().format("%H:%M:%S").to_string();

    let header = Paragraph::new(Line::from(vec![
        Span::styled(PAGE_TITLE, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::raw("  |  "),
        Span::styled(
            format!("{} · {} · {}", state.source_label, cycle, time_str),
            Style::default().fg(Color::Gray),
        ),
    ]))
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(ACCENT)))
    .alignment(Alignment::Center);

    f.render_widget(header, area);
}

fn draw_tracker(f: &mut Frame, area: Rect, frame: &DashboardFrame) {
    let header = Row::new(TABLE_COLUMNS.iter().map(|c| Cell::from(*c)))
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));

    let rows = frame.tracker.rows.iter().map(|pod| {
        Row::new(vec![
            Cell::from(pod.name.clone()),
            Cell::from(format_speed(pod.speed_kmh)),
            Cell::from(battery_bar(pod.battery_pct, TABLE_BATTERY_WIDTH)),
            Cell::from(Span::styled(
                pod.status.label(),
                Style::default().fg(status_color(pod.status)),
            )),
        ])
    });

    let title = format!(
        "{} · filter: {} · sort: {} ↓",
        TRACKER_HEADER,
        frame.tracker.status_filter,
        frame.tracker.sort_key.column_label()
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(TABLE_BATTERY_WIDTH as u16 + 8),
            Constraint::Min(12),
        ],
    )
    .header(header)
    .block(panel(&title));

    f.render_widget(table, area);
}

fn draw_weather(f: &mut Frame, area: Rect, frame: &DashboardFrame) {
    let sample = &frame.weather.sample;
    let metric = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", label), Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        ])
    };

    let lines = vec![
        metric("Weather", sample.condition.to_string()),
        metric("Temperature", format_temperature(sample.temperature_c)),
        metric("Humidity", format_humidity(sample.humidity_pct)),
        Line::from(Span::styled(
            format!("  ⚠ {}", frame.weather.advisory),
            Style::default().fg(Color::Yellow),
        )),
    ];

    f.render_widget(Paragraph::new(lines).block(panel(WEATHER_HEADER)), area);
}

fn draw_energy(f: &mut Frame, area: Rect, frame: &DashboardFrame) {
    let tip = Paragraph::new(format!("ℹ {}", frame.energy_tip))
        .style(Style::default().fg(ACCENT))
        .wrap(Wrap { trim: true })
        .block(panel(ENERGY_HEADER));
    f.render_widget(tip, area);
}

fn draw_comparison(f: &mut Frame, area: Rect, chart: Option<&ComparisonChart>) {
    let Some(chart) = chart else {
        let empty = Paragraph::new("No pods to compare").block(panel(COMPARISON_HEADER));
        f.render_widget(empty, area);
        return;
    };

    let legend: Vec<Span> = chart
        .series
        .iter()
        .flat_map(|s| {
            vec![
                Span::styled("■ ", Style::default().fg(series_color(&s.color))),
                Span::raw(format!("{}  ", s.pod)),
            ]
        })
        .collect();

    let title = format!("{} · {}", COMPARISON_HEADER, chart.title);
    let mut bar_chart = BarChart::default()
        .block(panel(&title).title_bottom(Line::from(legend)))
        .bar_width(9)
        .bar_gap(1)
        .group_gap(4)
        .value_style(Style::default().fg(Color::Black).bg(ACCENT));

    for (i, parameter) in chart.parameters.iter().enumerate() {
        let bars: Vec<Bar> = chart
            .series
            .iter()
            .map(|s| {
                let value = s.values.get(i).copied().unwrap_or_default();
                Bar::default()
                    .value(value.round().max(0.0) as u64)
                    .text_value(format!("{:.1}", value))
                    .style(Style::default().fg(series_color(&s.color)))
            })
            .collect();

        bar_chart = bar_chart.data(
            BarGroup::default()
                .label(Line::from(parameter.clone()))
                .bars(&bars),
        );
    }

    f.render_widget(bar_chart, area);
}

/// `#rrggbb` series color, falling back to the accent
fn series_color(hex: &str) -> Color {
    hex.parse().unwrap_or(ACCENT)
}

/// Draw footer with keyboard shortcuts
fn draw_footer(f: &mut Frame, area: Rect, state: &DashboardState) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Black).bg(ACCENT));
    let mut spans = vec![
        key(" q "),
        Span::raw(" Quit  "),
        key(" f "),
        Span::raw(" Filter  "),
        key(" s "),
        Span::raw(" Sort  "),
        key(" a/b "),
        Span::raw(" Compare  "),
        key(" r "),
        Span::raw(" Refresh  "),
    ];
    if let Some(err) = &state.last_error {
        spans.push(Span::styled(format!(" {}", err), Style::default().fg(Color::Red)));
    }

    let footer = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(DIM)));
    f.render_widget(footer, area);
}

/// Run the dashboard TUI
pub async fn run(mut source: FrameSource, refresh: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = DashboardState::new(source.describe());
    let result = event_loop(&mut terminal, &mut source, &mut state, refresh).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    source.close().await?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    source: &mut FrameSource,
    state: &mut DashboardState,
    refresh: Duration,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        if state.refresh_requested || state.last_update.elapsed() >= refresh {
            state.refresh_requested = false;
            match source.next_frame(&state.query).await {
                Ok(frame) => state.apply_frame(frame),
                Err(e) => {
                    state.last_error = Some(e.to_string());
                    state.last_update = Instant::now();
                }
            }
        }

        terminal.draw(|f| draw(f, state))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    state.handle_key(key.code);
                }
            }
        }

        if state.should_quit {
            return Ok(());
        }
    }
}
