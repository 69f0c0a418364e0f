//! Application state and logic.

use std::time::{Duration, Instant};

use crate::config::Config;
use crate::dashboard::{Dashboard, FetchRequest, GraphOutcome};
use crate::worker::{ApiEvent, Dispatcher};

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Dashboard session.
    pub dashboard: Dashboard,
    /// Request dispatcher.
    dispatcher: Dispatcher,
    /// Status message.
    pub status: String,
    /// Current theme.
    pub theme: Theme,
    /// Help popup.
    pub show_help: bool,
    /// Graph polling interval.
    refresh: Option<Duration>,
    /// When the last graph fetch was issued.
    last_fetch: Instant,
}

impl App {
    /// Create a new application instance.
    pub fn new(config: &Config, dispatcher: Dispatcher) -> Self {
        let mut app = Self {
            dashboard: Dashboard::new(config.initial_window, config.max_window),
            status: String::new(),
            dispatcher,
            theme: Theme::GruvboxDark,
            show_help: false,
            refresh: config.refresh,
            last_fetch: Instant::now(),
        };
        app.idle_status();
        app
    }

    /// Issue the initial graph fetch and device read.
    pub fn start(&mut self) {
        tracing::info!("Starting session against {}", self.dispatcher.base_url());
        self.refetch();
        self.dispatcher.load_device_settings();
    }

    fn dispatch_fetch(&mut self, request: FetchRequest) {
        self.dispatcher.fetch_graph(request);
        self.last_fetch = Instant::now();
    }

    /// Fetch the graph for the current window.
    pub fn refetch(&mut self) {
        let request = self.dashboard.request_fetch();
        self.dispatch_fetch(request);
    }

    /// Move the window control.
    pub fn step_window(&mut self, delta: isize) {
        if let Some(request) = self.dashboard.step_window(delta) {
            self.status = format!("Window: {}", self.dashboard.window().label());
            self.dispatch_fetch(request);
        }
    }

    /// Re-read the controller's current settings.
    pub fn refresh_device(&mut self) {
        self.dispatcher.load_device_settings();
        self.status = "Reading device settings...".to_string();
    }

    fn idle_status(&mut self) {
        self.status = format!("Controller: {}", self.dispatcher.base_url());
    }

    /// Open the settings form.
    pub fn open_settings(&mut self) {
        self.dashboard.form.open();
        self.status = "Editing settings".to_string();
    }

    /// Close the settings form without sending.
    pub fn cancel_settings(&mut self) {
        self.dashboard.form.close();
        self.status = "Settings unchanged".to_string();
    }

    /// Submit the settings form.
    pub fn submit_settings(&mut self) {
        let settings = self.dashboard.submit_settings();
        self.dispatcher.submit_settings(settings);
        self.status = "Sending settings...".to_string();
    }

    /// Dismiss the notice popup.
    pub fn dismiss_notice(&mut self) {
        self.dashboard.dismiss_notice();
    }

    /// Toggle the help popup.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }

    /// Whether a polling fetch should go out at `now`.
    ///
    /// Polls wait for the previous graph reply; a new request would make the
    /// one in transit stale.
    pub fn refresh_due(&self, now: Instant) -> bool {
        self.dashboard.in_flight() == 0
            && self
                .refresh
                .is_some_and(|every| now.duration_since(self.last_fetch) >= every)
    }

    /// Issue a polling fetch if one is due.
    pub fn tick(&mut self) {
        if self.refresh_due(Instant::now()) {
            tracing::debug!("Polling graph");
            self.refetch();
        }
    }

    /// Apply every completion that has arrived.
    pub fn drain_events(&mut self) {
        while let Some(event) = self.dispatcher.try_next() {
            self.handle_event(event);
        }
    }

    /// Apply one completion.
    pub fn handle_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Graph { seq, size, result } => {
                if self.dashboard.apply_graph(seq, result) == GraphOutcome::Applied {
                    let shown = self.dashboard.chart().map_or(0, |c| c.len());
                    self.status = format!("Showing {} of {} samples", shown, size);
                }
            },
            ApiEvent::SettingsSubmitted(result) => {
                if self.dashboard.apply_settings_result(result) {
                    self.status = "Settings sent".to_string();
                    self.dispatcher.load_device_settings();
                } else {
                    self.idle_status();
                }
            },
            ApiEvent::DeviceSettings(result) => {
                if self.dashboard.apply_device_settings(result) {
                    self.status = "Device settings loaded".to_string();
                } else {
                    self.idle_status();
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ControllerClient, DeviceSettings, Sample};
    use crate::DashError;

    fn app(runtime: &tokio::runtime::Runtime, refresh_secs: u64) -> App {
        // Nothing listens on port 9; requests fail in the background.
        let config = Config::new("http://127.0.0.1:9", 10, 100, refresh_secs, 1).unwrap();
        let client = ControllerClient::new(&config.api_url, config.timeout).unwrap();
        App::new(&config, Dispatcher::new(client, runtime.handle().clone()))
    }

    #[test]
    fn test_theme_cycle() {
        assert_eq!(Theme::GruvboxDark.next(), Theme::GruvboxLight);
        assert_eq!(Theme::GruvboxLight.next().name(), "Gruvbox Dark");
    }

    #[test]
    fn test_refresh_due_only_when_enabled() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let later = Instant::now() + Duration::from_secs(60);

        assert!(!app(&runtime, 0).refresh_due(later));
        assert!(app(&runtime, 5).refresh_due(later));
        assert!(!app(&runtime, 120).refresh_due(later));
    }

    fn samples(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|i| Sample {
                datetime: format!("2024-05-01T12:{:02}:00", i),
                temperature: 21.0 + i as f64,
                presence: None,
            })
            .collect()
    }

    #[test]
    fn test_poll_waits_for_reply_in_transit() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&runtime, 1);

        let request = app.dashboard.request_fetch();
        app.dispatch_fetch(request);
        app.last_fetch = Instant::now() - Duration::from_secs(5);

        // Interval elapsed but the first reply has not arrived yet
        assert!(!app.refresh_due(Instant::now()));
        app.tick();
        assert_eq!(app.dashboard.in_flight(), 1);

        app.handle_event(ApiEvent::Graph {
            seq: request.seq,
            size: request.size,
            result: Ok(samples(3)),
        });
        assert_eq!(app.dashboard.chart().map(|c| c.len()), Some(3));
        assert_eq!(app.dashboard.in_flight(), 0);

        // Once settled, the overdue poll goes out
        app.tick();
        assert_eq!(app.dashboard.in_flight(), 1);
    }

    #[test]
    fn test_graph_event_updates_status() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&runtime, 0);
        let request = app.dashboard.request_fetch();

        app.handle_event(ApiEvent::Graph {
            seq: request.seq,
            size: request.size,
            result: Ok(samples(1)),
        });

        assert_eq!(app.status, "Showing 1 of 10 samples");
    }

    #[test]
    fn test_step_window_reports_label() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&runtime, 0);

        app.step_window(10);
        assert_eq!(app.status, "Window: 0-20");
        assert_eq!(app.dashboard.in_flight(), 1);
    }

    #[test]
    fn test_pending_status_clears_on_reply() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&runtime, 0);
        let idle = app.status.clone();

        app.refresh_device();
        app.handle_event(ApiEvent::DeviceSettings(Ok(DeviceSettings::default())));
        assert_eq!(app.status, "Device settings loaded");

        app.refresh_device();
        app.handle_event(ApiEvent::DeviceSettings(Err(DashError::status(
            503,
            "http://127.0.0.1:9/settings",
            "",
        ))));
        assert_eq!(app.status, idle);

        app.open_settings();
        app.submit_settings();
        assert_eq!(app.status, "Sending settings...");
        app.handle_event(ApiEvent::SettingsSubmitted(Err(DashError::status(
            500,
            "http://127.0.0.1:9/settings",
            "",
        ))));
        assert_eq!(app.status, idle);
        assert!(app.dashboard.notice().is_none());
    }
}
