//! Dashboard session - the state behind one run of the viewer.
//!
//! [`Dashboard`] owns the series buffer, the window control, the chart view,
//! the settings form and the device panel. It never performs I/O: operations
//! that need the network return a request for the caller to dispatch, and
//! completions are handed back through the `apply_*` methods.
//!
//! Graph fetches are stamped with a sequence number. Only the completion of
//! the most recently issued fetch is applied, so overlapping requests settle
//! on the last one asked for regardless of arrival order.

mod chart;
mod settings_form;
mod window;

pub use chart::{window_view, ChartView, X_AXIS_TITLE, Y_AXIS_TITLE};
pub use settings_form::{SettingsField, SettingsForm};
pub use window::{WindowControl, DEFAULT_WINDOW, HISTORY_LIMIT, MIN_WINDOW};

use crate::api::{DeviceSettings, Sample, Settings};
use crate::error::Result;

/// Confirmation text after the controller accepts new settings.
pub const SETTINGS_SAVED: &str = "Settings updated successfully!";

/// A graph fetch the caller should issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    /// Sequence number to hand back with the completion.
    pub seq: u64,
    /// Window size to request.
    pub size: usize,
}

/// What happened to a graph completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphOutcome {
    /// Buffer replaced and chart redrawn.
    Applied,
    /// A newer fetch was issued; completion dropped.
    Stale,
    /// The fetch failed; buffer and chart untouched.
    Failed,
}

/// A modal message the user must dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Popup title.
    pub title: String,
    /// Message body.
    pub message: String,
}

/// Session state.
#[derive(Debug)]
pub struct Dashboard {
    series: Vec<Sample>,
    window: WindowControl,
    chart: Option<ChartView>,
    latest_seq: u64,
    in_flight: usize,
    device: Option<DeviceSettings>,
    notice: Option<Notice>,
    /// Settings form.
    pub form: SettingsForm,
}

impl Dashboard {
    /// Create a session with the given window settings.
    pub fn new(initial_window: usize, max_window: usize) -> Self {
        Self {
            series: Vec::new(),
            window: WindowControl::new(initial_window, max_window),
            chart: None,
            latest_seq: 0,
            in_flight: 0,
            device: None,
            notice: None,
            form: SettingsForm::new(),
        }
    }

    /// Current series buffer.
    pub fn series(&self) -> &[Sample] {
        &self.series
    }

    /// Window control.
    pub fn window(&self) -> &WindowControl {
        &self.window
    }

    /// Chart view, once created.
    pub fn chart(&self) -> Option<&ChartView> {
        self.chart.as_ref()
    }

    /// Last reported controller state.
    pub fn device(&self) -> Option<&DeviceSettings> {
        self.device.as_ref()
    }

    /// Pending notice.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Number of graph fetches issued but not yet completed.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Issue a fetch for the current window size.
    pub fn request_fetch(&mut self) -> FetchRequest {
        self.latest_seq += 1;
        self.in_flight += 1;
        FetchRequest {
            seq: self.latest_seq,
            size: self.window.value(),
        }
    }

    /// Set the window size.
    ///
    /// Redraws from the current buffer and returns the fetch to issue, or
    /// `None` if the value did not change.
    pub fn set_window(&mut self, size: usize) -> Option<FetchRequest> {
        if !self.window.set(size) {
            return None;
        }
        self.render();
        Some(self.request_fetch())
    }

    /// Move the window size by `delta`; see [`Dashboard::set_window`].
    pub fn step_window(&mut self, delta: isize) -> Option<FetchRequest> {
        if !self.window.step(delta) {
            return None;
        }
        self.render();
        Some(self.request_fetch())
    }

    /// Apply a graph completion.
    pub fn apply_graph(&mut self, seq: u64, result: Result<Vec<Sample>>) -> GraphOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);

        if seq != self.latest_seq {
            tracing::debug!(
                "Dropping stale graph response #{} (latest #{})",
                seq,
                self.latest_seq
            );
            return GraphOutcome::Stale;
        }

        match result {
            Ok(samples) => {
                tracing::debug!("Graph response #{}: {} samples", seq, samples.len());
                self.series = samples;
                self.render();
                GraphOutcome::Applied
            },
            Err(e) => {
                tracing::error!("Error fetching data: {}", e);
                GraphOutcome::Failed
            },
        }
    }

    fn render(&mut self) {
        let (labels, temperatures) = window_view(&self.series, self.window.value());
        let presence = self.series.last().and_then(|s| s.presence);

        match self.chart.as_mut() {
            Some(chart) => chart.update(labels, temperatures),
            None => self.chart = Some(ChartView::new(labels, temperatures)),
        }
        if let Some(chart) = self.chart.as_mut() {
            chart.set_presence(presence);
        }
    }

    /// Close the form and return the settings to send.
    pub fn submit_settings(&mut self) -> Settings {
        self.form.submit()
    }

    /// Apply the reply to a settings submission. Returns `true` on success.
    ///
    /// Success raises a confirmation notice; failure is only logged.
    pub fn apply_settings_result(&mut self, result: Result<serde_json::Value>) -> bool {
        match result {
            Ok(reply) => {
                tracing::info!("Settings accepted: {}", reply);
                if let Ok(device) = serde_json::from_value::<DeviceSettings>(reply) {
                    self.device = Some(device);
                }
                self.notice = Some(Notice {
                    title: "Settings".to_string(),
                    message: SETTINGS_SAVED.to_string(),
                });
                true
            },
            Err(e) => {
                tracing::error!("Error updating settings: {}", e);
                false
            },
        }
    }

    /// Apply a device-settings read. Returns `true` on success.
    pub fn apply_device_settings(&mut self, result: Result<DeviceSettings>) -> bool {
        match result {
            Ok(device) => {
                self.device = Some(device);
                true
            },
            Err(e) => {
                tracing::warn!("Error reading device settings: {}", e);
                false
            },
        }
    }

    /// Dismiss the pending notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, 100)
    }
}
