//! Background request dispatch.
//!
//! Requests run as tasks on a tokio runtime. Each completion is posted back
//! over a channel and picked up by the UI loop between frames, so all session
//! state stays on the UI thread.

use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::{ControllerClient, DeviceSettings, Sample, Settings};
use crate::dashboard::FetchRequest;
use crate::error::Result;

/// A completed request.
#[derive(Debug)]
pub enum ApiEvent {
    /// `GET /graph` finished.
    Graph {
        /// Sequence number of the request.
        seq: u64,
        /// Requested window size.
        size: usize,
        /// Samples or the failure.
        result: Result<Vec<Sample>>,
    },
    /// `PUT /settings` finished.
    SettingsSubmitted(Result<Value>),
    /// `GET /settings` finished.
    DeviceSettings(Result<DeviceSettings>),
}

/// Spawns controller requests and collects their completions.
#[derive(Debug)]
pub struct Dispatcher {
    client: ControllerClient,
    runtime: Handle,
    tx: UnboundedSender<ApiEvent>,
    rx: UnboundedReceiver<ApiEvent>,
}

impl Dispatcher {
    /// Create a dispatcher that spawns onto `runtime`.
    pub fn new(client: ControllerClient, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            runtime,
            tx,
            rx,
        }
    }

    /// Controller base URL.
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Spawn a graph fetch.
    pub fn fetch_graph(&self, request: FetchRequest) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.fetch_graph(request.size).await;
            post(
                &tx,
                ApiEvent::Graph {
                    seq: request.seq,
                    size: request.size,
                    result,
                },
            );
        });
    }

    /// Spawn a settings submission.
    pub fn submit_settings(&self, settings: Settings) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.put_settings(&settings).await;
            post(&tx, ApiEvent::SettingsSubmitted(result));
        });
    }

    /// Spawn a read of the controller's current settings.
    pub fn load_device_settings(&self) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.device_settings().await;
            post(&tx, ApiEvent::DeviceSettings(result));
        });
    }

    /// Next completion, if one is ready.
    pub fn try_next(&mut self) -> Option<ApiEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next completion.
    pub async fn next_event(&mut self) -> Option<ApiEvent> {
        self.rx.recv().await
    }
}

fn post(tx: &UnboundedSender<ApiEvent>, event: ApiEvent) {
    if tx.send(event).is_err() {
        tracing::debug!("Dispatcher dropped before request completed");
    }
}
