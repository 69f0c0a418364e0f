//! iotdash - a terminal dashboard for an IoT temperature and light controller.
//!
//! iotdash polls a controller's REST API for recent temperature samples, draws
//! them as a scrolling line chart, and pushes new device settings back.
//!
//! # Features
//!
//! - Live temperature chart over an adjustable window of recent samples
//! - Settings form for target temperature, light level and light duration
//! - Current device state panel
//! - Out-of-order responses resolved in favor of the latest request
//! - Gruvbox color themes
//!
//! # Example
//!
//! ```ignore
//! use iotdash::api::ControllerClient;
//! use std::time::Duration;
//!
//! let client = ControllerClient::new("http://localhost:8000", Duration::from_secs(10))?;
//! let samples = client.fetch_graph(10).await?;
//! println!("Latest: {:?}", samples.last());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod api;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod ui;
pub mod worker;

pub use error::{DashError, Result};
