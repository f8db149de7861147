//! kitchnsink inspector
//!
//! Debug helper for the kitchnsink status bar: merges `sink.toml` with the
//! fragments its `include` patterns match, and captures the bar strip from
//! a full-screen screenshot.

pub mod capture;
pub mod config;
pub mod inspect;
pub mod logging;
pub mod report;

pub use capture::{BarCapture, CaptureError, GrimGrabber, ScreenGrabber, ScreenshotArtifact};
pub use config::{ConfigError, ConfigLoader, MergeOutcome, SinkConfig, SinkPaths};
pub use inspect::{run_inspect, InspectOptions, InspectOutcome};
