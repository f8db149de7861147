//! The `inspect` command
//!
//! Two phases, each isolated from the other's errors:
//! 1. Configuration: load, merge, summarize (optionally dump JSON)
//! 2. Capture: crop the bar out of a full-screen capture
//!
//! A missing or unparseable root config skips the capture, since there is
//! no layout to take the bar height from. Nothing here returns an error
//! for a failed phase; failures are printed and kept in [`InspectOutcome`].

use std::io::{self, Write};

use crate::capture::{resolve_height, BarCapture, CaptureError, ScreenGrabber, ScreenshotArtifact};
use crate::config::{ConfigError, ConfigLoader, MergeOutcome, SinkPaths};
use crate::report;

/// Options for one inspection run
#[derive(Debug, Clone)]
pub struct InspectOptions {
    pub paths: SinkPaths,

    /// Run the capture phase
    pub screenshot: bool,

    /// Print the merged configuration as JSON before the summary
    pub dump_json: bool,
}

/// What each phase produced
#[derive(Debug)]
pub struct InspectOutcome {
    pub config: Result<MergeOutcome, ConfigError>,

    /// `None` when the capture phase did not run
    pub capture: Option<Result<ScreenshotArtifact, CaptureError>>,
}

/// Run both phases, writing everything user-facing to `out`.
///
/// Only a failure to write to `out` is returned as an error.
pub fn run_inspect<G: ScreenGrabber, W: Write>(
    options: &InspectOptions,
    grabber: G,
    out: &mut W,
) -> io::Result<InspectOutcome> {
    writeln!(out, "{}", report::rule("kitchnsink Debug View"))?;

    let loader = ConfigLoader::from_paths(&options.paths);
    let merged = match loader.load() {
        Ok(merged) => merged,
        Err(e) => {
            tracing::warn!(error = %e, "configuration phase failed");
            writeln!(out, "{}", e)?;
            return Ok(InspectOutcome {
                config: Err(e),
                capture: None,
            });
        }
    };

    if options.dump_json {
        match merged.config.to_json_pretty() {
            Ok(json) => writeln!(out, "{}", json)?,
            Err(e) => writeln!(out, "Failed to serialize config as JSON: {}", e)?,
        }
    }
    writeln!(out, "{}", report::config_summary(loader.root_file(), &merged))?;

    let capture = if options.screenshot {
        Some(capture_bar(options, &merged, grabber, out)?)
    } else {
        None
    };

    Ok(InspectOutcome {
        config: Ok(merged),
        capture,
    })
}

fn capture_bar<G: ScreenGrabber, W: Write>(
    options: &InspectOptions,
    merged: &MergeOutcome,
    grabber: G,
    out: &mut W,
) -> io::Result<Result<ScreenshotArtifact, CaptureError>> {
    writeln!(out, "\nCapturing Bar...")?;
    let bar_height = resolve_height(merged.config.layout());
    writeln!(out, "Expecting bar height: {}px", bar_height)?;

    let capture = BarCapture::new(&options.paths.screenshot_dir, grabber);
    let result = capture.capture(bar_height);
    match &result {
        Ok(artifact) => {
            writeln!(out, "{}", report::capture_summary(artifact, capture.output_dir()))?;
        }
        Err(e) if e.is_tool_missing() => {
            tracing::warn!(error = %e, "capture tool missing");
            writeln!(out, "{}", e)?;
        }
        Err(e) => {
            tracing::warn!(error = %e, "capture failed");
            writeln!(out, "Screenshot failed: {}", e)?;
        }
    }
    Ok(result)
}
