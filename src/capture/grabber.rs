//! Full-screen capture backends
//!
//! Abstracts the external screenshot program for testability. Provides:
//! - ScreenGrabber trait: capture the whole screen into a file
//! - GrimGrabber: runs `grim <destination>` (Wayland)
//! - SyntheticGrabber: writes a generated image, for tests

use image::{Rgba, RgbaImage};
use std::io;
use std::path::Path;
use std::process::Command;

use super::CaptureError;

/// Default external capture program
pub const DEFAULT_CAPTURE_PROGRAM: &str = "grim";

/// Capability to capture the full screen into `destination`
pub trait ScreenGrabber: Send + Sync {
    fn capture_fullscreen(&self, destination: &Path) -> Result<(), CaptureError>;
}

/// Captures through an external program invoked as `<program> <destination>`
#[derive(Debug, Clone)]
pub struct GrimGrabber {
    program: String,
}

impl GrimGrabber {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for GrimGrabber {
    fn default() -> Self {
        Self::new(DEFAULT_CAPTURE_PROGRAM)
    }
}

impl ScreenGrabber for GrimGrabber {
    fn capture_fullscreen(&self, destination: &Path) -> Result<(), CaptureError> {
        tracing::debug!(program = %self.program, dest = %destination.display(), "capturing screen");

        let output = Command::new(&self.program)
            .arg(destination)
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => CaptureError::ToolMissing {
                    program: self.program.clone(),
                },
                _ => CaptureError::Io(e),
            })?;

        if !output.status.success() {
            return Err(CaptureError::ToolFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// Writes a fixed-size image instead of touching the display
///
/// The bottom `bar_rows` rows are painted with [`SyntheticGrabber::BAR`],
/// everything above with [`SyntheticGrabber::DESKTOP`].
#[derive(Debug, Clone)]
pub struct SyntheticGrabber {
    pub width: u32,
    pub height: u32,
    pub bar_rows: u32,
}

impl SyntheticGrabber {
    pub const DESKTOP: Rgba<u8> = Rgba([0x1e, 0x1e, 0x2e, 0xff]);
    pub const BAR: Rgba<u8> = Rgba([0xf3, 0x8b, 0xa8, 0xff]);

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bar_rows: 0,
        }
    }

    pub fn with_bar_rows(mut self, rows: u32) -> Self {
        self.bar_rows = rows;
        self
    }

    pub fn render(&self) -> RgbaImage {
        let bar_top = self.height.saturating_sub(self.bar_rows);
        RgbaImage::from_fn(self.width, self.height, |_, y| {
            if y >= bar_top {
                Self::BAR
            } else {
                Self::DESKTOP
            }
        })
    }
}

impl ScreenGrabber for SyntheticGrabber {
    fn capture_fullscreen(&self, destination: &Path) -> Result<(), CaptureError> {
        self.render().save(destination)?;
        Ok(())
    }
}
