//! Bar screenshot capture
//!
//! Captures the whole screen with an external tool, then keeps only the
//! bottom strip matching the configured bar height:
//! 1. Create the output directory, purge the files directly inside it
//! 2. Capture to `_temp_full.png`
//! 3. Crop the bottom `bar_height` rows into `debug_<timestamp>.png`
//! 4. Remove the temporary capture

mod geometry;
mod grabber;
mod height;

pub use geometry::CropRect;
pub use grabber::{GrimGrabber, ScreenGrabber, SyntheticGrabber, DEFAULT_CAPTURE_PROGRAM};
pub use height::{parse_height, resolve_height, HeightParseError, DEFAULT_BAR_HEIGHT};

use chrono::{DateTime, Local};
use image::GenericImageView;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the uncropped capture inside the output directory
pub const TEMP_CAPTURE_NAME: &str = "_temp_full.png";

/// Capture errors
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("'{program}' not found. Please install {program} for screenshots on Wayland.")]
    ToolMissing { program: String },

    #[error("'{program}' failed with {status}: {stderr}")]
    ToolFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("bar height {bar_height}px leaves nothing to crop from a {width}x{height} capture")]
    EmptyCrop {
        bar_height: i64,
        width: u32,
        height: u32,
    },
}

impl CaptureError {
    /// True when the capture program is not installed
    pub fn is_tool_missing(&self) -> bool {
        matches!(self, CaptureError::ToolMissing { .. })
    }
}

/// The cropped bar image left on disk
#[derive(Debug, Clone)]
pub struct ScreenshotArtifact {
    pub path: PathBuf,

    /// Size of the full-screen capture
    pub screen_width: u32,
    pub screen_height: u32,

    /// Region kept from the full-screen capture
    pub crop: CropRect,

    /// Files removed from the output directory before capturing
    pub purged: usize,
}

/// Runs the capture sequence against one output directory
pub struct BarCapture<G: ScreenGrabber> {
    output_dir: PathBuf,
    grabber: G,
}

impl<G: ScreenGrabber> BarCapture<G> {
    pub fn new(output_dir: impl Into<PathBuf>, grabber: G) -> Self {
        Self {
            output_dir: output_dir.into(),
            grabber,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Capture the screen and keep the bottom `bar_height` rows
    pub fn capture(&self, bar_height: i64) -> Result<ScreenshotArtifact, CaptureError> {
        self.capture_at(bar_height, Local::now())
    }

    /// Same as [`capture`](Self::capture) with an explicit timestamp for the file name
    pub fn capture_at(
        &self,
        bar_height: i64,
        now: DateTime<Local>,
    ) -> Result<ScreenshotArtifact, CaptureError> {
        fs::create_dir_all(&self.output_dir)?;
        let purged = purge_files(&self.output_dir)?;
        tracing::debug!(dir = %self.output_dir.display(), purged, "cleaned screenshot directory");

        let temp = TempCapture::new(self.output_dir.join(TEMP_CAPTURE_NAME));
        self.grabber.capture_fullscreen(temp.path())?;

        let full = image::open(temp.path())?;
        let (screen_width, screen_height) = full.dimensions();
        let crop = CropRect::bottom_strip(screen_width, screen_height, bar_height);
        if crop.is_empty() {
            return Err(CaptureError::EmptyCrop {
                bar_height,
                width: screen_width,
                height: screen_height,
            });
        }
        tracing::debug!(%crop, screen_width, screen_height, "cropping bar strip");

        let path = self.output_dir.join(artifact_name(&now));
        full.crop_imm(crop.left, crop.top, crop.width(), crop.height())
            .save(&path)?;

        temp.discard();

        Ok(ScreenshotArtifact {
            path,
            screen_width,
            screen_height,
            crop,
            purged,
        })
    }
}

/// `debug_YYYYmmdd_HHMMSS.png`
pub fn artifact_name(now: &DateTime<Local>) -> String {
    format!("debug_{}.png", now.format("%Y%m%d_%H%M%S"))
}

/// Delete every regular file directly inside `dir`; subdirectories stay.
pub fn purge_files(dir: &Path) -> io::Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Removes the full-screen capture when dropped
struct TempCapture {
    path: PathBuf,
    armed: bool,
}

impl TempCapture {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// Remove now; a file that is already gone is fine
    fn remove(mut self) -> io::Result<()> {
        self.armed = false;
        remove_if_present(&self.path)
    }

    /// Best-effort removal once the artifact is written; failures are logged
    fn discard(self) {
        let path = self.path.clone();
        if let Err(e) = self.remove() {
            tracing::warn!(path = %path.display(), error = %e, "could not remove temporary capture");
        }
    }
}

impl Drop for TempCapture {
    fn drop(&mut self) {
        if self.armed {
            let _ = remove_if_present(&self.path);
        }
    }
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_artifact_name() {
        let now = Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(artifact_name(&now), "debug_20260307_090502.png");
    }

    #[test]
    fn test_purge_keeps_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.png"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("keep")).unwrap();
        fs::write(dir.path().join("keep/inner.png"), b"x").unwrap();

        assert_eq!(purge_files(dir.path()).unwrap(), 2);
        assert!(dir.path().join("keep/inner.png").exists());
        assert!(!dir.path().join("a.png").exists());
    }

    #[test]
    fn test_temp_capture_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(TEMP_CAPTURE_NAME);
        fs::write(&path, b"x").unwrap();

        drop(TempCapture::new(path.clone()));
        assert!(!path.exists());
    }

    #[test]
    fn test_temp_capture_remove_missing_is_ok() {
        let dir = TempDir::new().unwrap();
        let temp = TempCapture::new(dir.path().join(TEMP_CAPTURE_NAME));
        assert!(temp.remove().is_ok());
    }

    #[test]
    fn test_discard_failure_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(TEMP_CAPTURE_NAME);
        fs::create_dir(&path).unwrap();
        fs::write(path.join("inner"), b"x").unwrap();

        // remove_file on a directory fails; discard only logs it
        TempCapture::new(path.clone()).discard();
        assert!(path.join("inner").exists());
    }

    #[test]
    fn test_capture_crops_bottom_strip() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("shots");
        let capture = BarCapture::new(&out, SyntheticGrabber::new(320, 200).with_bar_rows(24));

        let artifact = capture.capture(24).unwrap();

        assert_eq!(artifact.crop.as_tuple(), (0, 176, 320, 200));
        assert_eq!((artifact.screen_width, artifact.screen_height), (320, 200));
        assert!(!out.join(TEMP_CAPTURE_NAME).exists());

        let bar = image::open(&artifact.path).unwrap().to_rgba8();
        assert_eq!(bar.dimensions(), (320, 24));
        assert!(bar.pixels().all(|p| *p == SyntheticGrabber::BAR));
    }

    #[test]
    fn test_empty_crop_is_error_and_cleans_temp() {
        let dir = TempDir::new().unwrap();
        let capture = BarCapture::new(dir.path(), SyntheticGrabber::new(10, 10));

        let err = capture.capture(0).unwrap_err();
        assert!(matches!(err, CaptureError::EmptyCrop { bar_height: 0, .. }));
        assert!(!dir.path().join(TEMP_CAPTURE_NAME).exists());
    }
}
