//! Integration tests: bar capture and crop
//!
//! Uses `SyntheticGrabber` in place of the external capture program.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use chrono::{Duration, Local};
use image::GenericImageView;
use ks_inspect::capture::{
    resolve_height, BarCapture, CaptureError, CropRect, GrimGrabber, SyntheticGrabber,
    TEMP_CAPTURE_NAME,
};

fn pngs(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".png"))
        .collect();
    names.sort();
    names
}

// === Geometry ===

#[test]
fn test_full_hd_crop_rect() {
    let dir = TempDir::new().unwrap();
    let capture = BarCapture::new(dir.path(), SyntheticGrabber::new(1920, 1080));

    let artifact = capture.capture(40).unwrap();

    assert_eq!(artifact.crop, CropRect::bottom_strip(1920, 1080, 40));
    assert_eq!(artifact.crop.as_tuple(), (0, 1040, 1920, 1080));

    let img = image::open(&artifact.path).unwrap();
    assert_eq!(img.dimensions(), (1920, 40));
}

#[test]
fn test_bar_taller_than_screen_keeps_whole_image() {
    let dir = TempDir::new().unwrap();
    let capture = BarCapture::new(dir.path(), SyntheticGrabber::new(100, 20));

    let artifact = capture.capture(30).unwrap();

    assert_eq!(artifact.crop.as_tuple(), (0, 0, 100, 20));
}

// === Directory lifecycle ===

#[test]
fn test_creates_missing_output_dir() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("a/b/.screenshots");
    let capture = BarCapture::new(&out, SyntheticGrabber::new(50, 50));

    capture.capture(10).unwrap();

    assert_eq!(pngs(&out).len(), 1);
}

#[test]
fn test_second_run_leaves_one_artifact() {
    let dir = TempDir::new().unwrap();
    let capture = BarCapture::new(dir.path(), SyntheticGrabber::new(200, 100));

    let earlier = Local::now() - Duration::seconds(90);
    let first = capture.capture_at(30, earlier).unwrap();
    let second = capture.capture(30).unwrap();

    assert_ne!(first.path, second.path);
    assert!(!first.path.exists());
    assert_eq!(second.purged, 1);

    let remaining = pngs(dir.path());
    assert_eq!(remaining.len(), 1);
    assert!(remaining[0].starts_with("debug_"));
    assert!(!dir.path().join(TEMP_CAPTURE_NAME).exists());
}

#[test]
fn test_purge_leaves_subdirectories() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("stale.png"), b"old").unwrap();
    fs::create_dir(dir.path().join("archive")).unwrap();
    fs::write(dir.path().join("archive/keep.png"), b"old").unwrap();

    let capture = BarCapture::new(dir.path(), SyntheticGrabber::new(40, 40));
    let artifact = capture.capture(8).unwrap();

    assert_eq!(artifact.purged, 1);
    assert!(!dir.path().join("stale.png").exists());
    assert!(dir.path().join("archive/keep.png").exists());
}

// === Failures ===

#[test]
fn test_missing_tool_reported() {
    let dir = TempDir::new().unwrap();
    let capture = BarCapture::new(dir.path(), GrimGrabber::new("ks-inspect-missing-grim"));

    let err = capture.capture(30).unwrap_err();

    assert!(err.is_tool_missing());
    assert!(!dir.path().join(TEMP_CAPTURE_NAME).exists());
}

#[test]
fn test_zero_height_bar_fails() {
    let dir = TempDir::new().unwrap();
    let capture = BarCapture::new(dir.path(), SyntheticGrabber::new(40, 40));

    let err = capture.capture(0).unwrap_err();

    assert!(matches!(err, CaptureError::EmptyCrop { .. }));
    assert!(pngs(dir.path()).is_empty());
}

#[test]
fn test_most_negative_height_is_empty_crop() {
    let dir = TempDir::new().unwrap();
    let mut layout = serde_json::Map::new();
    layout.insert(
        "height".to_string(),
        serde_json::json!("-9223372036854775808px"),
    );
    let bar_height = resolve_height(Some(&layout));
    assert_eq!(bar_height, i64::MIN);

    let capture = BarCapture::new(dir.path(), SyntheticGrabber::new(10, 10));
    let err = capture.capture(bar_height).unwrap_err();

    assert!(matches!(err, CaptureError::EmptyCrop { bar_height: i64::MIN, .. }));
    assert!(!dir.path().join(TEMP_CAPTURE_NAME).exists());
}
