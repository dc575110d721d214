//! Integration tests for tetra-export
//!
//! Tests the full pipeline: config file -> scene -> SVG files on disk

use std::time::Duration;

use tempfile::tempdir;
use tetra_export::{FrameSequence, RenderSettings, load_config, render_snapshot, write_frames};

fn settings(seed: u64) -> RenderSettings {
    RenderSettings {
        width: 640.0,
        height: 480.0,
        seed: Some(seed),
    }
}

/// Frames land in order and change as the pulse runs
#[test]
fn test_frame_sequence() {
    let dir = tempdir().expect("Failed to create temp dir");
    let out = dir.path().join("frames");

    let config = load_config(None).unwrap();
    let paths = write_frames(&config, &settings(3), FrameSequence { fps: 4, seconds: 2 }, &out)
        .expect("Failed to write frames");

    assert_eq!(paths.len(), 8);
    assert!(paths[0].ends_with("frame-00000.svg"));
    assert!(paths[7].ends_with("frame-00007.svg"));

    let first = std::fs::read_to_string(&paths[0]).unwrap();
    let second = std::fs::read_to_string(&paths[1]).unwrap();
    assert!(first.starts_with("<svg"));
    assert!(first.contains("serlio epicenter-0 delay-0"));
    assert_ne!(first, second);
}

/// A frame matches the snapshot taken at the same moment
#[test]
fn test_frames_agree_with_snapshot() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = load_config(None).unwrap();

    let paths = write_frames(&config, &settings(21), FrameSequence { fps: 2, seconds: 3 }, dir.path())
        .expect("Failed to write frames");
    let frame = std::fs::read_to_string(&paths[5]).unwrap();

    let snapshot = render_snapshot(&config, &settings(21), Duration::from_millis(2500)).unwrap();
    assert_eq!(frame, snapshot);
}

/// Config file changes the rendered scene
#[test]
fn test_config_file_drives_render() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("quiet.toml");
    std::fs::write(&path, "[radiation]\nfields = 0\n\n[tile]\nsize = 100.0\n").unwrap();

    let config = load_config(Some(&path)).expect("Failed to load config");
    let document = render_snapshot(&config, &settings(5), Duration::from_secs(4)).unwrap();

    assert!(!document.contains("serlio"));
    assert!(document.contains("<polygon"));
}

#[test]
fn test_zero_fps_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = load_config(None).unwrap();
    let err = write_frames(&config, &settings(1), FrameSequence { fps: 0, seconds: 1 }, dir.path())
        .unwrap_err();
    assert!(err.to_string().contains("fps"));
}

#[test]
fn test_overflowing_frame_count_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let out = dir.path().join("frames");
    let config = load_config(None).unwrap();
    let sequence = FrameSequence {
        fps: 100_000,
        seconds: 100_000,
    };

    let err = write_frames(&config, &settings(1), sequence, &out).unwrap_err();
    assert!(err.to_string().contains("Too many frames"));
    assert!(!out.exists());
}
