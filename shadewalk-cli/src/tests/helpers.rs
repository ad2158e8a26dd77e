//! Test helpers for writing thermal series fixtures to disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

pub(super) const SERIES_JSON: &str = r#"{
    "start": "2024-07-01T06:00:00Z",
    "samples": [
        {"heat_index": 24.0, "mean_radiant_temperature": 30.0, "air_temperature": 22.0},
        {"heat_index": 27.0, "mean_radiant_temperature": 36.0, "air_temperature": 24.0},
        {"heat_index": 31.0, "mean_radiant_temperature": 44.0, "air_temperature": 27.0},
        {"heat_index": 33.0, "mean_radiant_temperature": 49.0, "air_temperature": 29.0}
    ]
}"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// Temporary directory holding a valid thermal series.
pub(super) struct SeriesFixture {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) series: Utf8PathBuf,
}

impl SeriesFixture {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let series = root.join("series.json");
        write_utf8(&series, SERIES_JSON.as_bytes());
        Self {
            _dir: dir,
            root,
            series,
        }
    }
}
