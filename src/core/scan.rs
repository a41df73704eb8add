use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;

use crate::core::formats;
use crate::core::metadata::{GeotagEngine, GeotagError, Result};

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ScanReport {
    pub folder: PathBuf,
    /// Files with a matching extension that were checked.
    pub scanned: usize,
    pub missing_gps: Vec<PathBuf>,
}

impl ScanReport {
    pub fn count(&self) -> usize {
        self.missing_gps.len()
    }
}

/// Lists the files directly inside `dir` whose extension is one of
/// `extensions` (any case) and which carry no GPS position. Subfolders are
/// not visited.
pub fn scan_folder<S: AsRef<str>>(dir: &Path, extensions: &[S]) -> Result<ScanReport> {
    if !dir.is_dir() {
        return Err(GeotagError::InvalidFolder(dir.to_path_buf()));
    }

    let mut report = ScanReport {
        folder: dir.to_path_buf(),
        ..ScanReport::default()
    };

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || !formats::has_extension(&path, extensions) {
            continue;
        }

        report.scanned += 1;
        if GeotagEngine::has_no_gps(&path) {
            debug!("{} has no GPS data", path.display());
            report.missing_gps.push(path);
        }
    }

    report
        .missing_gps
        .sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(report)
}
