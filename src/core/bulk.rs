use std::path::{Path, PathBuf};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::Sender,
};

use log::warn;

use crate::core::metadata::GeotagEngine;
use crate::models::{Coordinate, OperationResult, ProgressEvent};

/// Applies one coordinate to a list of files, one file at a time and in
/// input order. A failing file never stops the rest.
pub struct BatchGeotagger;

impl BatchGeotagger {
    pub fn process(
        paths: &[PathBuf],
        coordinate: Coordinate,
        progress_tx: Sender<ProgressEvent>,
    ) -> Vec<OperationResult> {
        Self::process_with_cancel(paths, coordinate, progress_tx, None)
    }

    /// Files not yet started when `cancel_flag` is raised get no result.
    pub fn process_with_cancel(
        paths: &[PathBuf],
        coordinate: Coordinate,
        progress_tx: Sender<ProgressEvent>,
        cancel_flag: Option<&AtomicBool>,
    ) -> Vec<OperationResult> {
        let total = paths.len();
        let mut results = Vec::with_capacity(total);

        for (index, path) in paths.iter().enumerate() {
            if let Some(flag) = cancel_flag {
                if flag.load(Ordering::Relaxed) {
                    break;
                }
            }

            let result = Self::tag_one(path, coordinate);

            let _ = progress_tx.send(ProgressEvent {
                current: index + 1,
                total,
                filename: Self::display_name(path),
                success: result.is_success(),
            });

            results.push(result);
        }

        results
    }

    fn tag_one(path: &Path, coordinate: Coordinate) -> OperationResult {
        if !path.exists() {
            return OperationResult::skipped(path.to_path_buf(), "file does not exist");
        }

        match GeotagEngine::write_coordinates(path, coordinate.latitude, coordinate.longitude) {
            Ok(()) => OperationResult::success(path.to_path_buf()),
            Err(err) => {
                warn!("failed to geotag {}: {err}", path.display());
                OperationResult::failure(path.to_path_buf(), err.to_string())
            }
        }
    }

    fn display_name(path: &Path) -> String {
        path.file_name()
            .map(|value| value.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string())
    }
}
