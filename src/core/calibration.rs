//! Board calibration model and persistence
//!
//! Maps board squares onto physical screen pixels via a linear model derived
//! from two user-supplied reference points: the screen positions of the
//! board's top-left and bottom-right corners. The model is saved to a JSON
//! file and reloaded on startup, so calibration survives restarts.
//!
//! # File Location
//!
//! The record is stored in `calibration.json` in the user's configuration
//! directory, falling back to the current directory when the system config
//! dir cannot be resolved.
//!
//! # Error Handling
//!
//! Load failures (missing, unreadable, or unparseable file) are logged and
//! reported as absence, so a stale or corrupt record never blocks
//! re-calibration. Save failures surface as [`crate::core::CoreError`].

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::error::CoreResult;

/// Calibration filename
const CALIBRATION_FILENAME: &str = "calibration.json";

/// Helper to resolve the calibration file path
///
/// Returns a path to `calibration.json` in the user's configuration
/// directory. Falls back to a local `calibration.json` if the system config
/// dir cannot be found.
fn calibration_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "chesspilot", "chesspilot") {
        proj_dirs.config_dir().join(CALIBRATION_FILENAME)
    } else {
        PathBuf::from(CALIBRATION_FILENAME)
    }
}

/// Linear mapping from board squares to screen pixel coordinates.
///
/// `(x0, y0)` is the screen position of the board's top-left corner;
/// `square_width`/`square_height` are the per-square pixel extents. The model
/// is immutable for the lifetime of a run and only replaced by
/// re-calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub x0: f64,
    pub y0: f64,
    pub square_width: f64,
    pub square_height: f64,
}

impl Calibration {
    /// Derive the model from the board's top-left and bottom-right screen
    /// corners. The corner span is divided evenly into the eight files and
    /// ranks of the rendered board.
    pub fn from_corners(top_left: (f64, f64), bottom_right: (f64, f64)) -> Self {
        Self {
            x0: top_left.0,
            y0: top_left.1,
            square_width: (bottom_right.0 - top_left.0) / 8.0,
            square_height: (bottom_right.1 - top_left.1) / 8.0,
        }
    }

    /// Load the persisted calibration, if any.
    pub fn load() -> Option<Self> {
        Self::load_from(&calibration_path())
    }

    /// Persist the calibration for future runs.
    pub fn save(&self) -> CoreResult<()> {
        self.save_to(&calibration_path())
    }

    fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            info!("[CALIBRATION] No calibration file found at {:?}", path);
            return None;
        }
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Calibration>(&contents) {
                Ok(calibration) => {
                    info!("[CALIBRATION] Loaded calibration from {:?}", path);
                    Some(calibration)
                }
                Err(e) => {
                    warn!(
                        "[CALIBRATION] Failed to parse calibration file at {:?}: {}",
                        path, e
                    );
                    None
                }
            },
            Err(e) => {
                warn!(
                    "[CALIBRATION] Failed to read calibration file at {:?}: {}",
                    path, e
                );
                None
            }
        }
    }

    fn save_to(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("[CALIBRATION] Saved calibration to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("chesspilot-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_from_corners_divides_span_by_eight() {
        let calibration = Calibration::from_corners((100.0, 100.0), (500.0, 500.0));
        assert_eq!(calibration.x0, 100.0);
        assert_eq!(calibration.y0, 100.0);
        assert_eq!(calibration.square_width, 50.0);
        assert_eq!(calibration.square_height, 50.0);
    }

    #[test]
    fn test_from_corners_rectangular_board() {
        let calibration = Calibration::from_corners((0.0, 40.0), (800.0, 680.0));
        assert_eq!(calibration.square_width, 100.0);
        assert_eq!(calibration.square_height, 80.0);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = temp_path("roundtrip.json");
        let calibration = Calibration::from_corners((120.5, 88.0), (620.5, 588.0));

        calibration.save_to(&path).expect("save should succeed");
        let loaded = Calibration::load_from(&path).expect("load should find the record");
        assert_eq!(loaded, calibration);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file_is_absence() {
        let path = temp_path("does-not-exist.json");
        assert!(Calibration::load_from(&path).is_none());
    }

    #[test]
    fn test_load_corrupt_file_is_absence() {
        let path = temp_path("corrupt.json");
        fs::write(&path, "not json at all").unwrap();
        assert!(Calibration::load_from(&path).is_none());
        let _ = fs::remove_file(&path);
    }
}
