// src/config/options.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::error::ConfigError;

/// Inclusive RGB box. A pixel matches when every channel is inside its range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbRange {
    pub lo: [u8; 3],
    pub hi: [u8; 3],
}

impl RgbRange {
    pub const fn new(lo: [u8; 3], hi: [u8; 3]) -> Self {
        Self { lo, hi }
    }

    #[inline]
    pub fn contains(&self, px: [u8; 3]) -> bool {
        (0..3).all(|c| self.lo[c] <= px[c] && px[c] <= self.hi[c])
    }
}

/// Diagram palette. Yellow stones that were already played carry an X drawn
/// in blue and greyish yellow, so those ranges are OR-ed into the yellow mask.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub red: RgbRange,
    pub yellow: RgbRange,
    pub blue_accent: RgbRange,
    pub greyish_yellow: RgbRange,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            red: RgbRange::new([255, 0, 0], [255, 0, 0]),
            // darker variant shows up on yellowish houses
            yellow: RgbRange::new([255, 192, 0], [255, 255, 0]),
            blue_accent: RgbRange::new([0, 0, 255], [0, 63, 255]),
            // two shades seen in the wild; black X marks are not supported
            greyish_yellow: RgbRange::new([207, 164, 0], [239, 224, 32]),
        }
    }
}

/// Everything the stone pipeline needs that might want recalibration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    pub palette: Palette,
    pub thrown_min_area: f64,
    pub storage_band_y: f64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            thrown_min_area: THROWN_MIN_AREA,
            storage_band_y: STORAGE_BAND_Y,
        }
    }
}

impl ExtractOptions {
    /// Load from a JSON file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }
    /// Cell separator; JSON has none.
    pub fn delimiter(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            ExportFormat::Json => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_dir: PathBuf,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            include_headers: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunOptions {
    /// Root of the `<event>/<game type>/<session>/*.xml` tree
    pub data_root: PathBuf,
    /// Single-event mode
    pub event: Option<String>,
    pub workers: usize,
    pub extract: ExtractOptions,
    pub export: ExportOptions,
}

impl RunOptions {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            event: None,
            workers: WORKERS,
            extract: ExtractOptions::default(),
            export: ExportOptions::default(),
        }
    }
}
