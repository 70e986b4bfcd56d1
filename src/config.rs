use std::path::{Path, PathBuf};

use crate::assets::watermark::WatermarkConfig;
use crate::foundation::core::{AspectRatio, Rgb8};
use crate::foundation::error::{FitError, FitResult};
use crate::layout::resolver::SupportedRange;

/// Output folder name used under the source folder when none is given.
pub const DEFAULT_OUTPUT_SUBDIR: &str = "out";

/// Options for one batch run.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Folder scanned (non-recursively) for `jpg`/`jpeg` inputs.
    pub source_dir: PathBuf,
    /// Destination folder. `None` means `<source_dir>/out`.
    pub output_dir: Option<PathBuf>,
    /// Padding color.
    pub background: Rgb8,
    /// Opacity of the ambient fill layer; `0` disables it.
    pub ambient_fill_alpha: f32,
    /// Explicit target ratio, bypassing automatic resolution.
    pub ratio_override: Option<AspectRatio>,
    /// Range automatic resolution clamps into.
    pub range: SupportedRange,
    /// Watermark stack drawn on every canvas.
    pub watermarks: WatermarkConfig,
    /// Worker count. `None` uses the available parallelism.
    pub threads: Option<usize>,
    /// Longest output edge. `None` defers to the watermark configuration.
    pub max_size: Option<u32>,
}

impl BatchConfig {
    /// Defaults for `source_dir`: black background, no fill, no watermarks, automatic ratio.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: None,
            background: Rgb8::BLACK,
            ambient_fill_alpha: 0.0,
            ratio_override: None,
            range: SupportedRange::instagram(),
            watermarks: WatermarkConfig::default(),
            threads: None,
            max_size: None,
        }
    }

    /// Effective output folder.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&self.source_dir))
    }

    /// Effective longest-edge limit; `0` means no limit.
    pub fn max_size(&self) -> Option<u32> {
        self.max_size
            .or(self.watermarks.max_size)
            .filter(|&m| m > 0)
    }

    /// Ambient fill opacity clamped into `[0, 1]`.
    pub fn fill_alpha(&self) -> f32 {
        clamp_fill_alpha(self.ambient_fill_alpha)
    }
}

/// `<source>/out`.
pub fn default_output_dir(source_dir: &Path) -> PathBuf {
    source_dir.join(DEFAULT_OUTPUT_SUBDIR)
}

/// Clamp an ambient fill value into `[0, 1]`; NaN counts as zero.
pub fn clamp_fill_alpha(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Parse a command-line ambient fill value, clamping out-of-range numbers.
pub fn parse_fill_alpha(s: &str) -> FitResult<f32> {
    let v: f32 = s
        .trim()
        .parse()
        .map_err(|_| FitError::config(format!("fill value '{s}' is not a number")))?;
    if v.is_nan() {
        return Err(FitError::config(format!("fill value '{s}' is not a number")));
    }
    Ok(clamp_fill_alpha(v))
}
