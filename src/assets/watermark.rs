use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::assets::decode::{Raster, read_image};
use crate::foundation::error::{FitError, FitResult};
use crate::foundation::math::scaled_len_round;
use crate::layout::placement::{Anchor, InsetMode};

/// One overlay to stamp onto every canvas.
#[derive(Clone, Debug)]
pub struct WatermarkSpec {
    image: Arc<Raster>,
    offset: (i32, i32),
    transparency: f32,
    anchor: Anchor,
    scale: f64,
}

impl WatermarkSpec {
    /// Validate and build a spec. `transparency` is the layer opacity in `[0, 1]`; `scale`
    /// must be finite and positive.
    ///
    /// The overlay is resampled by `scale` here, so every canvas of a batch stamps the same
    /// shared raster.
    pub fn new(
        image: Arc<Raster>,
        offset: (i32, i32),
        transparency: f32,
        anchor: Anchor,
        scale: f64,
    ) -> FitResult<Self> {
        if !(0.0..=1.0).contains(&transparency) {
            return Err(FitError::config(format!(
                "watermark transparency {transparency} must be within [0, 1]"
            )));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(FitError::config(format!(
                "watermark scale {scale} must be > 0"
            )));
        }
        let (w, h) = (
            scaled_len_round(image.width(), scale),
            scaled_len_round(image.height(), scale),
        );
        let image = if (w, h) == image.dimensions() {
            image
        } else {
            Arc::new(image.resized(w, h)?)
        };
        Ok(Self {
            image,
            offset,
            transparency,
            anchor,
            scale,
        })
    }

    /// Overlay image, already resampled by [`Self::scale`].
    pub fn image(&self) -> &Raster {
        &self.image
    }

    /// Extra `(dx, dy)` pixel offset applied after anchoring.
    pub fn offset(&self) -> (i32, i32) {
        self.offset
    }

    /// Blend opacity.
    pub fn transparency(&self) -> f32 {
        self.transparency
    }

    /// Anchor position.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Uniform scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

/// Watermark stack loaded from a JSON configuration file.
#[derive(Clone, Debug, Default)]
pub struct WatermarkConfig {
    /// Edge inset used when anchoring.
    pub inset: InsetMode,
    /// Overlays in stacking order, first drawn first.
    pub specs: Vec<WatermarkSpec>,
    /// Longest canvas edge before watermarks are stamped; larger canvases are downscaled.
    pub max_size: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
struct EntryDef {
    #[serde(alias = "watermarkImagePath")]
    image: PathBuf,
    #[serde(default, alias = "watermarkX")]
    offset_x: i32,
    #[serde(default, alias = "watermarkY")]
    offset_y: i32,
    #[serde(default = "default_scale", alias = "watermarkScale")]
    scale: f64,
    #[serde(default = "default_transparency", alias = "watermarkTransparency")]
    transparency: f32,
    #[serde(default, alias = "orientation")]
    anchor: Anchor,
}

fn default_scale() -> f64 {
    1.0
}

fn default_transparency() -> f32 {
    0.55
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Repr {
    Stack {
        #[serde(default)]
        inset: InsetMode,
        #[serde(default, alias = "imageSize")]
        max_size: Option<u32>,
        watermarks: Vec<EntryDef>,
    },
    Single {
        #[serde(flatten)]
        entry: EntryDef,
        #[serde(default, alias = "imageSize")]
        max_size: Option<u32>,
    },
}

impl WatermarkConfig {
    /// Parse a configuration from JSON. Relative image paths resolve against `base_dir`.
    pub fn from_reader<R: std::io::Read>(r: R, base_dir: &Path) -> FitResult<Self> {
        let repr: Repr = serde_json::from_reader(r)
            .map_err(|e| FitError::config(format!("parse watermark config JSON: {e}")))?;
        let (inset, max_size, entries) = match repr {
            Repr::Stack {
                inset,
                max_size,
                watermarks,
            } => (inset, max_size, watermarks),
            Repr::Single { entry, max_size } => (InsetMode::default(), max_size, vec![entry]),
        };
        // `0` is the "keep size" value of older settings files.
        let max_size = max_size.filter(|&m| m > 0);

        let mut specs = Vec::with_capacity(entries.len());
        for entry in entries {
            let path = if entry.image.is_absolute() {
                entry.image.clone()
            } else {
                base_dir.join(&entry.image)
            };
            let image = read_image(&path).map_err(|e| {
                FitError::config(format!(
                    "load watermark image '{}': {}",
                    path.display(),
                    e.message()
                ))
            })?;
            tracing::debug!(
                path = %path.display(),
                width = image.width(),
                height = image.height(),
                anchor = %entry.anchor,
                "loaded watermark"
            );
            specs.push(WatermarkSpec::new(
                Arc::new(image),
                (entry.offset_x, entry.offset_y),
                entry.transparency,
                entry.anchor,
                entry.scale,
            )?);
        }

        Ok(Self {
            inset,
            specs,
            max_size,
        })
    }

    /// Parse a configuration file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> FitResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FitError::config(format!(
                "open watermark config '{}': {e}",
                path.display()
            ))
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_reader(BufReader::new(f), base_dir)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/watermark.rs"]
mod tests;
