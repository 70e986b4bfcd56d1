use std::path::PathBuf;

use crate::assets::decode::probe_dimensions;
use crate::foundation::core::AspectRatio;
use crate::foundation::error::{FitError, FitResult};

const INSTAGRAM_MIN: AspectRatio = AspectRatio::new_const(4, 5);
const INSTAGRAM_MAX: AspectRatio = AspectRatio::new_const(191, 100);

/// Closed `[min, max]` range of aspect ratios.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SupportedRange {
    min: AspectRatio,
    max: AspectRatio,
}

impl SupportedRange {
    /// Build a range from two ends in either order.
    pub fn new(a: AspectRatio, b: AspectRatio) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// The `[4:5, 191:100]` range accepted by Instagram feed posts.
    pub const fn instagram() -> Self {
        Self {
            min: INSTAGRAM_MIN,
            max: INSTAGRAM_MAX,
        }
    }

    /// Smallest ratio in the range.
    pub fn min(self) -> AspectRatio {
        self.min
    }

    /// Largest ratio in the range.
    pub fn max(self) -> AspectRatio {
        self.max
    }

    /// `true` when `r` lies in the range, ends included.
    pub fn contains(self, r: AspectRatio) -> bool {
        self.min <= r && r <= self.max
    }

    /// Clamp `r` to the nearest end when outside the range.
    pub fn clamp(self, r: AspectRatio) -> AspectRatio {
        if r < self.min {
            self.min
        } else if r > self.max {
            self.max
        } else {
            r
        }
    }
}

impl Default for SupportedRange {
    fn default() -> Self {
        Self::instagram()
    }
}

/// Pick the canonical target ratio for a whole batch.
///
/// An explicit `override_ratio` wins outright and no file is read. Otherwise only the first
/// entry of `inputs` (already sorted by file name) is probed and its ratio is clamped into
/// `range`.
#[tracing::instrument(skip(inputs), fields(inputs = inputs.len()))]
pub fn resolve_ratio(
    inputs: &[PathBuf],
    range: SupportedRange,
    override_ratio: Option<AspectRatio>,
) -> FitResult<AspectRatio> {
    if let Some(r) = override_ratio {
        tracing::info!(ratio = %r, "taking aspect ratio from configuration");
        return Ok(r);
    }

    let first = inputs
        .first()
        .ok_or_else(|| FitError::ratio("cannot resolve a ratio without input images"))?;
    let (w, h) = probe_dimensions(first)?;
    let source = AspectRatio::of_dimensions(w, h)?;
    let resolved = range.clamp(source);
    tracing::info!(
        source = %source,
        ratio = %resolved,
        path = %first.display(),
        "resolved target aspect ratio"
    );
    Ok(resolved)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/resolver.rs"]
mod tests;
