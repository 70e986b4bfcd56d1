use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;

use crate::assets::decode::{ChannelMode, Raster, read_image};
use crate::assets::watermark::WatermarkSpec;
use crate::config::clamp_fill_alpha;
use crate::effects::composite::draw_over;
use crate::foundation::core::{AspectRatio, Rgb8};
use crate::foundation::error::{ErrorKind, FitError, FitResult};
use crate::foundation::math::ceil_div_u64;
use crate::layout::placement::{InsetMode, place_watermark};

/// JPEG quality used for every output.
pub const JPEG_QUALITY: u8 = 100;

/// Everything needed to produce one output file.
#[derive(Clone, Debug)]
pub struct CanvasJob {
    /// Input photograph.
    pub source_path: PathBuf,
    /// Destination JPEG, overwritten if present.
    pub output_path: PathBuf,
    /// Canvas ratio shared by the whole batch.
    pub target_ratio: AspectRatio,
    /// Padding color.
    pub background: Rgb8,
    /// Ambient fill opacity; `0` skips the layer.
    pub ambient_fill_alpha: f32,
    /// Overlays in stacking order.
    pub watermarks: Arc<[WatermarkSpec]>,
    /// Edge inset for anchored overlays.
    pub inset: InsetMode,
    /// Downscale the canvas so its longest edge is at most this many pixels.
    pub max_size: Option<u32>,
}

/// Outcome of one [`CanvasJob`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobResult {
    /// The output file was written.
    Success {
        /// Input photograph.
        source_path: PathBuf,
        /// Written file.
        output_path: PathBuf,
    },
    /// The job failed; sibling jobs are unaffected.
    Failure {
        /// Input photograph.
        source_path: PathBuf,
        /// Error kind.
        kind: ErrorKind,
        /// Human-readable description.
        message: String,
    },
}

impl JobResult {
    /// Input photograph of this job.
    pub fn source_path(&self) -> &Path {
        match self {
            JobResult::Success { source_path, .. } | JobResult::Failure { source_path, .. } => {
                source_path
            }
        }
    }

    /// `true` for [`JobResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, JobResult::Success { .. })
    }

    fn from_outcome(source_path: &Path, outcome: FitResult<PathBuf>) -> Self {
        match outcome {
            Ok(output_path) => JobResult::Success {
                source_path: source_path.to_path_buf(),
                output_path,
            },
            Err(e) => JobResult::Failure {
                source_path: source_path.to_path_buf(),
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }
}

/// Smallest canvas of ratio `target` that holds a `source`-sized image unscaled.
///
/// Exactly one axis grows, rounded up so the source is never clipped.
pub fn canvas_size(source: (u32, u32), target: AspectRatio) -> FitResult<(u32, u32)> {
    let (w0, h0) = source;
    let s = AspectRatio::of_dimensions(w0, h0)?;
    let (wr, hr) = (u64::from(target.width()), u64::from(target.height()));

    let (wc, hc) = match s.compare(&target) {
        Ordering::Less => (ceil_div_u64(u64::from(h0) * wr, hr), u64::from(h0)),
        Ordering::Greater => (u64::from(w0), ceil_div_u64(u64::from(w0) * hr, wr)),
        Ordering::Equal => (u64::from(w0), u64::from(h0)),
    };

    let too_large =
        || FitError::ratio(format!("canvas for {w0}x{h0} at {target} exceeds pixel limits"));
    Ok((
        u32::try_from(wc).map_err(|_| too_large())?,
        u32::try_from(hc).map_err(|_| too_large())?,
    ))
}

/// Size of the source scaled by the cover factor `max(Wc/W0, Hc/H0)`, rounded up.
fn cover_size(source: (u32, u32), canvas: (u32, u32)) -> (u32, u32) {
    let (w0, h0) = (u64::from(source.0), u64::from(source.1));
    let (wc, hc) = (u64::from(canvas.0), u64::from(canvas.1));
    let (sw, sh) = if wc * h0 >= hc * w0 {
        (wc, ceil_div_u64(h0 * wc, w0))
    } else {
        (ceil_div_u64(w0 * hc, h0), hc)
    };
    (
        u32::try_from(sw).unwrap_or(u32::MAX),
        u32::try_from(sh).unwrap_or(u32::MAX),
    )
}

/// Dimensions of `size` shrunk so the longest edge is at most `max_edge`, keeping the aspect.
///
/// Sizes already within bounds are returned unchanged; nothing is ever enlarged. The short
/// edge rounds to nearest and never drops below one pixel.
pub fn fit_within(size: (u32, u32), max_edge: u32) -> (u32, u32) {
    let (w, h) = size;
    let long = w.max(h);
    if max_edge == 0 || long <= max_edge {
        return size;
    }
    let shrink = |v: u32| -> u32 {
        let scaled = (u64::from(v) * u64::from(max_edge) + u64::from(long) / 2) / u64::from(long);
        u32::try_from(scaled).unwrap_or(max_edge).clamp(1, max_edge)
    };
    if w >= h {
        (max_edge, shrink(h))
    } else {
        (shrink(w), max_edge)
    }
}

/// Build the output canvas for `source`. Pure: reads nothing but its arguments.
///
/// Layers, bottom to top: background, ambient fill, centered source, watermarks in order.
/// With [`CanvasJob::max_size`] set, the padded image is downscaled before the watermarks are
/// stamped, so overlays keep their configured pixel size.
pub fn compose(source: &Raster, job: &CanvasJob) -> FitResult<Raster> {
    let (w0, h0) = source.dimensions();
    let (wc, hc) = canvas_size((w0, h0), job.target_ratio)?;

    let mut canvas = Raster::filled(wc, hc, job.background.to_rgba8_premul(), ChannelMode::Rgb);

    let fill = clamp_fill_alpha(job.ambient_fill_alpha);
    if fill > 0.0 {
        let (sw, sh) = cover_size((w0, h0), (wc, hc));
        let ambient = source.resized(sw, sh)?;
        let ax = (i64::from(wc) - i64::from(sw)).div_euclid(2);
        let ay = (i64::from(hc) - i64::from(sh)).div_euclid(2);
        draw_over(&mut canvas, &ambient, ax, ay, fill);
    }

    // Odd padding leaves the extra pixel on the right/bottom.
    let ox = (wc - w0) / 2;
    let oy = (hc - h0) / 2;
    draw_over(&mut canvas, source, i64::from(ox), i64::from(oy), 1.0);

    if let Some(max_edge) = job.max_size {
        let (fw, fh) = fit_within((wc, hc), max_edge);
        if (fw, fh) != (wc, hc) {
            canvas = canvas.resized(fw, fh)?;
        }
    }
    let (wc, hc) = canvas.dimensions();

    for spec in job.watermarks.iter() {
        let mark = spec.image();
        let (x, y) = place_watermark(
            spec.anchor(),
            (wc, hc),
            mark.dimensions(),
            spec.offset(),
            job.inset,
        );
        draw_over(&mut canvas, mark, x, y, spec.transparency());
    }

    Ok(canvas)
}

/// Encode `canvas` as a maximum-quality JPEG at `path`.
pub fn write_jpeg(canvas: &Raster, path: &Path) -> FitResult<()> {
    let file = File::create(path).map_err(|e| FitError::io(path, e))?;
    let mut out = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    canvas
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| FitError::io(path, e))?;
    out.flush().map_err(|e| FitError::io(path, e))
}

/// Decode, compose and encode one job, catching every error at the job boundary.
#[tracing::instrument(skip(job), fields(source = %job.source_path.display()))]
pub fn run_job(job: &CanvasJob) -> JobResult {
    let outcome = read_image(&job.source_path)
        .and_then(|source| compose(&source, job))
        .and_then(|canvas| write_jpeg(&canvas, &job.output_path))
        .map(|()| job.output_path.clone());

    match &outcome {
        Ok(out) => tracing::debug!(output = %out.display(), "converted image"),
        Err(e) => tracing::warn!(error = %e, "image failed"),
    }
    JobResult::from_outcome(&job.source_path, outcome)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
