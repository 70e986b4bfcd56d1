use std::path::Path;

use image::imageops::FilterType;

use crate::foundation::error::{FitError, FitResult};
use crate::foundation::math::mul_div255_u8;

/// Channel layout of the decoded source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelMode {
    /// Opaque RGB.
    Rgb,
    /// Alpha-capable RGBA.
    Rgba,
}

/// Owned pixel store in row-major premultiplied RGBA8.
///
/// The buffer is always four bytes per pixel; [`ChannelMode`] only records whether the source
/// carried an alpha channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    mode: ChannelMode,
    rgba8_premul: Vec<u8>,
}

impl Raster {
    /// Wrap premultiplied RGBA8 bytes; the length must be `width * height * 4`.
    pub fn from_premul(
        width: u32,
        height: u32,
        mode: ChannelMode,
        rgba8_premul: Vec<u8>,
    ) -> FitResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| FitError::config(format!("raster {width}x{height} is too large")))?;
        if rgba8_premul.len() != expected {
            return Err(FitError::config(format!(
                "raster buffer has {} bytes, expected {expected} for {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            mode,
            rgba8_premul,
        })
    }

    /// A raster with every pixel set to `px`.
    pub fn filled(width: u32, height: u32, px: [u8; 4], mode: ChannelMode) -> Self {
        let data = px.repeat(width as usize * height as usize);
        Self {
            width,
            height,
            mode,
            rgba8_premul: data,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Channel layout recorded at decode time.
    pub fn mode(&self) -> ChannelMode {
        self.mode
    }

    /// Raw premultiplied bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba8_premul
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.rgba8_premul
    }

    /// Premultiplied pixel at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.rgba8_premul[idx..idx + 4];
        [p[0], p[1], p[2], p[3]]
    }

    /// Resample to `width x height` with a triangle (bilinear) filter.
    pub fn resized(&self, width: u32, height: u32) -> FitResult<Self> {
        if (width, height) == self.dimensions() {
            return Ok(self.clone());
        }
        let src = image::RgbaImage::from_raw(self.width, self.height, self.rgba8_premul.clone())
            .ok_or_else(|| FitError::config("raster buffer does not match its dimensions"))?;
        let out = image::imageops::resize(&src, width, height, FilterType::Triangle);
        Ok(Self {
            width,
            height,
            mode: self.mode,
            rgba8_premul: out.into_raw(),
        })
    }

    /// Drop alpha for encoding. Premultiplied color is already composited over black.
    pub fn to_rgb8(&self) -> image::RgbImage {
        let mut rgb = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        for px in self.rgba8_premul.chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
        }
        image::RgbImage::from_raw(self.width, self.height, rgb)
            .unwrap_or_else(|| image::RgbImage::new(self.width, self.height))
    }
}

/// Decode encoded image bytes into a premultiplied [`Raster`].
///
/// `path` is only used for error reporting.
pub fn decode_image(bytes: &[u8], path: &Path) -> FitResult<Raster> {
    let dyn_img =
        image::load_from_memory(bytes).map_err(|e| FitError::unsupported_format(path, e))?;
    let mode = if dyn_img.color().has_alpha() {
        ChannelMode::Rgba
    } else {
        ChannelMode::Rgb
    };
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(Raster {
        width,
        height,
        mode,
        rgba8_premul,
    })
}

/// Read and decode an image file.
pub fn read_image(path: &Path) -> FitResult<Raster> {
    let bytes = std::fs::read(path).map_err(|e| FitError::io(path, e))?;
    decode_image(&bytes, path)
}

/// Read only the pixel dimensions from an image header.
pub fn probe_dimensions(path: &Path) -> FitResult<(u32, u32)> {
    let reader = image::ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| FitError::io(path, e))?;
    reader.into_dimensions().map_err(|e| match e {
        image::ImageError::IoError(io) => FitError::io(path, io),
        other => FitError::unsupported_format(path, other),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = mul_div255_u8(u16::from(*c), a);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
