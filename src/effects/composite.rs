use crate::assets::decode::Raster;
use crate::foundation::math::{mul_div255_u8, opacity_to_u8};

pub type PremulRgba8 = [u8; 4];

/// Source-over blend of one premultiplied pixel, with `src` weighted by an opacity already
/// quantised to `0..=255`.
///
/// Alpha and color channels share one formula: `src * op + dst * (1 - src_a * op)`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: u8) -> PremulRgba8 {
    let op = u16::from(opacity);
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let keep = 255 - u16::from(sa);
    let mut out = dst;
    for (o, s) in out.iter_mut().zip(src) {
        *o = mul_div255_u8(u16::from(s), op).saturating_add(mul_div255_u8(u16::from(*o), keep));
    }
    out
}

/// Draw `src` onto `dst` with its top-left corner at `(x, y)`.
///
/// Any part of `src` that falls outside `dst` is clipped; a layer that misses `dst` entirely
/// is a no-op.
pub fn draw_over(dst: &mut Raster, src: &Raster, x: i64, y: i64, opacity: f32) {
    let op = opacity_to_u8(opacity);
    if op == 0 {
        return;
    }

    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let span = ((x1 - x0) * 4) as usize;
    let dst_stride = dw as usize * 4;
    let src_stride = sw as usize * 4;
    let src_bytes = src.as_bytes();
    let dst_bytes = dst.as_bytes_mut();

    for dy in y0..y1 {
        let sy = (dy - y) as usize;
        let sx = (x0 - x) as usize;
        let d_start = dy as usize * dst_stride + x0 as usize * 4;
        let s_start = sy * src_stride + sx * 4;
        let d_row = &mut dst_bytes[d_start..d_start + span];
        let s_row = &src_bytes[s_start..s_start + span];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], op);
            d.copy_from_slice(&out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
