pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Map an opacity in `[0, 1]` onto `0..=255`, clamping out-of-range input.
pub(crate) fn opacity_to_u8(opacity: f32) -> u8 {
    if opacity.is_nan() {
        return 0;
    }
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// `ceil(num / den)` for `den > 0`.
pub(crate) fn ceil_div_u64(num: u64, den: u64) -> u64 {
    num.div_ceil(den)
}

/// Scale a pixel length by `factor`, rounding to nearest and never returning less than one pixel.
pub(crate) fn scaled_len_round(len: u32, factor: f64) -> u32 {
    let v = (f64::from(len) * factor).round();
    v.clamp(1.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
