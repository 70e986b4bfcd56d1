use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn opacity_clamps_and_rounds() {
    assert_eq!(opacity_to_u8(0.0), 0);
    assert_eq!(opacity_to_u8(1.0), 255);
    assert_eq!(opacity_to_u8(0.5), 128);
    assert_eq!(opacity_to_u8(-3.0), 0);
    assert_eq!(opacity_to_u8(7.0), 255);
    assert_eq!(opacity_to_u8(f32::NAN), 0);
}

#[test]
fn ceil_div_rounds_up_only_with_remainder() {
    assert_eq!(ceil_div_u64(10, 5), 2);
    assert_eq!(ceil_div_u64(11, 5), 3);
    assert_eq!(ceil_div_u64(0, 5), 0);
}

#[test]
fn scaled_lengths_never_collapse() {
    assert_eq!(scaled_len_round(100, 0.5), 50);
    assert_eq!(scaled_len_round(3, 0.01), 1);
    assert_eq!(scaled_len_round(3, 0.0), 1);
}
