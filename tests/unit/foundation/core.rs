use std::collections::HashSet;

use super::*;

fn r(w: u32, h: u32) -> AspectRatio {
    AspectRatio::new(w, h).unwrap()
}

#[test]
fn equality_is_by_ratio_not_by_pair() {
    assert_eq!(r(16, 9), r(32, 18));
    assert_eq!(r(21, 9), r(63, 27));
    assert_eq!(r(4, 3), r(4, 3));
    assert_ne!(r(4, 3), r(3, 4));
    assert_ne!(r(10000, 10001), r(1, 1));
}

#[test]
fn zero_terms_are_rejected() {
    assert!(matches!(AspectRatio::new(0, 5), Err(FitError::Ratio(_))));
    assert!(matches!(AspectRatio::new(5, 0), Err(FitError::Ratio(_))));
}

#[test]
fn ordering_follows_quotient() {
    assert_eq!(r(4, 5).compare(&r(1, 1)), Ordering::Less);
    assert_eq!(r(191, 100).compare(&r(16, 9)), Ordering::Greater);
    assert_eq!(r(2, 2).compare(&r(1, 1)), Ordering::Equal);
    assert!(r(4, 5) < r(191, 100));

    let mut v = vec![r(16, 9), r(4, 5), r(1, 1)];
    v.sort();
    assert_eq!(v, vec![r(4, 5), r(1, 1), r(16, 9)]);
}

#[test]
fn hashing_agrees_with_equality() {
    let set: HashSet<AspectRatio> = [r(16, 9), r(32, 18), r(48, 27), r(4, 3)].into();
    assert_eq!(set.len(), 2);
    assert!(set.contains(&r(8, 6)));
}

#[test]
fn display_and_parse_use_w_colon_h() {
    assert_eq!(r(191, 100).to_string(), "191:100");
    let parsed: AspectRatio = " 4 : 5 ".parse().unwrap();
    assert_eq!(parsed.width(), 4);
    assert_eq!(parsed.height(), 5);
}

#[test]
fn parse_distinguishes_malformed_from_degenerate() {
    assert!(matches!("16x9".parse::<AspectRatio>(), Err(FitError::Config(_))));
    assert!(matches!("a:9".parse::<AspectRatio>(), Err(FitError::Config(_))));
    assert!(matches!("0:9".parse::<AspectRatio>(), Err(FitError::Ratio(_))));
    assert!(matches!("-4:3".parse::<AspectRatio>(), Err(FitError::Ratio(_))));
}

#[test]
fn background_color_is_opaque() {
    assert_eq!(Rgb8::default(), Rgb8::BLACK);
    assert_eq!(Rgb8::new(1, 2, 3).to_rgba8_premul(), [1, 2, 3, 255]);
}
