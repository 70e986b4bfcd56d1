use super::*;

#[test]
fn bottom_right_corner_sits_at_inset() {
    let base = (1600, 900);
    let mark = (200, 100);
    let (x, y) = place_watermark(
        Anchor::BottomRight,
        base,
        mark,
        (0, 0),
        InsetMode::Proportional,
    );
    let (mx, my) = InsetMode::Proportional.margins(base.0, base.1);
    assert_eq!((mx, my), (100, 56));
    assert_eq!(x + 200, 1600 - mx);
    assert_eq!(y + 100, 900 - my);
}

#[test]
fn zero_inset_is_flush_with_edges() {
    let base = (100, 80);
    let mark = (10, 20);
    let p = |a| place_watermark(a, base, mark, (0, 0), InsetMode::None);
    assert_eq!(p(Anchor::TopLeft), (0, 0));
    assert_eq!(p(Anchor::TopRight), (90, 0));
    assert_eq!(p(Anchor::BottomLeft), (0, 60));
    assert_eq!(p(Anchor::BottomRight), (90, 60));
}

#[test]
fn center_axes_round_half_up() {
    // (101 - 10) / 2 = 45.5 -> 46; (80 - 21) / 2 = 29.5 -> 30.
    assert_eq!(
        place_watermark(
            Anchor::MiddleCenter,
            (101, 80),
            (10, 21),
            (0, 0),
            InsetMode::Proportional
        ),
        (46, 30)
    );
    // Overlay wider than the canvas centers to a negative position.
    assert_eq!(
        place_watermark(
            Anchor::TopCenter,
            (10, 10),
            (21, 1),
            (0, 0),
            InsetMode::None
        ),
        (-5, 0)
    );
}

#[test]
fn offsets_are_added_without_clamping() {
    let (x, y) = place_watermark(
        Anchor::TopLeft,
        (64, 64),
        (8, 8),
        (-1000, 5000),
        InsetMode::Proportional,
    );
    assert_eq!((x, y), (4 - 1000, 4 + 5000));
}

#[test]
fn anchor_names_parse_case_insensitively() {
    for a in Anchor::ALL {
        assert_eq!(a.name().parse::<Anchor>().unwrap(), a);
        assert_eq!(a.name().to_lowercase().parse::<Anchor>().unwrap(), a);
    }
    assert_eq!("bottom-right".parse::<Anchor>().unwrap(), Anchor::BottomRight);
    assert!(matches!(
        "north".parse::<Anchor>(),
        Err(FitError::Config(_))
    ));
    assert_eq!(Anchor::default(), Anchor::MiddleCenter);
}

#[test]
fn anchor_serde_uses_screaming_snake_case() {
    let a: Anchor = serde_json::from_str("\"BOTTOM_CENTER\"").unwrap();
    assert_eq!(a, Anchor::BottomCenter);
    assert_eq!(
        serde_json::to_string(&Anchor::TopRight).unwrap(),
        "\"TOP_RIGHT\""
    );
    assert!(serde_json::from_str::<Anchor>("\"SIDEWAYS\"").is_err());
}
