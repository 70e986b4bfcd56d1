use super::*;
use crate::assets::decode::ChannelMode;

fn write_mark(dir: &Path, name: &str, w: u32, h: u32) {
    image::RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 200]))
        .save(dir.join(name))
        .unwrap();
}

fn mark() -> Arc<Raster> {
    Arc::new(Raster::filled(10, 4, [255, 255, 255, 255], ChannelMode::Rgba))
}

#[test]
fn spec_rejects_out_of_range_values() {
    assert!(WatermarkSpec::new(mark(), (0, 0), 0.5, Anchor::TopLeft, 1.0).is_ok());
    assert!(matches!(
        WatermarkSpec::new(mark(), (0, 0), 1.5, Anchor::TopLeft, 1.0),
        Err(FitError::Config(_))
    ));
    assert!(matches!(
        WatermarkSpec::new(mark(), (0, 0), 0.5, Anchor::TopLeft, 0.0),
        Err(FitError::Config(_))
    ));
    assert!(matches!(
        WatermarkSpec::new(mark(), (0, 0), f32::NAN, Anchor::TopLeft, 1.0),
        Err(FitError::Config(_))
    ));
}

#[test]
fn overlay_is_scaled_once_at_construction() {
    let spec = WatermarkSpec::new(mark(), (0, 0), 1.0, Anchor::TopLeft, 0.25).unwrap();
    assert_eq!(spec.image().dimensions(), (3, 1));
    let spec = WatermarkSpec::new(mark(), (0, 0), 1.0, Anchor::TopLeft, 2.0).unwrap();
    assert_eq!(spec.image().dimensions(), (20, 8));

    // Unit scale keeps sharing the caller's raster.
    let original = mark();
    let spec =
        WatermarkSpec::new(Arc::clone(&original), (0, 0), 1.0, Anchor::TopLeft, 1.0).unwrap();
    assert!(std::ptr::eq(spec.image(), original.as_ref()));

    // Clones share the scaled raster instead of resampling again.
    let spec = WatermarkSpec::new(mark(), (0, 0), 1.0, Anchor::TopLeft, 0.5).unwrap();
    let clone = spec.clone();
    assert!(std::ptr::eq(spec.image(), clone.image()));
}

#[test]
fn loads_stack_in_file_order_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write_mark(dir.path(), "logo.png", 8, 8);
    write_mark(dir.path(), "sig.png", 4, 2);
    let json = r#"
{
  "inset": "none",
  "watermarks": [
    { "image": "logo.png", "anchor": "BOTTOM_RIGHT", "offset_x": -3, "scale": 0.5 },
    { "image": "sig.png", "transparency": 1.0 }
  ]
}
"#;
    let path = dir.path().join("marks.json");
    std::fs::write(&path, json).unwrap();

    let cfg = WatermarkConfig::from_path(&path).unwrap();
    assert_eq!(cfg.inset, InsetMode::None);
    assert_eq!(cfg.specs.len(), 2);

    let a = &cfg.specs[0];
    assert_eq!(a.anchor(), Anchor::BottomRight);
    assert_eq!(a.offset(), (-3, 0));
    assert_eq!(a.scale(), 0.5);
    assert_eq!(a.transparency(), 0.55);
    assert_eq!(a.image().dimensions(), (4, 4));

    let b = &cfg.specs[1];
    assert_eq!(b.anchor(), Anchor::MiddleCenter);
    assert_eq!(b.transparency(), 1.0);
    assert_eq!(b.image().dimensions(), (4, 2));
}

#[test]
fn accepts_flat_settings_with_legacy_keys() {
    let dir = tempfile::tempdir().unwrap();
    write_mark(dir.path(), "logo.png", 6, 3);
    let json = r#"{
        "srcPath": "/photos",
        "watermarkImagePath": "logo.png",
        "watermarkX": 5,
        "watermarkY": -7,
        "watermarkScale": 2.0,
        "watermarkTransparency": 0.3,
        "orientation": "TOP_CENTER"
    }"#;
    let cfg = WatermarkConfig::from_reader(json.as_bytes(), dir.path()).unwrap();
    assert_eq!(cfg.inset, InsetMode::Proportional);
    assert_eq!(cfg.specs.len(), 1);
    let s = &cfg.specs[0];
    assert_eq!(s.offset(), (5, -7));
    assert_eq!(s.scale(), 2.0);
    assert_eq!(s.transparency(), 0.3);
    assert_eq!(s.anchor(), Anchor::TopCenter);
}

#[test]
fn bad_config_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        WatermarkConfig::from_reader("{ not json".as_bytes(), dir.path()),
        Err(FitError::Config(_))
    ));
    assert!(matches!(
        WatermarkConfig::from_reader(r#"{"image": "missing.png"}"#.as_bytes(), dir.path()),
        Err(FitError::Config(_))
    ));
    assert!(matches!(
        WatermarkConfig::from_path(dir.path().join("nope.json")),
        Err(FitError::Config(_))
    ));

    write_mark(dir.path(), "logo.png", 2, 2);
    assert!(matches!(
        WatermarkConfig::from_reader(
            r#"{"image": "logo.png", "scale": -1.0}"#.as_bytes(),
            dir.path()
        ),
        Err(FitError::Config(_))
    ));
}

#[test]
fn max_size_reads_both_forms() {
    let dir = tempfile::tempdir().unwrap();
    write_mark(dir.path(), "logo.png", 4, 4);

    let flat = r#"{ "watermarkImagePath": "logo.png", "imageSize": 1080 }"#;
    let cfg = WatermarkConfig::from_reader(flat.as_bytes(), dir.path()).unwrap();
    assert_eq!(cfg.max_size, Some(1080));
    assert_eq!(cfg.specs.len(), 1);

    let keep = r#"{ "watermarkImagePath": "logo.png", "imageSize": 0 }"#;
    let cfg = WatermarkConfig::from_reader(keep.as_bytes(), dir.path()).unwrap();
    assert_eq!(cfg.max_size, None);

    let stack = r#"{ "max_size": 640, "watermarks": [ { "image": "logo.png" } ] }"#;
    let cfg = WatermarkConfig::from_reader(stack.as_bytes(), dir.path()).unwrap();
    assert_eq!(cfg.max_size, Some(640));

    let none = r#"{ "watermarks": [] }"#;
    let cfg = WatermarkConfig::from_reader(none.as_bytes(), dir.path()).unwrap();
    assert_eq!(cfg.max_size, None);
    assert!(cfg.specs.is_empty());
}
