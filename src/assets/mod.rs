/// Background color names.
pub mod color;
/// Image decoding into premultiplied rasters.
pub mod decode;
/// Watermark overlays and their JSON configuration.
pub mod watermark;
