/// Anchored watermark placement.
pub mod placement;
/// Batch-wide target ratio resolution.
pub mod resolver;
