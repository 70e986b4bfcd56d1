/// Aspect ratios and colors.
pub mod core;
/// Error taxonomy.
pub mod error;
pub(crate) mod math;
