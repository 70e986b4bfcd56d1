//! Canvas composition and the parallel batch driver.

/// Parallel batch driver.
pub mod batch;
/// Single-image canvas composition and JPEG output.
pub mod compositor;
