use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::foundation::error::{FitError, FitResult};

/// Two ratios closer than this compare equal.
pub const RATIO_EPSILON: f64 = 1e-9;

/// Immutable `width:height` ratio.
///
/// Identity is by ratio, not by the pair: `16:9 == 32:18`. Ordering and equality use
/// [`RATIO_EPSILON`] on the floating-point quotient.
#[derive(Clone, Copy, Debug)]
pub struct AspectRatio {
    width: u32,
    height: u32,
}

impl AspectRatio {
    /// Create a ratio; both terms must be non-zero.
    pub fn new(width: u32, height: u32) -> FitResult<Self> {
        if width == 0 || height == 0 {
            return Err(FitError::ratio(format!(
                "aspect ratio {width}:{height} is not valid, both terms must be > 0"
            )));
        }
        Ok(Self { width, height })
    }

    /// Constant ratio; zero terms fail at compile time when used in a `const`.
    pub const fn new_const(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "aspect ratio terms must be > 0");
        Self { width, height }
    }

    /// Ratio of an image with the given pixel dimensions.
    pub fn of_dimensions(width: u32, height: u32) -> FitResult<Self> {
        Self::new(width, height)
    }

    /// Width term as given at construction.
    pub fn width(self) -> u32 {
        self.width
    }

    /// Height term as given at construction.
    pub fn height(self) -> u32 {
        self.height
    }

    /// `width / height` as `f64`.
    pub fn as_f64(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Tolerance-based three-way comparison.
    pub fn compare(&self, other: &Self) -> Ordering {
        let d = self.as_f64() - other.as_f64();
        if d.abs() < RATIO_EPSILON {
            Ordering::Equal
        } else if d > 0.0 {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    }

    /// Terms divided by their greatest common divisor.
    pub fn reduced(self) -> (u32, u32) {
        let g = gcd(self.width, self.height);
        (self.width / g, self.height / g)
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl PartialEq for AspectRatio {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for AspectRatio {}

impl PartialOrd for AspectRatio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AspectRatio {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for AspectRatio {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Distinct reduced forms only collide under the tolerance when both terms exceed ~31k.
        self.reduced().hash(state);
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

impl FromStr for AspectRatio {
    type Err = FitError;

    /// Parse `"W:H"`. Non-numeric input is a config error; zero or negative terms are ratio errors.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(':')
            .ok_or_else(|| FitError::config(format!("ratio '{s}' must have the form W:H")))?;

        fn term(s: &str, full: &str) -> FitResult<u32> {
            let v: i64 = s
                .trim()
                .parse()
                .map_err(|_| FitError::config(format!("ratio '{full}' has a non-integer term")))?;
            if v <= 0 {
                return Err(FitError::ratio(format!(
                    "aspect ratio {full} is not valid, both terms must be > 0"
                )));
            }
            u32::try_from(v).map_err(|_| FitError::ratio(format!("ratio term {v} is too large")))
        }

        Self::new(term(w, s)?, term(h, s)?)
    }
}

/// Opaque RGB8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fully opaque premultiplied RGBA8 pixel.
    pub fn to_rgba8_premul(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl Default for Rgb8 {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
