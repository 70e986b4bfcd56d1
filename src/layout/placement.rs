use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::FitError;

/// One of the nine watermark anchor positions on a 3x3 grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    #[default]
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Horizontal {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Vertical {
    Top,
    Middle,
    Bottom,
}

impl Anchor {
    /// All anchors in row-major order.
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::MiddleLeft,
        Anchor::MiddleCenter,
        Anchor::MiddleRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    /// Canonical `SCREAMING_SNAKE_CASE` name.
    pub fn name(self) -> &'static str {
        match self {
            Anchor::TopLeft => "TOP_LEFT",
            Anchor::TopCenter => "TOP_CENTER",
            Anchor::TopRight => "TOP_RIGHT",
            Anchor::MiddleLeft => "MIDDLE_LEFT",
            Anchor::MiddleCenter => "MIDDLE_CENTER",
            Anchor::MiddleRight => "MIDDLE_RIGHT",
            Anchor::BottomLeft => "BOTTOM_LEFT",
            Anchor::BottomCenter => "BOTTOM_CENTER",
            Anchor::BottomRight => "BOTTOM_RIGHT",
        }
    }

    fn axes(self) -> (Horizontal, Vertical) {
        use Horizontal::*;
        use Vertical::*;
        match self {
            Anchor::TopLeft => (Left, Top),
            Anchor::TopCenter => (Center, Top),
            Anchor::TopRight => (Right, Top),
            Anchor::MiddleLeft => (Left, Middle),
            Anchor::MiddleCenter => (Center, Middle),
            Anchor::MiddleRight => (Right, Middle),
            Anchor::BottomLeft => (Left, Bottom),
            Anchor::BottomCenter => (Center, Bottom),
            Anchor::BottomRight => (Right, Bottom),
        }
    }
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Anchor {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Anchor::ALL
            .into_iter()
            .find(|a| a.name() == key)
            .ok_or_else(|| FitError::config(format!("unknown watermark anchor '{s}'")))
    }
}

impl TryFrom<String> for Anchor {
    type Error = FitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// How far anchored watermarks are inset from the canvas edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsetMode {
    /// `width / 16` horizontally and `height / 16` vertically.
    #[default]
    Proportional,
    /// Flush with the edges.
    None,
}

impl InsetMode {
    /// `(margin_x, margin_y)` for a canvas of `width x height`.
    pub fn margins(self, width: u32, height: u32) -> (i64, i64) {
        match self {
            InsetMode::Proportional => (i64::from(width / 16), i64::from(height / 16)),
            InsetMode::None => (0, 0),
        }
    }
}

/// Top-left pixel position of a `mark`-sized overlay anchored on a `base`-sized canvas.
///
/// Centered axes round half up. The result is not clamped: extreme offsets may put the
/// overlay partially or fully off the canvas.
pub fn place_watermark(
    anchor: Anchor,
    base: (u32, u32),
    mark: (u32, u32),
    offset: (i32, i32),
    inset: InsetMode,
) -> (i64, i64) {
    let (bw, bh) = (i64::from(base.0), i64::from(base.1));
    let (mw, mh) = (i64::from(mark.0), i64::from(mark.1));
    let (margin_x, margin_y) = inset.margins(base.0, base.1);
    let (h, v) = anchor.axes();

    let x = match h {
        Horizontal::Left => margin_x,
        Horizontal::Center => centered(bw, mw),
        Horizontal::Right => bw - margin_x - mw,
    };
    let y = match v {
        Vertical::Top => margin_y,
        Vertical::Middle => centered(bh, mh),
        Vertical::Bottom => bh - margin_y - mh,
    };

    (x + i64::from(offset.0), y + i64::from(offset.1))
}

/// `round(base / 2 - mark / 2)` with halves rounded up.
fn centered(base: i64, mark: i64) -> i64 {
    (base - mark + 1).div_euclid(2)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;
