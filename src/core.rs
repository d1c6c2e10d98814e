use crate::error::{ScrollyteError, ScrollyteResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Logical viewport size in CSS-like pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> ScrollyteResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ScrollyteError::validation(
                "viewport width/height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// A sub-range of a progress timeline, both ends in [0,1].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn new(start: f64, end: f64) -> ScrollyteResult<Self> {
        if !(start.is_finite() && end.is_finite()) {
            return Err(ScrollyteError::validation("span ends must be finite"));
        }
        if start > end {
            return Err(ScrollyteError::validation("span start must be <= end"));
        }
        if start < 0.0 || end > 1.0 {
            return Err(ScrollyteError::validation("span must lie within [0,1]"));
        }
        Ok(Self { start, end })
    }

    pub fn len(self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0.0
    }

    /// Normalized position of `x` inside the span, clamped to [0,1].
    /// An empty span degenerates to a step at `start`.
    pub fn unlerp(self, x: f64) -> f64 {
        if self.is_empty() {
            return if x < self.start { 0.0 } else { 1.0 };
        }
        ((x - self.start) / self.len()).clamp(0.0, 1.0)
    }
}

/// One coherent input snapshot. Everything in a frame is derived from a
/// single `Sample` so co-driven properties can never tear.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sample {
    /// Document scroll offset in logical pixels.
    pub scroll_y: f64,
    pub viewport: Viewport,
    /// Monotonic wall-clock seconds, drives time loops and reveals.
    pub time_s: f64,
}

impl Sample {
    pub fn new(scroll_y: f64, viewport: Viewport, time_s: f64) -> Self {
        Self {
            scroll_y,
            viewport,
            time_s,
        }
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }
}

/// Unit of a translation channel. `Vw`/`Vh` resolve against the sample
/// viewport at evaluation time; `Percent` is relative to the element's own
/// size and is passed through for the host to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Unit {
    Px,
    Vw,
    Vh,
    Percent,
}

impl Unit {
    /// Resolve a value in this unit to an output value plus the unit the
    /// host still has to interpret (`Px` or `Percent`).
    pub fn resolve(self, value: f64, viewport: Viewport) -> (f64, Unit) {
        match self {
            Unit::Px => (value, Unit::Px),
            Unit::Vw => (value / 100.0 * viewport.width, Unit::Px),
            Unit::Vh => (value / 100.0 * viewport.height, Unit::Px),
            Unit::Percent => (value, Unit::Percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_rejects_degenerate_sizes() {
        assert!(Viewport::new(0.0, 720.0).is_err());
        assert!(Viewport::new(1280.0, -1.0).is_err());
        assert!(Viewport::new(f64::NAN, 720.0).is_err());
        assert!(Viewport::new(1280.0, 720.0).is_ok());
    }

    #[test]
    fn span_unlerp_clamps_and_steps() {
        let s = Span::new(0.25, 0.75).unwrap();
        assert_eq!(s.unlerp(0.0), 0.0);
        assert_eq!(s.unlerp(0.5), 0.5);
        assert_eq!(s.unlerp(1.0), 1.0);

        let step = Span::new(0.5, 0.5).unwrap();
        assert_eq!(step.unlerp(0.49), 0.0);
        assert_eq!(step.unlerp(0.5), 1.0);
    }

    #[test]
    fn span_rejects_out_of_range() {
        assert!(Span::new(-0.1, 0.5).is_err());
        assert!(Span::new(0.2, 1.2).is_err());
        assert!(Span::new(0.8, 0.2).is_err());
    }

    #[test]
    fn vw_vh_resolve_against_viewport() {
        let vp = Viewport::new(1000.0, 500.0).unwrap();
        assert_eq!(Unit::Vw.resolve(-100.0, vp), (-1000.0, Unit::Px));
        assert_eq!(Unit::Vh.resolve(20.0, vp), (100.0, Unit::Px));
        assert_eq!(Unit::Px.resolve(50.0, vp), (50.0, Unit::Px));
        assert_eq!(Unit::Percent.resolve(-85.0, vp), (-85.0, Unit::Percent));
    }
}
