use kurbo::ParamCurveArclen;

use crate::{
    core::BezPath,
    error::{ScrollyteError, ScrollyteResult},
};

/// Arc-length accuracy for reveal measurements; style writes do not need
/// sub-pixel precision.
const ARCLEN_ACCURACY: f64 = 1e-3;

/// A stroked path revealed by a drawn-length fraction, the dash-offset
/// technique: the dash array is the total length and the offset shrinks to
/// zero as the fraction reaches 1.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PathReveal {
    pub path: BezPath,
}

impl PathReveal {
    pub fn new(path: BezPath) -> Self {
        Self { path }
    }

    pub fn from_svg(d: &str) -> ScrollyteResult<Self> {
        let path = BezPath::from_svg(d)
            .map_err(|e| ScrollyteError::validation(format!("invalid svg path: {e}")))?;
        Ok(Self::new(path))
    }

    pub fn validate(&self) -> ScrollyteResult<()> {
        if self.path.segments().next().is_none() {
            return Err(ScrollyteError::validation(
                "path reveal needs at least one segment",
            ));
        }
        Ok(())
    }

    /// Total arc length of all segments.
    pub fn length(&self) -> f64 {
        self.path
            .segments()
            .map(|seg| seg.arclen(ARCLEN_ACCURACY))
            .sum()
    }

    /// Resolve stroke parameters for a drawn fraction (clamped to [0,1]).
    pub fn resolve(&self, fraction: f64) -> ResolvedDraw {
        let fraction = fraction.clamp(0.0, 1.0);
        let total = self.length();
        ResolvedDraw {
            fraction,
            total_len: total,
            drawn_len: total * fraction,
            dash_offset: total * (1.0 - fraction),
        }
    }
}

/// Stroke dash parameters for a partially drawn path.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedDraw {
    pub fraction: f64,
    pub total_len: f64,
    pub drawn_len: f64,
    pub dash_offset: f64,
}
