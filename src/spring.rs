use crate::error::{ScrollyteError, ScrollyteResult};

/// Below this distance and speed the spring snaps to its target.
const SETTLE_EPSILON: f64 = 1e-4;

/// Integration is clamped to this step so a stalled tab cannot explode the
/// simulation when frames resume.
const MAX_DT: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
}

impl SpringParams {
    pub fn new(stiffness: f64, damping: f64) -> ScrollyteResult<Self> {
        if !(stiffness.is_finite() && damping.is_finite()) || stiffness <= 0.0 || damping <= 0.0 {
            return Err(ScrollyteError::validation(
                "spring stiffness and damping must be finite and > 0",
            ));
        }
        Ok(Self { stiffness, damping })
    }

    /// Critically damped response for a given stiffness
    /// (`damping = 2 * sqrt(stiffness)`): fastest convergence without
    /// oscillation. Stiffness 100 yields the damping 20 used by the hero.
    pub fn critical(stiffness: f64) -> ScrollyteResult<Self> {
        Self::new(stiffness, 2.0 * stiffness.max(0.0).sqrt())
    }

    pub fn validate(&self) -> ScrollyteResult<()> {
        Self::new(self.stiffness, self.damping).map(|_| ())
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 20.0,
        }
    }
}

/// Second-order smoothing filter over a raw progress stream. Purely
/// cosmetic: it removes the jumps of flick scrolling and always converges
/// to the raw value once the input stops moving.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    pub position: f64,
    pub velocity: f64,
    params: SpringParams,
}

impl Spring {
    pub fn new(params: SpringParams) -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            params,
        }
    }

    /// Place the spring directly at `position`, at rest. Used on mount so
    /// the first frame does not animate in from zero.
    pub fn snap_to(&mut self, position: f64) {
        self.position = position;
        self.velocity = 0.0;
    }

    /// Advance the simulation by `dt` seconds toward `target` using
    /// semi-implicit Euler. Returns the filtered position.
    pub fn step(&mut self, dt: f64, target: f64) -> f64 {
        let dt = dt.clamp(0.0, MAX_DT);
        let accel = (target - self.position) * self.params.stiffness
            - self.velocity * self.params.damping;
        self.velocity += accel * dt;
        self.position += self.velocity * dt;

        if (target - self.position).abs() < SETTLE_EPSILON
            && self.velocity.abs() < SETTLE_EPSILON
        {
            self.position = target;
            self.velocity = 0.0;
        }
        self.position
    }

    /// True once the spring has snapped onto `target`.
    pub fn settled_at(&self, target: f64) -> bool {
        self.position == target && self.velocity == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_reject_non_positive() {
        assert!(SpringParams::new(0.0, 20.0).is_err());
        assert!(SpringParams::new(100.0, -1.0).is_err());
        assert!(SpringParams::new(100.0, 20.0).is_ok());
    }

    #[test]
    fn critical_damping_of_hero_stiffness() {
        let p = SpringParams::critical(100.0).unwrap();
        assert_eq!(p.damping, 20.0);
    }

    #[test]
    fn converges_to_constant_target() {
        let mut s = Spring::new(SpringParams::default());
        for _ in 0..240 {
            s.step(1.0 / 60.0, 1.0);
        }
        assert!(s.settled_at(1.0));
        assert_eq!(s.position, 1.0);
    }

    #[test]
    fn critical_damping_does_not_ring() {
        let mut s = Spring::new(SpringParams::critical(100.0).unwrap());
        let mut max = 0.0f64;
        for _ in 0..600 {
            max = max.max(s.step(1.0 / 60.0, 1.0));
        }
        assert!(max <= 1.0 + 1e-3, "overshoot: {max}");
    }

    #[test]
    fn tracks_a_moving_target_then_settles() {
        let mut s = Spring::new(SpringParams::default());
        for i in 0..60 {
            s.step(1.0 / 60.0, i as f64 / 60.0);
        }
        for _ in 0..240 {
            s.step(1.0 / 60.0, 0.5);
        }
        assert!(s.settled_at(0.5));
    }

    #[test]
    fn oversized_dt_is_clamped() {
        let mut s = Spring::new(SpringParams::default());
        s.step(10.0, 1.0);
        assert!(s.position.is_finite());
        assert!(s.position.abs() < 10.0);
    }
}
