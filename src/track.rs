use crate::{
    core::{Rgba8, Span, Vec2},
    ease::Ease,
    error::{ScrollyteError, ScrollyteResult},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// One control point of a breakpoint table. The ease applies toward the
/// next stop.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Stop<T> {
    pub input: f64,
    pub value: T,
    pub ease: Ease,
}

/// An ordered breakpoint table mapping a progress scalar to a value.
///
/// Inputs must be non-decreasing; equal adjacent inputs express a step.
/// Outside the declared range the boundary value is held
/// (clamp-extrapolation), so sampling is total over the real line.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Track<T> {
    pub stops: Vec<Stop<T>>,
}

impl<T> Track<T>
where
    T: Lerp + Clone,
{
    pub fn constant(value: T) -> Self {
        Self {
            stops: vec![Stop {
                input: 0.0,
                value,
                ease: Ease::Linear,
            }],
        }
    }

    /// Two-stop linear ramp over a span.
    pub fn ramp(span: Span, from: T, to: T) -> Self {
        Self::ramp_eased(span, from, to, Ease::Linear)
    }

    pub fn ramp_eased(span: Span, from: T, to: T, ease: Ease) -> Self {
        Self {
            stops: vec![
                Stop {
                    input: span.start,
                    value: from,
                    ease,
                },
                Stop {
                    input: span.end,
                    value: to,
                    ease: Ease::Linear,
                },
            ],
        }
    }

    /// Multi-stop table with linear easing throughout.
    pub fn points(pairs: impl IntoIterator<Item = (f64, T)>) -> Self {
        Self {
            stops: pairs
                .into_iter()
                .map(|(input, value)| Stop {
                    input,
                    value,
                    ease: Ease::Linear,
                })
                .collect(),
        }
    }

    pub fn validate(&self) -> ScrollyteResult<()> {
        if self.stops.is_empty() {
            return Err(ScrollyteError::track("track must have at least one stop"));
        }
        if self.stops.iter().any(|s| !s.input.is_finite()) {
            return Err(ScrollyteError::track("track stop inputs must be finite"));
        }
        if !self.stops.windows(2).all(|w| w[0].input <= w[1].input) {
            return Err(ScrollyteError::track(
                "track stops must be sorted ascending by input",
            ));
        }
        Ok(())
    }

    /// Sample the table at `x`.
    ///
    /// Pure: the same `x` always yields the same output. A zero-width
    /// bracket steps to the later stop's value.
    pub fn sample(&self, x: f64) -> T {
        debug_assert!(!self.stops.is_empty(), "validate() before sampling");

        let idx = self.stops.partition_point(|s| s.input <= x);
        if idx == 0 {
            return self.stops[0].value.clone();
        }
        if idx >= self.stops.len() {
            return self.stops[self.stops.len() - 1].value.clone();
        }

        let a = &self.stops[idx - 1];
        let b = &self.stops[idx];
        let denom = b.input - a.input;
        if denom <= 0.0 {
            return b.value.clone();
        }

        let t = (x - a.input) / denom;
        T::lerp(&a.value, &b.value, a.ease.apply(t))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LoopMode {
    Repeat,
    PingPong,
}

/// A wall-clock-driven infinite loop over a normalized track: the pulsing
/// cursor, blinking glitch artifacts, the vibration offsets. Sampled by
/// seconds, not scroll progress.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TimeLoop<T> {
    /// Track over one normalized period, inputs in [0,1].
    pub track: Track<T>,
    pub period_s: f64,
    pub mode: LoopMode,
}

impl<T> TimeLoop<T>
where
    T: Lerp + Clone,
{
    pub fn new(track: Track<T>, period_s: f64, mode: LoopMode) -> Self {
        Self {
            track,
            period_s,
            mode,
        }
    }

    pub fn validate(&self) -> ScrollyteResult<()> {
        if !self.period_s.is_finite() || self.period_s <= 0.0 {
            return Err(ScrollyteError::track("time loop period must be > 0"));
        }
        self.track.validate()
    }

    pub fn sample(&self, time_s: f64) -> T {
        let cycles = time_s / self.period_s;
        let phase = match self.mode {
            LoopMode::Repeat => cycles.rem_euclid(1.0),
            LoopMode::PingPong => {
                let c = cycles.rem_euclid(2.0);
                if c <= 1.0 { c } else { 2.0 - c }
            }
        };
        self.track.sample(phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp01() -> Track<f64> {
        Track::ramp(Span::new(0.2, 0.8).unwrap(), 10.0, 20.0)
    }

    #[test]
    fn clamps_below_and_above() {
        let t = ramp01();
        assert_eq!(t.sample(-1.0), 10.0);
        assert_eq!(t.sample(0.2), 10.0);
        assert_eq!(t.sample(0.8), 20.0);
        assert_eq!(t.sample(5.0), 20.0);
    }

    #[test]
    fn interpolates_between_brackets() {
        let t = ramp01();
        assert!((t.sample(0.5) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn strictly_monotonic_between_stops() {
        let t = ramp01();
        let mut prev = t.sample(0.2);
        for i in 1..=20 {
            let x = 0.2 + 0.6 * (i as f64) / 20.0;
            let v = t.sample(x);
            assert!(v > prev);
            prev = v;
        }
    }

    #[test]
    fn duplicate_input_steps_to_later_value() {
        let t = Track::points([(0.0, 1.0), (0.5, 1.0), (0.5, 7.0), (1.0, 7.0)]);
        t.validate().unwrap();
        assert_eq!(t.sample(0.49), 1.0);
        assert_eq!(t.sample(0.5), 7.0);
        assert_eq!(t.sample(0.51), 7.0);
    }

    #[test]
    fn sampling_is_idempotent() {
        let t: Track<f64> = Track::points([(0.0, 0.0), (0.1, 1.0), (0.4, 1.0), (0.45, 0.0)]);
        for x in [0.0, 0.05, 0.1, 0.25, 0.42, 0.45, 0.9] {
            assert_eq!(t.sample(x).to_bits(), t.sample(x).to_bits());
        }
    }

    #[test]
    fn unsorted_and_empty_are_rejected() {
        let unsorted = Track::points([(0.5, 0.0), (0.2, 1.0)]);
        assert!(unsorted.validate().is_err());
        let empty: Track<f64> = Track { stops: vec![] };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn vec2_and_color_interpolate_componentwise() {
        let v = Track::ramp(
            Span::new(0.0, 1.0).unwrap(),
            Vec2::new(0.0, -100.0),
            Vec2::new(50.0, 100.0),
        );
        assert_eq!(v.sample(0.5), Vec2::new(25.0, 0.0));

        let c = Track::ramp(
            Span::new(0.0, 1.0).unwrap(),
            Rgba8::new(0, 0, 0, 0),
            Rgba8::new(200, 100, 50, 255),
        );
        assert_eq!(c.sample(0.5), Rgba8::new(100, 50, 25, 128));
    }

    #[test]
    fn ping_pong_reflects() {
        let pulse = TimeLoop::new(
            Track::ramp(Span::new(0.0, 1.0).unwrap(), 0.0, 1.0),
            2.0,
            LoopMode::PingPong,
        );
        pulse.validate().unwrap();
        assert_eq!(pulse.sample(0.0), 0.0);
        assert_eq!(pulse.sample(1.0), 0.5);
        assert_eq!(pulse.sample(2.0), 1.0);
        assert_eq!(pulse.sample(3.0), 0.5);
        assert_eq!(pulse.sample(4.0), 0.0);
    }

    #[test]
    fn repeat_wraps() {
        let saw: TimeLoop<f64> = TimeLoop::new(
            Track::ramp(Span::new(0.0, 1.0).unwrap(), 0.0, 1.0),
            0.5,
            LoopMode::Repeat,
        );
        assert!((saw.sample(0.25) - 0.5).abs() < 1e-12);
        assert!((saw.sample(0.75) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_period_rejected() {
        let p = TimeLoop::new(Track::constant(1.0), 0.0, LoopMode::Repeat);
        assert!(p.validate().is_err());
    }
}
