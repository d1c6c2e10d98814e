use std::collections::BTreeSet;

use crate::{
    core::{Rgba8, Unit, Vec2, Viewport},
    ease::Ease,
    error::{ScrollyteError, ScrollyteResult},
    gate::ViewportGate,
    path_reveal::PathReveal,
    spring::SpringParams,
    timeline::{AnchorPair, SectionGeometry},
    track::{TimeLoop, Track},
    typewriter::TypewriterSpec,
};

/// A whole scrollytelling page: sections stacked top to bottom, each owning
/// an independent progress timeline. `seed` fixes every per-instance
/// randomized parameter; rebuilding with the same seed reproduces the page
/// exactly.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Page {
    /// Reference viewport the choreography was authored against.
    pub viewport: Viewport,
    pub seed: u64,
    pub sections: Vec<Section>,
}

impl Page {
    pub fn validate(&self) -> ScrollyteResult<()> {
        Viewport::new(self.viewport.width, self.viewport.height)?;

        let mut names = BTreeSet::new();
        for section in &self.sections {
            if !names.insert(section.name.as_str()) {
                return Err(ScrollyteError::validation(format!(
                    "duplicate section name '{}'",
                    section.name
                )));
            }
            section.validate()?;
        }
        Ok(())
    }

    /// Resolve section placements against a live viewport. Sections are
    /// stacked; a section's scroll length is `length` viewport heights.
    pub fn layout(&self, viewport: Viewport) -> Vec<SectionGeometry> {
        let mut top = 0.0;
        self.sections
            .iter()
            .map(|s| {
                let geo = SectionGeometry {
                    top,
                    height: s.length * viewport.height,
                };
                top += geo.height;
                geo
            })
            .collect()
    }

    pub fn total_height(&self, viewport: Viewport) -> f64 {
        self.sections
            .iter()
            .map(|s| s.length * viewport.height)
            .sum()
    }
}

/// One full-viewport narrative block with its own scroll region.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Section {
    pub name: String,
    /// Scroll length in viewport heights (3.0 ≙ the site's 300vh).
    pub length: f64,
    /// Whether the section's content stays pinned while it scrolls through.
    pub pinned: bool,
    pub anchors: AnchorPair,
    /// Optional progress smoothing (the hero's critically damped spring).
    pub smoothing: Option<SpringParams>,
    /// Gate arming this section's entrance reveals.
    pub gate: Option<ViewportGate>,
    pub actors: Vec<Actor>,
}

impl Section {
    pub fn validate(&self) -> ScrollyteResult<()> {
        if self.name.trim().is_empty() {
            return Err(ScrollyteError::validation("section name must be non-empty"));
        }
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(ScrollyteError::validation(format!(
                "section '{}' length must be finite and > 0",
                self.name
            )));
        }
        if let Some(s) = &self.smoothing {
            s.validate()?;
        }

        let mut ids = BTreeSet::new();
        for actor in &self.actors {
            if !ids.insert(actor.id.as_str()) {
                return Err(ScrollyteError::validation(format!(
                    "section '{}' has duplicate actor id '{}'",
                    self.name, actor.id
                )));
            }
            if actor.reveal.is_some() && self.gate.is_none() {
                return Err(ScrollyteError::validation(format!(
                    "actor '{}' has a reveal but section '{}' has no gate",
                    actor.id, self.name
                )));
            }
            actor.validate()?;
        }
        Ok(())
    }
}

/// One choreographed visual element.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Actor {
    pub id: String,
    pub z: i32,
    pub props: ActorProps,
    /// Gate-armed one-shot entrance; composes with the scroll tracks.
    pub reveal: Option<Reveal>,
    /// Per-character scroll-linked text reveal.
    pub typewriter: Option<TypewriterSpec>,
    /// Stroked path revealed by drawn-length fraction.
    pub path: Option<PathDrawSpec>,
}

impl Actor {
    pub fn validate(&self) -> ScrollyteResult<()> {
        if self.id.trim().is_empty() {
            return Err(ScrollyteError::validation("actor id must be non-empty"));
        }
        self.props
            .validate()
            .map_err(|e| ScrollyteError::validation(format!("actor '{}': {e}", self.id)))?;
        if let Some(r) = &self.reveal {
            r.validate()?;
        }
        if let Some(tw) = &self.typewriter {
            tw.validate()?;
        }
        if let Some(p) = &self.path {
            p.validate()?;
        }
        Ok(())
    }
}

/// The scroll-driven properties of an actor. Every field is a pure function
/// of the section progress; `pulse` and `jitter` additionally read the
/// wall clock.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ActorProps {
    /// 0..1, clamped at evaluation.
    pub opacity: Track<f64>,
    pub translate: Track<Vec2>,
    pub translate_unit: (Unit, Unit),
    pub scale: Track<f64>,
    pub rotate_deg: Track<f64>,
    pub tint: Option<Track<Rgba8>>,
    /// Opacity multiplier looping on the wall clock (blinking, pulsing).
    pub pulse: Option<TimeLoop<f64>>,
    /// Pixel offset looping on the wall clock (vibration).
    pub jitter: Option<TimeLoop<Vec2>>,
}

impl Default for ActorProps {
    fn default() -> Self {
        Self {
            opacity: Track::constant(1.0),
            translate: Track::constant(Vec2::ZERO),
            translate_unit: (Unit::Px, Unit::Px),
            scale: Track::constant(1.0),
            rotate_deg: Track::constant(0.0),
            tint: None,
            pulse: None,
            jitter: None,
        }
    }
}

impl ActorProps {
    pub fn validate(&self) -> ScrollyteResult<()> {
        self.opacity.validate()?;
        self.translate.validate()?;
        self.scale.validate()?;
        self.rotate_deg.validate()?;
        if let Some(t) = &self.tint {
            t.validate()?;
        }
        if let Some(p) = &self.pulse {
            p.validate()?;
        }
        if let Some(j) = &self.jitter {
            j.validate()?;
        }
        Ok(())
    }
}

/// Path-draw choreography: which path, and how much of it is drawn at a
/// given progress.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PathDrawSpec {
    pub reveal: PathReveal,
    pub draw: Track<f64>,
}

impl PathDrawSpec {
    pub fn validate(&self) -> ScrollyteResult<()> {
        self.reveal.validate()?;
        self.draw.validate()
    }
}

/// Entrance transition armed by the section gate. Once armed (and the gate
/// is "once"), it plays forward on the wall clock and never reverses,
/// the only non-reversible choreography on a page.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Reveal {
    pub opacity_from: f64,
    /// Starting vertical offset in pixels, collapsing to 0.
    pub dy_from: f64,
    pub scale_from: f64,
    pub duration_s: f64,
    /// Stagger offset after the gate arms.
    pub delay_s: f64,
    pub ease: Ease,
}

impl Reveal {
    /// The site's stock entrance: fade in while drifting up.
    pub fn fade_up(dy_from: f64, duration_s: f64, delay_s: f64) -> Self {
        Self {
            opacity_from: 0.0,
            dy_from,
            scale_from: 1.0,
            duration_s,
            delay_s,
            ease: Ease::OutCubic,
        }
    }

    pub fn validate(&self) -> ScrollyteResult<()> {
        if !self.duration_s.is_finite() || self.duration_s <= 0.0 {
            return Err(ScrollyteError::validation("reveal duration must be > 0"));
        }
        if !self.delay_s.is_finite() || self.delay_s < 0.0 {
            return Err(ScrollyteError::validation("reveal delay must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.opacity_from) {
            return Err(ScrollyteError::validation(
                "reveal opacity_from must be within [0,1]",
            ));
        }
        if !self.scale_from.is_finite() || self.scale_from < 0.0 {
            return Err(ScrollyteError::validation("reveal scale_from must be >= 0"));
        }
        Ok(())
    }

    /// Normalized reveal progress at `time_s` given the instant the gate
    /// armed. `None` means the gate has not armed yet.
    pub fn progress_at(&self, armed_at: Option<f64>, time_s: f64) -> Option<f64> {
        let armed_at = armed_at?;
        let t = (time_s - armed_at - self.delay_s) / self.duration_s;
        Some(self.ease.apply(t.clamp(0.0, 1.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Span;

    fn actor(id: &str) -> Actor {
        Actor {
            id: id.to_string(),
            z: 0,
            props: ActorProps::default(),
            reveal: None,
            typewriter: None,
            path: None,
        }
    }

    fn section(name: &str, actors: Vec<Actor>) -> Section {
        Section {
            name: name.to_string(),
            length: 3.0,
            pinned: true,
            anchors: AnchorPair::pin_full(),
            smoothing: None,
            gate: None,
            actors,
        }
    }

    fn page(sections: Vec<Section>) -> Page {
        Page {
            viewport: Viewport {
                width: 1280.0,
                height: 800.0,
            },
            seed: 1,
            sections,
        }
    }

    #[test]
    fn valid_page_passes() {
        let p = page(vec![section("hero", vec![actor("wall")])]);
        p.validate().unwrap();
    }

    #[test]
    fn duplicate_section_names_rejected() {
        let p = page(vec![section("hero", vec![]), section("hero", vec![])]);
        assert!(p.validate().is_err());
    }

    #[test]
    fn duplicate_actor_ids_rejected() {
        let p = page(vec![section("hero", vec![actor("a"), actor("a")])]);
        assert!(p.validate().is_err());
    }

    #[test]
    fn reveal_without_gate_rejected() {
        let mut a = actor("card");
        a.reveal = Some(Reveal::fade_up(20.0, 0.5, 0.0));
        let p = page(vec![section("workflow", vec![a])]);
        assert!(p.validate().is_err());
    }

    #[test]
    fn bad_track_is_reported_with_actor_id() {
        let mut a = actor("broken");
        a.props.opacity = Track::points([(0.5, 1.0), (0.2, 0.0)]);
        let err = page(vec![section("s", vec![a])]).validate().unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn zero_length_section_rejected() {
        let mut s = section("s", vec![]);
        s.length = 0.0;
        assert!(page(vec![s]).validate().is_err());
    }

    #[test]
    fn layout_stacks_sections() {
        let p = page(vec![section("a", vec![]), section("b", vec![])]);
        let vp = Viewport::new(1280.0, 800.0).unwrap();
        let layout = p.layout(vp);
        assert_eq!(layout[0].top, 0.0);
        assert_eq!(layout[0].height, 2400.0);
        assert_eq!(layout[1].top, 2400.0);
        assert_eq!(p.total_height(vp), 4800.0);
    }

    #[test]
    fn reveal_progress_waits_for_gate_and_delay() {
        let r = Reveal::fade_up(20.0, 0.5, 0.2);
        assert_eq!(r.progress_at(None, 10.0), None);
        assert_eq!(r.progress_at(Some(1.0), 1.1), Some(0.0));
        assert_eq!(r.progress_at(Some(1.0), 2.0), Some(1.0));
        let mid = r.progress_at(Some(1.0), 1.45).unwrap();
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn json_roundtrip() {
        let mut a = actor("wall");
        a.props.opacity = Track::ramp(Span::new(0.35, 0.55).unwrap(), 1.0, 0.0);
        let p = page(vec![section("hero", vec![a])]);
        let s = serde_json::to_string_pretty(&p).unwrap();
        let de: Page = serde_json::from_str(&s).unwrap();
        de.validate().unwrap();
        assert_eq!(de.sections.len(), 1);
        assert_eq!(de.sections[0].actors[0].id, "wall");
    }
}
