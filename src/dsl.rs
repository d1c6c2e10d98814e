use crate::{
    core::{Rgba8, Unit, Vec2, Viewport},
    error::ScrollyteResult,
    gate::ViewportGate,
    model::{Actor, ActorProps, Page, PathDrawSpec, Reveal, Section},
    path_reveal::PathReveal,
    spring::SpringParams,
    timeline::AnchorPair,
    track::{TimeLoop, Track},
    typewriter::TypewriterSpec,
};

pub struct PageBuilder {
    viewport: Viewport,
    seed: u64,
    sections: Vec<Section>,
}

impl PageBuilder {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            seed: 0,
            sections: Vec::new(),
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn build(self) -> ScrollyteResult<Page> {
        let page = Page {
            viewport: self.viewport,
            seed: self.seed,
            sections: self.sections,
        };
        page.validate()?;
        Ok(page)
    }
}

pub struct SectionBuilder {
    name: String,
    length: f64,
    pinned: bool,
    anchors: AnchorPair,
    smoothing: Option<SpringParams>,
    gate: Option<ViewportGate>,
    actors: Vec<Actor>,
}

impl SectionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            length: 1.0,
            pinned: false,
            anchors: AnchorPair::pin_full(),
            smoothing: None,
            gate: None,
            actors: Vec::new(),
        }
    }

    pub fn length(mut self, viewport_heights: f64) -> Self {
        self.length = viewport_heights;
        self
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    pub fn anchors(mut self, anchors: AnchorPair) -> Self {
        self.anchors = anchors;
        self
    }

    pub fn smoothing(mut self, params: SpringParams) -> Self {
        self.smoothing = Some(params);
        self
    }

    pub fn gate(mut self, gate: ViewportGate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn actor(mut self, actor: Actor) -> Self {
        self.actors.push(actor);
        self
    }

    pub fn build(self) -> ScrollyteResult<Section> {
        let section = Section {
            name: self.name,
            length: self.length,
            pinned: self.pinned,
            anchors: self.anchors,
            smoothing: self.smoothing,
            gate: self.gate,
            actors: self.actors,
        };
        section.validate()?;
        Ok(section)
    }
}

pub struct ActorBuilder {
    id: String,
    z: i32,
    props: ActorProps,
    reveal: Option<Reveal>,
    typewriter: Option<TypewriterSpec>,
    path: Option<PathDrawSpec>,
}

impl ActorBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            z: 0,
            props: ActorProps::default(),
            reveal: None,
            typewriter: None,
            path: None,
        }
    }

    pub fn z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn opacity(mut self, track: Track<f64>) -> Self {
        self.props.opacity = track;
        self
    }

    pub fn translate(mut self, track: Track<Vec2>) -> Self {
        self.props.translate = track;
        self
    }

    pub fn translate_unit(mut self, x: Unit, y: Unit) -> Self {
        self.props.translate_unit = (x, y);
        self
    }

    pub fn scale(mut self, track: Track<f64>) -> Self {
        self.props.scale = track;
        self
    }

    pub fn rotate_deg(mut self, track: Track<f64>) -> Self {
        self.props.rotate_deg = track;
        self
    }

    pub fn tint(mut self, track: Track<Rgba8>) -> Self {
        self.props.tint = Some(track);
        self
    }

    pub fn pulse(mut self, pulse: TimeLoop<f64>) -> Self {
        self.props.pulse = Some(pulse);
        self
    }

    pub fn jitter(mut self, jitter: TimeLoop<Vec2>) -> Self {
        self.props.jitter = Some(jitter);
        self
    }

    pub fn reveal(mut self, reveal: Reveal) -> Self {
        self.reveal = Some(reveal);
        self
    }

    pub fn typewriter(mut self, spec: TypewriterSpec) -> Self {
        self.typewriter = Some(spec);
        self
    }

    pub fn path(mut self, reveal: PathReveal, draw: Track<f64>) -> Self {
        self.path = Some(PathDrawSpec { reveal, draw });
        self
    }

    pub fn build(self) -> ScrollyteResult<Actor> {
        let actor = Actor {
            id: self.id,
            z: self.z,
            props: self.props,
            reveal: self.reveal,
            typewriter: self.typewriter,
            path: self.path,
        };
        actor.validate()?;
        Ok(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Span;

    #[test]
    fn builders_create_expected_structure() {
        let actor = ActorBuilder::new("headline")
            .z(40)
            .opacity(Track::ramp(Span::new(0.5, 0.8).unwrap(), 0.0, 1.0))
            .scale(Track::ramp(Span::new(0.5, 0.8).unwrap(), 0.8, 1.0))
            .translate(Track::ramp(
                Span::new(0.5, 0.8).unwrap(),
                Vec2::new(0.0, 50.0),
                Vec2::ZERO,
            ))
            .build()
            .unwrap();

        let section = SectionBuilder::new("hero")
            .length(3.0)
            .pinned()
            .anchors(AnchorPair::pin_exit())
            .smoothing(SpringParams::critical(100.0).unwrap())
            .actor(actor)
            .build()
            .unwrap();

        let page = PageBuilder::new(Viewport::new(1280.0, 800.0).unwrap())
            .seed(7)
            .section(section)
            .build()
            .unwrap();

        assert_eq!(page.seed, 7);
        assert_eq!(page.sections.len(), 1);
        assert_eq!(page.sections[0].actors[0].z, 40);
    }

    #[test]
    fn invalid_actor_fails_at_build() {
        let bad = ActorBuilder::new("x").opacity(Track { stops: vec![] }).build();
        assert!(bad.is_err());
    }

    #[test]
    fn duplicate_sections_fail_at_page_build() {
        let a = SectionBuilder::new("s").build().unwrap();
        let b = SectionBuilder::new("s").build().unwrap();
        let page = PageBuilder::new(Viewport::new(1280.0, 800.0).unwrap())
            .section(a)
            .section(b)
            .build();
        assert!(page.is_err());
    }
}
