use crate::{
    core::{Rgba8, Sample, Unit},
    error::{ScrollyteError, ScrollyteResult},
    gate::{GateBook, GateState},
    model::{Actor, Page, Section},
    path_reveal::ResolvedDraw,
    track::Lerp,
};

/// One fully resolved frame: every visual property of every actor, computed
/// from a single input sample. The host writes these values out verbatim.
#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedPage {
    pub scroll_y: f64,
    pub time_s: f64,
    pub sections: Vec<EvaluatedSection>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedSection {
    pub name: String,
    /// The progress every node in this section was sampled at.
    pub progress: f64,
    pub pinned: bool,
    pub nodes: Vec<EvaluatedActorNode>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedActorNode {
    pub actor_id: String,
    pub z: i32,
    pub opacity: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    /// `Px` or `Percent` after viewport units have been resolved.
    pub translate_x_unit: Unit,
    pub translate_y_unit: Unit,
    pub scale: f64,
    pub rotate_deg: f64,
    pub tint: Option<Rgba8>,
    /// Per-character opacities of a typewriter actor.
    pub chars: Option<Vec<f64>>,
    /// Stroke dash parameters of a path-draw actor.
    pub draw: Option<ResolvedDraw>,
    /// Entrance progress, present once the section gate has armed.
    pub reveal_t: Option<f64>,
}

pub struct Evaluator;

impl Evaluator {
    /// Per-section raw (unsmoothed) progress for a sample. Pure; recomputed
    /// from scratch on every scroll or resize event.
    pub fn raw_progress(page: &Page, sample: &Sample) -> Vec<f64> {
        page.layout(sample.viewport)
            .into_iter()
            .zip(&page.sections)
            .map(|(geo, section)| geo.progress(section.anchors, sample))
            .collect()
    }

    /// Resolve the whole page for one sample. `progress` carries one value
    /// per section (raw or spring-filtered, the caller decides); `gates`
    /// supplies the armed state for entrance reveals.
    ///
    /// Within the frame every property of a section is derived from the
    /// same progress value, so co-driven properties can never tear.
    #[tracing::instrument(skip_all, fields(scroll_y = sample.scroll_y))]
    pub fn eval_page(
        page: &Page,
        sample: &Sample,
        progress: &[f64],
        gates: &GateBook,
    ) -> ScrollyteResult<EvaluatedPage> {
        page.validate()?;
        if progress.len() != page.sections.len() {
            return Err(ScrollyteError::evaluation(
                "progress slice length does not match section count",
            ));
        }

        let sections = page
            .sections
            .iter()
            .zip(progress)
            .map(|(section, &p)| eval_section(section, p, sample, gates.state(&section.name)))
            .collect::<ScrollyteResult<Vec<_>>>()?;

        Ok(EvaluatedPage {
            scroll_y: sample.scroll_y,
            time_s: sample.time_s,
            sections,
        })
    }

    /// One-shot evaluation at raw progress, arming gates as of this sample.
    /// What the CLI uses for a static frame; interactive hosts go through
    /// the pipeline runtime instead.
    pub fn eval_at(page: &Page, sample: &Sample) -> ScrollyteResult<EvaluatedPage> {
        page.validate()?;
        let progress = Self::raw_progress(page, sample);

        let mut gates = GateBook::new();
        let view = crate::core::Rect::new(
            0.0,
            sample.scroll_y,
            sample.viewport.width,
            sample.scroll_y + sample.viewport.height,
        );
        for (section, geo) in page.sections.iter().zip(page.layout(sample.viewport)) {
            if let Some(gate) = section.gate {
                gates.observe(
                    &section.name,
                    gate,
                    geo.rect(sample.viewport),
                    view,
                    sample.time_s,
                );
            }
        }

        Self::eval_page(page, sample, &progress, &gates)
    }
}

fn eval_section(
    section: &Section,
    progress: f64,
    sample: &Sample,
    gate: GateState,
) -> ScrollyteResult<EvaluatedSection> {
    let mut nodes = section
        .actors
        .iter()
        .map(|actor| eval_actor(actor, progress, sample, gate))
        .collect::<ScrollyteResult<Vec<_>>>()?;

    // Stable sort: declaration order breaks z ties.
    nodes.sort_by_key(|n| n.z);

    Ok(EvaluatedSection {
        name: section.name.clone(),
        progress,
        pinned: section.pinned,
        nodes,
    })
}

fn eval_actor(
    actor: &Actor,
    progress: f64,
    sample: &Sample,
    gate: GateState,
) -> ScrollyteResult<EvaluatedActorNode> {
    let props = &actor.props;

    let mut opacity = props.opacity.sample(progress).clamp(0.0, 1.0);
    if let Some(pulse) = &props.pulse {
        opacity *= pulse.sample(sample.time_s).clamp(0.0, 1.0);
    }

    let translate = props.translate.sample(progress);
    let (mut x, x_unit) = props.translate_unit.0.resolve(translate.x, sample.viewport);
    let (mut y, y_unit) = props.translate_unit.1.resolve(translate.y, sample.viewport);

    // Vibration offsets are pixel-space; percent channels are left alone.
    if let Some(jitter) = &props.jitter {
        let off = jitter.sample(sample.time_s);
        if x_unit == Unit::Px {
            x += off.x;
        }
        if y_unit == Unit::Px {
            y += off.y;
        }
    }

    let mut scale = props.scale.sample(progress);
    let rotate_deg = props.rotate_deg.sample(progress);
    let tint = props.tint.as_ref().map(|t| t.sample(progress));

    let mut reveal_t = None;
    if let Some(reveal) = &actor.reveal {
        match reveal.progress_at(gate.armed_at(), sample.time_s) {
            Some(t) => {
                opacity *= <f64 as Lerp>::lerp(&reveal.opacity_from, &1.0, t);
                scale *= <f64 as Lerp>::lerp(&reveal.scale_from, &1.0, t);
                if y_unit == Unit::Px {
                    y += <f64 as Lerp>::lerp(&reveal.dy_from, &0.0, t);
                }
                reveal_t = Some(t);
            }
            None => {
                // Gate not armed yet: hold the entrance's from-state.
                opacity *= reveal.opacity_from;
                scale *= reveal.scale_from;
                if y_unit == Unit::Px {
                    y += reveal.dy_from;
                }
            }
        }
    }

    let chars = actor.typewriter.as_ref().map(|tw| tw.opacities(progress));
    let draw = actor
        .path
        .as_ref()
        .map(|pd| pd.reveal.resolve(pd.draw.sample(progress)));

    Ok(EvaluatedActorNode {
        actor_id: actor.id.clone(),
        z: actor.z,
        opacity,
        translate_x: x,
        translate_y: y,
        translate_x_unit: x_unit,
        translate_y_unit: y_unit,
        scale,
        rotate_deg,
        tint,
        chars,
        draw,
        reveal_t,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{Span, Vec2, Viewport},
        gate::ViewportGate,
        model::{ActorProps, Reveal},
        timeline::AnchorPair,
        track::Track,
        typewriter::TypewriterSpec,
    };

    fn viewport() -> Viewport {
        Viewport::new(1000.0, 800.0).unwrap()
    }

    fn sample(scroll_y: f64) -> Sample {
        Sample::new(scroll_y, viewport(), 0.0)
    }

    fn one_section_page(actors: Vec<Actor>) -> Page {
        Page {
            viewport: viewport(),
            seed: 1,
            sections: vec![Section {
                name: "s0".to_string(),
                length: 3.0,
                pinned: true,
                anchors: AnchorPair::pin_exit(),
                smoothing: None,
                gate: None,
                actors,
            }],
        }
    }

    fn bare_actor(id: &str) -> Actor {
        Actor {
            id: id.to_string(),
            z: 0,
            props: ActorProps::default(),
            reveal: None,
            typewriter: None,
            path: None,
        }
    }

    #[test]
    fn raw_progress_tracks_scroll() {
        let page = one_section_page(vec![]);
        // pin_exit over a 2400px section.
        assert_eq!(Evaluator::raw_progress(&page, &sample(0.0)), vec![0.0]);
        assert_eq!(Evaluator::raw_progress(&page, &sample(1200.0)), vec![0.5]);
        assert_eq!(Evaluator::raw_progress(&page, &sample(2400.0)), vec![1.0]);
    }

    #[test]
    fn co_driven_properties_share_one_sample() {
        let window = Span::new(0.2, 0.8).unwrap();
        let mut a = bare_actor("headline");
        a.props.opacity = Track::ramp(window, 0.0, 1.0);
        a.props.translate = Track::ramp(window, Vec2::new(0.0, 50.0), Vec2::ZERO);
        let page = one_section_page(vec![a]);

        for scroll in [0.0, 600.0, 1200.0, 1800.0, 2400.0] {
            let frame = Evaluator::eval_at(&page, &sample(scroll)).unwrap();
            let node = &frame.sections[0].nodes[0];
            // y collapses exactly as opacity rises: same progress sample.
            assert!((node.translate_y - 50.0 * (1.0 - node.opacity)).abs() < 1e-9);
        }
    }

    #[test]
    fn scrubbing_down_retraces_exactly() {
        let mut a = bare_actor("fade");
        a.props.opacity = Track::points([(0.1, 0.0), (0.5, 1.0), (0.9, 0.2)]);
        let page = one_section_page(vec![a]);

        let scrolls: Vec<f64> = (0..=48).map(|i| i as f64 * 50.0).collect();
        let up: Vec<String> = scrolls
            .iter()
            .map(|&s| serde_json::to_string(&Evaluator::eval_at(&page, &sample(s)).unwrap()).unwrap())
            .collect();
        let down: Vec<String> = scrolls
            .iter()
            .rev()
            .map(|&s| serde_json::to_string(&Evaluator::eval_at(&page, &sample(s)).unwrap()).unwrap())
            .collect();

        for (a, b) in up.iter().zip(down.iter().rev()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn opacity_is_clamped() {
        let mut a = bare_actor("hot");
        a.props.opacity = Track::constant(2.5);
        let page = one_section_page(vec![a]);
        let frame = Evaluator::eval_at(&page, &sample(0.0)).unwrap();
        assert_eq!(frame.sections[0].nodes[0].opacity, 1.0);
    }

    #[test]
    fn z_sort_is_stable() {
        let mut back = bare_actor("back");
        back.z = -1;
        let mut front = bare_actor("front");
        front.z = 5;
        let mid_a = bare_actor("mid_a");
        let mid_b = bare_actor("mid_b");
        let page = one_section_page(vec![front, mid_a, mid_b, back]);
        let frame = Evaluator::eval_at(&page, &sample(0.0)).unwrap();
        let order: Vec<&str> = frame.sections[0]
            .nodes
            .iter()
            .map(|n| n.actor_id.as_str())
            .collect();
        assert_eq!(order, vec!["back", "mid_a", "mid_b", "front"]);
    }

    #[test]
    fn viewport_units_resolve_to_pixels() {
        let mut a = bare_actor("projectile");
        a.props.translate = Track::constant(Vec2::new(-100.0, 20.0));
        a.props.translate_unit = (Unit::Vw, Unit::Vh);
        let page = one_section_page(vec![a]);
        let frame = Evaluator::eval_at(&page, &sample(0.0)).unwrap();
        let node = &frame.sections[0].nodes[0];
        assert_eq!(node.translate_x, -1000.0);
        assert_eq!(node.translate_y, 160.0);
        assert_eq!(node.translate_x_unit, Unit::Px);
    }

    #[test]
    fn typewriter_chars_follow_progress() {
        let mut a = bare_actor("warning");
        a.typewriter = Some(TypewriterSpec::new(
            "0123456789",
            Span::new(0.8, 1.0).unwrap(),
        ));
        let page = one_section_page(vec![a]);
        // progress 0.9 on a pin_exit 2400px section = scroll 2160.
        let frame = Evaluator::eval_at(&page, &sample(2160.0)).unwrap();
        let chars = frame.sections[0].nodes[0].chars.as_ref().unwrap();
        assert_eq!(chars.len(), 10);
        assert!(chars[..5].iter().all(|&c| (c - 1.0).abs() < 1e-9));
        assert!(chars[5] < 1e-9);
    }

    #[test]
    fn reveal_holds_from_state_until_gate_arms() {
        let mut a = bare_actor("card");
        a.reveal = Some(Reveal {
            opacity_from: 0.0,
            dy_from: 20.0,
            scale_from: 0.95,
            duration_s: 0.5,
            delay_s: 0.0,
            ease: crate::ease::Ease::Linear,
        });
        let mut page = one_section_page(vec![a]);
        page.sections[0].gate = Some(ViewportGate::new(0.0, true));
        page.validate().unwrap();

        // Section is in view at scroll 0, so eval_at arms the gate at
        // time_s and the reveal starts from its hidden state.
        let frame = Evaluator::eval_at(&page, &sample(0.0)).unwrap();
        let node = &frame.sections[0].nodes[0];
        assert_eq!(node.reveal_t, Some(0.0));
        assert_eq!(node.opacity, 0.0);
        assert_eq!(node.translate_y, 20.0);
        assert!((node.scale - 0.95).abs() < 1e-12);

        // Two seconds after arming the entrance has finished. The gate book
        // persists across frames, so the arm time stays at 0.
        let mut gates = GateBook::new();
        let geo = page.layout(viewport())[0];
        let view = crate::core::Rect::new(0.0, 0.0, 1000.0, 800.0);
        gates.observe(
            "s0",
            page.sections[0].gate.unwrap(),
            geo.rect(viewport()),
            view,
            0.0,
        );
        let late = Sample::new(0.0, viewport(), 2.0);
        let progress = Evaluator::raw_progress(&page, &late);
        let frame = Evaluator::eval_page(&page, &late, &progress, &gates).unwrap();
        let node = &frame.sections[0].nodes[0];
        assert_eq!(node.reveal_t, Some(1.0));
        assert_eq!(node.opacity, 1.0);
        assert_eq!(node.translate_y, 0.0);
        assert_eq!(node.scale, 1.0);
    }

    #[test]
    fn progress_slice_length_is_checked() {
        let page = one_section_page(vec![]);
        let err = Evaluator::eval_page(&page, &sample(0.0), &[], &GateBook::new());
        assert!(err.is_err());
    }
}
