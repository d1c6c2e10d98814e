//! The built-in showcase page: a "year in vibe coding" portfolio told
//! through ten scroll-driven sections. All choreography constants live
//! here; the engine below knows nothing about walls, charts or galleries.

use crate::{
    assets::{PLATFORMS, WARNING_TEXT},
    core::{BezPath, Span, Unit, Vec2, Viewport},
    dsl::{ActorBuilder, PageBuilder, SectionBuilder},
    ease::Ease,
    error::ScrollyteResult,
    gallery::GalleryLayout,
    gate::ViewportGate,
    model::{Page, Reveal, Section},
    path_reveal::PathReveal,
    rng::SplitMix64,
    spring::SpringParams,
    timeline::AnchorPair,
    track::{LoopMode, TimeLoop, Track},
    typewriter::TypewriterSpec,
};

/// Reference viewport the constants were authored against.
pub const REFERENCE_VIEWPORT: (f64, f64) = (1440.0, 900.0);

pub const BRICK_ROWS: usize = 12;
pub const BRICK_COLS: usize = 16;

pub const HEATMAP_WEEKS: usize = 53;
pub const HEATMAP_DAYS: usize = 7;

/// Trap-chart canvas, in SVG user units.
pub const CHART_WIDTH: f64 = 1200.0;
pub const CHART_HEIGHT: f64 = 900.0;
pub const CHART_PADDING: f64 = 80.0;

/// Build the full showcase page. Same seed, same page, down to every
/// shatter vector.
pub fn page(seed: u64) -> ScrollyteResult<Page> {
    let (w, h) = REFERENCE_VIEWPORT;
    PageBuilder::new(Viewport::new(w, h)?)
        .seed(seed)
        .section(hero(seed)?)
        .section(contributions()?)
        .section(divider(seed)?)
        .section(trap_intro()?)
        .section(trap_chart()?)
        .section(lessons_break()?)
        .section(lessons()?)
        .section(workflow()?)
        .section(gallery()?)
        .section(outro()?)
        .build()
}

/// The gallery geometry shared by the preset and its host layout.
pub fn gallery_layout() -> GalleryLayout {
    GalleryLayout::default()
}

/// Static per-cell activity intensities for the contribution heatmap,
/// drawn once per seed and fixed for the page's lifetime.
pub fn heatmap_intensities(seed: u64) -> Vec<f64> {
    let mut rng = SplitMix64::keyed(seed, "contributions.heatmap");
    (0..HEATMAP_WEEKS * HEATMAP_DAYS)
        .map(|_| rng.in_range(0.1, 1.0))
        .collect()
}

/// The hero: a brick wall shattered by incoming platform chips, revealing
/// the year headline. Smoothed by the critically damped spring.
fn hero(seed: u64) -> ScrollyteResult<Section> {
    let mut section = SectionBuilder::new("hero")
        .length(3.0)
        .pinned()
        .anchors(AnchorPair::pin_exit())
        .smoothing(SpringParams::critical(100.0)?);

    // Impact glow revealed behind the wall.
    section = section.actor(
        ActorBuilder::new("glow")
            .z(0)
            .opacity(Track::ramp(Span::new(0.4, 0.6)?, 0.0, 1.0))
            .build()?,
    );

    // The wall. Every brick gets its own shatter vector and stagger window,
    // drawn once from the page seed.
    for i in 0..BRICK_ROWS * BRICK_COLS {
        let mut rng = SplitMix64::keyed(seed, &format!("hero.brick.{i}"));
        let dx = rng.centered(500.0);
        let dy = rng.centered(500.0);
        let rot = rng.centered(360.0);
        let start = 0.35 + rng.next_f64() * 0.1;
        let window = Span::new(start, start + 0.2)?;

        section = section.actor(
            ActorBuilder::new(format!("brick.{i}"))
                .z(10)
                .opacity(Track::ramp(window, 1.0, 0.0))
                .translate(Track::ramp(window, Vec2::ZERO, Vec2::new(dx, dy)))
                .rotate_deg(Track::ramp(window, 0.0, rot))
                .scale(Track::ramp(window, 1.0, 0.5))
                .build()?,
        );
    }

    // Platform chips fly in and vanish on impact.
    for (i, platform) in PLATFORMS.iter().enumerate() {
        section = section.actor(
            ActorBuilder::new(format!("projectile.{i}"))
                .z(30)
                .translate(Track::ramp(
                    Span::new(0.0, 0.4)?,
                    Vec2::new(platform.start_x_vw, platform.start_y_vh),
                    Vec2::ZERO,
                ))
                .translate_unit(Unit::Vw, Unit::Vh)
                .scale(Track::points([(0.0, 0.5), (0.4, 1.0), (0.45, 0.0)]))
                .opacity(Track::points([
                    (0.0, 0.0),
                    (0.1, 1.0),
                    (0.4, 1.0),
                    (0.45, 0.0),
                ]))
                .tint(Track::constant(platform.color))
                .build()?,
        );
    }

    // Headline reveal once the wall is gone.
    let reveal = Span::new(0.5, 0.8)?;
    section = section.actor(
        ActorBuilder::new("headline")
            .z(40)
            .opacity(Track::ramp(reveal, 0.0, 1.0))
            .scale(Track::ramp(reveal, 0.8, 1.0))
            .translate(Track::ramp(reveal, Vec2::new(0.0, 50.0), Vec2::ZERO))
            .build()?,
    );

    // Scroll hint fades as soon as scrolling starts; bounces on the clock.
    section = section.actor(
        ActorBuilder::new("scroll-hint")
            .z(40)
            .opacity(Track::ramp(Span::new(0.0, 0.1)?, 1.0, 0.0))
            .jitter(TimeLoop::new(
                Track::points([
                    (0.0, Vec2::ZERO),
                    (0.5, Vec2::new(0.0, -10.0)),
                    (1.0, Vec2::ZERO),
                ]),
                1.0,
                LoopMode::PingPong,
            ))
            .build()?,
    );

    section.build()
}

/// Contribution stats: heatmap reveal, heading crossfade, narrative, then
/// the whole block exits upward while the red warning types itself out.
fn contributions() -> ScrollyteResult<Section> {
    SectionBuilder::new("contributions")
        .length(3.0)
        .pinned()
        .anchors(AnchorPair::pin_full())
        .actor(
            ActorBuilder::new("content-frame")
                .z(10)
                .opacity(Track::ramp(Span::new(0.8, 0.9)?, 1.0, 0.0))
                .translate(Track::ramp(
                    Span::new(0.8, 1.0)?,
                    Vec2::ZERO,
                    Vec2::new(0.0, -1000.0),
                ))
                .build()?,
        )
        .actor(
            ActorBuilder::new("heatmap")
                .z(10)
                .opacity(Track::points([
                    (0.05, 0.0),
                    (0.2, 1.0),
                    (0.3, 1.0),
                    (0.6, 0.5),
                ]))
                .translate(Track::ramp(
                    Span::new(0.05, 0.25)?,
                    Vec2::new(0.0, 50.0),
                    Vec2::ZERO,
                ))
                .build()?,
        )
        .actor(
            ActorBuilder::new("title")
                .z(20)
                .opacity(Track::ramp(Span::new(0.3, 0.4)?, 1.0, 0.0))
                .translate(Track::ramp(
                    Span::new(0.3, 0.4)?,
                    Vec2::ZERO,
                    Vec2::new(0.0, -20.0),
                ))
                .build()?,
        )
        .actor(
            ActorBuilder::new("subtitle")
                .z(20)
                .opacity(Track::ramp(Span::new(0.4, 0.5)?, 0.0, 1.0))
                .translate(Track::ramp(
                    Span::new(0.4, 0.5)?,
                    Vec2::new(0.0, 20.0),
                    Vec2::ZERO,
                ))
                .build()?,
        )
        .actor(
            ActorBuilder::new("narrative")
                .z(20)
                .opacity(Track::ramp(Span::new(0.6, 0.7)?, 0.0, 1.0))
                .translate(Track::ramp(
                    Span::new(0.6, 0.7)?,
                    Vec2::new(0.0, 20.0),
                    Vec2::ZERO,
                ))
                .build()?,
        )
        .actor(
            ActorBuilder::new("warning")
                .z(30)
                .opacity(Track::ramp(Span::new(0.85, 0.95)?, 0.0, 1.0))
                .typewriter(TypewriterSpec::new(WARNING_TEXT, Span::new(0.85, 1.0)?))
                .build()?,
        )
        .actor(
            ActorBuilder::new("cursor")
                .z(30)
                .opacity(Track::ramp(Span::new(0.85, 0.95)?, 0.0, 1.0))
                .pulse(TimeLoop::new(
                    Track::ramp(Span::new(0.0, 1.0)?, 1.0, 0.4),
                    1.0,
                    LoopMode::PingPong,
                ))
                .build()?,
        )
        .build()
}

/// Jagged multi-layer glitch between the editorial rules, vibrating on the
/// clock while the strokes scrub in with scroll.
fn divider(seed: u64) -> ScrollyteResult<Section> {
    // Coordinates live in the divider's 100x4 user-unit box.
    fn jagged(rng: &mut SplitMix64) -> BezPath {
        let (start_x, end_x) = (46.0, 54.0);
        let segments = 12;
        let mut p = BezPath::new();
        p.move_to((start_x, 2.0));
        for i in 1..=segments {
            let x = start_x + (end_x - start_x) * i as f64 / segments as f64;
            let y_pct = 50.0 + rng.centered(60.0);
            p.line_to((x, y_pct * 0.04));
        }
        p
    }

    fn rule(from_x: f64, to_x: f64) -> BezPath {
        let mut p = BezPath::new();
        p.move_to((from_x, 2.0));
        p.line_to((to_x, 2.0));
        p
    }

    let mut rng = SplitMix64::keyed(seed, "divider.glitch");
    let vibration = {
        let mut offsets = vec![(0.0, Vec2::ZERO)];
        for i in 1..4 {
            offsets.push((
                i as f64 * 0.25,
                Vec2::new(rng.centered(3.0), rng.centered(3.0)),
            ));
        }
        offsets.push((1.0, Vec2::ZERO));
        TimeLoop::new(Track::points(offsets), 0.3, LoopMode::Repeat)
    };

    let mut section = SectionBuilder::new("divider")
        .length(0.5)
        .anchors(AnchorPair::in_view())
        .actor(
            ActorBuilder::new("rule-left")
                .path(
                    PathReveal::new(rule(0.0, 42.0)),
                    Track::ramp_eased(Span::new(0.1, 0.45)?, 0.0, 1.0, Ease::OutCubic),
                )
                .build()?,
        )
        .actor(
            ActorBuilder::new("rule-right")
                .path(
                    PathReveal::new(rule(58.0, 100.0)),
                    Track::ramp_eased(Span::new(0.1, 0.45)?, 0.0, 1.0, Ease::OutCubic),
                )
                .build()?,
        );

    // Three stacked glitch layers, deepest first, each with its own pulse.
    let layers = [(0.2, 2.0), (0.4, 1.5), (0.8, 1.8)];
    for (i, (peak, period)) in layers.into_iter().enumerate() {
        let path = jagged(&mut rng);
        section = section.actor(
            ActorBuilder::new(format!("glitch.{i}"))
                .z(i as i32)
                .opacity(Track::ramp(Span::new(0.1, 0.4)?, 0.0, 1.0))
                .pulse(TimeLoop::new(
                    Track::ramp_eased(Span::new(0.0, 1.0)?, 0.6 * peak, peak, Ease::InOutQuad),
                    period,
                    LoopMode::PingPong,
                ))
                .path(
                    PathReveal::new(path),
                    Track::ramp_eased(Span::new(0.1, 0.4)?, 0.0, 1.0, Ease::OutCubic),
                )
                .jitter(vibration.clone())
                .build()?,
        );
    }

    // Blinking pixel artifacts around the glitch.
    let artifacts = [(0.6, 0.8), (0.5, 1.2), (0.4, 1.0)];
    for (i, (peak, period)) in artifacts.into_iter().enumerate() {
        section = section.actor(
            ActorBuilder::new(format!("artifact.{i}"))
                .z(10)
                .pulse(TimeLoop::new(
                    Track::points([(0.0, peak), (0.5, 0.0), (1.0, peak)]),
                    period,
                    LoopMode::Repeat,
                ))
                .jitter(vibration.clone())
                .build()?,
        );
    }

    section.build()
}

/// Static editorial intro above the trap chart, fading in once.
fn trap_intro() -> ScrollyteResult<Section> {
    SectionBuilder::new("trap-intro")
        .length(0.6)
        .anchors(AnchorPair::in_view())
        .gate(ViewportGate::new(0.0, true))
        .actor(
            ActorBuilder::new("intro")
                .reveal(Reveal {
                    opacity_from: 0.0,
                    dy_from: 0.0,
                    scale_from: 1.0,
                    duration_s: 0.8,
                    delay_s: 0.0,
                    ease: Ease::OutCubic,
                })
                .build()?,
        )
        .build()
}

/// The value-vs-cost chart: axes fade in, the green hook draws, the red
/// cost curve overtakes it, then the trap marker and legend land.
fn trap_chart() -> ScrollyteResult<Section> {
    let zero_y = CHART_HEIGHT * 0.55;
    let far_x = CHART_WIDTH - CHART_PADDING;
    let bottom_y = CHART_HEIGHT - CHART_PADDING;

    // Deep parabolic arc: early joy, late collapse.
    let mut green = BezPath::new();
    green.move_to((CHART_PADDING, zero_y));
    green.curve_to(
        (CHART_WIDTH * 0.3, 0.0),
        (CHART_WIDTH * 0.6, 0.0),
        (far_x, bottom_y),
    );

    // Hockey stick: flat hidden cost, then the spike.
    let mut red = BezPath::new();
    red.move_to((CHART_PADDING, bottom_y));
    red.curve_to(
        (CHART_WIDTH * 0.6, bottom_y),
        (CHART_WIDTH * 0.85, CHART_HEIGHT * 0.8),
        (far_x, CHART_PADDING),
    );

    SectionBuilder::new("trap")
        .length(4.0)
        .pinned()
        .anchors(AnchorPair::pin_full())
        .actor(
            ActorBuilder::new("axes")
                .z(0)
                .opacity(Track::ramp(Span::new(0.0, 0.15)?, 0.0, 1.0))
                .build()?,
        )
        .actor(
            ActorBuilder::new("curve-value")
                .z(10)
                .path(
                    PathReveal::new(green),
                    Track::ramp(Span::new(0.15, 0.5)?, 0.0, 1.0),
                )
                .build()?,
        )
        .actor(
            ActorBuilder::new("curve-cost")
                .z(10)
                .path(
                    PathReveal::new(red),
                    Track::ramp(Span::new(0.5, 0.85)?, 0.0, 1.0),
                )
                .build()?,
        )
        .actor(
            ActorBuilder::new("marker")
                .z(20)
                .opacity(Track::ramp(Span::new(0.85, 0.95)?, 0.0, 1.0))
                .build()?,
        )
        .actor(
            ActorBuilder::new("legend")
                .z(20)
                .opacity(Track::ramp(Span::new(0.85, 0.95)?, 0.0, 1.0))
                .build()?,
        )
        .build()
}

/// Horizontal position of the trap marker within the chart box.
pub fn trap_marker_x() -> f64 {
    CHART_WIDTH * 0.78
}

/// Dramatic chapter break before the lessons.
fn lessons_break() -> ScrollyteResult<Section> {
    SectionBuilder::new("lessons-break")
        .anchors(AnchorPair::in_view())
        .gate(ViewportGate::new(-90.0, true))
        .actor(
            ActorBuilder::new("chapter")
                .reveal(Reveal::fade_up(40.0, 0.8, 0.0))
                .build()?,
        )
        .build()
}

/// Three lessons sliding in over staggered windows of the pinned card.
fn lessons() -> ScrollyteResult<Section> {
    let windows = [(0.1, 0.3), (0.35, 0.55), (0.6, 0.8)];
    let mut section = SectionBuilder::new("lessons")
        .length(3.0)
        .pinned()
        .anchors(AnchorPair::pin_full());

    for (i, (start, end)) in windows.into_iter().enumerate() {
        let window = Span::new(start, end)?;
        section = section.actor(
            ActorBuilder::new(format!("lesson.{i}"))
                .opacity(Track::ramp(window, 0.0, 1.0))
                .translate(Track::ramp(window, Vec2::new(0.0, 20.0), Vec2::ZERO))
                .scale(Track::ramp(window, 0.98, 1.0))
                .build()?,
        );
    }

    section.build()
}

/// Workflow pipeline cards, gate-revealed with a 0.2s stagger and arrow
/// connectors in between.
fn workflow() -> ScrollyteResult<Section> {
    let mut section = SectionBuilder::new("workflow")
        .length(1.2)
        .anchors(AnchorPair::in_view())
        .gate(ViewportGate::new(-100.0, true))
        .actor(
            ActorBuilder::new("heading")
                .reveal(Reveal::fade_up(20.0, 0.6, 0.0))
                .build()?,
        );

    for i in 0..3 {
        section = section.actor(
            ActorBuilder::new(format!("card.{i}"))
                .reveal(Reveal {
                    opacity_from: 0.0,
                    dy_from: 20.0,
                    scale_from: 0.95,
                    duration_s: 0.5,
                    delay_s: i as f64 * 0.4,
                    ease: Ease::OutCubic,
                })
                .build()?,
        );
        if i < 2 {
            section = section.actor(
                ActorBuilder::new(format!("arrow.{i}"))
                    .reveal(Reveal {
                        opacity_from: 0.0,
                        dy_from: 0.0,
                        scale_from: 0.5,
                        duration_s: 0.3,
                        delay_s: i as f64 * 0.4 + 0.2,
                        ease: Ease::OutCubic,
                    })
                    .build()?,
            );
        }
    }

    section.build()
}

/// Horizontal project gallery: vertical progress becomes a leftward track
/// offset, sized so the last card lands on the right inset.
fn gallery() -> ScrollyteResult<Section> {
    let layout = gallery_layout();
    layout.validate()?;
    let end_percent = -layout.end_fraction() * 100.0;

    SectionBuilder::new("gallery")
        .length(3.0)
        .pinned()
        .anchors(AnchorPair::pin_full())
        .actor(
            ActorBuilder::new("track")
                .translate(Track::ramp(
                    Span::new(0.0, 1.0)?,
                    Vec2::ZERO,
                    Vec2::new(end_percent, 0.0),
                ))
                .translate_unit(Unit::Percent, Unit::Px)
                .build()?,
        )
        .build()
}

/// Outro: headline and credits stagger in once and stay.
fn outro() -> ScrollyteResult<Section> {
    SectionBuilder::new("outro")
        .length(0.8)
        .anchors(AnchorPair::in_view())
        .gate(ViewportGate::new(-90.0, true))
        .actor(
            ActorBuilder::new("headline")
                .reveal(Reveal::fade_up(30.0, 0.8, 0.0))
                .build()?,
        )
        .actor(
            ActorBuilder::new("credits")
                .reveal(Reveal::fade_up(20.0, 0.6, 0.2))
                .build()?,
        )
        .build()
}
