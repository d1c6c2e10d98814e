use crate::core::{Rect, Sample, Viewport};

/// Edge of the scroll region a progress anchor refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SectionEdge {
    Start,
    End,
}

/// Edge of the viewport the section edge is aligned against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ViewportEdge {
    Start,
    End,
}

/// "Section edge meets viewport edge" event. The scroll offset at which the
/// event occurs defines one end of the progress timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    pub section: SectionEdge,
    pub viewport: ViewportEdge,
}

/// The two anchor events bounding a section's timeline: `zero` is where
/// progress is 0, `one` where it is 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnchorPair {
    pub zero: Anchor,
    pub one: Anchor,
}

impl AnchorPair {
    /// "start start" -> "end start": progress runs while the pinned section
    /// scrolls out over the viewport top. Used by the hero.
    pub fn pin_exit() -> Self {
        Self {
            zero: Anchor {
                section: SectionEdge::Start,
                viewport: ViewportEdge::Start,
            },
            one: Anchor {
                section: SectionEdge::End,
                viewport: ViewportEdge::Start,
            },
        }
    }

    /// "start end" -> "end start": progress runs from the moment the
    /// section enters at the viewport bottom until it leaves at the top.
    /// The natural timeline for unpinned, in-flow sections.
    pub fn in_view() -> Self {
        Self {
            zero: Anchor {
                section: SectionEdge::Start,
                viewport: ViewportEdge::End,
            },
            one: Anchor {
                section: SectionEdge::End,
                viewport: ViewportEdge::Start,
            },
        }
    }

    /// "start start" -> "end end": progress spans the whole pinned stay,
    /// ending when the section bottom meets the viewport bottom.
    pub fn pin_full() -> Self {
        Self {
            zero: Anchor {
                section: SectionEdge::Start,
                viewport: ViewportEdge::Start,
            },
            one: Anchor {
                section: SectionEdge::End,
                viewport: ViewportEdge::End,
            },
        }
    }
}

/// A section's resolved placement in page coordinates, recomputed from the
/// live viewport on every layout pass (so resizes re-anchor every timeline).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionGeometry {
    pub top: f64,
    pub height: f64,
}

impl SectionGeometry {
    /// Scroll offset at which the anchor event fires.
    fn anchor_scroll(self, anchor: Anchor, viewport: Viewport) -> f64 {
        let section_edge = match anchor.section {
            SectionEdge::Start => self.top,
            SectionEdge::End => self.top + self.height,
        };
        match anchor.viewport {
            ViewportEdge::Start => section_edge,
            ViewportEdge::End => section_edge - viewport.height,
        }
    }

    /// Normalized progress of `sample` through this section's timeline,
    /// clamped to [0,1]. A degenerate (zero or negative width) anchor span
    /// becomes a step at the zero anchor. Pure: sections that are no longer
    /// mounted are simply never sampled, there is no error path.
    pub fn progress(self, anchors: AnchorPair, sample: &Sample) -> f64 {
        let y0 = self.anchor_scroll(anchors.zero, sample.viewport);
        let y1 = self.anchor_scroll(anchors.one, sample.viewport);
        if y1 <= y0 {
            return if sample.scroll_y < y0 { 0.0 } else { 1.0 };
        }
        ((sample.scroll_y - y0) / (y1 - y0)).clamp(0.0, 1.0)
    }

    /// Bounding box in page coordinates, for viewport intersection tests.
    pub fn rect(self, viewport: Viewport) -> Rect {
        Rect::new(0.0, self.top, viewport.width, self.top + self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Viewport;

    fn sample(scroll_y: f64, vh: f64) -> Sample {
        Sample::new(scroll_y, Viewport::new(1280.0, vh).unwrap(), 0.0)
    }

    const GEO: SectionGeometry = SectionGeometry {
        top: 1000.0,
        height: 3000.0,
    };

    #[test]
    fn pin_exit_runs_top_to_top() {
        let a = AnchorPair::pin_exit();
        assert_eq!(GEO.progress(a, &sample(999.0, 800.0)), 0.0);
        assert_eq!(GEO.progress(a, &sample(1000.0, 800.0)), 0.0);
        assert_eq!(GEO.progress(a, &sample(2500.0, 800.0)), 0.5);
        assert_eq!(GEO.progress(a, &sample(4000.0, 800.0)), 1.0);
        assert_eq!(GEO.progress(a, &sample(9000.0, 800.0)), 1.0);
    }

    #[test]
    fn pin_full_ends_at_viewport_bottom() {
        let a = AnchorPair::pin_full();
        assert_eq!(GEO.progress(a, &sample(1000.0, 800.0)), 0.0);
        assert_eq!(GEO.progress(a, &sample(2100.0, 800.0)), 0.5);
        assert_eq!(GEO.progress(a, &sample(3200.0, 800.0)), 1.0);
    }

    #[test]
    fn in_view_spans_entry_to_exit() {
        let a = AnchorPair::in_view();
        // Enters at scroll 200 (top 1000 - vh 800), exits at 4000.
        assert_eq!(GEO.progress(a, &sample(200.0, 800.0)), 0.0);
        assert_eq!(GEO.progress(a, &sample(2100.0, 800.0)), 0.5);
        assert_eq!(GEO.progress(a, &sample(4000.0, 800.0)), 1.0);
    }

    #[test]
    fn resize_reanchors_the_timeline() {
        let a = AnchorPair::pin_full();
        let p_tall = GEO.progress(a, &sample(2100.0, 800.0));
        let p_short = GEO.progress(a, &sample(2100.0, 400.0));
        assert!(p_tall > p_short);
    }

    #[test]
    fn degenerate_span_is_a_step() {
        let geo = SectionGeometry {
            top: 500.0,
            height: 800.0,
        };
        let a = AnchorPair::pin_full();
        // Section exactly one viewport tall: zero and one coincide.
        assert_eq!(geo.progress(a, &sample(499.0, 800.0)), 0.0);
        assert_eq!(geo.progress(a, &sample(500.0, 800.0)), 1.0);
    }

    #[test]
    fn rect_spans_the_viewport_width() {
        let vp = Viewport::new(1280.0, 800.0).unwrap();
        let r = GEO.rect(vp);
        assert_eq!(r.x1, 1280.0);
        assert_eq!(r.y0, 1000.0);
        assert_eq!(r.y1, 4000.0);
    }
}
