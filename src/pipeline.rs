use std::collections::BTreeMap;

use crate::{
    core::{Rect, Sample},
    error::ScrollyteResult,
    eval::{EvaluatedPage, Evaluator},
    fingerprint::{FrameFingerprint, fingerprint_frame},
    gate::GateBook,
    model::Page,
    spring::Spring,
};

/// Stateful per-frame driver for one mounted page. Owns everything the pure
/// evaluator cannot: spring filters, gate latches, and the fingerprint of
/// the last emitted frame.
///
/// Each `tick` is one transactional pull (poll progress, advance the
/// springs, observe the gates, evaluate every dependent property from
/// that single sample) rather than a push-based reactive graph.
#[derive(Debug, Default)]
pub struct PageRuntime {
    springs: BTreeMap<String, Spring>,
    gates: GateBook,
    last_fingerprint: Option<FrameFingerprint>,
    last_time_s: Option<f64>,
}

impl PageRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all retained state, as on remount. Springs re-snap and "once"
    /// gates re-arm from scratch.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance one frame. Returns `None` when the resolved frame is
    /// identical to the last emitted one, so the host can skip the write.
    #[tracing::instrument(skip(self, page), fields(scroll_y = sample.scroll_y))]
    pub fn tick(&mut self, page: &Page, sample: Sample) -> ScrollyteResult<Option<EvaluatedPage>> {
        page.validate()?;

        let dt = match self.last_time_s {
            Some(prev) => (sample.time_s - prev).max(0.0),
            None => 0.0,
        };
        self.last_time_s = Some(sample.time_s);

        let raw = Evaluator::raw_progress(page, &sample);
        let layout = page.layout(sample.viewport);
        let view = Rect::new(
            0.0,
            sample.scroll_y,
            sample.viewport.width,
            sample.scroll_y + sample.viewport.height,
        );

        let mut progress = Vec::with_capacity(raw.len());
        for ((section, geo), &target) in page.sections.iter().zip(&layout).zip(&raw) {
            let p = match section.smoothing {
                Some(params) => {
                    let spring = self.springs.entry(section.name.clone()).or_insert_with(|| {
                        // Mount: start at the raw value, do not animate in.
                        let mut s = Spring::new(params);
                        s.snap_to(target);
                        s
                    });
                    spring.step(dt, target)
                }
                None => target,
            };
            progress.push(p);

            if let Some(gate) = section.gate {
                self.gates.observe(
                    &section.name,
                    gate,
                    geo.rect(sample.viewport),
                    view,
                    sample.time_s,
                );
            }
        }

        let frame = Evaluator::eval_page(page, &sample, &progress, &self.gates)?;
        let fp = fingerprint_frame(&frame);
        if self.last_fingerprint == Some(fp) {
            return Ok(None);
        }
        self.last_fingerprint = Some(fp);
        Ok(Some(frame))
    }
}
