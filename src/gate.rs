use std::collections::BTreeMap;

use crate::core::Rect;

/// Visibility detector for an element's box against the viewport, with a
/// trigger margin and an optional "once" latch.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportGate {
    /// Added to every side of the viewport before the test; negative values
    /// shrink the trigger window (the site's `-100px` / `-10%` margins).
    pub margin: f64,
    /// When set, the armed flag never resets, even after the element leaves.
    pub once: bool,
}

impl ViewportGate {
    pub fn new(margin: f64, once: bool) -> Self {
        Self { margin, once }
    }

    pub fn intersects(self, element: Rect, view: Rect) -> bool {
        let view = view.inflate(self.margin, self.margin);
        element.x0 < view.x1 && element.x1 > view.x0 && element.y0 < view.y1 && element.y1 > view.y0
    }
}

/// Armed/disarmed record for one observed element.
#[derive(Clone, Copy, Debug, Default)]
pub struct GateState {
    armed: bool,
    armed_at: Option<f64>,
}

impl GateState {
    /// Feed one observation. Returns the armed flag after the update.
    pub fn observe(&mut self, gate: ViewportGate, element: Rect, view: Rect, time_s: f64) -> bool {
        let visible = gate.intersects(element, view);
        if visible && !self.armed {
            self.armed = true;
            self.armed_at = Some(time_s);
        } else if !visible && self.armed && !gate.once {
            self.armed = false;
            self.armed_at = None;
        }
        self.armed
    }

    pub fn armed(&self) -> bool {
        self.armed
    }

    /// Time the gate last armed; `None` while disarmed.
    pub fn armed_at(&self) -> Option<f64> {
        self.armed_at
    }
}

/// Gate bookkeeping across a page, keyed by section name. Owned by the
/// runtime, consulted read-only by the evaluator.
#[derive(Clone, Debug, Default)]
pub struct GateBook {
    states: BTreeMap<String, GateState>,
}

impl GateBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(
        &mut self,
        key: &str,
        gate: ViewportGate,
        element: Rect,
        view: Rect,
        time_s: f64,
    ) -> bool {
        self.states
            .entry(key.to_string())
            .or_default()
            .observe(gate, element, view, time_s)
    }

    pub fn state(&self, key: &str) -> GateState {
        self.states.get(key).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_at(scroll_y: f64) -> Rect {
        Rect::new(0.0, scroll_y, 1280.0, scroll_y + 800.0)
    }

    const ELEMENT: Rect = Rect {
        x0: 0.0,
        y0: 2000.0,
        x1: 1280.0,
        y1: 2600.0,
    };

    #[test]
    fn continuous_gate_reverts_on_exit() {
        let gate = ViewportGate::new(0.0, false);
        let mut st = GateState::default();
        assert!(!st.observe(gate, ELEMENT, view_at(0.0), 0.0));
        assert!(st.observe(gate, ELEMENT, view_at(1500.0), 1.0));
        assert!(!st.observe(gate, ELEMENT, view_at(5000.0), 2.0));
        assert_eq!(st.armed_at(), None);
    }

    #[test]
    fn once_gate_never_resets() {
        let gate = ViewportGate::new(0.0, true);
        let mut st = GateState::default();
        assert!(st.observe(gate, ELEMENT, view_at(1500.0), 1.0));
        assert!(st.observe(gate, ELEMENT, view_at(5000.0), 2.0));
        assert_eq!(st.armed_at(), Some(1.0));
        // Re-entering does not restamp the arm time.
        assert!(st.observe(gate, ELEMENT, view_at(1500.0), 3.0));
        assert_eq!(st.armed_at(), Some(1.0));
    }

    #[test]
    fn negative_margin_shrinks_the_trigger_window() {
        let eager = ViewportGate::new(0.0, false);
        let strict = ViewportGate::new(-100.0, false);
        // Element top barely pokes in at the viewport bottom (50px overlap).
        let view = view_at(1250.0);
        assert!(eager.intersects(ELEMENT, view));
        assert!(!strict.intersects(ELEMENT, view));
    }

    #[test]
    fn book_tracks_keys_independently() {
        let gate = ViewportGate::new(0.0, true);
        let mut book = GateBook::new();
        book.observe("a", gate, ELEMENT, view_at(1500.0), 1.0);
        assert!(book.state("a").armed());
        assert!(!book.state("b").armed());
    }
}
