use crate::error::{ScrollyteError, ScrollyteResult};

/// Horizontal gallery geometry. All lengths are fractions of the viewport
/// width, matching the site's vw-based card sizing.
///
/// The end offset of the track is *derived* from this geometry: the track
/// shifts left exactly far enough that the last card's right edge lands on
/// the right inset, instead of hard-coding either of the source variants
/// (-85% / -60%), which disagree with the real card widths.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GalleryLayout {
    pub cards: usize,
    pub card_width: f64,
    pub gap: f64,
    /// Leading padding that centers the first card at progress 0.
    pub lead_in: f64,
    /// Gap kept between the last card and the viewport edge at progress 1.
    pub right_inset: f64,
}

impl Default for GalleryLayout {
    fn default() -> Self {
        Self {
            cards: 3,
            card_width: 0.70,
            gap: 0.15,
            lead_in: 0.15,
            right_inset: 0.15,
        }
    }
}

impl GalleryLayout {
    pub fn validate(&self) -> ScrollyteResult<()> {
        if self.cards == 0 {
            return Err(ScrollyteError::validation("gallery needs at least one card"));
        }
        let dims = [self.card_width, self.gap, self.lead_in, self.right_inset];
        if dims.iter().any(|d| !d.is_finite() || *d < 0.0) || self.card_width == 0.0 {
            return Err(ScrollyteError::validation(
                "gallery dimensions must be finite and non-negative (card width > 0)",
            ));
        }
        Ok(())
    }

    /// Full track width including the lead-in, in viewport widths.
    pub fn track_span(&self) -> f64 {
        self.lead_in + self.cards as f64 * self.card_width + (self.cards - 1) as f64 * self.gap
    }

    /// Left edge of card `i` within the unshifted track.
    pub fn card_left(&self, i: usize) -> f64 {
        self.lead_in + i as f64 * (self.card_width + self.gap)
    }

    pub fn card_right(&self, i: usize) -> f64 {
        self.card_left(i) + self.card_width
    }

    /// Leftward shift at progress 1, in viewport widths. Zero when the track
    /// already fits the viewport.
    pub fn end_shift(&self) -> f64 {
        (self.track_span() - (1.0 - self.right_inset)).max(0.0)
    }

    /// End shift as a fraction of the track's own width, the value a
    /// percentage-based translateX needs.
    pub fn end_fraction(&self) -> f64 {
        self.end_shift() / self.track_span()
    }

    /// Track offset at `progress`, in viewport widths (negative = left).
    pub fn offset_at(&self, progress: f64) -> f64 {
        -self.end_shift() * progress.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_constants_derive_two_thirds() {
        let g = GalleryLayout::default();
        g.validate().unwrap();
        assert!((g.track_span() - 2.55).abs() < 1e-12);
        assert!((g.end_shift() - 1.70).abs() < 1e-12);
        assert!((g.end_fraction() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn progress_zero_keeps_the_lead_in() {
        let g = GalleryLayout::default();
        assert_eq!(g.offset_at(0.0), 0.0);
        assert!((g.card_left(0) - g.lead_in).abs() < 1e-12);
    }

    #[test]
    fn progress_one_aligns_last_card_with_right_inset() {
        let g = GalleryLayout::default();
        let shifted_right_edge = g.card_right(g.cards - 1) + g.offset_at(1.0);
        assert!((shifted_right_edge - (1.0 - g.right_inset)).abs() < 1e-12);
    }

    #[test]
    fn short_track_never_shifts() {
        let g = GalleryLayout {
            cards: 1,
            card_width: 0.5,
            gap: 0.0,
            lead_in: 0.1,
            right_inset: 0.1,
        };
        assert_eq!(g.end_shift(), 0.0);
        assert_eq!(g.offset_at(1.0), 0.0);
    }

    #[test]
    fn degenerate_layouts_are_rejected() {
        let mut g = GalleryLayout::default();
        g.cards = 0;
        assert!(g.validate().is_err());

        let mut g = GalleryLayout::default();
        g.card_width = 0.0;
        assert!(g.validate().is_err());
    }
}
