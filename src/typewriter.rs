use crate::{
    core::Span,
    error::{ScrollyteError, ScrollyteResult},
};

/// Scroll-linked left-to-right text reveal. Progress maps through `window`
/// to a fractional character index; character `i` is invisible until the
/// index crosses `i` and fully opaque once it crosses `i + 1`, fading
/// linearly in between.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TypewriterSpec {
    pub text: String,
    pub window: Span,
}

impl TypewriterSpec {
    pub fn new(text: impl Into<String>, window: Span) -> Self {
        Self {
            text: text.into(),
            window,
        }
    }

    pub fn validate(&self) -> ScrollyteResult<()> {
        if self.text.is_empty() {
            return Err(ScrollyteError::validation("typewriter text must be non-empty"));
        }
        Ok(())
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Fractional character index at `progress`, in [0, char_count].
    pub fn index_at(&self, progress: f64) -> f64 {
        self.window.unlerp(progress) * self.char_count() as f64
    }

    /// Per-character opacity of character `i` at `progress`.
    pub fn char_opacity(&self, progress: f64, i: usize) -> f64 {
        (self.index_at(progress) - i as f64).clamp(0.0, 1.0)
    }

    /// All character opacities for one progress sample.
    pub fn opacities(&self, progress: f64) -> Vec<f64> {
        let index = self.index_at(progress);
        (0..self.char_count())
            .map(|i| (index - i as f64).clamp(0.0, 1.0))
            .collect()
    }
}
