//! Scrollyte is a deterministic scroll-driven narrative animation engine.
//!
//! A page is a declarative composition: sections stacked top to bottom,
//! each owning an independent progress timeline, each actor's visual
//! properties pure breakpoint tables over that progress. One input sample
//! (scroll offset, viewport, clock) resolves the whole page into concrete
//! style values the host writes out.
//!
//! # Pipeline overview
//!
//! 1. **Progress**: `Page + Sample -> per-section progress` (anchor math)
//! 2. **Smooth**: optional critically damped spring per section
//! 3. **Evaluate**: `Page + progress -> EvaluatedPage` (every property,
//!    one coherent sample, no tearing)
//! 4. **Emit**: fingerprint-deduplicated frames for the host to write
//!
//! Evaluation is pure and deterministic: per-instance randomness (shatter
//! vectors, stagger windows) is drawn from the page seed at build time and
//! never re-rolled on re-evaluation.

#![forbid(unsafe_code)]

pub mod assets;
pub mod core;
pub mod dsl;
pub mod ease;
pub mod error;
pub mod eval;
pub mod fingerprint;
pub mod gallery;
pub mod gate;
pub mod model;
pub mod path_reveal;
pub mod pipeline;
pub mod presets;
pub mod rng;
pub mod session;
pub mod spring;
pub mod timeline;
pub mod track;
pub mod typewriter;

pub use self::core::{Rgba8, Sample, Span, Unit, Viewport};
pub use dsl::{ActorBuilder, PageBuilder, SectionBuilder};
pub use ease::Ease;
pub use error::{ScrollyteError, ScrollyteResult};
pub use eval::{EvaluatedActorNode, EvaluatedPage, EvaluatedSection, Evaluator};
pub use fingerprint::{FrameFingerprint, fingerprint_frame};
pub use gallery::GalleryLayout;
pub use gate::{GateBook, GateState, ViewportGate};
pub use model::{Actor, ActorProps, Page, PathDrawSpec, Reveal, Section};
pub use path_reveal::{PathReveal, ResolvedDraw};
pub use pipeline::PageRuntime;
pub use session::{Disclaimer, DisclaimerState, MOBILE_BREAKPOINT_PX, SessionStore};
pub use spring::{Spring, SpringParams};
pub use timeline::{Anchor, AnchorPair, SectionEdge, SectionGeometry, ViewportEdge};
pub use track::{Lerp, LoopMode, Stop, TimeLoop, Track};
pub use typewriter::TypewriterSpec;
