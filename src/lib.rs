//! reelcraft is a declarative, frame-driven video composition engine.
//!
//! A [`Composition`] is an ordered list of fixed-length scenes joined by overlapping
//! transitions. Every visual value is a pure function of `(composition, frame)`: the host asks
//! for a frame and gets back a renderable tree.
//!
//! # Pipeline overview
//!
//! 1. **Time**: [`SceneTiming`] places scenes on the global timeline and maps a global frame to
//!    each scene's local frame.
//! 2. **Evaluate**: [`Evaluator::eval_frame`] turns `Composition + FrameIndex` into an
//!    [`EvaluatedFrame`]: one [`SceneLayer`] outside transitions, two (exiting, entering) inside.
//! 3. **Present**: each layer carries a [`PresentationStyle`] (opacity, translation, 3D flip,
//!    clip) resolved from its transition, and a [`Node`] tree built from content blocks.
//!
//! Rendering, encoding and asset decoding belong to the host. Assets are referenced by relative
//! path only.
//!
//! The crate also ships the built-in promotional composition, see [`promo`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod audio;
mod compile;
mod composition;
mod effects;
mod eval;
mod foundation;
mod layout;
mod timeline;

pub use animation::ease::Ease;
pub use animation::interpolate::{Extrapolate, InterpolateOpts, interpolate, tween};
pub use animation::motion::{Motion, SampleCtx};
pub use animation::ops::{delay, mix, product, stagger};
pub use animation::spring::{REST_THRESHOLD, SpringConfig, SpringParams, measure_spring, spring};
pub use assets::refs::{AssetKind, AssetRef, normalize_rel_path};
pub use audio::manifest::{
    AudioManifest, AudioSegment, AudioTrack, MIX_SAMPLE_RATE, build_audio_manifest,
    frame_to_sample,
};
pub use compile::fingerprint::{FrameFingerprint, fingerprint_frame};
pub use composition::dsl::{CompositionBuilder, SceneBuilder};
pub use composition::model::{
    AppScreenshotBlock, Block, BrowserWindowBlock, Composition, Edges, Entrance, EntranceMotions,
    EntranceStyle, FlowDiagramBlock, FlowStep, GlowStyle, SceneDef, ShellStyle, TagChipsBlock,
    TextBlock, Theme, TransitionSpec, TwoColumnBlock,
};
pub use composition::promo::{
    FINALE_FRAMES, INTRO_FRAMES, PROMO_FPS, PROMO_HEIGHT, PROMO_WIDTH, SCENE_FRAMES,
    SHOWCASE_COMPETITIVE_FRAMES, SHOWCASE_CREATIVE_FRAMES, TRANSITION_FRAMES, UI_FRAMES,
    WORKFLOW_FRAMES, promo,
};
pub use effects::shell::ShellMotions;
pub use effects::transitions::{
    ClipShape, Direction, Flip3d, FlipAxis, PresentationStyle, TransitionKind, TransitionTiming,
    parse_transition, present,
};
pub use eval::evaluator::{EvaluatedFrame, Evaluator, LayerRole, SceneLayer};
pub use eval::node::{Node, NodeKind, Stroke, TextAlign};
pub use foundation::core::{
    Affine, Canvas, Fps, FrameClock, FrameIndex, FrameRange, Point, Rect, Rgba8, Transform2D,
    Vec2, VideoConfig,
};
pub use foundation::error::{ReelError, ReelResult};
pub use layout::stack::{Align, hstack, stack_extent, vstack};
pub use timeline::timing::{SceneTiming, TransitionWindow};
