//! adcanvas composes single-frame ad creatives: a photo or solid background, a wrapped line of
//! body copy on a white panel, and a call-to-action button.
//!
//! The public API is session-oriented:
//!
//! - Build an [`EditorSession`] (or a [`CompositionState`] from a [`CompositionDoc`])
//! - Edit text, colors and the background image; decode and pixel sampling run off-thread
//! - [`EditorSession::pump`] renders at most once per batch of edits into a [`FrameRGBA`]
//!
//! Rendering is a pure function of the composition: [`compile_plan`] lays everything out into a
//! [`RenderPlan`], and the CPU backend paints it from scratch on every call.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod composition;
mod foundation;
mod layout;
mod render;
mod session;

pub use crate::foundation::core::{Canvas, Point, Rect, Rgb8, Vec2};
pub use crate::foundation::error::{AdError, AdResult};

pub use crate::assets::decode::{PreparedImage, decode_image, load_image_file};
pub use crate::assets::text::{
    FONT_ENV, FixedAdvance, FontFace, TextBrushRgba8, TextLayoutEngine, TextMeasure,
};
pub use crate::composition::history::ColorHistory;
pub use crate::composition::model::{
    CompositionDoc, CompositionState, DEFAULT_BACKGROUND, DEFAULT_BODY_TEXT, DEFAULT_CTA_COLOR,
    DEFAULT_CTA_TEXT, normalize_rel_path,
};
pub use crate::layout::ad::{AdLayout, BODY_FONT_PX, BODY_LINE_ADVANCE, CTA_FONT_PX};
pub use crate::layout::wrap::{WrapParams, WrappedLine, wrap_text};
pub use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::plan::{DrawOp, RenderPlan, compile_plan};
pub use crate::render::renderer::AdRenderer;
pub use crate::session::editor::{
    EditorSession, ImageTicket, PumpReport, SessionConfig, SessionEvent,
};
pub use crate::session::sampler::{
    ColorTarget, PixelSampler, SampleError, SampleOutcome, SampleTicket, SamplerCapability,
};
