use crate::{
    assets::text::TextLayoutEngine,
    composition::model::CompositionState,
    foundation::error::AdResult,
    render::{
        backend::{BackendKind, FrameRGBA, RenderBackend, create_backend},
        plan::{RenderPlan, compile_plan},
    },
};

/// Composition state in, pixels out.
///
/// The renderer holds only shaping contexts and conversion caches. Output depends on the state
/// alone: the same state always yields the same bytes, and every call repaints from scratch.
pub struct AdRenderer {
    text: TextLayoutEngine,
    backend: Box<dyn RenderBackend>,
}

impl AdRenderer {
    /// CPU renderer shaping with `text`.
    pub fn new(text: TextLayoutEngine) -> Self {
        Self::with_backend(text, BackendKind::Cpu)
    }

    /// Renderer on an explicit backend kind.
    pub fn with_backend(text: TextLayoutEngine, kind: BackendKind) -> Self {
        Self {
            text,
            backend: create_backend(kind),
        }
    }

    /// Renderer on a caller-supplied backend.
    pub fn with_custom_backend(text: TextLayoutEngine, backend: Box<dyn RenderBackend>) -> Self {
        Self { text, backend }
    }

    /// Shaping engine used for measurement and glyphs.
    pub fn text_engine(&self) -> &TextLayoutEngine {
        &self.text
    }

    /// Mutable access, e.g. to swap the font face.
    pub fn text_engine_mut(&mut self) -> &mut TextLayoutEngine {
        &mut self.text
    }

    /// Compile `state` without painting.
    pub fn plan(&mut self, state: &CompositionState) -> AdResult<RenderPlan> {
        compile_plan(state, &mut self.text)
    }

    /// Fully redraw `state`.
    #[tracing::instrument(
        skip_all,
        fields(width = state.canvas.width, height = state.canvas.height)
    )]
    pub fn render(&mut self, state: &CompositionState) -> AdResult<FrameRGBA> {
        let plan = compile_plan(state, &mut self.text)?;
        self.backend.render_plan(&plan, &mut self.text)
    }
}

impl Default for AdRenderer {
    fn default() -> Self {
        Self::new(TextLayoutEngine::new())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
