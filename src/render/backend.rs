use crate::{
    assets::text::TextLayoutEngine, foundation::error::AdResult, render::plan::RenderPlan,
};

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. Every composition starts with an opaque fill, so in
/// practice all pixels are opaque and straight/premultiplied bytes coincide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA bytes at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4).map(|px| [px[0], px[1], px[2], px[3]])
    }
}

/// Executes a compiled [`RenderPlan`] into pixels.
///
/// Backends clear their target before painting, so consecutive calls never leak pixels from
/// an earlier plan into a later frame.
pub trait RenderBackend {
    /// Paint `plan`, shaping text with `text`.
    fn render_plan(
        &mut self,
        plan: &RenderPlan,
        text: &mut TextLayoutEngine,
    ) -> AdResult<FrameRGBA>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Create a rendering backend implementation.
pub fn create_backend(kind: BackendKind) -> Box<dyn RenderBackend> {
    match kind {
        BackendKind::Cpu => Box::new(crate::render::cpu::CpuBackend::new()),
    }
}
