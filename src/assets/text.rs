use std::{borrow::Cow, collections::HashMap, path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::{
    core::Rgb8,
    error::{AdError, AdResult},
};

/// Width-measurement capability for the active font.
///
/// Widths are in pixels for a single unbroken line, trailing whitespace included.
pub trait TextMeasure {
    /// Rendered width of `text` at `size_px`.
    fn measure(&mut self, text: &str, size_px: f32) -> f32;
}

/// Deterministic measurer: every char advances `size_px * em_ratio`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    /// Advance per char as a fraction of the font size.
    pub em_ratio: f32,
}

impl FixedAdvance {
    /// Construct with an explicit ratio.
    pub fn new(em_ratio: f32) -> Self {
        Self { em_ratio }
    }
}

impl Default for FixedAdvance {
    fn default() -> Self {
        // Average Latin glyph is a little over half an em wide.
        Self { em_ratio: 0.55 }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&mut self, text: &str, size_px: f32) -> f32 {
        text.chars().count() as f32 * size_px * self.em_ratio
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgb8> for TextBrushRgba8 {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 0xFF,
        }
    }
}

/// Font bytes registered with the layout engine, plus the family they resolved to.
#[derive(Clone)]
pub struct FontFace {
    /// Raw font file bytes, shared with the rasterizer.
    pub bytes: Arc<Vec<u8>>,
    /// Primary family name detected from the font data.
    pub family: String,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes_len", &self.bytes.len())
            .field("family", &self.family)
            .finish()
    }
}

const WIDTH_CACHE_LIMIT: usize = 4096;

/// Environment variable naming a fallback font file.
pub const FONT_ENV: &str = "ADCANVAS_FONT";

/// Parley-backed shaper and measurer for a single font face.
///
/// Without a face, measurement falls back to [`FixedAdvance`] and [`Self::layout_line`] yields
/// nothing, so callers can still lay out text geometry on machines with no font configured.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    face: Option<FontFace>,
    fallback: FixedAdvance,
    widths: HashMap<(String, u32), f32>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct an engine with no font face.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            face: None,
            fallback: FixedAdvance::default(),
            widths: HashMap::new(),
        }
    }

    /// Construct an engine shaping with the given font bytes.
    pub fn with_font_bytes(font_bytes: Vec<u8>) -> AdResult<Self> {
        let mut engine = Self::new();
        engine.set_font_bytes(font_bytes)?;
        Ok(engine)
    }

    /// Construct an engine from a font file on disk.
    pub fn from_font_file(path: &Path) -> AdResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font bytes from '{}'", path.display()))?;
        Self::with_font_bytes(bytes)
    }

    /// Engine for an explicit font path, else `ADCANVAS_FONT`, else no face.
    pub fn resolve(font: Option<&Path>) -> AdResult<Self> {
        if let Some(path) = font {
            return Self::from_font_file(path);
        }
        let from_env = std::env::var_os(FONT_ENV)
            .map(std::path::PathBuf::from)
            .filter(|p| !p.as_os_str().is_empty());
        match from_env {
            Some(path) => Self::from_font_file(&path),
            None => Ok(Self::new()),
        }
    }

    /// Register font bytes and make them the active face.
    pub fn set_font_bytes(&mut self, font_bytes: Vec<u8>) -> AdResult<()> {
        let bytes = Arc::new(font_bytes);
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.as_ref().clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            AdError::validation("no font families registered from font bytes")
        })?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| AdError::validation("registered font family has no name"))?
            .to_string();

        tracing::debug!(family = %family, bytes = bytes.len(), "registered font face");
        self.face = Some(FontFace { bytes, family });
        self.widths.clear();
        Ok(())
    }

    /// Active face, if any.
    pub fn face(&self) -> Option<&FontFace> {
        self.face.as_ref()
    }

    /// Family name of the active face, if any.
    pub fn family_name(&self) -> Option<&str> {
        self.face.as_ref().map(|f| f.family.as_str())
    }

    /// Shape `text` as one unbroken line. Returns `None` when no face is configured.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> AdResult<Option<parley::Layout<TextBrushRgba8>>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(AdError::validation("text size_px must be finite and > 0"));
        }
        let Some(face) = self.face.as_ref() else {
            return Ok(None);
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(face.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(Some(layout))
    }
}

impl TextMeasure for TextLayoutEngine {
    fn measure(&mut self, text: &str, size_px: f32) -> f32 {
        if self.face.is_none() {
            return self.fallback.measure(text, size_px);
        }

        let key = (text.to_owned(), size_px.to_bits());
        if let Some(&w) = self.widths.get(&key) {
            return w;
        }

        let width = match self.layout_line(text, size_px, TextBrushRgba8::default()) {
            Ok(Some(layout)) => layout.full_width(),
            Ok(None) => self.fallback.measure(text, size_px),
            Err(err) => {
                tracing::warn!(%err, "text measurement failed; using fixed advance");
                self.fallback.measure(text, size_px)
            }
        };

        if self.widths.len() >= WIDTH_CACHE_LIMIT {
            self.widths.clear();
        }
        self.widths.insert(key, width);
        width
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
