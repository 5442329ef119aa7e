use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    assets::decode::{self, PreparedImage},
    foundation::{
        core::{Canvas, Rgb8},
        error::{AdError, AdResult},
    },
};

/// Body copy shown until the user types their own.
pub const DEFAULT_BODY_TEXT: &str = "Treat yourself to a divine Blueberry Cake - INR 900.00!";
/// Button label shown until the user types their own.
pub const DEFAULT_CTA_TEXT: &str = "Shop now";
/// Default background fill (`#0369A1`).
pub const DEFAULT_BACKGROUND: Rgb8 = Rgb8::new(0x03, 0x69, 0xA1);
/// Default CTA button fill.
pub const DEFAULT_CTA_COLOR: Rgb8 = Rgb8::WHITE;

/// Every input that determines one rendered frame.
#[derive(Clone, Debug)]
pub struct CompositionState {
    /// Surface size, fixed for the session.
    pub canvas: Canvas,
    /// Decoded background photo, drawn stretched over the fill.
    pub background_image: Option<PreparedImage>,
    /// Solid fill beneath the image.
    pub background_color: Rgb8,
    /// Wrapped body copy.
    pub body_text: String,
    /// Button label.
    pub cta_text: String,
    /// Button fill.
    pub cta_color: Rgb8,
}

impl Default for CompositionState {
    fn default() -> Self {
        Self::new(Canvas::DEFAULT)
    }
}

impl CompositionState {
    /// Fresh state with default copy and colors on `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            background_image: None,
            background_color: DEFAULT_BACKGROUND,
            body_text: DEFAULT_BODY_TEXT.to_string(),
            cta_text: DEFAULT_CTA_TEXT.to_string(),
            cta_color: DEFAULT_CTA_COLOR,
        }
    }
}

fn default_body_text() -> String {
    DEFAULT_BODY_TEXT.to_string()
}

fn default_cta_text() -> String {
    DEFAULT_CTA_TEXT.to_string()
}

fn default_background() -> Rgb8 {
    DEFAULT_BACKGROUND
}

fn default_cta_color() -> Rgb8 {
    DEFAULT_CTA_COLOR
}

/// JSON description of a composition; every field is optional.
///
/// Paths are relative to the document's directory.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositionDoc {
    /// Surface size.
    #[serde(default)]
    pub canvas: Canvas,
    /// Background photo path.
    #[serde(default)]
    pub background_image: Option<String>,
    /// Solid background fill.
    #[serde(default = "default_background")]
    pub background_color: Rgb8,
    /// Body copy.
    #[serde(default = "default_body_text")]
    pub body_text: String,
    /// Button label.
    #[serde(default = "default_cta_text")]
    pub cta_text: String,
    /// Button fill.
    #[serde(default = "default_cta_color")]
    pub cta_color: Rgb8,
    /// Font file used for both body and CTA text.
    #[serde(default)]
    pub font: Option<String>,
}

impl Default for CompositionDoc {
    fn default() -> Self {
        Self {
            canvas: Canvas::DEFAULT,
            background_image: None,
            background_color: DEFAULT_BACKGROUND,
            body_text: default_body_text(),
            cta_text: default_cta_text(),
            cta_color: DEFAULT_CTA_COLOR,
            font: None,
        }
    }
}

impl CompositionDoc {
    /// Parse a document from a JSON string.
    pub fn from_json_str(s: &str) -> AdResult<Self> {
        let doc: Self = serde_json::from_str(s).map_err(|e| AdError::serde(e.to_string()))?;
        doc.canvas.validate()?;
        Ok(doc)
    }

    /// Read and parse a document from disk.
    pub fn from_path(path: &Path) -> AdResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read composition '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_string(&self) -> AdResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| AdError::serde(e.to_string()))
    }

    /// Resolved background image path, if one is set.
    pub fn image_path(&self, root: &Path) -> AdResult<Option<PathBuf>> {
        self.background_image
            .as_deref()
            .map(|p| normalize_rel_path(p).map(|n| root.join(n)))
            .transpose()
    }

    /// Resolved font path, if one is set.
    pub fn font_path(&self, root: &Path) -> AdResult<Option<PathBuf>> {
        self.font
            .as_deref()
            .map(|p| normalize_rel_path(p).map(|n| root.join(n)))
            .transpose()
    }

    /// Build a render-ready state, decoding the background image synchronously.
    ///
    /// An undecodable image is logged and dropped; the fill stays visible.
    pub fn to_state(&self, root: &Path) -> AdResult<CompositionState> {
        let background_image = match self.image_path(root)? {
            Some(path) => match decode::load_image_file(&path) {
                Ok(img) => Some(img),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        %err,
                        "background image unusable; rendering fill only"
                    );
                    None
                }
            },
            None => None,
        };

        Ok(CompositionState {
            canvas: self.canvas,
            background_image,
            background_color: self.background_color,
            body_text: self.body_text.clone(),
            cta_text: self.cta_text.clone(),
            cta_color: self.cta_color,
        })
    }
}

/// Normalize and validate document-relative paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> AdResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(AdError::validation("document paths must be relative"));
    }
    if s.is_empty() {
        return Err(AdError::validation("document path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(AdError::validation("document paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(AdError::validation(
            "document path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
