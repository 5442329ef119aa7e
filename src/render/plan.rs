use crate::{
    assets::{decode::PreparedImage, text::TextMeasure},
    composition::model::CompositionState,
    foundation::{
        core::{Canvas, Point, Rect, Rgb8},
        error::AdResult,
    },
    layout::{
        ad::{AdLayout, BODY_FONT_PX, BODY_LINE_ADVANCE, CTA_FONT_PX},
        wrap::{WrapParams, wrap_text},
    },
};

/// One paint operation in canvas pixel coordinates.
#[derive(Clone, Debug)]
pub enum DrawOp {
    /// Opaque rectangle fill.
    FillRect {
        /// Area to fill.
        rect: Rect,
        /// Fill color.
        color: Rgb8,
    },
    /// Raster image stretched to `dest`.
    Image {
        /// Shared decoded pixels.
        image: PreparedImage,
        /// Destination rectangle.
        dest: Rect,
    },
    /// Single line of text.
    Text {
        /// Line contents.
        text: String,
        /// Left edge and baseline.
        origin: Point,
        /// Font size in pixels.
        size_px: f32,
        /// Glyph color.
        color: Rgb8,
        /// Optional clip rectangle.
        clip: Option<Rect>,
    },
}

/// Ordered paint operations for one frame. Later ops paint over earlier ones.
#[derive(Clone, Debug)]
pub struct RenderPlan {
    /// Target surface size.
    pub canvas: Canvas,
    /// Draw operations, bottom to top.
    pub ops: Vec<DrawOp>,
}

/// Lay out `state` into a paint-ordered plan.
///
/// Text wrapping and CTA centering are resolved here with `measure`, so backends only paint.
#[tracing::instrument(skip_all, fields(width = state.canvas.width, height = state.canvas.height))]
pub fn compile_plan(
    state: &CompositionState,
    measure: &mut dyn TextMeasure,
) -> AdResult<RenderPlan> {
    state.canvas.validate()?;
    let layout = AdLayout::for_canvas(state.canvas);
    let full = state.canvas.rect();
    let mut ops = Vec::new();

    ops.push(DrawOp::FillRect {
        rect: full,
        color: state.background_color,
    });

    if let Some(image) = &state.background_image {
        if image.is_consistent() {
            ops.push(DrawOp::Image {
                image: image.clone(),
                dest: full,
            });
        } else {
            tracing::warn!(
                width = image.width,
                height = image.height,
                len = image.rgba8_premul.len(),
                "background image buffer is inconsistent; skipping image pass"
            );
        }
    }

    ops.push(DrawOp::FillRect {
        rect: layout.panel,
        color: Rgb8::WHITE,
    });

    let body = wrap_text(
        &state.body_text,
        WrapParams {
            origin: layout.body_origin,
            max_width: layout.body_max_width,
            line_advance: BODY_LINE_ADVANCE,
            size_px: BODY_FONT_PX,
        },
        measure,
    );
    tracing::trace!(lines = body.len(), "wrapped body copy");
    ops.extend(body.into_iter().map(|line| DrawOp::Text {
        text: line.text,
        origin: line.origin,
        size_px: BODY_FONT_PX,
        color: Rgb8::BLACK,
        clip: None,
    }));

    ops.push(DrawOp::FillRect {
        rect: layout.cta,
        color: state.cta_color,
    });

    if !state.cta_text.is_empty() {
        let label_width = f64::from(measure.measure(&state.cta_text, CTA_FONT_PX));
        ops.push(DrawOp::Text {
            text: state.cta_text.clone(),
            origin: Point::new(
                layout.cta_label_anchor.x - label_width / 2.0,
                layout.cta_label_anchor.y,
            ),
            size_px: CTA_FONT_PX,
            color: Rgb8::WHITE,
            clip: Some(layout.cta),
        });
    }

    Ok(RenderPlan {
        canvas: state.canvas,
        ops,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
