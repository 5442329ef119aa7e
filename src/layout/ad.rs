use crate::foundation::core::{Canvas, Point, Rect};

/// Body copy font size in pixels.
pub const BODY_FONT_PX: f32 = 16.0;
/// CTA label font size in pixels.
pub const CTA_FONT_PX: f32 = 14.0;
/// Baseline-to-baseline distance for body copy.
pub const BODY_LINE_ADVANCE: f64 = 20.0;

const PANEL_INSET_X: f64 = 10.0;
const PANEL_RISE: f64 = 120.0;
const PANEL_HEIGHT: f64 = 60.0;

const BODY_INSET_X: f64 = 20.0;
const BODY_BASELINE_RISE: f64 = 90.0;

const CTA_WIDTH: f64 = 100.0;
const CTA_HEIGHT: f64 = 40.0;
const CTA_RIGHT_OFFSET: f64 = 120.0;
const CTA_RISE: f64 = 50.0;
const CTA_BASELINE_NUDGE: f64 = 5.0;

/// Fixed geometry of the ad template for one canvas size.
///
/// All anchors are measured from the bottom and right edges, so the template sticks to the
/// lower part of the canvas whatever its size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdLayout {
    /// White backdrop behind the body copy.
    pub panel: Rect,
    /// Left edge and first baseline of the body copy.
    pub body_origin: Point,
    /// Width available to a body line.
    pub body_max_width: f64,
    /// CTA button rectangle.
    pub cta: Rect,
    /// Horizontal center and baseline of the CTA label.
    pub cta_label_anchor: Point,
}

impl AdLayout {
    /// Compute the template for `canvas`.
    pub fn for_canvas(canvas: Canvas) -> Self {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);

        let panel = Rect::new(
            PANEL_INSET_X,
            h - PANEL_RISE,
            w - PANEL_INSET_X,
            h - PANEL_RISE + PANEL_HEIGHT,
        );
        let cta = Rect::new(
            w - CTA_RIGHT_OFFSET,
            h - CTA_RISE,
            w - CTA_RIGHT_OFFSET + CTA_WIDTH,
            h - CTA_RISE + CTA_HEIGHT,
        );
        let cta_label_anchor = Point::new(
            cta.x0 + CTA_WIDTH / 2.0,
            cta.y0 + CTA_HEIGHT / 2.0 + CTA_BASELINE_NUDGE,
        );

        Self {
            panel,
            body_origin: Point::new(BODY_INSET_X, h - BODY_BASELINE_RISE),
            body_max_width: (w - 2.0 * BODY_INSET_X).max(0.0),
            cta,
            cta_label_anchor,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/ad.rs"]
mod tests;
