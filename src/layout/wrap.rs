use crate::{assets::text::TextMeasure, foundation::core::Point};

/// One laid-out line of wrapped text.
#[derive(Clone, Debug, PartialEq)]
pub struct WrappedLine {
    /// Words of the line joined by single spaces.
    pub text: String,
    /// Left edge and baseline of the line.
    pub origin: Point,
    /// Measured width of the line including its trailing space.
    pub width: f64,
}

/// Geometry and font size for a bounded-width text region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrapParams {
    /// Left edge and first baseline.
    pub origin: Point,
    /// Width a line may occupy before breaking.
    pub max_width: f64,
    /// Baseline-to-baseline distance.
    pub line_advance: f64,
    /// Font size passed to the measurer.
    pub size_px: f32,
}

/// Greedy word wrap.
///
/// Words are whitespace-delimited and never split: a word wider than `max_width` gets a line of
/// its own and overflows. No line limit is applied, so long input runs past the region.
pub fn wrap_text(
    text: &str,
    params: WrapParams,
    measure: &mut dyn TextMeasure,
) -> Vec<WrappedLine> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0.0f64;
    let mut y = params.origin.y;

    for word in text.split_whitespace() {
        let candidate = format!("{line}{word} ");
        let candidate_width = f64::from(measure.measure(&candidate, params.size_px));

        if candidate_width > params.max_width && !line.is_empty() {
            lines.push(WrappedLine {
                text: line.trim_end().to_string(),
                origin: Point::new(params.origin.x, y),
                width: line_width,
            });
            y += params.line_advance;
            line = format!("{word} ");
            line_width = f64::from(measure.measure(&line, params.size_px));
        } else {
            line = candidate;
            line_width = candidate_width;
        }
    }

    if !line.is_empty() {
        lines.push(WrappedLine {
            text: line.trim_end().to_string(),
            origin: Point::new(params.origin.x, y),
            width: line_width,
        });
    }

    lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
