use std::sync::Arc;

use crate::{
    assets::{
        decode::PreparedImage,
        text::{TextBrushRgba8, TextLayoutEngine},
    },
    foundation::{
        core::{Rect, Rgb8},
        error::{AdError, AdResult},
    },
    render::{
        backend::{FrameRGBA, RenderBackend},
        plan::{DrawOp, RenderPlan},
    },
};

/// `vello_cpu` raster backend.
///
/// Keeps the last converted background pixmap and font handle so repeated renders of the same
/// composition reuse them instead of converting again.
pub struct CpuBackend {
    surface: Option<CpuSurface>,
    image_cache: Option<(PreparedImage, vello_cpu::Image)>,
    font_cache: Option<(Arc<Vec<u8>>, vello_cpu::peniko::FontData)>,
    warned_missing_font: bool,
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuBackend {
    /// Backend with empty caches.
    pub fn new() -> Self {
        Self {
            surface: None,
            image_cache: None,
            font_cache: None,
            warned_missing_font: false,
        }
    }

    fn ensure_surface(&mut self, width: u32, height: u32) -> AdResult<&mut CpuSurface> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| AdError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| AdError::render("surface height exceeds u16"))?;

        let surface = match self.surface.take() {
            Some(s) if s.width == width_u16 && s.height == height_u16 => s,
            _ => CpuSurface {
                width: width_u16,
                height: height_u16,
                pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
            },
        };
        Ok(self.surface.insert(surface))
    }

    fn image_paint_for(&mut self, image: &PreparedImage) -> AdResult<vello_cpu::Image> {
        if let Some((cached, paint)) = &self.image_cache
            && cached.same_pixels(image)
        {
            return Ok(paint.clone());
        }

        let pixmap =
            image_premul_bytes_to_pixmap(image.rgba8_premul.as_slice(), image.width, image.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        tracing::debug!(
            width = image.width,
            height = image.height,
            "converted background image to pixmap"
        );
        self.image_cache = Some((image.clone(), paint.clone()));
        Ok(paint)
    }

    fn font_for(&mut self, text: &TextLayoutEngine) -> Option<vello_cpu::peniko::FontData> {
        let face = text.face()?;
        if let Some((bytes, font)) = &self.font_cache
            && Arc::ptr_eq(bytes, &face.bytes)
        {
            return Some(font.clone());
        }

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
            0,
        );
        self.font_cache = Some((face.bytes.clone(), font.clone()));
        Some(font)
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(skip_all, fields(ops = plan.ops.len()))]
    fn render_plan(
        &mut self,
        plan: &RenderPlan,
        text: &mut TextLayoutEngine,
    ) -> AdResult<FrameRGBA> {
        let (width, height) = {
            let surface = self.ensure_surface(plan.canvas.width, plan.canvas.height)?;
            clear_pixmap(&mut surface.pixmap, [0, 0, 0, 0]);
            (surface.width, surface.height)
        };

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        for op in &plan.ops {
            draw_op(self, &mut ctx, op, text)?;
        }
        ctx.flush();

        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| AdError::render("surface missing after draw"))?;
        ctx.render_to_pixmap(&mut surface.pixmap);

        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: surface.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn draw_op(
    backend: &mut CpuBackend,
    ctx: &mut vello_cpu::RenderContext,
    op: &DrawOp,
    text: &mut TextLayoutEngine,
) -> AdResult<()> {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match op {
        DrawOp::FillRect { rect, color } => {
            ctx.set_paint(color_to_cpu(*color));
            ctx.fill_rect(&rect_to_cpu(*rect));
            Ok(())
        }
        DrawOp::Image { image, dest } => {
            let paint = match backend.image_paint_for(image) {
                Ok(paint) => paint,
                Err(err) => {
                    tracing::warn!(%err, "background image not drawable; keeping fill");
                    return Ok(());
                }
            };
            let (w, h) = (f64::from(image.width), f64::from(image.height));

            ctx.set_transform(
                vello_cpu::kurbo::Affine::translate((dest.x0, dest.y0))
                    * vello_cpu::kurbo::Affine::scale_non_uniform(
                        dest.width() / w,
                        dest.height() / h,
                    ),
            );
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
            Ok(())
        }
        DrawOp::Text {
            text: line,
            origin,
            size_px,
            color,
            clip,
        } => {
            let Some(font) = backend.font_for(text) else {
                if !backend.warned_missing_font {
                    tracing::warn!("no font configured; text layers are laid out but not drawn");
                    backend.warned_missing_font = true;
                }
                return Ok(());
            };
            let Some(layout) = text.layout_line(line, *size_px, TextBrushRgba8::from(*color))?
            else {
                return Ok(());
            };

            let baseline = layout
                .lines()
                .next()
                .map(|l| f64::from(l.metrics().baseline))
                .unwrap_or(0.0);

            if let Some(clip) = clip {
                ctx.push_clip_layer(&rect_path_to_cpu(*clip));
            }
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                origin.x,
                origin.y - baseline,
            )));
            fill_layout(ctx, &font, &layout);
            if clip.is_some() {
                ctx.pop_layer();
            }
            Ok(())
        }
    }
}

fn fill_layout(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    layout: &parley::Layout<TextBrushRgba8>,
) {
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));

            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

fn color_to_cpu(c: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 0xFF)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn rect_path_to_cpu(r: Rect) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    out.move_to((r.x0, r.y0));
    out.line_to((r.x1, r.y0));
    out.line_to((r.x1, r.y1));
    out.line_to((r.x0, r.y1));
    out.close_path();
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> AdResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| AdError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| AdError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(AdError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
