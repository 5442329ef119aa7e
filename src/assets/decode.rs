use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::error::{AdError, AdResult};

#[derive(Clone, Debug)]
/// Decoded raster image in premultiplied RGBA8 form.
///
/// Pixels live behind an `Arc`, so cloning shares the decoded buffer instead of copying it.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap already-premultiplied RGBA8 pixels.
    pub fn from_premul_rgba8(width: u32, height: u32, rgba8_premul: Vec<u8>) -> AdResult<Self> {
        let img = Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        };
        if !img.is_consistent() {
            return Err(AdError::validation(format!(
                "image buffer holds {} bytes, expected {} for {}x{}",
                img.rgba8_premul.len(),
                img.expected_len(),
                width,
                height
            )));
        }
        Ok(img)
    }

    /// True when the buffer length matches `width * height * 4` and neither side is zero.
    pub fn is_consistent(&self) -> bool {
        self.width > 0 && self.height > 0 && self.rgba8_premul.len() == self.expected_len()
    }

    /// Whether two handles share one decoded buffer.
    pub fn same_pixels(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.rgba8_premul, &other.rgba8_premul)
    }

    fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> AdResult<PreparedImage> {
    let dyn_img =
        image::load_from_memory(bytes).map_err(|e| AdError::decode(format!("{e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(AdError::decode("image has zero area"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Read and decode an image file.
pub fn load_image_file(path: &Path) -> AdResult<PreparedImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read image bytes from '{}'", path.display()))?;
    decode_image(&bytes)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
