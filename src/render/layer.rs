use crate::effects::composite;
use crate::foundation::core::Canvas;
use crate::foundation::error::{GhostError, GhostResult};
use crate::foundation::math::{premultiply_in_place, unpremultiply_in_place};

/// Canvas-sized straight-alpha RGBA8 buffer, row-major, tightly packed.
#[derive(Clone, PartialEq, Eq)]
pub struct RenderLayer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for RenderLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderLayer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl RenderLayer {
    /// Fully transparent layer.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Transparent layer sized to `canvas`.
    pub fn for_canvas(canvas: Canvas) -> Self {
        Self::transparent(canvas.width, canvas.height)
    }

    /// Wrap straight-alpha bytes.
    pub fn from_straight(width: u32, height: u32, data: Vec<u8>) -> GhostResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| GhostError::validation("layer size overflow"))?;
        if data.len() != expected {
            return Err(GhostError::validation(format!(
                "layer {width}x{height} expects {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap premultiplied bytes, converting them to straight alpha.
    pub fn from_premul(width: u32, height: u32, mut data: Vec<u8>) -> GhostResult<Self> {
        unpremultiply_in_place(&mut data);
        Self::from_straight(width, height, data)
    }

    /// Take ownership of an `image` buffer.
    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Copy into an `image` buffer.
    pub fn to_image(&self) -> GhostResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| GhostError::render("layer bytes do not match its dimensions"))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Straight RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable straight RGBA8 bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Premultiplied copy of the bytes.
    pub fn to_premul(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        premultiply_in_place(&mut out);
        out
    }

    /// Pixel at `(x, y)`, or `None` outside the layer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Overwrite the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: [u8; 4]) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.data[i..i + 4].copy_from_slice(&px);
        }
    }

    /// Alpha channel as a single-channel buffer.
    pub fn alpha(&self) -> Vec<u8> {
        self.data.chunks_exact(4).map(|px| px[3]).collect()
    }

    /// `true` when every pixel has zero alpha.
    pub fn is_transparent(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Number of pixels with non-zero alpha.
    pub fn coverage(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Composite `src` over `self` (source-over, straight alpha).
    pub fn composite_over(&mut self, src: &RenderLayer) -> GhostResult<()> {
        if src.width != self.width || src.height != self.height {
            return Err(GhostError::validation(format!(
                "cannot composite {}x{} over {}x{}",
                src.width, src.height, self.width, self.height
            )));
        }
        composite::over_straight_in_place(&mut self.data, &src.data)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layer.rs"]
mod tests;
