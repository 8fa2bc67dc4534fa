use mandelglow_core::ColorSample;

/// A full-frame RGBA float pixel buffer, row-major, 4 channels per pixel.
///
/// The buffer matches the `RGBA32F` texture layout the software backend
/// uploads each frame, so the data can be handed to `glTexImage2D` without
/// conversion. Nothing in it survives the frame: the whole buffer is
/// recomputed from scratch on every draw.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    /// RGBA channel data, `width * height * 4` floats.
    pub data: Vec<f32>,
}

impl PixelBuffer {
    /// Create a buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width as usize * height as usize * 4],
        }
    }

    /// Write one pixel. Out-of-range coordinates are silently ignored.
    #[inline]
    pub fn set_pixel(&mut self, col: u32, row: u32, color: ColorSample) {
        if col >= self.width || row >= self.height {
            return;
        }
        let idx = (row as usize * self.width as usize + col as usize) * 4;
        self.data[idx] = color.r;
        self.data[idx + 1] = color.g;
        self.data[idx + 2] = color.b;
        self.data[idx + 3] = color.a;
    }

    /// Read one pixel back, if in range.
    pub fn pixel(&self, col: u32, row: u32) -> Option<ColorSample> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let idx = (row as usize * self.width as usize + col as usize) * 4;
        Some(ColorSample::new(
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_transparent() {
        let buf = PixelBuffer::new(4, 3);
        assert_eq!(buf.data.len(), 4 * 3 * 4);
        assert!(buf.data.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn set_and_read_back() {
        let mut buf = PixelBuffer::new(8, 8);
        let c = ColorSample::new(0.1, 0.2, 0.3, 1.0);
        buf.set_pixel(5, 2, c);
        assert_eq!(buf.pixel(5, 2), Some(c));
        assert_eq!(buf.pixel(0, 0), Some(ColorSample::TRANSPARENT));
    }

    #[test]
    fn out_of_range_write_is_ignored() {
        let mut buf = PixelBuffer::new(4, 4);
        let before = buf.data.clone();
        buf.set_pixel(4, 0, ColorSample::new(1.0, 1.0, 1.0, 1.0));
        buf.set_pixel(0, 4, ColorSample::new(1.0, 1.0, 1.0, 1.0));
        buf.set_pixel(u32::MAX, u32::MAX, ColorSample::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(buf.data, before);
        assert!(buf.pixel(4, 0).is_none());
    }
}
