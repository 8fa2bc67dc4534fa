use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use mandelglow_core::{evaluate, ViewState};

use crate::buffer::PixelBuffer;
use crate::error::RenderError;

/// Compute one full frame of escape-time colors on the CPU.
///
/// Rows are filled in parallel: `par_chunks_mut` hands each worker a
/// disjoint row slice of the buffer, so no two threads ever touch the same
/// pixel and no synchronization beyond the final rayon join is needed. The
/// join doubles as the upload barrier — when this function returns, every
/// pixel has been written and the buffer is safe to hand to the GPU.
///
/// Pixel centers map to the same normalized `[-1, 1]` coordinates the
/// vertex quad spans, so a fragment at the same position sees identical
/// inputs and the two backends stay visually equivalent.
pub fn rasterize(view: &ViewState, width: u32, height: u32) -> crate::Result<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }

    let start = Instant::now();
    let mut buffer = PixelBuffer::new(width, height);

    let w = width as f32;
    let h = height as f32;
    let row_stride = width as usize * 4;

    buffer
        .data
        .par_chunks_mut(row_stride)
        .enumerate()
        .for_each(|(row, pixels)| {
            // Row 0 is the top of the frame; flip to match NDC y-up.
            let y = 1.0 - 2.0 * (row as f32 + 0.5) / h;
            for col in 0..width as usize {
                let x = 2.0 * (col as f32 + 0.5) / w - 1.0;
                let color = evaluate(x, y, view);
                let idx = col * 4;
                pixels[idx] = color.r;
                pixels[idx + 1] = color.g;
                pixels[idx + 2] = color.b;
                pixels[idx + 3] = color.a;
            }
        });

    debug!(
        width,
        height,
        elapsed_ms = start.elapsed().as_millis(),
        "Software frame filled"
    );

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_has_expected_size() {
        let view = ViewState::new();
        let buf = rasterize(&view, 64, 48).unwrap();
        assert_eq!(buf.width, 64);
        assert_eq!(buf.height, 48);
        assert_eq!(buf.data.len(), 64 * 48 * 4);
    }

    #[test]
    fn zero_dimensions_rejected() {
        let view = ViewState::new();
        assert!(matches!(
            rasterize(&view, 0, 100),
            Err(RenderError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            rasterize(&view, 100, 0),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn center_pixel_is_interior_at_home_view() {
        // The home view puts the origin at the screen center, deep inside
        // the set, so the middle pixel must be transparent black.
        let view = ViewState::new();
        let buf = rasterize(&view, 101, 101).unwrap();
        let c = buf.pixel(50, 50).unwrap();
        assert_eq!(c.a, 0.0);
        assert_eq!((c.r, c.g, c.b), (0.0, 0.0, 0.0));
    }

    #[test]
    fn corner_pixels_escape_at_home_view() {
        // Corners map near (±2, ±2), far outside the set.
        let view = ViewState::new();
        let buf = rasterize(&view, 64, 64).unwrap();
        for (col, row) in [(0, 0), (63, 0), (0, 63), (63, 63)] {
            let c = buf.pixel(col, row).unwrap();
            assert_eq!(c.a, 1.0, "corner ({col},{row}) should be escaped/opaque");
        }
    }

    #[test]
    fn every_pixel_is_interior_or_opaque() {
        let view = ViewState::new();
        let buf = rasterize(&view, 40, 40).unwrap();
        for chunk in buf.data.chunks_exact(4) {
            let a = chunk[3];
            if a == 0.0 {
                assert_eq!(&chunk[..3], &[0.0, 0.0, 0.0]);
            } else {
                assert_eq!(a, 1.0);
            }
        }
    }
}
