use crate::color::{shade, ColorSample};
use crate::view::ViewState;

/// Iteration cap before a point is declared inside the set.
pub const MAX_ITERATIONS: u32 = 1000;

/// Squared-magnitude escape threshold (`|z|² ≥ 4` ⇔ `|z| ≥ 2`).
pub const BAILOUT: f32 = 4.0;

/// The outcome of iterating a single point.
///
/// `f32` throughout: this function is the CPU half of a two-implementation
/// contract whose other half is the fragment shader, and GLSL floats are
/// single precision. Widening the CPU side would make the backends diverge
/// near the bailout boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeResult {
    /// The orbit escaped after completing `iterations` steps of `z ← z² + c`.
    Escaped { iterations: u32 },

    /// The orbit stayed bounded for all [`MAX_ITERATIONS`] steps.
    Interior,
}

/// Iterate `z ← z² + c` from `z₀ = c` and report when the orbit escapes.
///
/// `(2, 2)` escapes on the very first step; the origin never does.
#[inline]
pub fn escape_time(real: f32, imag: f32) -> EscapeResult {
    let creal = real;
    let cimag = imag;

    let mut re = real;
    let mut im = imag;
    let mut magnitude = 0.0f32;
    let mut iterations = 0u32;

    for n in 0..MAX_ITERATIONS {
        let tmp = re;
        re = tmp * tmp - im * im + creal;
        im = 2.0 * tmp * im + cimag;
        magnitude = re * re + im * im;
        iterations = n + 1;

        if magnitude >= BAILOUT {
            break;
        }
    }

    if magnitude < BAILOUT {
        EscapeResult::Interior
    } else {
        EscapeResult::Escaped { iterations }
    }
}

/// Evaluate one normalized screen coordinate against the current view.
///
/// Applies the `real = x·scale + offset_x` / `imag = y·scale + offset_y`
/// transform, iterates, and shades — one coordinate in, one color out,
/// independent of all other pixels. The fragment shader performs exactly
/// these steps per fragment.
#[inline]
pub fn evaluate(x: f32, y: f32, view: &ViewState) -> ColorSample {
    let real = x * view.scale + view.offset_x;
    let imag = y * view.scale + view.offset_y;
    shade(escape_time(real, imag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_interior() {
        assert_eq!(escape_time(0.0, 0.0), EscapeResult::Interior);
    }

    #[test]
    fn far_point_escapes_on_first_step() {
        assert_eq!(escape_time(2.0, 2.0), EscapeResult::Escaped { iterations: 1 });
    }

    #[test]
    fn minus_one_is_interior() {
        // c = -1 gives the orbit -1 → 0 → -1 … (period 2)
        assert_eq!(escape_time(-1.0, 0.0), EscapeResult::Interior);
    }

    #[test]
    fn known_escape_count() {
        // c = 1: z₀=1, z₁=2 (|z|²=4 triggers the bailout on step 1)
        assert_eq!(escape_time(1.0, 0.0), EscapeResult::Escaped { iterations: 1 });
    }

    #[test]
    fn near_boundary_point_escapes_slowly() {
        // c = 0.26 sits just outside the cardioid cusp at 0.25.
        match escape_time(0.26, 0.0) {
            EscapeResult::Escaped { iterations } => {
                assert!(iterations > 10, "boundary points should iterate a while");
            }
            EscapeResult::Interior => panic!("0.26 + 0i lies outside the set"),
        }
    }

    #[test]
    fn deterministic_results() {
        let points = [
            (0.0f32, 0.0f32),
            (-0.75, 0.1),
            (0.3, 0.5),
            (-2.0, 0.0),
            (1.0, 1.0),
        ];
        let run1: Vec<_> = points.iter().map(|&(re, im)| escape_time(re, im)).collect();
        let run2: Vec<_> = points.iter().map(|&(re, im)| escape_time(re, im)).collect();
        assert_eq!(run1, run2, "iteration must be deterministic");
    }

    #[test]
    fn evaluate_applies_view_transform() {
        // With scale=2 and no offset, x=1 maps to real=2 → instant escape.
        let view = ViewState::new();
        let c = evaluate(1.0, 1.0, &view);
        assert_eq!(c.a, 1.0);

        // The screen center maps to the origin → interior.
        let c = evaluate(0.0, 0.0, &view);
        assert_eq!(c, ColorSample::TRANSPARENT);
    }

    #[test]
    fn evaluate_honors_offsets() {
        // Pan so the screen center lands on a far-outside point.
        let view = ViewState::with_coefficients(2.0, 10.0, 0.0).unwrap();
        let c = evaluate(0.0, 0.0, &view);
        assert_eq!(c.a, 1.0, "offset view should move the center off the set");
    }
}
