use crate::escape::EscapeResult;

/// An RGBA color with float channels, matching the GLSL `vec4` the fragment
/// shader produces. Channel values are not clamped here; the fixed palette
/// endpoints intentionally exceed 1.0 and saturate on output, exactly as
/// they do on the GPU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSample {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// First palette endpoint of the fixed two-color gradient.
pub const PALETTE_A: ColorSample = ColorSample::new(0.5, 0.0, 1.5, 0.0);

/// Second palette endpoint of the fixed two-color gradient.
pub const PALETTE_B: ColorSample = ColorSample::new(0.0, 1.5, 0.0, 0.0);

impl ColorSample {
    /// Transparent black — the color of points inside the set.
    pub const TRANSPARENT: ColorSample = ColorSample::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Channel-wise linear interpolation, the GLSL `mix` function.
    pub fn mix(self, other: Self, t: f32) -> Self {
        let inv = 1.0 - t;
        Self {
            r: self.r * inv + other.r * t,
            g: self.g * inv + other.g * t,
            b: self.b * inv + other.b * t,
            a: self.a * inv + other.a * t,
        }
    }
}

/// The GLSL `fract` function: the fractional part of `x`.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.trunc()
}

/// Map an iteration outcome to its display color.
///
/// Interior points are transparent black. Escaped points pick a position on
/// the fixed two-color gradient from the iteration count, cycling every 20
/// iterations, with alpha forced opaque.
pub fn shade(result: EscapeResult) -> ColorSample {
    match result {
        EscapeResult::Interior => ColorSample::TRANSPARENT,
        EscapeResult::Escaped { iterations } => {
            let t = fract(iterations as f32 * 0.05);
            let c = PALETTE_A.mix(PALETTE_B, t);
            ColorSample::new(c.r, c.g, c.b, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_is_transparent_black() {
        assert_eq!(shade(EscapeResult::Interior), ColorSample::TRANSPARENT);
    }

    #[test]
    fn escaped_is_opaque() {
        for iterations in [1, 7, 20, 345, 1000] {
            let c = shade(EscapeResult::Escaped { iterations });
            assert_eq!(c.a, 1.0, "escaped color must be opaque at n={iterations}");
        }
    }

    #[test]
    fn mix_endpoints() {
        assert_eq!(PALETTE_A.mix(PALETTE_B, 0.0), PALETTE_A);
        assert_eq!(PALETTE_A.mix(PALETTE_B, 1.0), PALETTE_B);
    }

    #[test]
    fn mix_midpoint() {
        let mid = PALETTE_A.mix(PALETTE_B, 0.5);
        assert!((mid.r - 0.25).abs() < 1e-6);
        assert!((mid.g - 0.75).abs() < 1e-6);
        assert!((mid.b - 0.75).abs() < 1e-6);
    }

    #[test]
    fn fract_drops_integer_part() {
        assert_eq!(fract(1.25), 0.25);
        assert_eq!(fract(0.05), 0.05);
        assert_eq!(fract(20.0 * 0.05), 0.0);
    }

    #[test]
    fn gradient_cycles_every_twenty_iterations() {
        let a = shade(EscapeResult::Escaped { iterations: 3 });
        let b = shade(EscapeResult::Escaped { iterations: 23 });
        assert!((a.r - b.r).abs() < 1e-4);
        assert!((a.g - b.g).abs() < 1e-4);
        assert!((a.b - b.b).abs() < 1e-4);
    }
}
