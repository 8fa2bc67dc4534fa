use crate::error::CoreError;

/// The pan/zoom coefficients mapping screen coordinates to the complex plane.
///
/// A normalized screen coordinate `(x, y)` (each axis in `[-1, 1]`) maps to
/// the plane point `(x * scale + offset_x, y * scale + offset_y)`. Both
/// backends consume the same coefficients — the hardware path as shader
/// uniforms, the software path directly in the pixel loop — so the state is
/// a plain value type owned by whoever drives the active rasterizer.
///
/// Invariant: `scale > 0`. The mutation operations do not enforce it;
/// repeated zooming can drive `scale` toward zero or grow it unbounded,
/// which is a known limit of single-precision navigation, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Complex-plane units per normalized screen unit.
    pub scale: f32,

    /// Horizontal pan offset on the complex plane.
    pub offset_x: f32,

    /// Vertical pan offset on the complex plane.
    pub offset_y: f32,
}

impl ViewState {
    /// Default scale: the full set fits in a `[-2, 2]` view.
    pub const DEFAULT_SCALE: f32 = 2.0;

    /// The home view with the whole set visible.
    pub fn new() -> Self {
        Self {
            scale: Self::DEFAULT_SCALE,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Create a view with explicit coefficients, validating the scale.
    pub fn with_coefficients(scale: f32, offset_x: f32, offset_y: f32) -> crate::Result<Self> {
        if scale <= 0.0 || !scale.is_finite() {
            return Err(CoreError::InvalidScale(scale));
        }
        Ok(Self {
            scale,
            offset_x,
            offset_y,
        })
    }

    /// Apply a scroll step. The step is proportional to the current scale,
    /// so equal deltas compound into an exponential zoom regardless of how
    /// deep the view already is.
    pub fn zoom(&mut self, delta: f32) {
        let step = delta / 50.0;
        self.scale += step * self.scale;
    }

    /// Apply a drag in normalized screen units. Pan distance scales with the
    /// current zoom so a screen-space drag feels the same at any depth.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset_x += dx * self.scale;
        self.offset_y += dy * self.scale;
    }

    /// Restore the home view exactly.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Magnification relative to the home view, for display purposes.
    pub fn zoom_level(&self) -> f32 {
        1.0 / self.scale
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
