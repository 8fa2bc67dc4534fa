use eframe::glow;
use tracing::{info, warn};

use mandelglow_core::ViewState;

use crate::error::GlError;
use crate::rasterizer::{BackendKind, Rasterizer};

/// Owns the view coefficients and exactly one active backend, and swaps
/// backends atomically.
///
/// The switch lives behind a mutex shared between the UI thread (input,
/// toggling) and the paint callback (drawcall), so a swap can never destroy
/// GL resources while a draw is in flight. The `ViewState` is held here
/// rather than inside the backends, so toggling trivially carries the
/// coefficients over bit-for-bit.
pub(crate) struct RasterizerSwitch {
    view: ViewState,
    active: Box<dyn Rasterizer>,
    /// Software render target size, fixed for the life of the app.
    resolution: [u32; 2],
    /// A fatal draw error parked for the UI thread to act on.
    fatal: Option<GlError>,
}

impl RasterizerSwitch {
    /// Create a switch with an uninitialized backend of the given kind.
    pub(crate) fn new(kind: BackendKind, resolution: [u32; 2]) -> Self {
        Self {
            view: ViewState::new(),
            active: kind.create(resolution),
            resolution,
            fatal: None,
        }
    }

    pub(crate) fn kind(&self) -> BackendKind {
        self.active.kind()
    }

    pub(crate) fn view(&self) -> &ViewState {
        &self.view
    }

    pub(crate) fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    /// Initialize the active backend once a GL context exists.
    pub(crate) fn init_active(&mut self, gl: &glow::Context) {
        self.active.init(gl);
    }

    /// Swap to the other backend kind: destroy the current one, build and
    /// initialize the replacement, and only then install it — the active
    /// slot never holds a partially-initialized backend.
    ///
    /// Accepts `Option` for the context (mirroring `eframe::App::on_exit`);
    /// without a context the swap only exchanges the cold structs.
    pub(crate) fn toggle(&mut self, gl: Option<&glow::Context>) {
        if let Some(gl) = gl {
            self.active.destroy(gl);
        }

        let next_kind = self.kind().other();
        let mut next = next_kind.create(self.resolution);
        if let Some(gl) = gl {
            next.init(gl);
        }
        self.active = next;

        info!(backend = next_kind.label(), "Switched rasterizer");
    }

    /// Reset the coefficients to the home view; the active backend is
    /// untouched.
    pub(crate) fn reset(&mut self) {
        info!("Resetting view state");
        self.view.reset();
    }

    /// Draw one frame with the active backend. Non-fatal errors are logged
    /// here; a fatal one is parked for [`take_fatal`](Self::take_fatal).
    pub(crate) fn drawcall(&mut self, gl: &glow::Context) {
        if let Err(err) = self.active.drawcall(gl, &self.view) {
            if err.is_fatal() {
                self.fatal = Some(err);
            } else {
                warn!("Draw failed: {err}");
            }
        }
    }

    /// Take a pending fatal error, if any. The app shuts the window down
    /// in response.
    pub(crate) fn take_fatal(&mut self) -> Option<GlError> {
        self.fatal.take()
    }

    /// Destroy the active backend's GL resources on shutdown.
    pub(crate) fn destroy_active(&mut self, gl: &glow::Context) {
        self.active.destroy(gl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_bits(v: &ViewState) -> (u32, u32, u32) {
        (
            v.scale.to_bits(),
            v.offset_x.to_bits(),
            v.offset_y.to_bits(),
        )
    }

    #[test]
    fn toggle_alternates_backend_kind() {
        let mut switch = RasterizerSwitch::new(BackendKind::Hardware, [600, 600]);
        assert_eq!(switch.kind(), BackendKind::Hardware);
        switch.toggle(None);
        assert_eq!(switch.kind(), BackendKind::Software);
        switch.toggle(None);
        assert_eq!(switch.kind(), BackendKind::Hardware);
    }

    #[test]
    fn toggle_preserves_view_state_bit_for_bit() {
        let mut switch = RasterizerSwitch::new(BackendKind::Hardware, [600, 600]);
        switch.view_mut().zoom(-7.3);
        switch.view_mut().pan(0.123, -0.456);
        switch.view_mut().zoom(2.5);
        let before = view_bits(switch.view());

        switch.toggle(None);
        assert_eq!(view_bits(switch.view()), before, "first swap changed view");
        switch.toggle(None);
        assert_eq!(view_bits(switch.view()), before, "second swap changed view");
    }

    #[test]
    fn reset_matches_default_regardless_of_backend() {
        for kind in [BackendKind::Hardware, BackendKind::Software] {
            let mut switch = RasterizerSwitch::new(kind, [600, 600]);
            switch.view_mut().zoom(9.0);
            switch.view_mut().pan(1.0, 1.0);
            switch.reset();
            assert_eq!(*switch.view(), ViewState::new());
        }
    }

    #[test]
    fn no_fatal_error_initially() {
        let mut switch = RasterizerSwitch::new(BackendKind::Software, [64, 64]);
        assert!(switch.take_fatal().is_none());
    }
}
