use eframe::egui;

use crate::app::MandelGlowApp;

/// Points of raw scroll delta per logical mouse-wheel notch. One notch maps
/// to a zoom delta of 1, the step size the coefficient model expects.
const SCROLL_POINTS_PER_NOTCH: f32 = 50.0;

impl MandelGlowApp {
    /// Mouse input over the canvas: wheel zooms, primary-button drag pans.
    pub(crate) fn handle_canvas_input(&mut self, ctx: &egui::Context, response: &egui::Response) {
        let scroll_y = ctx.input(|i| i.raw_scroll_delta.y);
        if scroll_y != 0.0 && response.hovered() {
            if let Ok(mut switch) = self.switch.lock() {
                switch.view_mut().zoom(scroll_y / SCROLL_POINTS_PER_NOTCH);
            }
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            let half_w = response.rect.width() / 2.0;
            let half_h = response.rect.height() / 2.0;
            if half_w > 0.0 && half_h > 0.0 {
                if let Ok(mut switch) = self.switch.lock() {
                    // Screen y grows downward; the plane's imaginary axis
                    // grows upward.
                    switch.view_mut().pan(delta.x / half_w, -delta.y / half_h);
                }
            }
        }
    }

    /// Global keys: F5 toggles the backend, F12 resets the view.
    pub(crate) fn handle_keyboard(&mut self, ctx: &egui::Context, frame: &eframe::Frame) {
        let (toggle, reset) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::F5),
                i.key_pressed(egui::Key::F12),
            )
        });
        if !toggle && !reset {
            return;
        }

        let Ok(mut switch) = self.switch.lock() else {
            return;
        };
        if toggle {
            switch.toggle(frame.gl().map(|gl| gl.as_ref()));
        }
        if reset {
            switch.reset();
        }
    }
}
