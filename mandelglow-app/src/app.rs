use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use eframe::egui;
use tracing::{error, info, warn};

use crate::rasterizer::BackendKind;
use crate::switch::RasterizerSwitch;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Software render target size, matching the reference 600×600 output.
pub(crate) const RENDER_WIDTH: u32 = 600;
pub(crate) const RENDER_HEIGHT: u32 = 600;

/// The window title is refreshed with FPS/zoom about twice a second.
const TITLE_UPDATE_INTERVAL: Duration = Duration::from_millis(500);

// ---------------------------------------------------------------------------
// FPS measurement
// ---------------------------------------------------------------------------

/// Counts frames and reports the rate once per title-update interval.
pub(crate) struct FpsCounter {
    frames: u32,
    last_update: Instant,
}

impl FpsCounter {
    pub(crate) fn new() -> Self {
        Self {
            frames: 0,
            last_update: Instant::now(),
        }
    }

    /// Record one frame; returns the measured FPS when an interval elapsed.
    pub(crate) fn tick(&mut self) -> Option<f64> {
        self.frames += 1;
        let elapsed = self.last_update.elapsed();
        if elapsed < TITLE_UPDATE_INTERVAL {
            return None;
        }
        let fps = self.frames as f64 / elapsed.as_secs_f64();
        self.frames = 0;
        self.last_update = Instant::now();
        Some(fps)
    }
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

pub(crate) struct MandelGlowApp {
    /// Shared with the paint callback; the mutex serializes backend swaps
    /// against in-flight drawcalls.
    pub(crate) switch: Arc<Mutex<RasterizerSwitch>>,
    fps: FpsCounter,
}

impl MandelGlowApp {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut switch =
            RasterizerSwitch::new(BackendKind::Hardware, [RENDER_WIDTH, RENDER_HEIGHT]);

        match cc.gl.as_deref() {
            Some(gl) => switch.init_active(gl),
            None => warn!("No glow context available; rendering is disabled"),
        }

        Self {
            switch: Arc::new(Mutex::new(switch)),
            fps: FpsCounter::new(),
        }
    }

    fn update_title(&mut self, ctx: &egui::Context) {
        let Some(fps) = self.fps.tick() else {
            return;
        };
        let Ok(switch) = self.switch.lock() else {
            return;
        };
        let title = format!(
            "Mandelbrot Fractal Zoom | OpenGL {} | Zoom: {} | FPS: {fps:.2}",
            switch.kind().label(),
            switch.view().zoom_level(),
        );
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
    }
}

impl eframe::App for MandelGlowApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        // A fatal driver error has no recovery path; close the window.
        if let Ok(mut switch) = self.switch.lock() {
            if let Some(err) = switch.take_fatal() {
                error!("Fatal GPU error, terminating frame loop: {err}");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        }

        self.handle_keyboard(ctx, frame);

        // The whole window is the fractal canvas.
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let available = ui.available_size();
                let (rect, response) =
                    ui.allocate_exact_size(available, egui::Sense::click_and_drag());

                self.handle_canvas_input(ctx, &response);

                let switch = Arc::clone(&self.switch);
                let callback = egui::PaintCallback {
                    rect,
                    callback: Arc::new(eframe::egui_glow::CallbackFn::new(
                        move |_info, painter| {
                            let Ok(mut switch) = switch.lock() else {
                                return;
                            };
                            switch.drawcall(painter.gl());
                        },
                    )),
                };
                ui.painter().add(callback);
            });

        self.update_title(ctx);

        // Continuous rendering: one drawcall per display refresh.
        ctx.request_repaint();
    }

    fn on_exit(&mut self, gl: Option<&eframe::glow::Context>) {
        if let Some(gl) = gl {
            if let Ok(mut switch) = self.switch.lock() {
                switch.destroy_active(gl);
            }
        }
        info!("Shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_counter_reports_after_interval() {
        let mut fps = FpsCounter::new();
        assert!(fps.tick().is_none(), "no report before the interval elapses");

        std::thread::sleep(TITLE_UPDATE_INTERVAL + Duration::from_millis(50));
        let rate = fps.tick().expect("interval elapsed, rate expected");
        assert!(rate > 0.0);
        assert!(rate < 100.0, "two ticks over half a second is a low rate");
    }
}
