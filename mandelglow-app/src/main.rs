mod app;
mod error;
mod hardware;
mod input;
mod rasterizer;
mod software;
mod switch;

use eframe::egui;
use tracing::info;

use app::MandelGlowApp;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting MandelGlow");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Mandelbrot Fractal Zoom")
            .with_inner_size([600.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "MandelGlow",
        options,
        Box::new(|cc| Ok(Box::new(MandelGlowApp::new(cc)))),
    )
}
