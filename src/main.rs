use clap::Parser;
use eframe::egui;

use landmark_edit::config::DEFAULT_WINDOW_SIZE;
use landmark_edit::{Config, LandmarkApp, Result};

fn main() -> Result<()> {
    let config = Config::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let app = LandmarkApp::new(&config);
    let title = app.title();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(DEFAULT_WINDOW_SIZE)
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(&title, options, Box::new(move |_cc| Ok(Box::new(app))))?;
    Ok(())
}
