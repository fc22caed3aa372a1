//! Pseudo-3D Player
//!
//! Main entry point for the application.

use anyhow::anyhow;

use pseudo3d_player::app::CONTROL_STRIP_HEIGHT;
use pseudo3d_player::telemetry::{init_logging, LogConfig};
use pseudo3d_player::video::VideoSource;
use pseudo3d_player::{PlaybackController, PlayerApp, PlayerSettings, Pseudo3dFilter, VideoFile};

fn main() -> anyhow::Result<()> {
    // Settings are needed before logging; report their errors once logging is up
    let (mut settings, settings_error) = match PlayerSettings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (PlayerSettings::default(), Some(e)),
    };
    settings.apply_args(std::env::args().skip(1));

    let log_guard = init_logging(&LogConfig::from_settings(&settings))
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("Starting Pseudo-3D Player v{}", env!("CARGO_PKG_VERSION"));
    if let Some(e) = settings_error {
        tracing::warn!("Using default settings: {}", e);
    }

    let source = match VideoFile::open(&settings.video_path) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!("Could not open video {}: {}", settings.video_path, e);
            eprintln!("Error: Could not open video: {}", settings.video_path);
            drop(log_guard);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Opened {} ({}x{}, {}, {:.2} fps)",
        settings.video_path,
        source.dimensions().0,
        source.dimensions().1,
        source.codec_name(),
        source.frame_rate()
    );

    let controller = PlaybackController::new(
        source,
        Pseudo3dFilter::default(),
        settings.base_interval(),
        settings.initial_speed(),
    );
    let (width, height) = controller.dimensions();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32 + CONTROL_STRIP_HEIGHT])
            .with_position([100.0, 100.0])
            .with_title(settings.window_title.clone()),
        vsync: true,
        ..Default::default()
    };

    eframe::run_native(
        "Pseudo-3D Player",
        native_options,
        Box::new(move |cc| Ok(Box::new(PlayerApp::new(cc, controller)))),
    )
    .map_err(|e| anyhow!("{}", e))?;

    tracing::info!("Pseudo-3D Player exited");
    Ok(())
}
