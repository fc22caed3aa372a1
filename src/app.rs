//! Main application state and UI
//!
//! Hosts the playback controller inside the eframe update loop: a `TickTimer`
//! decides when to tick, the transport bar feeds user actions back into the
//! controller, and the video view shows the latest filtered frame.

use std::time::Instant;

use eframe::egui::{self, Color32};

use crate::effects::Pseudo3dFilter;
use crate::playback::{PlaybackController, TickOutcome, TickTimer};
use crate::ui::{TransportAction, TransportControls, TransportView, VideoView};
use crate::video::VideoFile;

/// Height reserved below the video for the transport bar
pub const CONTROL_STRIP_HEIGHT: f32 = 50.0;

/// Controller type used by the application
pub type PlayerController = PlaybackController<VideoFile, Pseudo3dFilter>;

/// Tracks whether ticks are currently failing, so a persistent error is
/// reported once instead of on every tick
#[derive(Debug, Default)]
struct FailureLatch {
    failing: bool,
    suppressed: u64,
}

impl FailureLatch {
    /// Record a failed tick; true if this starts a new failure run
    fn fail(&mut self) -> bool {
        if self.failing {
            self.suppressed += 1;
            false
        } else {
            self.failing = true;
            true
        }
    }

    /// Record a good tick; returns how many failures were suppressed if this ends a run
    fn recover(&mut self) -> Option<u64> {
        if !self.failing {
            return None;
        }
        self.failing = false;
        Some(std::mem::take(&mut self.suppressed))
    }
}

/// Main application state
pub struct PlayerApp {
    controller: PlayerController,
    view: VideoView,
    controls: TransportControls,
    timer: TickTimer,
    tick_errors: FailureLatch,
}

impl PlayerApp {
    /// Create a new application instance around an opened controller
    pub fn new(cc: &eframe::CreationContext<'_>, controller: PlayerController) -> Self {
        let timer = TickTimer::new(controller.tick_interval(), Instant::now());
        tracing::info!("Player window ready, tick interval {:?}", timer.interval());

        Self {
            view: VideoView::new(&cc.egui_ctx),
            controls: TransportControls::new(),
            controller,
            timer,
            tick_errors: FailureLatch::default(),
        }
    }

    fn handle_action(&mut self, action: TransportAction) {
        match action {
            TransportAction::TogglePlay => {
                self.controller.toggle_play();
            }
            TransportAction::SetSpeed(index) => {
                if let Some(interval) = self.controller.set_speed_index(index) {
                    self.timer.set_interval(interval, Instant::now());
                }
            }
        }
    }

    fn run_ticks(&mut self, count: u32) {
        match self.controller.tick_many(count, &mut self.view) {
            Ok(outcome) => {
                if let TickOutcome::Restarted { .. } = outcome {
                    tracing::debug!("Video looped ({} total)", self.controller.loop_count());
                }
                if outcome != TickOutcome::Skipped {
                    if let Some(suppressed) = self.tick_errors.recover() {
                        tracing::info!("Playback recovered after {} further failed ticks", suppressed);
                    }
                }
            }
            Err(e) => {
                if self.tick_errors.fail() {
                    tracing::error!("Playback tick failed: {}", e);
                } else {
                    tracing::debug!("Playback tick still failing: {}", e);
                }
            }
        }
    }
}

impl eframe::App for PlayerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.controller.shutdown();
            return;
        }

        let due = self.timer.poll(Instant::now());
        if due > 0 {
            self.run_ticks(due);
        }

        let view = TransportView {
            control_label: self.controller.control_label(),
            speed: self.controller.speed(),
            frame_index: self.controller.last_frame().map(|f| f.frame_index),
        };
        let action = egui::TopBottomPanel::bottom("transport")
            .exact_height(CONTROL_STRIP_HEIGHT)
            .show(ctx, |ui| self.controls.show(ui, view))
            .inner;
        if let Some(action) = action {
            self.handle_action(action);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(Color32::BLACK))
            .show(ctx, |ui| self.view.show(ui));

        ctx.request_repaint_after(self.timer.time_until_due(Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_latch_reports_first_failure_only() {
        let mut latch = FailureLatch::default();
        assert_eq!(latch.recover(), None);

        assert!(latch.fail());
        for _ in 0..30 {
            assert!(!latch.fail());
        }

        assert_eq!(latch.recover(), Some(30));
        assert_eq!(latch.recover(), None);
        assert!(latch.fail());
    }
}
