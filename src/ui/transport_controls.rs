//! Transport controls
//!
//! Pause/Resume button and speed selector. The widget only reports what the
//! user did; the app applies it to the playback controller.

use egui::Ui;

use crate::playback::PlaybackSpeed;

/// User action from the transport bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportAction {
    /// Pause/Resume button clicked
    TogglePlay,
    /// Speed selector changed to this index
    SetSpeed(usize),
}

/// Values the transport bar displays
#[derive(Debug, Clone, Copy)]
pub struct TransportView {
    /// Play/pause button text
    pub control_label: &'static str,
    /// Selected speed
    pub speed: PlaybackSpeed,
    /// Last presented frame index
    pub frame_index: Option<u64>,
}

/// Transport bar UI component
pub struct TransportControls {
    /// Show frame/speed status on the right
    pub show_status: bool,
}

impl Default for TransportControls {
    fn default() -> Self {
        Self { show_status: true }
    }
}

impl TransportControls {
    /// Create transport controls
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the controls and return the action taken this frame, if any
    pub fn show(&mut self, ui: &mut Ui, view: TransportView) -> Option<TransportAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            if ui.button(view.control_label).clicked() {
                action = Some(TransportAction::TogglePlay);
            }

            egui::ComboBox::from_id_salt("playback_speed")
                .selected_text(view.speed.label())
                .show_ui(ui, |ui| {
                    for speed in PlaybackSpeed::ALL {
                        if ui.selectable_label(speed == view.speed, speed.label()).clicked()
                            && speed != view.speed
                        {
                            action = Some(TransportAction::SetSpeed(speed.index()));
                        }
                    }
                });

            if self.show_status {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let frame = view
                        .frame_index
                        .map(|i| format!("frame {}", i))
                        .unwrap_or_else(|| "no frame".to_string());
                    ui.weak(format!("{} @ {}", frame, view.speed));
                });
            }
        });

        action
    }
}
