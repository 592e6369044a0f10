use crate::{state::State, widgets};

/// The scanbox demo app: a generator card and a scanner view side by side.
pub struct ScanboxApp {
    state: State,
}

impl ScanboxApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl eframe::App for ScanboxApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Camera frames are marshalled onto this thread: pump the running
        // session once per UI frame, then drain its events.
        self.state.pump_session();
        self.state.poll_scan_events();

        // Leaving the screen halts a running session without counting as a
        // user cancel.
        if ctx.input(|i| i.viewport().close_requested()) {
            self.state.stop_scan(false);
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.label("Scanbox");
                widgets::status_banner(&self.state, ui);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                widgets::qr_card(&mut self.state, &mut columns[0]);
                widgets::scan_view(&mut self.state, &mut columns[1]);
            });
        });

        // Keep frames flowing while the camera runs.
        if self.state.is_scanning() {
            ctx.request_repaint();
        }
    }
}
