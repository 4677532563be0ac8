//! QuickPlot UI Application
//! Runs queued window tasks and draws every open figure window as its own
//! viewport. The root viewport only hosts the event loop.

use crate::charts::ChartPlotter;
use crate::config::PlotConfig;
use crate::gui::runtime::QueuedTask;
use crate::gui::windows::{WindowId, WindowTracker, Windows};
use egui::ViewportCommand;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

/// The eframe application living on the UI thread.
pub struct PlotApp {
    tasks: Receiver<QueuedTask>,
    windows: Windows,
    config: PlotConfig,
}

impl PlotApp {
    pub(crate) fn new(
        tasks: Receiver<QueuedTask>,
        config: PlotConfig,
        tracker: Arc<WindowTracker>,
    ) -> Self {
        Self {
            tasks,
            windows: Windows::new(tracker),
            config,
        }
    }

    /// Run every task submitted since the last frame, in order.
    fn run_pending_tasks(&mut self) {
        while let Ok(task) = self.tasks.try_recv() {
            task.run(&mut self.windows);
        }
    }

    /// Commands for the root viewport this frame.
    ///
    /// eframe makes the root visible after its first frame, so a hidden root
    /// is re-hidden every frame. Closing the root would end the event loop
    /// and every figure window with it; the close is refused instead.
    fn root_commands(hide_root: bool, close_requested: bool) -> Vec<ViewportCommand> {
        let mut commands = Vec::new();
        if close_requested {
            commands.push(ViewportCommand::CancelClose);
        }
        if hide_root || close_requested {
            commands.push(ViewportCommand::Visible(false));
        }
        commands
    }

    /// Draw each open window; drop the ones the user closed.
    fn show_windows(&mut self, ctx: &egui::Context) {
        let mut closed: Vec<WindowId> = Vec::new();

        for window in self.windows.iter() {
            let builder = egui::ViewportBuilder::default()
                .with_title(window.chart().title.clone())
                .with_inner_size(self.config.window_size)
                .with_min_inner_size(self.config.min_window_size);

            let close_requested =
                ctx.show_viewport_immediate(window.viewport_id(), builder, |ctx, _class| {
                    egui::CentralPanel::default().show(ctx, |ui| {
                        ChartPlotter::draw(ui, window.chart(), &self.config, window.id());
                    });
                    ctx.input(|i| i.viewport().close_requested())
                });

            if close_requested {
                closed.push(window.id());
            }
        }

        for id in closed {
            self.windows.close(id);
        }
    }
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let root_close = ctx.input(|i| i.viewport().close_requested());
        for command in Self::root_commands(self.config.hide_root_window, root_close) {
            ctx.send_viewport_cmd(command);
        }

        self.run_pending_tasks();
        self.show_windows(ctx);

        // Keep polling the task queue while the root viewport is hidden
        ctx.request_repaint_after(self.config.poll_interval());
    }
}

impl Drop for PlotApp {
    fn drop(&mut self) {
        // Unrun tasks release their tracker slot as they drop
        while let Ok(task) = self.tasks.try_recv() {
            drop(task);
        }
    }
}
