//! Chart Plotter Module
//! Draws a chart snapshot as an interactive egui_plot widget.

use crate::charts::{ChartBody, ChartKind, ChartSpec};
use crate::config::PlotConfig;
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

/// Trace color palette, cycled by trace index
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(255, 87, 34),   // Deep Orange
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

/// Draws chart snapshots with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Color for the trace at `index`.
    pub fn trace_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Horizontal offset of trace `trace` within a category slot, so that
    /// bars of several traces sit side by side around the category center.
    pub fn bar_offset(trace: usize, trace_count: usize, slot_width: f64) -> f64 {
        if trace_count <= 1 {
            return 0.0;
        }
        let bar = slot_width / trace_count as f64;
        -slot_width / 2.0 + bar * (trace as f64 + 0.5)
    }

    /// Draw the title and the plot filling the remaining space.
    pub fn draw(
        ui: &mut egui::Ui,
        chart: &ChartSpec,
        config: &PlotConfig,
        id: impl std::hash::Hash,
    ) {
        if !chart.title.is_empty() {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(&chart.title).size(18.0).strong());
            });
            ui.add_space(6.0);
        }

        let plot = Plot::new(id)
            .legend(Legend::default())
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone());

        match &chart.body {
            ChartBody::Xy(traces) => {
                let kind = chart.kind;
                plot.show(ui, |plot_ui| {
                    for (i, trace) in traces.iter().enumerate() {
                        let color = Self::trace_color(i);
                        let points: PlotPoints = trace.points.iter().copied().collect();
                        if kind == ChartKind::Line {
                            plot_ui.line(
                                Line::new(points)
                                    .color(color)
                                    .width(config.line_width)
                                    .name(&trace.name),
                            );
                        } else {
                            plot_ui.points(
                                Points::new(points)
                                    .radius(config.marker_radius)
                                    .color(color)
                                    .name(&trace.name),
                            );
                        }
                    }
                });
            }
            ChartBody::Bars { categories, traces } => {
                let x_labels = categories.clone();
                let slot = config.bar_width;
                let bar_width = slot / traces.len().max(1) as f64;

                plot.include_y(0.0)
                    .x_axis_formatter(move |mark, _range| {
                        let idx = mark.value.round();
                        // Only label integer ticks that map onto a category.
                        if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                            return String::new();
                        }
                        x_labels.get_index(idx as usize).cloned().unwrap_or_default()
                    })
                    .show(ui, |plot_ui| {
                        for (i, trace) in traces.iter().enumerate() {
                            let color = Self::trace_color(i);
                            let offset = Self::bar_offset(i, traces.len(), slot);
                            let bars: Vec<Bar> = trace
                                .table
                                .iter()
                                .filter_map(|(label, count)| {
                                    let idx = categories.get_index_of(label)?;
                                    Some(
                                        Bar::new(idx as f64 + offset, count as f64)
                                            .width(bar_width)
                                            .name(label),
                                    )
                                })
                                .collect();

                            plot_ui.bar_chart(BarChart::new(bars).color(color).name(&trace.name));
                        }
                    });
            }
        }
    }
}
