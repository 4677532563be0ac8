//! Static Chart Renderer
//! Draws a chart snapshot into an in-memory bitmap with plotters and
//! encodes it as PNG.
//!
//! Layout follows the window view: caption, axes with labels, one trace per
//! series, legend in the upper right corner.

use crate::charts::plotter::PALETTE;
use crate::charts::{BarTrace, ChartBody, ChartKind, ChartSpec, XyTrace};
use crate::config::PlotConfig;
use crate::figure::FigureError;
use image::{ImageFormat, RgbImage};
use indexmap::IndexSet;
use plotters::prelude::*;
use std::error::Error;
use std::io::Cursor;

type DrawResult = Result<(), Box<dyn Error>>;

/// Largest bitmap `render_png` will allocate, in pixels.
pub const MAX_EXPORT_PIXELS: u64 = 40_000_000;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `chart` at `width` x `height` pixels and return PNG bytes.
    pub fn render_png(
        chart: &ChartSpec,
        config: &PlotConfig,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, FigureError> {
        if width == 0 || height == 0 {
            return Err(FigureError::Render(format!(
                "invalid image size {}x{}",
                width, height
            )));
        }

        let pixels = u64::from(width) * u64::from(height);
        if pixels > MAX_EXPORT_PIXELS {
            return Err(FigureError::Render(format!(
                "image size {}x{} exceeds {} pixels",
                width, height, MAX_EXPORT_PIXELS
            )));
        }
        let len = usize::try_from(pixels)
            .ok()
            .and_then(|p| p.checked_mul(3))
            .ok_or_else(|| {
                FigureError::Render(format!("image size {}x{} too large", width, height))
            })?;

        let mut buffer = vec![0u8; len];
        Self::draw(&mut buffer, chart, config, width, height)
            .map_err(|e| FigureError::Render(e.to_string()))?;

        let img = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| FigureError::Render("bitmap size mismatch".to_string()))?;
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| FigureError::Render(e.to_string()))?;
        Ok(png)
    }

    fn draw(
        buffer: &mut [u8],
        chart: &ChartSpec,
        config: &PlotConfig,
        width: u32,
        height: u32,
    ) -> DrawResult {
        let root = BitMapBackend::with_buffer(buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        match &chart.body {
            ChartBody::Xy(traces) => Self::draw_xy(&root, chart, traces, config)?,
            ChartBody::Bars { categories, traces } => {
                Self::draw_bars(&root, chart, categories, traces, config)?
            }
        }

        root.present()?;
        Ok(())
    }

    fn trace_color(index: usize) -> RGBColor {
        let c = PALETTE[index % PALETTE.len()];
        RGBColor(c.r(), c.g(), c.b())
    }

    /// Padded (min, max) of all points, or a unit range when there is no data.
    pub fn xy_bounds(traces: &[XyTrace]) -> ((f64, f64), (f64, f64)) {
        let mut x = (f64::INFINITY, f64::NEG_INFINITY);
        let mut y = (f64::INFINITY, f64::NEG_INFINITY);
        for p in traces.iter().flat_map(|t| t.points.iter()) {
            if p[0].is_finite() && p[1].is_finite() {
                x = (x.0.min(p[0]), x.1.max(p[0]));
                y = (y.0.min(p[1]), y.1.max(p[1]));
            }
        }
        (Self::pad(x), Self::pad(y))
    }

    fn pad((min, max): (f64, f64)) -> (f64, f64) {
        if min > max {
            return (0.0, 1.0);
        }
        if min == max {
            return (min - 1.0, max + 1.0);
        }
        let margin = (max - min) * 0.05;
        (min - margin, max + margin)
    }

    fn draw_xy(
        root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        chart: &ChartSpec,
        traces: &[XyTrace],
        config: &PlotConfig,
    ) -> DrawResult {
        let ((x0, x1), (y0, y1)) = Self::xy_bounds(traces);

        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, ("sans-serif", 24).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        ctx.configure_mesh()
            .x_desc(&chart.x_label)
            .y_desc(&chart.y_label)
            .draw()?;

        let radius = config.marker_radius.round().max(1.0) as i32;
        let stroke = config.line_width.round().max(1.0) as u32;

        for (i, trace) in traces.iter().enumerate() {
            let color = Self::trace_color(i);
            let points = trace.points.iter().map(|p| (p[0], p[1]));

            if chart.kind == ChartKind::Line {
                ctx.draw_series(LineSeries::new(points, color.stroke_width(stroke)))?
                    .label(trace.name.clone())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            } else {
                ctx.draw_series(points.map(|p| Circle::new(p, radius, color.filled())))?
                    .label(trace.name.clone())
                    .legend(move |(x, y)| Circle::new((x + 10, y), radius, color.filled()));
            }
        }

        if !traces.is_empty() {
            ctx.configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .position(SeriesLabelPosition::UpperRight)
                .draw()?;
        }
        Ok(())
    }

    fn draw_bars(
        root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        chart: &ChartSpec,
        categories: &IndexSet<String>,
        traces: &[BarTrace],
        config: &PlotConfig,
    ) -> DrawResult {
        let max_count = traces
            .iter()
            .flat_map(|t| t.table.counts())
            .max()
            .unwrap_or(0)
            .max(1);
        let x_max = categories.len().max(1) as f64 - 0.5;

        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, ("sans-serif", 24).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(-0.5..x_max, 0.0..max_count as f64 * 1.1)?;

        let label_for = |x: &f64| {
            let idx = x.round();
            if (x - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            categories.get_index(idx as usize).cloned().unwrap_or_default()
        };

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_labels(categories.len().max(1))
            .x_label_formatter(&label_for)
            .x_desc(&chart.x_label)
            .y_desc(&chart.y_label)
            .draw()?;

        let slot = config.bar_width;
        let bar_width = slot / traces.len().max(1) as f64;

        for (i, trace) in traces.iter().enumerate() {
            let color = Self::trace_color(i);
            let offset = crate::charts::ChartPlotter::bar_offset(i, traces.len(), slot);

            let bars = trace.table.iter().filter_map(|(label, count)| {
                let center = categories.get_index_of(label)? as f64 + offset;
                Some(Rectangle::new(
                    [
                        (center - bar_width / 2.0, 0.0),
                        (center + bar_width / 2.0, count as f64),
                    ],
                    color.filled(),
                ))
            });

            ctx.draw_series(bars)?
                .label(trace.name.clone())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled())
                });
        }

        if !traces.is_empty() {
            ctx.configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .position(SeriesLabelPosition::UpperRight)
                .draw()?;
        }
        Ok(())
    }
}
