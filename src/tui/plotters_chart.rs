//! Plotters-powered epidemic curve widget for Ratatui.
//!
//! Coordinates are prepared by the caller:
//! - x: `NaiveDate::num_days_from_ce()` as `f64`
//! - y: `log10(value)`, so a linear Plotters axis reads as a log axis
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// One country's curve, already in chart coordinates.
#[derive(Debug, Clone)]
pub struct ChartLine {
    /// Runs of consecutive points. Runs of one point get a marker but no line.
    pub segments: Vec<Vec<(f64, f64)>>,
    pub color: RGBColor,
}

/// A render-only chart description; all series and bounds are computed
/// outside the render call.
pub struct EpiPlottersChart<'a> {
    pub lines: &'a [ChartLine],
    /// X bounds (days from CE).
    pub x_bounds: [f64; 2],
    /// Y bounds (log10 of the counter).
    pub y_bounds: [f64; 2],
    /// Vertical cursor, in x coordinates.
    pub cursor_x: Option<f64>,
    pub x_label: &'a str,
    pub y_label: String,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl Widget for EpiPlottersChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Mesh lines are noise at terminal resolution.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(&self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            if let Some(x) = self.cursor_x.filter(|x| (x0..=x1).contains(x)) {
                chart.draw_series(LineSeries::new([(x, y0), (x, y1)], &RGBColor(128, 128, 128)))?;
            }

            for line in self.lines {
                for seg in line.segments.iter().filter(|seg| seg.len() >= 2) {
                    chart.draw_series(LineSeries::new(seg.iter().copied(), &line.color))?;
                }
                // `Circle` radii come out far too large through the ratatui
                // backend; a pixel reads as a dot.
                chart.draw_series(
                    line.segments
                        .iter()
                        .flatten()
                        .map(|&(x, y)| Pixel::new((x, y), line.color)),
                )?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
