//! Plotters-powered histogram widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color as TuiColor, Style},
    widgets::Widget,
};

use crate::plot::{BIN_COUNT, bin_edges};

/// A render-only histogram description.
///
/// Counts are computed outside the render call so `render()` only draws.
pub struct HistogramChart<'a> {
    /// Ratings per bin, bin `k` centred on rating `k`.
    pub counts: &'a [usize; BIN_COUNT],
    pub x_label: &'a str,
    pub y_label: &'a str,
}

impl<'a> HistogramChart<'a> {
    fn y_max(&self) -> f64 {
        let max = self.counts.iter().copied().max().unwrap_or(0) as f64;
        // Headroom above the tallest bar; never a zero-height axis.
        (max * 1.1).max(1.0)
    }
}

impl<'a> Widget for HistogramChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 30 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(TuiColor::Yellow),
            );
            return;
        }

        let edges = bin_edges();
        let x0 = edges[0];
        let x1 = edges[BIN_COUNT];
        let y1 = self.y_max();

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, 0.0..y1)?;

            // Vertical mesh lines would cut through the bars; keep the y grid only.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(BIN_COUNT)
                .y_labels(6)
                .x_label_formatter(&|v| fmt_integer_tick(*v))
                .y_label_formatter(&|v| fmt_integer_tick(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .light_line_style(&RGBColor(80, 80, 80))
                .bold_line_style(&RGBColor(120, 120, 120))
                .draw()?;

            chart.draw_series(self.counts.iter().enumerate().filter(|(_, c)| **c > 0).map(
                |(k, &c)| {
                    Rectangle::new(
                        [(edges[k], 0.0), (edges[k + 1], c as f64)],
                        bar_fill_style(),
                    )
                },
            ))?;

            // Bar outlines keep adjacent bins visually separate.
            chart.draw_series(self.counts.iter().enumerate().filter(|(_, c)| **c > 0).map(
                |(k, &c)| {
                    Rectangle::new(
                        [(edges[k], 0.0), (edges[k + 1], c as f64)],
                        bar_outline_style(),
                    )
                },
            ))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

fn bar_fill_style() -> ShapeStyle {
    RGBColor(0, 255, 255).filled() // cyan
}

fn bar_outline_style() -> ShapeStyle {
    WHITE.stroke_width(1)
}

/// Label whole numbers only; fractional ticks stay blank.
fn fmt_integer_tick(v: f64) -> String {
    let r = v.round();
    if (v - r).abs() < 1e-9 {
        // `+ 0.0` folds -0 into 0.
        format!("{:.0}", r + 0.0)
    } else {
        String::new()
    }
}
