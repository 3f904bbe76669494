use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::f64::consts::TAU;

use crate::ledger::{format_currency, Summary, SLICE_LABELS};
use crate::ui::theme;

/// Sampling step for the pie's point cloud, in canvas units (radius 1.0).
const SAMPLE_STEP: f64 = 0.02;

const SLICE_COLORS: [Color; 3] = [theme::CYAN, theme::RED, theme::TEAL];

/// A three-slice pie chart with percentage labels.
///
/// Holds the rasterized point cloud for each slice; rebuilt on every update.
#[derive(Debug, Clone)]
pub(crate) struct PieChart {
    values: [Decimal; 3],
    labels: [String; 3],
    points: [Vec<(f64, f64)>; 3],
}

impl PieChart {
    fn new(summary: &Summary) -> Self {
        let mut chart = Self {
            values: [Decimal::ZERO; 3],
            labels: ["0%".to_string(), "0%".to_string(), "0%".to_string()],
            points: [Vec::new(), Vec::new(), Vec::new()],
        };
        chart.set_data(summary);
        chart
    }

    fn set_data(&mut self, summary: &Summary) {
        self.values = summary.chart_values();
        self.labels = summary.chart_labels();
        self.points = rasterize(&self.values);
    }

    #[cfg(test)]
    pub(crate) fn labels(&self) -> &[String; 3] {
        &self.labels
    }

    fn render(&self, f: &mut Frame, area: Rect, currency: &str) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Overview ", theme::title_style()));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(34)])
            .split(inner);

        // Braille cells are 2x4 dots, so twice as many columns as rows draws a circle
        let pie_area = square_area(chunks[0]);
        let points = &self.points;
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-1.0, 1.0])
            .y_bounds([-1.0, 1.0])
            .paint(move |ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: 1.0,
                    color: theme::OVERLAY,
                });
                for (coords, color) in points.iter().zip(SLICE_COLORS) {
                    ctx.draw(&Points {
                        coords: coords.as_slice(),
                        color,
                    });
                }
            });
        f.render_widget(canvas, pie_area);

        let mut legend = vec![Line::from("")];
        for i in 0..3 {
            legend.push(Line::from(vec![
                Span::styled("■ ", Style::default().fg(SLICE_COLORS[i])),
                Span::styled(format!("{:<9}", SLICE_LABELS[i]), theme::normal_style()),
                Span::styled(
                    format!("{:>7} ", self.labels[i]),
                    Style::default()
                        .fg(SLICE_COLORS[i])
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format_currency(self.values[i], currency), theme::dim_style()),
            ]));
        }
        f.render_widget(Paragraph::new(legend), chunks[1]);
    }
}

/// Split the unit disc into one point cloud per slice.
///
/// Slices run clockwise from twelve o'clock, sized by each value's share of
/// the positive values. Negative values get no area.
fn rasterize(values: &[Decimal; 3]) -> [Vec<(f64, f64)>; 3] {
    let weights = values.map(|v| v.to_f64().unwrap_or(0.0).max(0.0));
    let total: f64 = weights.iter().sum();
    let mut points: [Vec<(f64, f64)>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    if total <= 0.0 {
        return points;
    }

    let mut bounds = [0.0; 3];
    let mut acc = 0.0;
    for (bound, w) in bounds.iter_mut().zip(weights) {
        acc += w / total;
        *bound = acc;
    }
    // Float drift must not leak points into a trailing empty slice
    if let Some(last) = weights.iter().rposition(|w| *w > 0.0) {
        bounds[last] = f64::INFINITY;
    }

    let steps = (2.0 / SAMPLE_STEP) as i32;
    for yi in 0..=steps {
        let y = -1.0 + yi as f64 * SAMPLE_STEP;
        for xi in 0..=steps {
            let x = -1.0 + xi as f64 * SAMPLE_STEP;
            if x * x + y * y > 1.0 {
                continue;
            }
            let turn = x.atan2(y).rem_euclid(TAU) / TAU;
            let slice = bounds.iter().position(|b| turn < *b).unwrap_or(2);
            points[slice].push((x, y));
        }
    }
    points
}

fn square_area(area: Rect) -> Rect {
    let width = area.width.min(area.height.saturating_mul(2));
    let height = (width / 2).min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Owning handle for the dashboard chart.
///
/// Uninitialized until [`ChartHandle::create`]; at most one widget is alive at
/// a time.
#[derive(Debug, Default)]
pub(crate) struct ChartHandle {
    widget: Option<PieChart>,
    generation: u64,
}

impl ChartHandle {
    /// Build the widget. An existing widget is disposed first.
    pub(crate) fn create(&mut self, summary: &Summary) {
        if self.widget.is_some() {
            self.dispose();
        }
        self.widget = Some(PieChart::new(summary));
        self.generation += 1;
        log::debug!("chart created (generation {})", self.generation);
    }

    /// Tear down the current widget, if any, and build a fresh one.
    pub(crate) fn replace(&mut self, summary: &Summary) {
        self.dispose();
        self.create(summary);
    }

    pub(crate) fn dispose(&mut self) {
        if self.widget.take().is_some() {
            log::debug!("chart disposed (generation {})", self.generation);
        }
    }

    /// Push new totals into the widget. Does nothing before `create`.
    pub(crate) fn update(&mut self, summary: &Summary) {
        if let Some(widget) = self.widget.as_mut() {
            widget.set_data(summary);
        }
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.widget.is_some()
    }

    /// How many widgets this handle has built.
    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    pub(crate) fn widget(&self) -> Option<&PieChart> {
        self.widget.as_ref()
    }

    pub(crate) fn render(&self, f: &mut Frame, area: Rect, currency: &str) {
        match &self.widget {
            Some(widget) => widget.render(f, area, currency),
            None => {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::OVERLAY));
                f.render_widget(block, area);
            }
        }
    }
}
