//! Chart pane: the sequence as scatter points, columns or stems

use crate::sorting::Algorithm;
use crate::ui::theme::DEFAULT_THEME;
use crate::view::{ChartStyle, ViewState};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

/// Render the chart pane
pub fn render_chart_pane(
    frame: &mut Frame,
    area: Rect,
    view: &ViewState,
    algorithm: Option<Algorithm>,
) {
    let title = match algorithm {
        Some(algorithm) => format!(" {} · {} ", algorithm, view.chart()),
        None => format!(" {} ", view.chart()),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    if view.values().is_empty() {
        let paragraph = Paragraph::new("(no data: press c to create an array)")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let (y_min, y_max) = view.y_range();
    let len = view.values().len() as f64;

    // Half blocks give solid columns; braille keeps points and stems thin
    let marker = match view.chart() {
        ChartStyle::Bars => Marker::HalfBlock,
        ChartStyle::Scatter | ChartStyle::Stems => Marker::Braille,
    };

    let canvas = Canvas::default()
        .block(block)
        .marker(marker)
        .x_bounds([0.0, len])
        .y_bounds([y_min, y_max])
        .paint(|ctx| paint(ctx, view));

    frame.render_widget(canvas, area);
}

fn paint(ctx: &mut Context, view: &ViewState) {
    // y_range always spans zero
    let baseline = 0.0;
    let style = view.chart();

    let mut normal = Vec::with_capacity(view.values().len());
    let mut touched = Vec::with_capacity(view.highlights().len());

    for (index, &value) in view.values().iter().enumerate() {
        let x = index as f64 + 0.5;
        let y = value as f64;
        let color = color_for(view, index);

        if matches!(style, ChartStyle::Bars | ChartStyle::Stems) {
            ctx.draw(&CanvasLine::new(x, baseline, x, y, color));
        }

        if matches!(style, ChartStyle::Scatter | ChartStyle::Stems) {
            if view.is_highlighted(index) {
                touched.push((x, y));
            } else {
                normal.push((x, y));
            }
        }
    }

    ctx.draw(&Points {
        coords: &normal,
        color: DEFAULT_THEME.bar,
    });
    // Drawn last so highlights stay on top
    ctx.draw(&Points {
        coords: &touched,
        color: DEFAULT_THEME.highlight,
    });
}

fn color_for(view: &ViewState, index: usize) -> Color {
    if view.is_highlighted(index) {
        DEFAULT_THEME.highlight
    } else {
        DEFAULT_THEME.bar
    }
}
