//! Controls pane: size, speed, algorithm, chart style, literal array and actions

use crate::config::Limits;
use crate::control::{Action, Setup};
use crate::sorting::Algorithm;
use crate::ui::app::FocusedField;
use crate::ui::theme::DEFAULT_THEME;
use crate::view::ChartStyle;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Width of the slider track in cells
const TRACK_WIDTH: usize = 20;

/// Everything the controls pane shows
pub struct ControlsRenderData<'a> {
    pub setup: &'a Setup,
    pub limits: &'a Limits,
    pub focused: FocusedField,
    /// Whether the form accepts edits in the current state
    pub editable: bool,
    /// Each action with whether it is currently enabled
    pub actions: [(Action, bool); 4],
}

/// Render the controls pane
pub fn render_controls_pane(frame: &mut Frame, area: Rect, data: &ControlsRenderData) {
    let block = Block::default()
        .title(" Controls ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 1, 0, 0));

    let setup = data.setup;
    let mut lines = Vec::new();

    lines.push(heading("Size", data, FocusedField::SizeText));
    lines.push(text_field(&setup.size_text, "(use slider)", data, FocusedField::SizeText));
    lines.push(slider(
        setup.size_slider,
        data.limits.size_min,
        data.limits.size_max,
        data,
        FocusedField::SizeSlider,
    ));
    lines.push(Line::default());

    lines.push(heading("Speed", data, FocusedField::Speed));
    lines.push(slider(usize::from(setup.speed), 1, 100, data, FocusedField::Speed));
    lines.push(Line::default());

    lines.push(heading("Algorithm", data, FocusedField::Algorithm));
    for algorithm in Algorithm::ALL {
        lines.push(radio(
            algorithm.name(),
            setup.algorithm == Some(algorithm),
            data,
            FocusedField::Algorithm,
        ));
    }
    lines.push(Line::default());

    lines.push(heading("Graph Type", data, FocusedField::Chart));
    for chart in ChartStyle::ALL {
        lines.push(radio(
            chart.name(),
            setup.chart == chart,
            data,
            FocusedField::Chart,
        ));
    }
    lines.push(Line::default());

    lines.push(heading("Array (comma separated)", data, FocusedField::ArrayText));
    lines.push(text_field(&setup.array_text, "(random)", data, FocusedField::ArrayText));
    lines.push(Line::default());

    lines.push(buttons(&data.actions));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn field_color(data: &ControlsRenderData, field: FocusedField) -> Color {
    if !data.editable {
        DEFAULT_THEME.disabled
    } else if data.focused == field {
        DEFAULT_THEME.border_focused
    } else {
        DEFAULT_THEME.fg
    }
}

fn heading(label: &str, data: &ControlsRenderData, field: FocusedField) -> Line<'static> {
    let focused = data.focused == field;
    let marker = if focused { "▸ " } else { "  " };
    let style = Style::default()
        .fg(if focused {
            DEFAULT_THEME.border_focused
        } else {
            DEFAULT_THEME.comment
        })
        .add_modifier(Modifier::BOLD);
    Line::from(Span::styled(format!("{}{}", marker, label), style))
}

fn text_field(
    text: &str,
    placeholder: &str,
    data: &ControlsRenderData,
    field: FocusedField,
) -> Line<'static> {
    let focused = data.focused == field;
    let cursor = if focused && data.editable { "▏" } else { "" };

    if text.is_empty() {
        return Line::from(vec![
            Span::raw("  "),
            Span::styled(cursor.to_string(), Style::default().fg(DEFAULT_THEME.border_focused)),
            Span::styled(placeholder.to_string(), Style::default().fg(DEFAULT_THEME.comment)),
        ]);
    }

    Line::from(vec![
        Span::raw("  "),
        Span::styled(text.to_string(), Style::default().fg(field_color(data, field))),
        Span::styled(cursor.to_string(), Style::default().fg(DEFAULT_THEME.border_focused)),
    ])
}

fn slider(
    value: usize,
    min: usize,
    max: usize,
    data: &ControlsRenderData,
    field: FocusedField,
) -> Line<'static> {
    let span = max.saturating_sub(min).max(1);
    let filled = (value.saturating_sub(min) * TRACK_WIDTH + span / 2) / span;
    let filled = filled.min(TRACK_WIDTH);
    let color = field_color(data, field);

    Line::from(vec![
        Span::raw("  "),
        Span::styled("━".repeat(filled), Style::default().fg(color)),
        Span::styled("●", Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(
            "─".repeat(TRACK_WIDTH - filled),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(format!(" {}", value), Style::default().fg(color)),
    ])
}

fn radio(label: &str, selected: bool, data: &ControlsRenderData, field: FocusedField) -> Line<'static> {
    let (mark, color) = if selected {
        ("(•) ", DEFAULT_THEME.selected)
    } else {
        ("( ) ", field_color(data, field))
    };
    let color = if data.editable { color } else { DEFAULT_THEME.disabled };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{}{}", mark, label), Style::default().fg(color)),
    ])
}

fn buttons(actions: &[(Action, bool)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (action, enabled) in actions {
        let (key, label) = match action {
            Action::Create => ("c", "Create"),
            Action::Start => ("s", "Start"),
            Action::Stop => ("x", "Stop"),
            Action::Reset => ("r", "Reset"),
        };
        let style = if *enabled {
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(DEFAULT_THEME.panel_bg)
                .fg(DEFAULT_THEME.disabled)
        };
        spans.push(Span::styled(format!(" {}:{} ", key, label), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
