//! Stats pane: comparison counter and Big-O commentary

use crate::control::RunState;
use crate::sorting::Algorithm;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

/// Values shown in the stats pane
pub struct StatsRenderData {
    pub algorithm: Option<Algorithm>,
    pub len: usize,
    pub comparisons: u64,
    pub steps: u64,
    pub state: RunState,
}

/// Render the stats pane
pub fn render_stats_pane(frame: &mut Frame, area: Rect, data: &StatsRenderData) {
    let block = Block::default()
        .title(" Complexity ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 1, 0, 0));

    let label = Style::default().fg(DEFAULT_THEME.comment);
    let value = Style::default()
        .fg(DEFAULT_THEME.fg)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(vec![
        Span::styled("Comparisons ", label),
        Span::styled(data.comparisons.to_string(), value),
        Span::styled("   Steps ", label),
        Span::styled(data.steps.to_string(), value),
        Span::styled("   n ", label),
        Span::styled(data.len.to_string(), value),
        Span::styled("   State ", label),
        Span::styled(data.state.to_string(), state_style(data.state)),
    ])];

    match data.algorithm {
        Some(algorithm) => {
            let complexity = algorithm.complexity();
            lines.push(Line::from(vec![
                Span::styled("Best ", label),
                Span::styled(complexity.best, value),
                Span::styled("   Average ", label),
                Span::styled(complexity.average, value),
                Span::styled("   Worst ", label),
                Span::styled(complexity.worst, value),
                Span::styled("   Space ", label),
                Span::styled(complexity.space, value),
                Span::styled("   Stable ", label),
                Span::styled(if complexity.stable { "yes" } else { "no" }, value),
            ]));
            lines.push(Line::from(vec![
                Span::styled(format!("{} for n = {}: ", complexity.growth.label(), data.len), label),
                Span::styled(complexity.growth.reference(data.len).to_string(), value),
            ]));
            lines.push(Line::from(Span::styled(
                complexity.note,
                Style::default().fg(DEFAULT_THEME.fg),
            )));
        }
        None => lines.push(Line::from(Span::styled("No algorithm chosen", label))),
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn state_style(state: RunState) -> Style {
    let color = match state {
        RunState::Running => DEFAULT_THEME.secondary,
        RunState::Completed => DEFAULT_THEME.success,
        RunState::Stopped => DEFAULT_THEME.error,
        RunState::Idle | RunState::Configured => DEFAULT_THEME.primary,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
