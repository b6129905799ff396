// View state consumed by the chart pane

use crate::runner::StepEvent;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::fmt;

/// How the sequence is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartStyle {
    /// One point per element
    Scatter,
    /// Filled column from the baseline
    #[default]
    Bars,
    /// Thin line from the baseline with a point on top
    Stems,
}

impl ChartStyle {
    pub const ALL: [ChartStyle; 3] = [ChartStyle::Scatter, ChartStyle::Bars, ChartStyle::Stems];

    pub fn name(self) -> &'static str {
        match self {
            ChartStyle::Scatter => "Scatter Chart",
            ChartStyle::Bars => "Column (Bar) Graph",
            ChartStyle::Stems => "Stem Graph",
        }
    }
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Latest snapshot pushed to the renderer
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    values: Vec<i64>,
    /// Highlights in the order the step reported them
    highlights: Vec<usize>,
    highlight_set: FxHashSet<usize>,
    chart: ChartStyle,
}

impl ViewState {
    pub fn new(chart: ChartStyle) -> Self {
        ViewState {
            chart,
            ..Self::default()
        }
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn chart(&self) -> ChartStyle {
        self.chart
    }

    pub fn set_chart(&mut self, chart: ChartStyle) {
        self.chart = chart;
    }

    /// Replace the snapshot and clear highlights.
    pub fn show(&mut self, values: Vec<i64>) {
        self.values = values;
        self.clear_highlights();
    }

    /// Take over a step event's snapshot and highlights.
    pub fn apply(&mut self, event: StepEvent) {
        self.values = event.values;
        self.set_highlights(&event.highlights);
    }

    pub fn set_highlights(&mut self, indices: &[usize]) {
        self.highlights.clear();
        self.highlight_set.clear();
        for &index in indices {
            if index < self.values.len() && self.highlight_set.insert(index) {
                self.highlights.push(index);
            }
        }
    }

    pub fn clear_highlights(&mut self) {
        self.highlights.clear();
        self.highlight_set.clear();
    }

    pub fn highlights(&self) -> &[usize] {
        &self.highlights
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlight_set.contains(&index)
    }

    /// Smallest and largest value, `None` when empty.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        let min = *self.values.iter().min()?;
        let max = *self.values.iter().max()?;
        Some((min, max))
    }

    /// Vertical extent of the chart: always includes zero as the baseline.
    pub fn y_range(&self) -> (f64, f64) {
        match self.bounds() {
            Some((min, max)) => {
                let low = min.min(0) as f64;
                let high = max.max(0) as f64;
                if high > low {
                    (low, high)
                } else {
                    (low, low + 1.0)
                }
            }
            None => (0.0, 1.0),
        }
    }
}
