//! Step-observable sorting algorithms
//!
//! Every algorithm is a plain function over `&mut [i64]` that reports to an
//! [`Observer`]:
//!
//! - [`Observer::compare`] once per element comparison
//! - [`Observer::step`] after every change to the sequence, with the indices
//!   involved (at most four)
//! - [`Observer::checkpoint`] at every outer pass and recursion entry
//!
//! `step` and `checkpoint` return [`ControlFlow::Break`] when the run should
//! stop. Algorithms return as soon as they see a break, leaving the slice a
//! permutation of its input.
//!
//! The algorithms know nothing about threads or timing; the
//! [`runner`](crate::runner) module drives them on a worker thread.

mod bubble;
mod cancel;
mod insertion;
mod merge;
mod quick;
mod selection;

pub use bubble::bubble_sort;
pub use cancel::CancelToken;
pub use insertion::insertion_sort;
pub use merge::merge_sort;
pub use quick::quick_sort;
pub use selection::selection_sort;

use serde::Deserialize;
use std::fmt;
use std::ops::ControlFlow;

/// Maximum number of indices a single step highlights.
pub const MAX_HIGHLIGHTS: usize = 4;

/// Receives the progress of a running sort.
pub trait Observer {
    /// Called once per element comparison.
    fn compare(&mut self);

    /// Called after the sequence changed. `highlights` are the touched indices.
    fn step(&mut self, data: &[i64], highlights: &[usize]) -> ControlFlow<()>;

    /// Called at every outer pass and recursion entry.
    fn checkpoint(&mut self) -> ControlFlow<()>;
}

/// The five supported algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
}

impl Algorithm {
    /// All algorithms, in the order they are listed in the controls pane.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Quick,
        Algorithm::Insertion,
        Algorithm::Merge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Quick => "Quick Sort",
        }
    }

    /// Asymptotic behaviour shown next to the chart.
    pub fn complexity(self) -> Complexity {
        match self {
            Algorithm::Bubble => Complexity {
                best: "O(n)",
                average: "O(n²)",
                worst: "O(n²)",
                space: "O(1)",
                stable: true,
                growth: Growth::Quadratic,
                note: "Adjacent swaps bubble the largest value to the end of each pass; \
                       stops early once a pass makes no swap.",
            },
            Algorithm::Selection => Complexity {
                best: "O(n²)",
                average: "O(n²)",
                worst: "O(n²)",
                space: "O(1)",
                stable: false,
                growth: Growth::Quadratic,
                note: "Always scans the whole unsorted suffix for its minimum, \
                       so comparisons do not depend on the input order.",
            },
            Algorithm::Insertion => Complexity {
                best: "O(n)",
                average: "O(n²)",
                worst: "O(n²)",
                space: "O(1)",
                stable: true,
                growth: Growth::Quadratic,
                note: "Shifts each value left into the sorted prefix; \
                       very fast on nearly sorted input.",
            },
            Algorithm::Merge => Complexity {
                best: "O(n log n)",
                average: "O(n log n)",
                worst: "O(n log n)",
                space: "O(n)",
                stable: true,
                growth: Growth::Linearithmic,
                note: "Splits in halves and merges sorted runs through temporary buffers.",
            },
            Algorithm::Quick => Complexity {
                best: "O(n log n)",
                average: "O(n log n)",
                worst: "O(n²)",
                space: "O(log n)",
                stable: false,
                growth: Growth::Linearithmic,
                note: "Partitions around the last element; sorted input or \
                       many duplicates degrade it to quadratic.",
            },
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Growth class used for the "expected comparisons" readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Growth {
    Quadratic,
    Linearithmic,
}

impl Growth {
    /// Reference comparison count for an input of length `n`.
    pub fn reference(self, n: usize) -> u64 {
        let n = n as f64;
        let value = match self {
            Growth::Quadratic => n * n,
            Growth::Linearithmic if n > 1.0 => n * n.log2(),
            Growth::Linearithmic => 0.0,
        };
        value.round() as u64
    }

    pub fn label(self) -> &'static str {
        match self {
            Growth::Quadratic => "n²",
            Growth::Linearithmic => "n log n",
        }
    }
}

/// Big-O commentary for one algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Complexity {
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
    pub space: &'static str,
    pub stable: bool,
    pub growth: Growth,
    pub note: &'static str,
}

/// Sort `data` ascending with `algorithm`, reporting to `observer`.
///
/// Empty and single-element slices return immediately without any callback.
pub fn sort<O: Observer + ?Sized>(
    algorithm: Algorithm,
    data: &mut [i64],
    observer: &mut O,
) -> ControlFlow<()> {
    if data.len() < 2 {
        return ControlFlow::Continue(());
    }

    match algorithm {
        Algorithm::Bubble => bubble_sort(data, observer),
        Algorithm::Selection => selection_sort(data, observer),
        Algorithm::Insertion => insertion_sort(data, observer),
        Algorithm::Merge => merge_sort(data, observer),
        Algorithm::Quick => quick_sort(data, observer),
    }
}

/// Observer that only counts, optionally breaking after a number of steps.
#[derive(Debug, Default, Clone)]
pub struct Tally {
    pub steps: u64,
    pub comparisons: u64,
    /// Break once this many steps have been seen.
    pub stop_after: Option<u64>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stopping_after(steps: u64) -> Self {
        Tally {
            stop_after: Some(steps),
            ..Self::default()
        }
    }

    fn flow(&self) -> ControlFlow<()> {
        match self.stop_after {
            Some(limit) if self.steps >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }
}

impl Observer for Tally {
    fn compare(&mut self) {
        self.comparisons += 1;
    }

    fn step(&mut self, _data: &[i64], highlights: &[usize]) -> ControlFlow<()> {
        debug_assert!(highlights.len() <= MAX_HIGHLIGHTS);
        self.steps += 1;
        self.flow()
    }

    fn checkpoint(&mut self) -> ControlFlow<()> {
        self.flow()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Sort a copy with a fresh [`Tally`] and return both.
    pub fn run(algorithm: Algorithm, input: &[i64]) -> (Vec<i64>, Tally) {
        let mut data = input.to_vec();
        let mut tally = Tally::new();
        let flow = sort(algorithm, &mut data, &mut tally);
        assert!(flow.is_continue());
        (data, tally)
    }

    pub fn is_permutation(a: &[i64], b: &[i64]) -> bool {
        let mut a = a.to_vec();
        let mut b = b.to_vec();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }
}
