//! Top-down merge sort

use super::Observer;
use std::ops::ControlFlow;

/// Recursive merge sort over inclusive ranges, splitting at `(left + right) / 2`.
pub fn merge_sort<O: Observer + ?Sized>(data: &mut [i64], observer: &mut O) -> ControlFlow<()> {
    if data.len() < 2 {
        return ControlFlow::Continue(());
    }
    let last = data.len() - 1;
    sort_range(data, 0, last, observer)
}

fn sort_range<O: Observer + ?Sized>(
    data: &mut [i64],
    left: usize,
    right: usize,
    observer: &mut O,
) -> ControlFlow<()> {
    observer.checkpoint()?;

    if left < right {
        let mid = left + (right - left) / 2;
        sort_range(data, left, mid, observer)?;
        sort_range(data, mid + 1, right, observer)?;
        merge(data, left, mid, right, observer)?;
    }

    ControlFlow::Continue(())
}

/// Merge `data[left..=mid]` and `data[mid + 1..=right]`, taking from the left
/// run on ties.
///
/// Writes that change the slice are steps highlighting `[k, source]`. Once a
/// step breaks, the remaining writes finish silently so the slice stays a
/// permutation of its input.
fn merge<O: Observer + ?Sized>(
    data: &mut [i64],
    left: usize,
    mid: usize,
    right: usize,
    observer: &mut O,
) -> ControlFlow<()> {
    let lower = data[left..=mid].to_vec();
    let upper = data[mid + 1..=right].to_vec();

    let mut flow = ControlFlow::Continue(());
    let (mut i, mut j, mut k) = (0, 0, left);

    while i < lower.len() && j < upper.len() {
        observer.compare();
        if lower[i] <= upper[j] {
            write(data, observer, k, lower[i], left + i, &mut flow);
            i += 1;
        } else {
            write(data, observer, k, upper[j], mid + 1 + j, &mut flow);
            j += 1;
        }
        k += 1;
    }

    while i < lower.len() {
        write(data, observer, k, lower[i], left + i, &mut flow);
        i += 1;
        k += 1;
    }

    while j < upper.len() {
        write(data, observer, k, upper[j], mid + 1 + j, &mut flow);
        j += 1;
        k += 1;
    }

    flow
}

fn write<O: Observer + ?Sized>(
    data: &mut [i64],
    observer: &mut O,
    k: usize,
    value: i64,
    source: usize,
    flow: &mut ControlFlow<()>,
) {
    if data[k] == value {
        return;
    }
    data[k] = value;
    if flow.is_continue() {
        *flow = observer.step(data, &[k, source]);
    }
}
