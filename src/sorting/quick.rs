//! Quick sort with Lomuto partitioning

use super::Observer;
use std::ops::ControlFlow;

/// Recursive quick sort, pivoting on the last element of each range.
pub fn quick_sort<O: Observer + ?Sized>(data: &mut [i64], observer: &mut O) -> ControlFlow<()> {
    if data.len() < 2 {
        return ControlFlow::Continue(());
    }
    let last = data.len() - 1;
    sort_range(data, 0, last, observer)
}

fn sort_range<O: Observer + ?Sized>(
    data: &mut [i64],
    low: usize,
    high: usize,
    observer: &mut O,
) -> ControlFlow<()> {
    observer.checkpoint()?;

    if low < high {
        let pivot = partition(data, low, high, observer)?;
        if pivot > low {
            sort_range(data, low, pivot - 1, observer)?;
        }
        sort_range(data, pivot + 1, high, observer)?;
    }

    ControlFlow::Continue(())
}

/// Partition `data[low..=high]` around `data[high]` and return the pivot's
/// final index.
///
/// Swaps inside the scan highlight `[store, j, low, high]`; placing the pivot
/// highlights `[store, high]`. Swaps of equal values are skipped.
fn partition<O: Observer + ?Sized>(
    data: &mut [i64],
    low: usize,
    high: usize,
    observer: &mut O,
) -> ControlFlow<(), usize> {
    let pivot = data[high];
    let mut store = low;

    for j in low..high {
        observer.compare();
        if data[j] <= pivot {
            if data[store] != data[j] {
                data.swap(store, j);
                observer.step(data, &[store, j, low, high])?;
            }
            store += 1;
        }
    }

    if data[store] != data[high] {
        data.swap(store, high);
        observer.step(data, &[store, high])?;
    }

    ControlFlow::Continue(store)
}
