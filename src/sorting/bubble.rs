//! Bubble sort with early exit

use super::Observer;
use std::ops::ControlFlow;

/// Swap adjacent out-of-order pairs, one pass at a time.
///
/// A pass without swaps ends the sort. Each swap is one step highlighting
/// `[j, j + 1]`.
pub fn bubble_sort<O: Observer + ?Sized>(data: &mut [i64], observer: &mut O) -> ControlFlow<()> {
    let n = data.len();

    for i in 0..n {
        observer.checkpoint()?;
        let mut swapped = false;

        for j in 0..n - i - 1 {
            observer.compare();
            if data[j] > data[j + 1] {
                data.swap(j, j + 1);
                swapped = true;
                observer.step(data, &[j, j + 1])?;
            }
        }

        if !swapped {
            break;
        }
    }

    ControlFlow::Continue(())
}
