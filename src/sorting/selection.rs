//! Selection sort

use super::Observer;
use std::ops::ControlFlow;

/// Move the minimum of the unsorted suffix to its front, one position at a time.
///
/// Only swaps that change the sequence are reported, highlighting `[i, min]`.
pub fn selection_sort<O: Observer + ?Sized>(
    data: &mut [i64],
    observer: &mut O,
) -> ControlFlow<()> {
    let n = data.len();

    for i in 0..n.saturating_sub(1) {
        observer.checkpoint()?;

        let mut min = i;
        for j in i + 1..n {
            observer.compare();
            if data[j] < data[min] {
                min = j;
            }
        }

        if min != i {
            data.swap(i, min);
            observer.step(data, &[i, min])?;
        }
    }

    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run;
    use super::super::Algorithm;

    #[test]
    fn test_selection_single_element() {
        let (sorted, tally) = run(Algorithm::Selection, &[1]);
        assert_eq!(sorted, vec![1]);
        assert_eq!(tally.steps, 0);
    }

    #[test]
    fn test_selection_comparisons_are_quadratic() {
        let (sorted, tally) = run(Algorithm::Selection, &[4, 3, 2, 1, 0]);
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
        // n(n-1)/2 regardless of order
        assert_eq!(tally.comparisons, 10);
        assert_eq!(tally.steps, 2);
    }

    #[test]
    fn test_selection_negative_values() {
        let (sorted, _) = run(Algorithm::Selection, &[0, -5, 12, -5, 3]);
        assert_eq!(sorted, vec![-5, -5, 0, 3, 12]);
    }
}
