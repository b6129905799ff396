//! Insertion sort with element shifting

use super::Observer;
use std::ops::ControlFlow;

/// Insert each value into the sorted prefix by shifting larger values right.
///
/// Each shift is a step highlighting `[j, j + 1]`; placing the held value is a
/// step highlighting its final slot. When a shift step breaks, the held value is
/// written back into the open slot before returning, so the slice never loses it.
pub fn insertion_sort<O: Observer + ?Sized>(
    data: &mut [i64],
    observer: &mut O,
) -> ControlFlow<()> {
    for i in 1..data.len() {
        observer.checkpoint()?;

        let key = data[i];
        let mut j = i;
        let mut flow = ControlFlow::Continue(());

        while j > 0 {
            observer.compare();
            if data[j - 1] <= key {
                break;
            }
            data[j] = data[j - 1];
            j -= 1;
            flow = observer.step(data, &[j, j + 1]);
            if flow.is_break() {
                break;
            }
        }

        if j != i {
            data[j] = key;
            if flow.is_continue() {
                flow = observer.step(data, &[j]);
            }
        }

        flow?;
    }

    ControlFlow::Continue(())
}
