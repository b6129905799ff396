// Property tests for the sorting algorithms

use proptest::prelude::*;
use sortty::runner::Runner;
use sortty::sorting::{sort, Algorithm, Observer, Tally};
use std::ops::ControlFlow;

fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

fn sorted_copy(values: &[i64]) -> Vec<i64> {
    let mut copy = values.to_vec();
    copy.sort();
    copy
}

/// Records every snapshot so intermediate states can be checked
#[derive(Default)]
struct Recorder {
    comparisons: u64,
    seen: Vec<u64>,
    snapshots: Vec<Vec<i64>>,
}

impl Observer for Recorder {
    fn compare(&mut self) {
        self.comparisons += 1;
    }

    fn step(&mut self, data: &[i64], highlights: &[usize]) -> ControlFlow<()> {
        assert!(!highlights.is_empty() && highlights.len() <= 4);
        assert!(highlights.iter().all(|&i| i < data.len()));
        self.seen.push(self.comparisons);
        self.snapshots.push(data.to_vec());
        ControlFlow::Continue(())
    }

    fn checkpoint(&mut self) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

proptest! {
    #[test]
    fn output_is_sorted_permutation(
        algorithm in algorithm(),
        input in prop::collection::vec(-50i64..50, 0..60),
    ) {
        let mut data = input.clone();
        let mut tally = Tally::new();
        prop_assert!(sort(algorithm, &mut data, &mut tally).is_continue());
        prop_assert_eq!(data, sorted_copy(&input));
    }

    #[test]
    fn sorting_sorted_input_is_idempotent(
        algorithm in algorithm(),
        input in prop::collection::vec(any::<i64>(), 0..60),
    ) {
        let sorted = sorted_copy(&input);
        let mut data = sorted.clone();
        let mut tally = Tally::new();
        let _ = sort(algorithm, &mut data, &mut tally);
        prop_assert_eq!(&data, &sorted);
        prop_assert_eq!(tally.steps, 0);
    }

    #[test]
    fn cancelled_run_keeps_every_element(
        algorithm in algorithm(),
        input in prop::collection::vec(0i64..20, 2..60),
        stop_after in 1u64..40,
    ) {
        let mut data = input.clone();
        let mut tally = Tally::stopping_after(stop_after);
        let flow = sort(algorithm, &mut data, &mut tally);

        prop_assert!(tally.steps <= stop_after);
        if flow.is_break() {
            prop_assert_eq!(tally.steps, stop_after);
        }
        prop_assert_eq!(sorted_copy(&data), sorted_copy(&input));
    }

    #[test]
    fn comparisons_never_decrease(
        algorithm in algorithm(),
        input in prop::collection::vec(-9i64..9, 0..40),
    ) {
        let mut data = input.clone();
        let mut recorder = Recorder::default();
        let _ = sort(algorithm, &mut data, &mut recorder);
        prop_assert!(recorder.seen.windows(2).all(|w| w[0] <= w[1]));
        if let Some(last) = recorder.snapshots.last() {
            prop_assert_eq!(last, &data);
        }
    }

    #[test]
    fn quick_and_selection_snapshots_are_permutations(
        input in prop::collection::vec(0i64..30, 0..40),
    ) {
        // Swap-based algorithms never expose a duplicated or missing value
        for algorithm in [Algorithm::Bubble, Algorithm::Selection, Algorithm::Quick] {
            let mut data = input.clone();
            let mut recorder = Recorder::default();
            let _ = sort(algorithm, &mut data, &mut recorder);
            for snapshot in &recorder.snapshots {
                prop_assert_eq!(sorted_copy(snapshot), sorted_copy(&input));
            }
        }
    }
}

#[test]
fn documented_examples() {
    let mut data = vec![5, 3, 4, 1, 2];
    let _ = sort(Algorithm::Bubble, &mut data, &mut Tally::new());
    assert_eq!(data, vec![1, 2, 3, 4, 5]);

    let mut data = vec![1];
    let mut tally = Tally::new();
    let _ = sort(Algorithm::Selection, &mut data, &mut tally);
    assert_eq!(data, vec![1]);
    assert_eq!(tally.steps, 0);

    let mut data = vec![2, 2, 1];
    let _ = sort(Algorithm::Merge, &mut data, &mut Tally::new());
    assert_eq!(data, vec![1, 2, 2]);
}

#[test]
fn runner_matches_direct_sort() {
    let input: Vec<i64> = vec![12, -3, 7, 7, 0, 45, -20, 9, 3, 3, 1];
    for algorithm in Algorithm::ALL {
        let mut expected = input.clone();
        let mut tally = Tally::new();
        let _ = sort(algorithm, &mut expected, &mut tally);

        let runner = Runner::spawn(algorithm, input.clone()).unwrap();
        let mut events = 0;
        while runner.recv().is_some() {
            events += 1;
        }
        let outcome = runner.finish().unwrap();

        assert!(outcome.completed);
        assert_eq!(outcome.values, expected);
        assert_eq!(outcome.steps, tally.steps);
        assert_eq!(outcome.comparisons, tally.comparisons);
        assert_eq!(events, tally.steps);
    }
}
