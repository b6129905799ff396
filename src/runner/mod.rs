//! Background sorting worker
//!
//! A [`Runner`] owns one worker thread executing one algorithm over its own
//! copy of the sequence. Every step is handed to the UI as a [`StepEvent`]
//! (an owned snapshot) through a bounded channel, so the worker only runs as
//! far ahead as the consumer lets it. The UI side decides the pacing by how
//! often it pulls.
//!
//! # Cancellation
//!
//! [`Runner::stop`] sets the shared [`CancelToken`] and drops the receiving
//! end. A worker blocked on the hand-off wakes up with a send error, a worker
//! in the middle of a step sees the flag right after it, and either way the
//! algorithm unwinds and the worker returns its partially sorted sequence
//! through the join handle.

use crate::error::{Error, Result};
use crate::sorting::{self, Algorithm, CancelToken, Observer};
use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Number of step events that may wait in the hand-off channel.
pub const STEP_BUFFER: usize = 1;

/// Worker stack size; degenerate quick sort recursion is as deep as the input.
const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

/// One visible mutation of the sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEvent {
    /// Copy of the whole sequence after the mutation.
    pub values: Vec<i64>,
    /// Indices touched by the mutation (at most four).
    pub highlights: Vec<usize>,
    /// Comparisons made by this run so far.
    pub comparisons: u64,
}

/// What the worker hands back when it exits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub values: Vec<i64>,
    /// `false` when the run was cancelled before the sequence was sorted.
    pub completed: bool,
    pub steps: u64,
    pub comparisons: u64,
}

/// Result of a non-blocking pull
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pull {
    Step(StepEvent),
    /// The worker has not produced the next step yet.
    Pending,
    /// The worker has exited; call [`Runner::finish`].
    Finished,
}

/// Handle to an active sorting worker
#[derive(Debug)]
pub struct Runner {
    algorithm: Algorithm,
    events: Receiver<StepEvent>,
    cancel: CancelToken,
    handle: JoinHandle<RunOutcome>,
}

impl Runner {
    /// Spawn a worker sorting `values` with `algorithm`.
    pub fn spawn(algorithm: Algorithm, values: Vec<i64>) -> Result<Self> {
        let (tx, events) = mpsc::sync_channel(STEP_BUFFER);
        let cancel = CancelToken::new();
        let worker_cancel = cancel.clone();
        let len = values.len();

        let handle = thread::Builder::new()
            .name("sort-worker".to_string())
            .stack_size(WORKER_STACK_SIZE)
            .spawn(move || work(algorithm, values, tx, worker_cancel))?;

        debug!(%algorithm, len, "spawned sorting worker");

        Ok(Runner {
            algorithm,
            events,
            cancel,
            handle,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Take the next step if the worker has produced one.
    pub fn pull(&self) -> Pull {
        match self.events.try_recv() {
            Ok(event) => Pull::Step(event),
            Err(TryRecvError::Empty) => Pull::Pending,
            Err(TryRecvError::Disconnected) => Pull::Finished,
        }
    }

    /// Block until the next step, or `None` once the worker has exited.
    pub fn recv(&self) -> Option<StepEvent> {
        self.events.recv().ok()
    }

    /// Cancel the run and wait for the worker to hand back its sequence.
    pub fn stop(self) -> Result<RunOutcome> {
        self.cancel.cancel();
        self.finish()
    }

    /// Wait for the worker to exit and return its outcome.
    ///
    /// Pending steps are discarded; a worker that is still sorting stops at its
    /// next hand-off.
    pub fn finish(self) -> Result<RunOutcome> {
        let Runner {
            algorithm,
            events,
            handle,
            ..
        } = self;
        drop(events);

        match handle.join() {
            Ok(outcome) => {
                debug!(
                    %algorithm,
                    completed = outcome.completed,
                    steps = outcome.steps,
                    comparisons = outcome.comparisons,
                    "sorting worker exited"
                );
                Ok(outcome)
            }
            Err(_) => {
                warn!(%algorithm, "sorting worker panicked");
                Err(Error::WorkerPanicked)
            }
        }
    }
}

fn work(
    algorithm: Algorithm,
    mut values: Vec<i64>,
    tx: SyncSender<StepEvent>,
    cancel: CancelToken,
) -> RunOutcome {
    let mut observer = ChannelObserver {
        tx,
        cancel,
        steps: 0,
        comparisons: 0,
    };
    let flow = sorting::sort(algorithm, &mut values, &mut observer);

    RunOutcome {
        values,
        completed: flow.is_continue(),
        steps: observer.steps,
        comparisons: observer.comparisons,
    }
}

/// Forwards steps to the UI, breaking on cancellation or a dropped receiver.
struct ChannelObserver {
    tx: SyncSender<StepEvent>,
    cancel: CancelToken,
    steps: u64,
    comparisons: u64,
}

impl ChannelObserver {
    fn flow(&self) -> ControlFlow<()> {
        if self.cancel.is_cancelled() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

impl Observer for ChannelObserver {
    fn compare(&mut self) {
        self.comparisons += 1;
    }

    fn step(&mut self, data: &[i64], highlights: &[usize]) -> ControlFlow<()> {
        self.flow()?;

        let event = StepEvent {
            values: data.to_vec(),
            highlights: highlights.to_vec(),
            comparisons: self.comparisons,
        };
        if self.tx.send(event).is_err() {
            return ControlFlow::Break(());
        }
        self.steps += 1;

        self.flow()
    }

    fn checkpoint(&mut self) -> ControlFlow<()> {
        self.flow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_permutation(a: &[i64], b: &[i64]) -> bool {
        let mut a = a.to_vec();
        let mut b = b.to_vec();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }

    #[test]
    fn test_runner_completes() {
        let runner = Runner::spawn(Algorithm::Bubble, vec![5, 3, 4, 1, 2]).unwrap();

        let mut last = None;
        let mut previous_comparisons = 0;
        while let Some(event) = runner.recv() {
            assert!(event.comparisons >= previous_comparisons);
            previous_comparisons = event.comparisons;
            last = Some(event);
        }

        let outcome = runner.finish().unwrap();
        assert!(outcome.completed);
        assert_eq!(outcome.values, vec![1, 2, 3, 4, 5]);
        assert_eq!(outcome.steps, 8);
        assert_eq!(last.unwrap().values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_runner_single_element_has_no_events() {
        let runner = Runner::spawn(Algorithm::Merge, vec![42]).unwrap();
        assert!(runner.recv().is_none());
        let outcome = runner.finish().unwrap();
        assert!(outcome.completed);
        assert_eq!(outcome.steps, 0);
        assert_eq!(outcome.values, vec![42]);
    }

    #[test]
    fn test_stop_is_prompt_and_lossless() {
        let input: Vec<i64> = (0..300).rev().collect();
        for algorithm in Algorithm::ALL {
            let runner = Runner::spawn(algorithm, input.clone()).unwrap();
            for _ in 0..5 {
                runner.recv().expect("run ended early");
            }

            let outcome = runner.stop().unwrap();
            assert!(!outcome.completed, "{algorithm}");
            // Five consumed and at most STEP_BUFFER queued; a send cut off by
            // the stop is not counted
            assert!(outcome.steps >= 5, "{algorithm}");
            assert!(outcome.steps <= 5 + STEP_BUFFER as u64, "{algorithm}");
            assert!(is_permutation(&outcome.values, &input), "{algorithm}");
        }
    }

    #[test]
    fn test_pull_reports_finished() {
        let runner = Runner::spawn(Algorithm::Selection, vec![2, 1]).unwrap();
        let mut steps = 0;
        loop {
            match runner.pull() {
                Pull::Step(_) => steps += 1,
                Pull::Pending => thread::yield_now(),
                Pull::Finished => break,
            }
        }
        assert_eq!(steps, 1);
        assert!(runner.finish().unwrap().completed);
    }
}
