//! Run lifecycle state machine
//!
//! The [`Controller`] owns everything a session needs: the initial and current
//! sequence, the [`ViewState`] the chart draws from, the active [`Runner`] and
//! the tone output. The UI calls [`Controller::create`], [`Controller::start`],
//! [`Controller::stop`] and [`Controller::reset`] in response to keys, and
//! [`Controller::tick`] from its event loop to pace the animation.
//!
//! # States
//!
//! ```text
//!          create            start             (sorted)
//! Idle ───────────▶ Configured ──────▶ Running ─────────▶ Completed
//!  ▲                    │  ▲             │  ▲                 │
//!  │        reset       │  │      stop   ▼  │ start           │ create
//!  └────────────────────┘  └─────────  Stopped ───────────────┘
//! ```
//!
//! Reset from Configured, Stopped or Completed restores the initial sequence
//! and returns to Idle, where the form is editable again and Start reruns that
//! same sequence with whatever algorithm and speed the form now holds.

mod setup;

pub use setup::{
    parse_array, parse_size, random_values, speed_to_delay, RunSettings, Setup, MAX_SIZE,
};

use crate::error::{Error, Result};
use crate::runner::{Pull, Runner};
use crate::tone::{Silent, ToneMap, ToneSink};
use crate::view::{ChartStyle, ViewState};
use rand::Rng;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Upper bound on steps applied by a single [`Controller::tick`].
pub const MAX_STEPS_PER_TICK: usize = 256;

/// Lifecycle stage of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Configured,
    Running,
    Stopped,
    Completed,
}

impl RunState {
    /// Whether the controls pane may be edited.
    pub fn config_editable(self) -> bool {
        matches!(self, RunState::Idle | RunState::Completed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::Configured => "configured",
            RunState::Running => "running",
            RunState::Stopped => "stopped",
            RunState::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// User actions on the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Start,
    Stop,
    Reset,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Create, Action::Start, Action::Stop, Action::Reset];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Create => "create",
            Action::Start => "start",
            Action::Stop => "stop",
            Action::Reset => "reset",
        };
        f.write_str(name)
    }
}

/// What a [`Controller::tick`] changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// One or more steps were applied to the view.
    Stepped(usize),
    /// The run finished and the sequence is sorted.
    Completed,
}

/// Owns the session and enforces the run lifecycle
pub struct Controller {
    state: RunState,
    initial: Vec<i64>,
    /// Sequence at rest; while running the worker holds its own copy.
    values: Vec<i64>,
    view: ViewState,
    settings: Option<RunSettings>,
    runner: Option<Runner>,
    /// Comparisons of finished or stopped runs since the last create/reset.
    comparisons: u64,
    /// Comparisons reported by the active run so far.
    run_comparisons: u64,
    steps: u64,
    next_due: Instant,
    tones: Box<dyn ToneSink>,
    tone_map: ToneMap,
}

impl Controller {
    pub fn new(chart: ChartStyle, tones: Box<dyn ToneSink>, tone_map: ToneMap) -> Self {
        Controller {
            state: RunState::Idle,
            initial: Vec::new(),
            values: Vec::new(),
            view: ViewState::new(chart),
            settings: None,
            runner: None,
            comparisons: 0,
            run_comparisons: 0,
            steps: 0,
            next_due: Instant::now(),
            tones,
            tone_map,
        }
    }

    /// Controller without tone output.
    pub fn silent(chart: ChartStyle) -> Self {
        Self::new(chart, Box::new(Silent), ToneMap::default())
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn settings(&self) -> Option<&RunSettings> {
        self.settings.as_ref()
    }

    /// Sequence as of the last create, reset, stop or completion.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn initial(&self) -> &[i64] {
        &self.initial
    }

    /// Total comparisons since the last create or reset, including the active run.
    pub fn comparisons(&self) -> u64 {
        self.comparisons + self.run_comparisons
    }

    /// Steps shown since the last create or reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_running(&self) -> bool {
        self.runner.is_some()
    }

    /// Whether `action` is enabled in the current state.
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Create => matches!(self.state, RunState::Idle | RunState::Completed),
            Action::Start => match self.state {
                RunState::Configured | RunState::Stopped => true,
                RunState::Idle => !self.values.is_empty(),
                RunState::Running | RunState::Completed => false,
            },
            Action::Stop => self.state == RunState::Running,
            Action::Reset => matches!(
                self.state,
                RunState::Configured | RunState::Stopped | RunState::Completed
            ),
        }
    }

    fn check(&self, action: Action) -> Result<()> {
        if self.allows(action) {
            Ok(())
        } else {
            Err(Error::ActionUnavailable {
                action,
                state: self.state,
            })
        }
    }

    /// Change the chart style while the form is editable.
    pub fn set_chart(&mut self, chart: ChartStyle) {
        if self.state.config_editable() {
            self.view.set_chart(chart);
        }
    }

    /// Build a new sequence from `setup` and arm it.
    ///
    /// Nothing changes when validation fails.
    pub fn create<R: Rng + ?Sized>(&mut self, setup: &Setup, rng: &mut R) -> Result<()> {
        self.check(Action::Create)?;
        let (values, settings) = setup.arm(rng)?;

        info!(
            algorithm = %settings.algorithm,
            len = values.len(),
            delay_ms = settings.delay.as_millis() as u64,
            "created sequence"
        );

        self.initial = values.clone();
        self.view.show(values.clone());
        self.view.set_chart(settings.chart);
        self.values = values;
        self.settings = Some(settings);
        self.comparisons = 0;
        self.run_comparisons = 0;
        self.steps = 0;
        self.state = RunState::Configured;
        Ok(())
    }

    /// Launch a run over the current sequence.
    ///
    /// A no-op while a run is active. From Idle (after a reset) the algorithm,
    /// speed and chart are re-read from `setup`.
    pub fn start(&mut self, setup: &Setup) -> Result<()> {
        if self.runner.is_some() {
            debug!("start ignored: run already active");
            return Ok(());
        }
        self.check(Action::Start)?;

        let settings = match (self.state, self.settings) {
            (RunState::Idle, _) | (_, None) => {
                let settings = setup.settings()?;
                self.view.set_chart(settings.chart);
                self.settings = Some(settings);
                settings
            }
            (_, Some(settings)) => settings,
        };

        let resumed = self.state == RunState::Stopped;
        let runner = Runner::spawn(settings.algorithm, self.values.clone())?;
        info!(algorithm = %settings.algorithm, resumed, "run started");

        self.runner = Some(runner);
        self.run_comparisons = 0;
        self.next_due = Instant::now();
        self.state = RunState::Running;
        Ok(())
    }

    /// Cancel the active run, keeping its partially sorted sequence.
    pub fn stop(&mut self) -> Result<()> {
        self.check(Action::Stop)?;
        let Some(runner) = self.runner.take() else {
            self.state = RunState::Stopped;
            return Ok(());
        };

        let result = runner.stop();
        self.run_comparisons = 0;
        self.silence();

        match result {
            Ok(outcome) => {
                info!(
                    completed = outcome.completed,
                    steps = outcome.steps,
                    "run stopped"
                );
                self.comparisons += outcome.comparisons;
                self.values = outcome.values;
                self.view.show(self.values.clone());
                self.state = if outcome.completed {
                    RunState::Completed
                } else {
                    RunState::Stopped
                };
                Ok(())
            }
            Err(e) => {
                self.view.show(self.values.clone());
                self.state = RunState::Stopped;
                Err(e)
            }
        }
    }

    /// Restore the initial sequence and unlock the form.
    pub fn reset(&mut self) -> Result<()> {
        self.check(Action::Reset)?;
        info!(len = self.initial.len(), "reset to initial sequence");

        self.values = self.initial.clone();
        self.view.show(self.values.clone());
        self.comparisons = 0;
        self.run_comparisons = 0;
        self.steps = 0;
        self.silence();
        self.state = RunState::Idle;
        Ok(())
    }

    /// Apply every step that is due at `now`.
    ///
    /// Steps are spaced by the run's delay; at most [`MAX_STEPS_PER_TICK`] are
    /// applied per call and a backlog older than one delay is dropped from the
    /// schedule rather than replayed in a burst.
    pub fn tick(&mut self, now: Instant) -> Result<Option<Progress>> {
        let delay = match (&self.runner, &self.settings) {
            (Some(_), Some(settings)) => settings.delay,
            (Some(_), None) => Duration::ZERO,
            (None, _) => return Ok(None),
        };

        let mut applied = 0;
        let mut last_highlights = None;

        while applied < MAX_STEPS_PER_TICK && self.next_due <= now {
            let pull = match &self.runner {
                Some(runner) => runner.pull(),
                None => break,
            };

            match pull {
                Pull::Step(event) => {
                    self.steps += 1;
                    self.run_comparisons = event.comparisons;
                    last_highlights = Some(event.highlights.clone());
                    self.view.apply(event);
                    self.next_due += delay;
                    applied += 1;
                }
                Pull::Pending => break,
                Pull::Finished => {
                    self.finish()?;
                    return Ok(Some(Progress::Completed));
                }
            }
        }

        if now.saturating_duration_since(self.next_due) > delay {
            self.next_due = now;
        }

        if let Some(highlights) = last_highlights {
            self.sound(&highlights);
        }

        Ok((applied > 0).then_some(Progress::Stepped(applied)))
    }

    /// Collect the outcome of a worker that has exited by itself.
    fn finish(&mut self) -> Result<()> {
        let Some(runner) = self.runner.take() else {
            return Ok(());
        };
        let result = runner.finish();
        self.run_comparisons = 0;
        self.silence();

        match result {
            Ok(outcome) => {
                info!(
                    steps = self.steps,
                    comparisons = self.comparisons + outcome.comparisons,
                    "run completed"
                );
                self.comparisons += outcome.comparisons;
                self.values = outcome.values;
                self.view.show(self.values.clone());
                self.state = if outcome.completed {
                    RunState::Completed
                } else {
                    RunState::Stopped
                };
                Ok(())
            }
            Err(e) => {
                self.view.show(self.values.clone());
                self.state = RunState::Stopped;
                Err(e)
            }
        }
    }

    /// Stop any active run; used on quit.
    pub fn shutdown(&mut self) {
        if let Some(runner) = self.runner.take() {
            if let Err(e) = runner.stop() {
                warn!("worker failed during shutdown: {}", e);
            }
        }
        self.silence();
    }

    fn sound(&mut self, highlights: &[usize]) {
        let Some(bounds) = self.view.bounds() else {
            return;
        };
        let notes = self.tone_map.notes(self.view.values(), highlights, bounds);
        if let Err(e) = self.tones.play(&notes) {
            self.disable_tones(e);
        }
    }

    fn silence(&mut self) {
        if let Err(e) = self.tones.silence() {
            self.disable_tones(e);
        }
    }

    fn disable_tones(&mut self, error: Error) {
        warn!("tones disabled: {}", error);
        self.tones = Box::new(Silent);
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::Algorithm;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup(array: &str, algorithm: Algorithm) -> Setup {
        Setup {
            array_text: array.to_string(),
            speed: 100,
            algorithm: Some(algorithm),
            ..Setup::default()
        }
    }

    #[test]
    fn test_initial_gating() {
        let controller = Controller::silent(ChartStyle::Bars);
        assert_eq!(controller.state(), RunState::Idle);
        assert!(controller.allows(Action::Create));
        assert!(!controller.allows(Action::Start));
        assert!(!controller.allows(Action::Stop));
        assert!(!controller.allows(Action::Reset));
    }

    #[test]
    fn test_invalid_create_changes_nothing() {
        let mut controller = Controller::silent(ChartStyle::Bars);
        let mut rng = StdRng::seed_from_u64(1);
        let bad = Setup {
            size_text: "-4".to_string(),
            algorithm: Some(Algorithm::Bubble),
            ..Setup::default()
        };
        assert!(controller.create(&bad, &mut rng).is_err());
        assert_eq!(controller.state(), RunState::Idle);
        assert!(controller.view().values().is_empty());
    }

    #[test]
    fn test_create_arms_and_locks() {
        let mut controller = Controller::silent(ChartStyle::Bars);
        let mut rng = StdRng::seed_from_u64(1);
        let mut form = setup("3,1,2", Algorithm::Merge);
        form.chart = ChartStyle::Stems;
        controller.create(&form, &mut rng).unwrap();

        assert_eq!(controller.state(), RunState::Configured);
        assert!(!controller.state().config_editable());
        assert_eq!(controller.view().values(), &[3, 1, 2]);
        assert_eq!(controller.view().chart(), ChartStyle::Stems);
        assert!(controller.allows(Action::Start));
        assert!(controller.allows(Action::Reset));
        assert!(!controller.allows(Action::Create));
    }

    #[test]
    fn test_stop_requires_running() {
        let mut controller = Controller::silent(ChartStyle::Bars);
        match controller.stop() {
            Err(Error::ActionUnavailable { action, state }) => {
                assert_eq!(action, Action::Stop);
                assert_eq!(state, RunState::Idle);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
