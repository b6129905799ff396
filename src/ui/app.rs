//! Main TUI application state and logic

use crate::config::Limits;
use crate::control::{Action, Controller, Progress, RunState, Setup};
use crate::sorting::Algorithm;
use crate::ui::panes::{
    render_chart_pane, render_controls_pane, render_stats_pane, render_status_bar,
    ControlsRenderData, StatsRenderData,
};
use crate::view::ChartStyle;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Speed slider increment per arrow key
const SPEED_STEP: u8 = 5;

/// Which control is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedField {
    SizeText,
    SizeSlider,
    Speed,
    Algorithm,
    Chart,
    ArrayText,
}

impl FocusedField {
    /// Move focus down the controls pane, wrapping at the bottom
    pub fn next(self) -> Self {
        match self {
            FocusedField::SizeText => FocusedField::SizeSlider,
            FocusedField::SizeSlider => FocusedField::Speed,
            FocusedField::Speed => FocusedField::Algorithm,
            FocusedField::Algorithm => FocusedField::Chart,
            FocusedField::Chart => FocusedField::ArrayText,
            FocusedField::ArrayText => FocusedField::SizeText,
        }
    }

    /// Move focus up the controls pane
    pub fn prev(self) -> Self {
        match self {
            FocusedField::SizeText => FocusedField::ArrayText,
            FocusedField::SizeSlider => FocusedField::SizeText,
            FocusedField::Speed => FocusedField::SizeSlider,
            FocusedField::Algorithm => FocusedField::Speed,
            FocusedField::Chart => FocusedField::Algorithm,
            FocusedField::ArrayText => FocusedField::Chart,
        }
    }

    /// Text fields swallow printable keys
    pub fn is_text(self) -> bool {
        matches!(self, FocusedField::SizeText | FocusedField::ArrayText)
    }
}

/// The main application state
pub struct App {
    /// Run lifecycle and view state
    pub controller: Controller,

    /// Contents of the controls pane
    pub setup: Setup,

    /// Size slider range
    pub limits: Limits,

    /// Currently focused control
    pub focused: FocusedField,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether the status message reports a rejected action
    pub status_is_error: bool,

    /// Event poll timeout
    tick: Duration,

    rng: StdRng,
}

impl App {
    /// Create a new app around a controller and the initial form values
    pub fn new(controller: Controller, setup: Setup, limits: Limits, tick: Duration) -> Self {
        App {
            controller,
            setup,
            limits,
            focused: FocusedField::SizeText,
            should_quit: false,
            status_message: String::from("Ready! Choose an algorithm and press c to create."),
            status_is_error: false,
            tick,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the random source used for generated arrays
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.advance(Instant::now());

            // Poll with a timeout so the animation keeps moving without input
            if event::poll(self.tick)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        self.controller.shutdown();
        Ok(())
    }

    /// Apply the animation steps due at `now`
    pub fn advance(&mut self, now: Instant) {
        match self.controller.tick(now) {
            Ok(Some(Progress::Completed)) => {
                let n = self.controller.values().len();
                self.set_status(format!(
                    "Sorted {} values in {} steps with {} comparisons",
                    n,
                    self.controller.steps(),
                    self.controller.comparisons()
                ));
            }
            Ok(Some(Progress::Stepped(_))) | Ok(None) => {}
            Err(e) => self.set_error(format!("Run aborted: {}", e)),
        }
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Controls on the left, chart and stats on the right
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(38), Constraint::Min(0)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(9)])
            .split(columns[1]);

        let state = self.controller.state();
        let actions = Action::ALL.map(|action| (action, self.controller.allows(action)));

        render_controls_pane(
            frame,
            columns[0],
            &ControlsRenderData {
                setup: &self.setup,
                limits: &self.limits,
                focused: self.focused,
                editable: state.config_editable(),
                actions,
            },
        );

        let algorithm = self
            .controller
            .settings()
            .map(|settings| settings.algorithm)
            .or(self.setup.algorithm);

        render_chart_pane(frame, right_rows[0], self.controller.view(), algorithm);

        render_stats_pane(
            frame,
            right_rows[1],
            &StatsRenderData {
                algorithm,
                len: self.controller.view().values().len(),
                comparisons: self.controller.comparisons(),
                steps: self.controller.steps(),
                state,
            },
        );

        render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.status_is_error,
            state,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::F(2) => return self.perform(Action::Create),
            KeyCode::F(5) => return self.perform(Action::Start),
            KeyCode::F(6) => return self.perform(Action::Stop),
            KeyCode::F(8) => return self.perform(Action::Reset),
            KeyCode::Tab => {
                self.focused = self.focused.next();
                return;
            }
            KeyCode::BackTab => {
                self.focused = self.focused.prev();
                return;
            }
            _ => {}
        }

        if self.focused.is_text() {
            self.handle_text_key(key);
        } else {
            self.handle_control_key(key);
        }
    }

    fn handle_text_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.perform(Action::Create),
            KeyCode::Esc | KeyCode::Down => self.focused = self.focused.next(),
            KeyCode::Up => self.focused = self.focused.prev(),
            KeyCode::Backspace => {
                if self.ensure_editable() {
                    self.focused_text().pop();
                }
            }
            KeyCode::Char(c) if !c.is_control() => {
                if self.ensure_editable() {
                    self.focused_text().push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_control_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('c') => self.perform(Action::Create),
            KeyCode::Char('s') | KeyCode::Char(' ') => self.perform(Action::Start),
            KeyCode::Char('x') => self.perform(Action::Stop),
            KeyCode::Char('r') => self.perform(Action::Reset),
            KeyCode::Enter => {
                if self.controller.allows(Action::Create) && self.controller.values().is_empty() {
                    self.perform(Action::Create);
                } else {
                    self.perform(Action::Start);
                }
            }
            KeyCode::Up => self.focused = self.focused.prev(),
            KeyCode::Down => self.focused = self.focused.next(),
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            _ => {}
        }
    }

    /// Run one control-surface action and report the result
    pub fn perform(&mut self, action: Action) {
        let result = match action {
            Action::Create => self.controller.create(&self.setup, &mut self.rng),
            Action::Start => self.controller.start(&self.setup),
            Action::Stop => self.controller.stop(),
            Action::Reset => self.controller.reset(),
        };

        if let Err(e) = result {
            self.set_error(capitalize(&e.to_string()));
            return;
        }

        let message = match action {
            Action::Create => format!(
                "Created {} values. Press s to start.",
                self.controller.values().len()
            ),
            Action::Start => match self.controller.settings() {
                Some(settings) => format!("Sorting with {}...", settings.algorithm),
                None => "Sorting...".to_string(),
            },
            Action::Stop if self.controller.state() == RunState::Completed => {
                "Run finished before it could be stopped".to_string()
            }
            Action::Stop => format!(
                "Stopped after {} steps. Press s to resume or r to reset.",
                self.controller.steps()
            ),
            Action::Reset => "Reset to the initial array".to_string(),
        };
        self.set_status(message);
    }

    /// Move the focused slider or radio group by `delta` notches
    fn adjust(&mut self, delta: i32) {
        if !self.ensure_editable() {
            return;
        }

        match self.focused {
            FocusedField::SizeSlider => {
                let step = self.limits.size_step as i64 * i64::from(delta);
                let size = (self.setup.size_slider as i64 + step).clamp(
                    self.limits.size_min as i64,
                    self.limits.size_max as i64,
                );
                self.setup.size_slider = size as usize;
            }
            FocusedField::Speed => {
                let speed = i32::from(self.setup.speed) + i32::from(SPEED_STEP) * delta;
                self.setup.speed = speed.clamp(1, 100) as u8;
            }
            FocusedField::Algorithm => {
                self.setup.algorithm = Some(cycle(&Algorithm::ALL, self.setup.algorithm, delta));
            }
            FocusedField::Chart => {
                self.setup.chart = cycle(&ChartStyle::ALL, Some(self.setup.chart), delta);
                self.controller.set_chart(self.setup.chart);
            }
            FocusedField::SizeText | FocusedField::ArrayText => {}
        }
    }

    fn ensure_editable(&mut self) -> bool {
        let state = self.controller.state();
        if state.config_editable() {
            return true;
        }
        let hint = if state == RunState::Running {
            "stop first"
        } else {
            "press r to reset"
        };
        self.set_error(format!("Controls are locked while {} ({})", state, hint));
        false
    }

    fn focused_text(&mut self) -> &mut String {
        match self.focused {
            FocusedField::ArrayText => &mut self.setup.array_text,
            _ => &mut self.setup.size_text,
        }
    }

    fn set_status(&mut self, message: String) {
        self.status_message = message;
        self.status_is_error = false;
    }

    fn set_error(&mut self, message: String) {
        self.status_message = message;
        self.status_is_error = true;
    }
}

/// Step through `options` from `current`, wrapping at both ends.
fn cycle<T: Copy + PartialEq>(options: &[T], current: Option<T>, delta: i32) -> T {
    let len = options.len() as i32;
    let index = match current.and_then(|c| options.iter().position(|&o| o == c)) {
        Some(position) => (position as i32 + delta).rem_euclid(len),
        None if delta < 0 => len - 1,
        None => 0,
    };
    options[index as usize]
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
