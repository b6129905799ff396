// sortty: terminal sorting-algorithm visualizer

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, Level};

use sortty::config::Config;
use sortty::control::{Controller, Setup};
use sortty::sorting::Algorithm;
use sortty::tone::{self, ToneMap};
use sortty::ui::App;
use sortty::view::ChartStyle;

#[derive(Parser)]
#[command(name = "sortty")]
#[command(about = "Animate classic sorting algorithms in the terminal", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial size slider value
    #[arg(long)]
    size: Option<usize>,

    /// Animation speed 1-100 (step delay is 101 - speed ms)
    #[arg(long)]
    speed: Option<u8>,

    /// Preselected algorithm
    #[arg(short, long, value_enum)]
    algorithm: Option<Algorithm>,

    /// Chart style
    #[arg(long, value_enum)]
    chart: Option<ChartStyle>,

    /// Literal comma-separated array, e.g. "5,3,4,1,2"
    #[arg(long)]
    array: Option<String>,

    /// Sound one MIDI note per highlighted element
    #[arg(long)]
    tones: bool,

    /// MIDI output port (substring match)
    #[arg(long)]
    midi_port: Option<String>,

    /// List MIDI output ports and exit
    #[arg(long)]
    list_midi_ports: bool,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log verbosity: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Layer command-line overrides on top of the file configuration
    fn apply(&self, config: &mut Config) {
        if let Some(size) = self.size {
            config.defaults.size = size;
        }
        if let Some(speed) = self.speed {
            config.defaults.speed = speed;
        }
        if let Some(algorithm) = self.algorithm {
            config.defaults.algorithm = Some(algorithm);
        }
        if let Some(chart) = self.chart {
            config.defaults.chart = chart;
        }
        if let Some(array) = &self.array {
            config.defaults.array = array.clone();
        }
        if self.tones {
            config.tone.enabled = true;
        }
        if let Some(port) = &self.midi_port {
            config.tone.port = port.clone();
        }
    }
}

fn init_logging(cli: &Cli) -> io::Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    if cli.list_midi_ports {
        let ports = tone::list_ports()?;
        if ports.is_empty() {
            println!("No MIDI output ports found");
        }
        for (i, name) in ports.iter().enumerate() {
            println!("{}: {}", i, name);
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    cli.apply(&mut config);
    config.validate()?;
    info!(?config, "configuration loaded");

    let tones = tone::open(&config.tone);
    let controller = Controller::new(
        config.defaults.chart,
        tones,
        ToneMap::from_config(&config.tone),
    );
    let setup = Setup::from_config(&config);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(controller, setup, config.limits, config.ui.tick());
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
