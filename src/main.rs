/* 3rd party libraries */
use clap::Parser;
use crossbeam_channel as cbc;
use log::{debug, error, info, warn};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::thread::Builder;

/* Custom libraries */
use elevator::{Command, ElevatorController, Simulator};
use input::Input;
use render::{ConsoleRenderer, OutputFormat};
use shared::RenderEvent;

/* Modules */
mod config;
mod elevator;
mod input;
mod render;
mod shared;

/// Terminal simulator of a five-floor passenger elevator.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[clap(long, default_value = "config.toml")]
    config: PathBuf,

    /// Mode to switch to at startup (components, run, maintenance, rescue)
    #[clap(long)]
    mode: Option<String>,

    /// Start with the autorun patrol switched on
    #[clap(long)]
    autorun: bool,

    /// Print render events as JSON lines instead of drawing the shaft
    #[clap(long)]
    json: bool,
}

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Load the configuration
    let config = unwrap_or_exit!(config::load_config(&args.config), "configuration");

    // Initialize channels
    let (render_tx, render_rx) = cbc::unbounded::<RenderEvent>();
    let (command_tx, command_rx) = cbc::unbounded::<Command>();
    let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();

    // Start the render module
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let renderer = ConsoleRenderer::stdout(render_rx, format);
    let renderer_thread = unwrap_or_exit!(
        Builder::new().name("renderer".into()).spawn(move || {
            renderer.run();
        }),
        "spawning renderer"
    );

    // Start the simulator module
    let controller = ElevatorController::new(&config, render_tx.clone());
    let simulator = Simulator::new(
        &config.simulator,
        controller,
        command_rx,
        terminate_rx,
        render_tx,
    );
    let simulator_thread = unwrap_or_exit!(
        Builder::new()
            .name("simulator".into())
            .spawn(move || simulator.run()),
        "spawning simulator"
    );

    // Startup flags behave like pressing the buttons
    let mut startup = Vec::new();
    if let Some(mode) = args.mode {
        startup.push(Command::SelectMode(mode));
    }
    if args.autorun {
        startup.push(Command::SetAutorun(true));
    }
    for command in startup {
        if command_tx.send(command).is_err() {
            warn!("Simulator not accepting startup commands");
        }
    }

    info!("Type 'help' for commands");
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        match input::parse_line(&line) {
            Input::Command(command) => {
                if command_tx.send(command).is_err() {
                    error!("Simulator has stopped");
                    break;
                }
            }
            Input::Help => println!("{}", input::HELP),
            Input::Quit => break,
            Input::Empty => {}
            Input::Unrecognized(text) => warn!("Unrecognized command '{}', try 'help'", text),
        }
    }

    // Shut down: the renderer drains once the simulator drops its senders
    if terminate_tx.send(()).is_err() {
        debug!("Simulator already stopped");
    }
    if simulator_thread.join().is_err() {
        error!("Simulator thread panicked");
    }
    if renderer_thread.join().is_err() {
        error!("Renderer thread panicked");
    }
}
