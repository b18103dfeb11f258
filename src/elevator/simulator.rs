use crate::config::SimulatorConfig;
use crate::elevator::ElevatorController;
use crate::shared::RenderEvent;
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Inputs from the button layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SelectMode(String),
    RequestFloor(String),
    SetAutorun(bool),
    Snapshot,
}

enum Event {
    Command(Command),
    Tick,
    Terminate,
}

/**
 * Drives an `ElevatorController` against the wall clock.
 *
 * The simulator owns the controller outright; commands arrive over a
 * channel and are applied on this thread only. Between commands the loop
 * sleeps until the controller's next timer is due, capped at `tick`.
 *
 * # Fields
 * - `controller`:      The elevator core.
 * - `command_rx`:      Receives button commands.
 * - `terminate_rx`:    Receives the shutdown signal.
 * - `render_tx`:       Sends snapshot replies to the presentation layer.
 * - `tick`:            Upper bound on how long the loop sleeps.
 */
pub struct Simulator {
    controller: ElevatorController,
    command_rx: cbc::Receiver<Command>,
    terminate_rx: cbc::Receiver<()>,
    render_tx: cbc::Sender<RenderEvent>,
    tick: Duration,
}

impl Simulator {
    pub fn new(
        config: &SimulatorConfig,
        controller: ElevatorController,
        command_rx: cbc::Receiver<Command>,
        terminate_rx: cbc::Receiver<()>,
        render_tx: cbc::Sender<RenderEvent>,
    ) -> Simulator {
        Simulator {
            controller,
            command_rx,
            terminate_rx,
            render_tx,
            tick: Duration::from_millis(config.tick_ms.max(1)),
        }
    }

    pub fn run(mut self) {
        let started = Instant::now();
        info!("Simulator running");

        loop {
            self.controller.advance_to(started.elapsed());

            match self.wait_for_event(started) {
                Event::Command(command) => {
                    // Fire anything that fell due while waiting before acting
                    self.controller.advance_to(started.elapsed());
                    self.handle_command(command);
                    debug!(
                        "Floor {} in {} mode, {:?}, autorun {:?}",
                        self.controller.floor(),
                        self.controller.mode(),
                        self.controller.travel(),
                        self.controller.autorun()
                    );
                }
                Event::Tick => {}
                Event::Terminate => break,
            }
        }

        info!("Simulator stopped at floor {}", self.controller.floor());
    }

    fn wait_for_event(&self, started: Instant) -> Event {
        let timeout = match self.controller.next_deadline() {
            Some(deadline) => deadline.saturating_sub(started.elapsed()).min(self.tick),
            None => self.tick,
        };

        cbc::select! {
            recv(self.command_rx) -> command => {
                match command {
                    Ok(command) => Event::Command(command),
                    Err(_) => {
                        debug!("Command channel closed");
                        Event::Terminate
                    }
                }
            }
            recv(self.terminate_rx) -> _ => Event::Terminate,
            default(timeout) => Event::Tick,
        }
    }

    fn handle_command(&mut self, command: Command) {
        debug!("Handling {:?}", command);
        match command {
            Command::SelectMode(name) => self.controller.select_mode(&name),
            Command::RequestFloor(raw) => {
                self.controller.request_floor(&raw);
            }
            Command::SetAutorun(enabled) => self.controller.set_autorun(enabled),
            Command::Snapshot => {
                let snapshot = self.controller.snapshot();
                if self.render_tx.send(RenderEvent::Snapshot(snapshot)).is_err() {
                    warn!("Render layer gone, snapshot dropped");
                }
            }
        }
    }
}
