use crate::config::Config;
use crate::config::TimingConfig;
use crate::elevator::shaft::Shaft;
use crate::shared::texts;
use crate::shared::{
    AutorunState, ControllerSnapshot, Direction, Floor, Mode, MoveReason, RenderEvent,
    TravelState,
};
use crossbeam_channel as cbc;
use log::{debug, info, trace};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SettleTimer {
    due: Duration,
    floor: Floor,
}

enum Timer {
    Settle(Floor),
    AutorunStep,
}

/**
 * Owns the single elevator's state and every rule about how it changes.
 *
 * The controller has no clock of its own. Callers move time forward with
 * `advance_to`, which fires the pending settle and autorun timers in
 * deadline order. Everything the presentation layer needs is pushed out as
 * `RenderEvent`s on `render_tx`.
 *
 * # Fields
 * - `timing`:              Travel and autorun pacing.
 * - `shaft`:               Car and counterweight geometry.
 * - `render_tx`:           Sends render events to the presentation layer.
 * - `now`:                 Logical time of the last `advance_to`.
 * - `floor`:               Logical car position. Updated at departure, not arrival.
 * - `mode`:                The active explanatory mode.
 * - `travel`:              The travel-lock.
 * - `indicator`:           Direction arrow shown while moving. Cleared on leaving run mode.
 * - `autorun`:             Patrol state and its current direction.
 * - `autorun_requested`:   The external autorun switch.
 * - `settle_timer`:        Pending arrival of the move in flight.
 * - `autorun_timer`:       Deadline of the next patrol step.
 */
pub struct ElevatorController {
    timing: TimingConfig,
    shaft: Shaft,
    render_tx: cbc::Sender<RenderEvent>,

    now: Duration,
    floor: Floor,
    mode: Mode,
    travel: TravelState,
    indicator: Option<Direction>,
    autorun: AutorunState,
    autorun_requested: bool,

    settle_timer: Option<SettleTimer>,
    autorun_timer: Option<Duration>,
}

impl ElevatorController {
    pub fn new(config: &Config, render_tx: cbc::Sender<RenderEvent>) -> ElevatorController {
        let mut controller = ElevatorController {
            timing: config.timing.clone(),
            shaft: Shaft::new(&config.shaft),
            render_tx,
            now: Duration::ZERO,
            floor: Floor::LOWEST,
            mode: Mode::Components,
            travel: TravelState::Idle,
            indicator: None,
            autorun: AutorunState::Stopped,
            autorun_requested: false,
            settle_timer: None,
            autorun_timer: None,
        };

        // Park the car and counterweight before the first mode is shown
        controller.emit_car(Duration::ZERO);
        controller.set_mode(Mode::Components);
        controller
    }

    /***************************************/
    /*             Accessors               */
    /***************************************/
    pub fn floor(&self) -> Floor {
        self.floor
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn travel(&self) -> TravelState {
        self.travel
    }

    pub fn autorun(&self) -> AutorunState {
        self.autorun
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            floor: self.floor,
            mode: self.mode,
            travel: self.travel,
            autorun: self.autorun,
            autorun_requested: self.autorun_requested,
            indicator: self.indicator,
            car_offset: self.shaft.car_offset(self.floor),
            counterweight_offset: self.shaft.counterweight_offset(self.floor),
        }
    }

    /// Earliest pending timer, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        let settle = self.settle_timer.map(|timer| timer.due);
        match (settle, self.autorun_timer) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /***************************************/
    /*             Operations              */
    /***************************************/

    /// Starts a move to `target` (clamped into the served floors).
    ///
    /// Returns the travel time, or `None` when the request was rejected
    /// because a move is already in flight or the car is already there.
    pub fn move_to(&mut self, target: i64, reason: MoveReason) -> Option<Duration> {
        if self.travel == TravelState::Moving {
            debug!("Move to {} rejected, travel-lock held", target);
            return None;
        }

        let target = Floor::clamped(target);
        if target == self.floor {
            if self.mode == Mode::Run && reason == MoveReason::Manual {
                self.emit(RenderEvent::run_status(texts::holding_status(target)));
                self.emit(RenderEvent::panel_message(texts::holding_panel(target)));
            }
            return None;
        }

        let previous = self.floor;
        let travel_time = self.timing.travel_time(previous.distance(target));
        let direction = Direction::between(previous, target);

        self.travel = TravelState::Moving;
        self.floor = target;
        self.indicator = Some(direction);

        self.emit_car(travel_time);
        self.emit(RenderEvent::indicators(self.indicator));

        if self.mode == Mode::Run {
            match reason {
                MoveReason::Auto => {
                    self.emit(RenderEvent::panel_message(texts::auto_departure_panel(previous, target)));
                    self.emit(RenderEvent::run_status(texts::auto_departure_status(target)));
                }
                MoveReason::Manual => {
                    self.emit(RenderEvent::panel_message(texts::manual_departure_panel(previous, target)));
                    self.emit(RenderEvent::run_status(texts::manual_departure_status(target)));
                }
            }
        }

        self.settle_timer = Some(SettleTimer {
            due: self.now + self.timing.settle_delay(travel_time),
            floor: target,
        });

        info!(
            "Car departing floor {} for floor {} ({:?}, {} ms)",
            previous,
            target,
            reason,
            travel_time.as_millis()
        );
        Some(travel_time)
    }

    /// Floor button handler. `raw` is whatever the button carried; anything
    /// that is not an integer is ignored without touching state. Integers too
    /// large for `i64` still clamp to the nearest end of the shaft.
    pub fn request_floor(&mut self, raw: &str) -> Option<Duration> {
        let Some(target) = parse_floor_number(raw) else {
            debug!("Ignoring non-numeric floor request '{}'", raw);
            return None;
        };

        if self.travel == TravelState::Moving {
            self.emit(RenderEvent::run_status(texts::PLEASE_WAIT));
            return None;
        }

        if self.mode != Mode::Run {
            self.autorun_requested = false;
            self.set_mode(Mode::Run);
        }

        self.autorun_requested = false;
        self.stop_autorun();
        self.move_to(target, MoveReason::Manual)
    }

    /// Mode button handler. Unknown names are ignored.
    pub fn select_mode(&mut self, name: &str) {
        match name.trim().parse::<Mode>() {
            Ok(mode) => self.set_mode(mode),
            Err(e) => debug!("Ignoring mode selection: {}", e),
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        info!("Mode set to {}", mode);

        self.emit(RenderEvent::ModeChanged {
            mode,
            scene_class: mode.scene_class(),
            description: texts::mode_description(mode).to_string(),
            run_controls_visible: mode == Mode::Run,
        });
        self.emit(RenderEvent::panel_message(texts::mode_panel_message(mode)));

        if mode == Mode::Run {
            self.emit(RenderEvent::run_status(texts::run_ready(self.floor)));
            if self.autorun_requested {
                self.start_autorun();
            }
        } else {
            self.stop_autorun();
            // The move in flight still settles; only its decoration goes
            self.indicator = None;
            self.emit(RenderEvent::indicators(None));
        }
    }

    /// Autorun switch handler.
    pub fn set_autorun(&mut self, enabled: bool) {
        self.autorun_requested = enabled;

        if self.mode != Mode::Run {
            self.set_mode(Mode::Run);
        }

        if enabled {
            self.start_autorun();
        } else {
            self.stop_autorun();
            self.emit(RenderEvent::run_status(texts::autorun_paused(self.floor)));
            self.emit(RenderEvent::panel_message(texts::MANUAL_MODE));
        }
    }

    pub fn start_autorun(&mut self) {
        if self.autorun.is_running() || self.mode != Mode::Run {
            return;
        }

        let direction = if self.floor >= Floor::HIGHEST {
            Direction::Down
        } else {
            Direction::Up
        };
        self.autorun = AutorunState::Running { direction };
        info!("Autorun started from floor {} heading {:?}", self.floor, direction);

        self.emit(RenderEvent::panel_message(texts::AUTORUN_PATROL));
        self.emit(RenderEvent::run_status(texts::autorun_started(self.floor)));
        self.autorun_step();
    }

    pub fn stop_autorun(&mut self) {
        if self.autorun.is_running() {
            info!("Autorun stopped at floor {}", self.floor);
        }
        self.autorun = AutorunState::Stopped;
        self.autorun_timer = None;
    }

    /// Moves logical time forward to `now`, firing every timer that falls
    /// due on the way. Each timer runs at its own deadline, so a step that
    /// schedules another timer inside the window sees it fire too.
    pub fn advance_to(&mut self, now: Duration) {
        while let Some((due, timer)) = self.take_due_timer(now) {
            self.now = self.now.max(due);
            match timer {
                Timer::Settle(floor) => self.settle(floor),
                Timer::AutorunStep => self.autorun_step(),
            }
        }
        self.now = self.now.max(now);
    }

    #[cfg(test)]
    pub fn advance_by(&mut self, elapsed: Duration) {
        self.advance_to(self.now + elapsed);
    }

    /***************************************/
    /*          Private functions          */
    /***************************************/
    fn take_due_timer(&mut self, now: Duration) -> Option<(Duration, Timer)> {
        let settle = self.settle_timer.filter(|timer| timer.due <= now);
        let autorun = self.autorun_timer.filter(|due| *due <= now);

        match (settle, autorun) {
            (Some(settle), Some(autorun)) if autorun < settle.due => {
                self.autorun_timer = None;
                Some((autorun, Timer::AutorunStep))
            }
            (Some(settle), _) => {
                self.settle_timer = None;
                Some((settle.due, Timer::Settle(settle.floor)))
            }
            (None, Some(autorun)) => {
                self.autorun_timer = None;
                Some((autorun, Timer::AutorunStep))
            }
            (None, None) => None,
        }
    }

    fn settle(&mut self, floor: Floor) {
        self.indicator = None;
        self.emit(RenderEvent::indicators(None));

        if self.mode == Mode::Run {
            self.emit(RenderEvent::panel_message(texts::arrival_panel(floor)));
            self.emit(RenderEvent::run_status(texts::arrival_status(floor)));
        }

        self.travel = TravelState::Idle;
        debug!("Car settled at floor {}", floor);
    }

    fn autorun_step(&mut self) {
        let AutorunState::Running { mut direction } = self.autorun else {
            return;
        };

        // Bounce off either end rather than stopping there
        let next = self.floor.step(direction).or_else(|| {
            direction = direction.reversed();
            self.floor.step(direction)
        });
        let Some(next) = next else {
            return;
        };
        self.autorun = AutorunState::Running { direction };

        let travel_time = self
            .move_to(i64::from(next.number()), MoveReason::Auto)
            .unwrap_or_default();
        let delay = self.timing.autorun_delay(travel_time);
        self.autorun_timer = Some(self.now + delay);
        trace!("Next autorun step in {} ms", delay.as_millis());
    }

    fn emit_car(&self, transition: Duration) {
        self.emit(RenderEvent::CarMoved {
            floor: self.floor,
            car_offset: self.shaft.car_offset(self.floor),
            counterweight_offset: self.shaft.counterweight_offset(self.floor),
            transition_ms: transition.as_millis() as u64,
        });
    }

    fn emit(&self, event: RenderEvent) {
        if self.render_tx.send(event).is_err() {
            trace!("Render layer disconnected, dropping event");
        }
    }
}

// Saturates integers outside the i64 range instead of rejecting them
fn parse_floor_number(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(number) = raw.parse::<i64>() {
        return Some(number);
    }

    let (negative, digits) = match raw.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}
