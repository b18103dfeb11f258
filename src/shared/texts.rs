use super::structs::{Floor, Mode};

/***************************************/
/*          Mode lookup tables         */
/***************************************/
pub fn mode_description(mode: Mode) -> &'static str {
    match mode {
        Mode::Components => {
            "Watch the core components work together: the hoist ropes, car doors and \
             counterweight show how power is transmitted and how the safety gear engages."
        }
        Mode::Run => {
            "Dispatch the car between real floors to feel it accelerate and brake, and \
             watch the counterweight travel in step with the car."
        }
        Mode::Maintenance => {
            "Follow a service engineer through inspection, testing and adjustment to see \
             how routine maintenance keeps every ride safe."
        }
        Mode::Rescue => {
            "Walk through the key steps of an emergency rescue: reassuring passengers, \
             releasing the car door and coordinating a safe evacuation."
        }
    }
}

pub fn mode_panel_message(mode: Mode) -> &'static str {
    match mode {
        Mode::Components => "Component showcase running. Pick a mode to learn more.",
        Mode::Run => "Run console ready. Select a floor or switch on autorun.",
        Mode::Maintenance => {
            "Service crew on routine inspection. Watch the safety interlocks and brake."
        }
        Mode::Rescue => "Emergency state active: stay calm and follow the rescue team.",
    }
}

/***************************************/
/*            Status lines             */
/***************************************/
pub const PLEASE_WAIT: &str = "Car is in motion, please wait for it to stop before dispatching.";
pub const AUTORUN_PATROL: &str = "Autorun patrol active, cycling through the floors in turn.";
pub const MANUAL_MODE: &str = "Manual mode: select a floor to dispatch.";

pub fn run_ready(floor: Floor) -> String {
    format!("Ready to run, stopped at floor {}", floor)
}

pub fn holding_status(floor: Floor) -> String {
    format!("Car is already holding at floor {}", floor)
}

pub fn holding_panel(floor: Floor) -> String {
    format!("Car stationary at floor {}, awaiting dispatch.", floor)
}

pub fn manual_departure_panel(from: Floor, to: Floor) -> String {
    format!("In service: left floor {}, heading to floor {}", from, to)
}

pub fn manual_departure_status(to: Floor) -> String {
    format!("Car travelling to floor {}...", to)
}

pub fn auto_departure_panel(from: Floor, to: Floor) -> String {
    format!("Autorun: travelling from floor {} to floor {}", from, to)
}

pub fn auto_departure_status(to: Floor) -> String {
    format!("Autorun: heading to floor {}", to)
}

pub fn arrival_panel(floor: Floor) -> String {
    format!("Car has settled at floor {}", floor)
}

pub fn arrival_status(floor: Floor) -> String {
    format!("Stopped at floor {}", floor)
}

pub fn autorun_started(floor: Floor) -> String {
    format!("Autorun patrol running, stopped at floor {}", floor)
}

pub fn autorun_paused(floor: Floor) -> String {
    format!("Autorun paused, stopped at floor {}", floor)
}
