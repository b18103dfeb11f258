pub mod controller;
pub mod shaft;
pub mod simulator;


pub use controller::ElevatorController;
pub use simulator::{Command, Simulator};
