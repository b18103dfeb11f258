pub mod events;
pub mod macros;
pub mod structs;
pub mod texts;

pub use events::RenderEvent;
pub use structs::AutorunState;
pub use structs::ControllerSnapshot;
pub use structs::Direction;
pub use structs::Floor;
pub use structs::Mode;
pub use structs::MoveReason;
pub use structs::TravelState;
