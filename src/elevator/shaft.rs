use crate::config::ShaftConfig;
use crate::shared::Floor;

/// Hoistway geometry. Offsets are measured up from the pit, in the same
/// units as `floor_height`.
///
/// The counterweight hangs on the other end of the ropes, so it sits at the
/// top when the car is at the bottom and the two offsets always sum to
/// `max_offset()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shaft {
    floor_height: u32,
}

impl Shaft {
    pub fn new(config: &ShaftConfig) -> Shaft {
        Shaft {
            floor_height: config.floor_height,
        }
    }

    pub fn max_offset(&self) -> u32 {
        u32::from(Floor::HIGHEST.index()) * self.floor_height
    }

    pub fn car_offset(&self, floor: Floor) -> u32 {
        u32::from(floor.index()) * self.floor_height
    }

    pub fn counterweight_offset(&self, floor: Floor) -> u32 {
        self.max_offset() - self.car_offset(floor)
    }
}
