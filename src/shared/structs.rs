/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/***************************************/
/*       Public data structures        */
/***************************************/

/// A resting position of the car, always within `Floor::LOWEST..=Floor::HIGHEST`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct Floor(u8);

impl Floor {
    pub const LOWEST: Floor = Floor(1);
    pub const HIGHEST: Floor = Floor(5);

    pub fn new(number: u8) -> Option<Floor> {
        if (Self::LOWEST.0..=Self::HIGHEST.0).contains(&number) {
            Some(Floor(number))
        } else {
            None
        }
    }

    /// Pulls any requested number into the served range.
    pub fn clamped(number: i64) -> Floor {
        let lowest = i64::from(Self::LOWEST.0);
        let highest = i64::from(Self::HIGHEST.0);
        Floor(number.clamp(lowest, highest) as u8)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Floors below this one, i.e. how far the car sits above the pit.
    pub fn index(self) -> u8 {
        self.0 - Self::LOWEST.0
    }

    pub fn distance(self, other: Floor) -> u8 {
        self.0.abs_diff(other.0)
    }

    /// The neighbouring floor in `direction`, or `None` past either end.
    pub fn step(self, direction: Direction) -> Option<Floor> {
        match direction {
            Direction::Up => self.0.checked_add(1).and_then(Floor::new),
            Direction::Down => self.0.checked_sub(1).and_then(Floor::new),
        }
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Floor> {
        (Self::LOWEST.0..=Self::HIGHEST.0).map(Floor)
    }
}

impl TryFrom<u8> for Floor {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Floor::new(number).ok_or_else(|| format!("floor {} out of range", number))
    }
}

impl From<Floor> for u8 {
    fn from(floor: Floor) -> u8 {
        floor.0
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Components,
    Run,
    Maintenance,
    Rescue,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Components, Mode::Run, Mode::Maintenance, Mode::Rescue];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Components => "components",
            Mode::Run => "run",
            Mode::Maintenance => "maintenance",
            Mode::Rescue => "rescue",
        }
    }

    /// Class applied to the scene by the presentation layer.
    pub fn scene_class(self) -> String {
        format!("mode-{}", self.name())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| format!("unknown mode '{}'", s))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn between(from: Floor, to: Floor) -> Direction {
        if to > from {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MoveReason {
    Manual,
    Auto,
}

/// The travel-lock. `Moving` is held from departure until the settle timer fires.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TravelState {
    Idle,
    Moving,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase", tag = "state")]
pub enum AutorunState {
    Stopped,
    Running { direction: Direction },
}

impl AutorunState {
    pub fn is_running(self) -> bool {
        matches!(self, AutorunState::Running { .. })
    }
}

/// Point-in-time view of the controller for the presentation layer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ControllerSnapshot {
    pub floor: Floor,
    pub mode: Mode,
    pub travel: TravelState,
    pub autorun: AutorunState,
    pub autorun_requested: bool,
    pub indicator: Option<Direction>,
    pub car_offset: u32,
    pub counterweight_offset: u32,
}

#[cfg(test)]
mod structs_tests {
    use super::*;

    #[test]
    fn test_floor_bounds() {
        assert_eq!(Floor::new(0), None);
        assert_eq!(Floor::new(6), None);
        assert_eq!(Floor::new(3).map(Floor::number), Some(3));
    }

    #[test]
    fn test_floor_clamped() {
        assert_eq!(Floor::clamped(-7), Floor::LOWEST);
        assert_eq!(Floor::clamped(99), Floor::HIGHEST);
        assert_eq!(Floor::clamped(4).number(), 4);
    }

    #[test]
    fn test_floor_step_stops_at_ends() {
        assert_eq!(Floor::HIGHEST.step(Direction::Up), None);
        assert_eq!(Floor::LOWEST.step(Direction::Down), None);
        assert_eq!(Floor::LOWEST.step(Direction::Up), Floor::new(2));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("run".parse::<Mode>(), Ok(Mode::Run));
        assert_eq!("rescue".parse::<Mode>(), Ok(Mode::Rescue));
        assert!("Run".parse::<Mode>().is_err());
        assert!("lobby".parse::<Mode>().is_err());
    }

    #[test]
    fn test_floor_rejects_out_of_range_json() {
        assert!(serde_json::from_str::<Floor>("9").is_err());
        assert_eq!(serde_json::from_str::<Floor>("2").unwrap().number(), 2);
    }

    #[test]
    fn test_snapshot_fields_are_camel_case() {
        let snapshot = ControllerSnapshot {
            floor: Floor::HIGHEST,
            mode: Mode::Run,
            travel: TravelState::Idle,
            autorun: AutorunState::Stopped,
            autorun_requested: true,
            indicator: None,
            car_offset: 416,
            counterweight_offset: 0,
        };

        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["autorunRequested"], true);
        assert_eq!(json["carOffset"], 416);
        assert_eq!(json["counterweightOffset"], 0);
        assert!(json.get("car_offset").is_none());
        let back: ControllerSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }
}
