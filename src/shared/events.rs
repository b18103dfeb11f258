use serde::Serialize;

use super::structs::{ControllerSnapshot, Direction, Floor, Mode};

/// Everything the controller tells the presentation layer. Consumers apply
/// these in order; none of them feed back into the controller.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RenderEvent {
    ModeChanged {
        mode: Mode,
        scene_class: String,
        description: String,
        run_controls_visible: bool,
    },
    CarMoved {
        floor: Floor,
        car_offset: u32,
        counterweight_offset: u32,
        transition_ms: u64,
    },
    Indicators {
        up: bool,
        down: bool,
        moving: bool,
    },
    RunStatus {
        text: String,
    },
    PanelMessage {
        text: String,
    },
    Snapshot(ControllerSnapshot),
}

impl RenderEvent {
    pub fn indicators(active: Option<Direction>) -> RenderEvent {
        RenderEvent::Indicators {
            up: active == Some(Direction::Up),
            down: active == Some(Direction::Down),
            moving: active.is_some(),
        }
    }

    pub fn run_status(text: impl Into<String>) -> RenderEvent {
        RenderEvent::RunStatus { text: text.into() }
    }

    pub fn panel_message(text: impl Into<String>) -> RenderEvent {
        RenderEvent::PanelMessage { text: text.into() }
    }
}
