use crate::elevator::Command;

/// One parsed line from the operator console.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Command(Command),
    Help,
    Quit,
    Empty,
    Unrecognized(String),
}

pub const HELP: &str = "\
commands:
  mode <components|run|maintenance|rescue>   switch explanatory mode
  floor <1-5>  (or just <1-5>)               call the car to a floor
  auto on|off                                toggle the autorun patrol
  status                                     print a state snapshot
  help                                       show this text
  quit                                       leave the simulator";

/// Parses a console line. Arguments are forwarded verbatim so the
/// controller decides what counts as a valid floor or mode.
pub fn parse_line(line: &str) -> Input {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Input::Empty;
    };
    let argument = words.next();

    match (keyword.to_ascii_lowercase().as_str(), argument) {
        ("mode", Some(name)) => Input::Command(Command::SelectMode(name.to_ascii_lowercase())),
        ("floor", Some(raw)) => Input::Command(Command::RequestFloor(raw.to_string())),
        ("auto", Some(state)) => match state.to_ascii_lowercase().as_str() {
            "on" | "true" | "1" => Input::Command(Command::SetAutorun(true)),
            "off" | "false" | "0" => Input::Command(Command::SetAutorun(false)),
            _ => Input::Unrecognized(line.trim().to_string()),
        },
        ("status", None) => Input::Command(Command::Snapshot),
        ("help" | "?", None) => Input::Help,
        ("quit" | "exit", None) => Input::Quit,
        (number, None) if number.parse::<i64>().is_ok() => {
            Input::Command(Command::RequestFloor(number.to_string()))
        }
        _ => Input::Unrecognized(line.trim().to_string()),
    }
}

#[cfg(test)]
mod input_tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("mode run"), Input::Command(Command::SelectMode("run".into())));
        assert_eq!(parse_line("MODE Rescue"), Input::Command(Command::SelectMode("rescue".into())));
        assert_eq!(parse_line("floor 4"), Input::Command(Command::RequestFloor("4".into())));
        assert_eq!(parse_line("  3  "), Input::Command(Command::RequestFloor("3".into())));
        assert_eq!(parse_line("auto on"), Input::Command(Command::SetAutorun(true)));
        assert_eq!(parse_line("auto OFF"), Input::Command(Command::SetAutorun(false)));
        assert_eq!(parse_line("status"), Input::Command(Command::Snapshot));
    }

    #[test]
    fn test_floor_argument_passed_through_raw() {
        // Validation belongs to the controller
        assert_eq!(parse_line("floor top"), Input::Command(Command::RequestFloor("top".into())));
        assert_eq!(parse_line("mode lobby"), Input::Command(Command::SelectMode("lobby".into())));
    }

    #[test]
    fn test_parse_control_lines() {
        assert_eq!(parse_line(""), Input::Empty);
        assert_eq!(parse_line("   "), Input::Empty);
        assert_eq!(parse_line("help"), Input::Help);
        assert_eq!(parse_line("exit"), Input::Quit);
        assert_eq!(parse_line("fly away"), Input::Unrecognized("fly away".into()));
        assert_eq!(parse_line("auto maybe"), Input::Unrecognized("auto maybe".into()));
        assert_eq!(parse_line("floor"), Input::Unrecognized("floor".into()));
    }
}
