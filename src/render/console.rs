use crate::shared::{Floor, Mode, RenderEvent};
use crossbeam_channel as cbc;
use log::{debug, warn};
use std::io::{self, Write};

/// What the presentation layer currently shows. Built up purely from
/// render events; the renderer never asks the controller for anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub floor: Floor,
    pub car_offset: u32,
    pub counterweight_offset: u32,
    pub transition_ms: u64,
    pub up: bool,
    pub down: bool,
    pub moving: bool,
    pub mode: Mode,
    pub scene_class: String,
    pub run_controls_visible: bool,
    pub run_status: String,
    pub panel_message: String,
}

impl Default for Frame {
    fn default() -> Self {
        Frame {
            floor: Floor::LOWEST,
            car_offset: 0,
            counterweight_offset: 0,
            transition_ms: 0,
            up: false,
            down: false,
            moving: false,
            mode: Mode::Components,
            scene_class: Mode::Components.scene_class(),
            run_controls_visible: false,
            run_status: String::new(),
            panel_message: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub struct ConsoleRenderer<W: Write> {
    render_rx: cbc::Receiver<RenderEvent>,
    format: OutputFormat,
    frame: Frame,
    out: W,
}

impl ConsoleRenderer<io::Stdout> {
    pub fn stdout(render_rx: cbc::Receiver<RenderEvent>, format: OutputFormat) -> Self {
        ConsoleRenderer::new(render_rx, format, io::stdout())
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(render_rx: cbc::Receiver<RenderEvent>, format: OutputFormat, out: W) -> Self {
        ConsoleRenderer {
            render_rx,
            format,
            frame: Frame::default(),
            out,
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Renders until every sender has been dropped, then hands back the writer.
    pub fn run(mut self) -> W {
        while let Ok(event) = self.render_rx.recv() {
            let lines = self.apply(&event);
            if let Err(e) = self.write_lines(&lines) {
                warn!("Failed to write frame: {}", e);
            }
        }
        debug!("Render channel closed, last frame {:?}", self.frame());
        self.out
    }

    /// Folds `event` into the frame and returns the lines to print for it.
    pub fn apply(&mut self, event: &RenderEvent) -> Vec<String> {
        let changed = self.update_frame(event);

        match self.format {
            OutputFormat::Json => match serde_json::to_string(event) {
                Ok(line) => vec![line],
                Err(e) => {
                    warn!("Failed to encode render event: {}", e);
                    Vec::new()
                }
            },
            OutputFormat::Text if !changed => Vec::new(),
            OutputFormat::Text => match event {
                RenderEvent::CarMoved { .. } | RenderEvent::Indicators { .. } => self.draw_shaft(),
                RenderEvent::ModeChanged { description, .. } => vec![
                    format!("== {} ==", self.frame.mode.name().to_uppercase()),
                    description.clone(),
                ],
                RenderEvent::RunStatus { text } => vec![format!("[status] {}", text)],
                RenderEvent::PanelMessage { text } => vec![format!("[panel]  {}", text)],
                RenderEvent::Snapshot(snapshot) => match serde_json::to_string_pretty(snapshot) {
                    Ok(json) => json.lines().map(str::to_string).collect(),
                    Err(e) => vec![format!("snapshot unavailable: {}", e)],
                },
            },
        }
    }

    // Returns false when the event leaves the frame as it was
    fn update_frame(&mut self, event: &RenderEvent) -> bool {
        let before = self.frame.clone();
        match event {
            RenderEvent::ModeChanged {
                mode,
                scene_class,
                run_controls_visible,
                ..
            } => {
                self.frame.mode = *mode;
                self.frame.scene_class = scene_class.clone();
                self.frame.run_controls_visible = *run_controls_visible;
                return true;
            }
            RenderEvent::CarMoved {
                floor,
                car_offset,
                counterweight_offset,
                transition_ms,
            } => {
                self.frame.floor = *floor;
                self.frame.car_offset = *car_offset;
                self.frame.counterweight_offset = *counterweight_offset;
                self.frame.transition_ms = *transition_ms;
            }
            RenderEvent::Indicators { up, down, moving } => {
                self.frame.up = *up;
                self.frame.down = *down;
                self.frame.moving = *moving;
            }
            RenderEvent::RunStatus { text } => self.frame.run_status = text.clone(),
            RenderEvent::PanelMessage { text } => self.frame.panel_message = text.clone(),
            RenderEvent::Snapshot(_) => return true,
        }
        self.frame != before
    }

    /// Top floor first. The counterweight row mirrors the car row.
    pub fn draw_shaft(&self) -> Vec<String> {
        let arrow = match (self.frame.up, self.frame.down) {
            (true, _) => "^",
            (_, true) => "v",
            _ => " ",
        };
        let mirrored = Floor::HIGHEST.number() - self.frame.floor.index();

        let mut lines = vec![format!(
            "+---- floor {} {} {}",
            self.frame.floor,
            arrow,
            if self.frame.moving {
                format!("({} ms)", self.frame.transition_ms)
            } else {
                String::new()
            }
        )];
        for floor in Floor::all().rev() {
            let car = if floor == self.frame.floor { "[##]" } else { "    " };
            let weight = if floor.number() == mirrored { "||" } else { "  " };
            lines.push(format!("| {} | {} | {}", floor, car, weight));
        }
        lines
    }

    fn write_lines(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }
}
