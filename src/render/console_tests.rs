/*
 * Unit tests for the console renderer
 *
 * Tests:
 * - test_car_moved_draws_shaft
 * - test_repeated_status_is_not_reprinted
 * - test_mode_change_updates_frame
 * - test_json_lines_use_camel_case
 * - test_run_drains_until_senders_drop
 */

#[cfg(test)]
mod console_tests {
    use crate::render::{ConsoleRenderer, OutputFormat};
    use crate::shared::{Floor, Mode, RenderEvent};
    use crossbeam_channel::unbounded;

    fn renderer(format: OutputFormat) -> ConsoleRenderer<Vec<u8>> {
        let (_render_tx, render_rx) = unbounded::<RenderEvent>();
        ConsoleRenderer::new(render_rx, format, Vec::new())
    }

    fn car_at(n: u8, transition_ms: u64) -> RenderEvent {
        RenderEvent::CarMoved {
            floor: Floor::new(n).unwrap(),
            car_offset: u32::from(n - 1) * 104,
            counterweight_offset: u32::from(5 - n) * 104,
            transition_ms,
        }
    }

    #[test]
    fn test_car_moved_draws_shaft() {
        // Arrange
        let mut renderer = renderer(OutputFormat::Text);

        // Act
        renderer.apply(&car_at(2, 1700));
        let lines = renderer.apply(&RenderEvent::indicators(Some(crate::shared::Direction::Up)));

        // Assert
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("floor 2 ^"));
        assert!(lines[0].contains("(1700 ms)"));
        assert_eq!(lines[1], "| 5 |      |   ");
        assert_eq!(lines[2], "| 4 |      | ||");
        assert_eq!(lines[4], "| 2 | [##] |   ");
        assert_eq!(renderer.frame().car_offset, 104);
        assert_eq!(renderer.frame().counterweight_offset, 312);
    }

    #[test]
    fn test_repeated_status_is_not_reprinted() {
        // Arrange
        let mut renderer = renderer(OutputFormat::Text);
        let status = RenderEvent::run_status("Stopped at floor 3");

        // Act
        let first = renderer.apply(&status);
        let second = renderer.apply(&status);

        // Assert
        assert_eq!(first, vec!["[status] Stopped at floor 3".to_string()]);
        assert!(second.is_empty());
    }

    #[test]
    fn test_mode_change_updates_frame() {
        // Arrange
        let mut renderer = renderer(OutputFormat::Text);

        // Act
        let lines = renderer.apply(&RenderEvent::ModeChanged {
            mode: Mode::Rescue,
            scene_class: Mode::Rescue.scene_class(),
            description: "Evacuate".to_string(),
            run_controls_visible: false,
        });

        // Assert
        assert_eq!(lines, vec!["== RESCUE ==".to_string(), "Evacuate".to_string()]);
        assert_eq!(renderer.frame().mode, Mode::Rescue);
        assert_eq!(renderer.frame().scene_class, "mode-rescue");
    }

    #[test]
    fn test_json_lines_use_camel_case() {
        // Arrange
        let mut renderer = renderer(OutputFormat::Json);

        // Act
        let lines = renderer.apply(&car_at(4, 2250));

        // Assert
        assert_eq!(lines.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["event"], "carMoved");
        assert_eq!(value["floor"], 4);
        assert_eq!(value["carOffset"], 312);
        assert_eq!(value["counterweightOffset"], 104);
        assert_eq!(value["transitionMs"], 2250);
    }

    #[test]
    fn test_run_drains_until_senders_drop() {
        // Arrange
        let (render_tx, render_rx) = unbounded::<RenderEvent>();
        let renderer = ConsoleRenderer::new(render_rx, OutputFormat::Text, Vec::new());
        render_tx.send(RenderEvent::panel_message("Run console ready.")).unwrap();
        render_tx.send(RenderEvent::run_status("Ready to run")).unwrap();
        drop(render_tx);

        // Act
        let out = String::from_utf8(renderer.run()).unwrap();

        // Assert
        assert_eq!(out, "[panel]  Run console ready.\n[status] Ready to run\n");
    }
}
