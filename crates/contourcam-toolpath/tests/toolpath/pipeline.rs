use contourcam_core::Config;
use contourcam_geometry::{CuttingDirection, Point, Polyline};
use contourcam_toolpath::{ExportOptions, Exporter, Layer, Task};

fn loose_square() -> Vec<Polyline> {
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(20.0, 0.0),
        Point::new(20.0, 20.0),
        Point::new(0.0, 20.0),
    ];
    (0..4)
        .map(|i| Polyline::from_points(&[corners[i], corners[(i + 1) % 4]], false).unwrap())
        .collect()
}

#[test]
fn test_import_compensate_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let config_file = dir.path().join("contourcam.toml");
    Config::default().save_to_file(&config_file).unwrap();
    let config = Config::load_from_file(&config_file).unwrap();

    let (_, tool) = config.first_tool().unwrap();
    let (_, profile) = config.first_profile().unwrap();
    let mut settings = profile.default_path;
    settings.depth = 2.5;

    let layer = Layer::from_imported("cut", loose_square(), &config.import.dxf, settings);
    let mut task = Task::new(vec![layer]);
    let id = task.stack()[0];
    task.path_mut(id)
        .unwrap()
        .set_cutting_direction(CuttingDirection::Backward);
    task.set_path_selected(id, true).unwrap();
    assert_eq!(task.cutter_compensation(tool, -1.0, &config.import.dxf), 1);

    let program_file = dir.path().join("square.ngc");
    let options = ExportOptions {
        export_config: true,
        ..ExportOptions::default()
    };
    let report = Exporter::new(tool, &profile.gcode, options)
        .export_to_file(&task, &program_file)
        .unwrap();
    let program = std::fs::read_to_string(&program_file).unwrap();

    assert!(report.emit.is_clean());
    assert_eq!(report.emit.paths_emitted, 1);
    assert_eq!(report.emit.passes, 3);
    assert_eq!(report.lines, program.lines().count());
    assert!(program.starts_with("; tool\n"));
    assert!(program.contains("G1 Z-2.500"));
    // Outside compensation rounds the corners, cut clockwise when reversed.
    assert!(program.contains("G2 "));
    assert!(program.ends_with("M30\n"));
}
