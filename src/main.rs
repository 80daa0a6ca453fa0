use em_overlay::config::load_config;
use em_overlay::io::{read_lines, write_json_file};
use em_overlay::palette::{ColorPicker, CyclingPicker, SeededPicker};
use em_overlay::scene::{build_scene, Scene};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let point_lines = read_lines(&config.points)?;
    let cluster_lines = read_lines(&config.clusters)?;

    let mut picker: Box<dyn ColorPicker> = match config.color_seed {
        Some(seed) => Box::new(SeededPicker::new(config.palette.clone(), seed)),
        None => Box::new(CyclingPicker::new(config.palette.clone())),
    };

    let mut scene = build_scene(
        point_lines.iter().map(String::as_str),
        cluster_lines.iter().map(String::as_str),
        &config.levels,
        picker.as_mut(),
    );
    scene.axis = config.axis;
    scene.marker = config.marker;

    print_summary(&scene);

    if let Some(path) = &config.output.scene_json {
        write_json_file(path, &scene)?;
        println!("Scene written to {}", path.display());
    }

    Ok(())
}

fn print_summary(scene: &Scene) {
    println!(
        "points={} clusters={} ellipses={} failures={}",
        scene.points.len(),
        scene.clusters_drawn,
        scene.ellipses.len(),
        scene.failures.len()
    );
    for failure in &scene.failures {
        eprintln!("  skipped: {failure}");
    }
}

fn usage() -> String {
    "Usage: em-overlay <config.json>".to_string()
}
