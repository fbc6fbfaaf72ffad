use kernel_board::config::session::load_config;
use kernel_board::controller::{LogStatusSink, ProcessingController};
use kernel_board::image::io::{load_image_any, save_grayscale_png, save_raw, write_json_file};
use kernel_board::session::{run_session, ImageLibrary};
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
    let config = load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;
    let frame = config.frame;

    let baseline =
        load_image_any(&config.baseline, frame.width, frame.height).map_err(|e| e.to_string())?;
    let library = ImageLibrary::from_paths(&config.library, frame.width, frame.height)
        .map_err(|e| e.to_string())?;
    let mut controller = ProcessingController::new(frame, baseline).map_err(|e| e.to_string())?;

    let mut input = config.scripted_input();
    let mut sink = LogStatusSink::default();
    let report = run_session(&mut controller, &mut input, &library, &mut sink);

    save_raw(&config.output.raw, controller.output()).map_err(|e| e.to_string())?;
    println!("Saved output frame to {}", config.output.raw.display());
    if let Some(path) = &config.output.png {
        save_grayscale_png(controller.output(), path).map_err(|e| e.to_string())?;
        println!("Saved output preview to {}", path.display());
    }
    if let Some(path) = &config.output.status_json {
        write_json_file(path, &controller.status()).map_err(|e| e.to_string())?;
        println!("Saved status snapshot to {}", path.display());
    }
    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report).map_err(|e| e.to_string())?;
        println!("Saved session report to {}", path.display());
    }

    for pass in report.passes() {
        println!("{:<28} {:>8.3} ms", pass.label(), pass.elapsed_ms);
    }
    println!(
        "{} ticks, {} errors, final phase {:?}",
        report.ticks,
        report.error_count(),
        report.final_status.phase
    );
    Ok(())
}

fn usage() -> String {
    "Usage: filter_session <config.json>".to_string()
}
