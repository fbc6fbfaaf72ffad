use kernel_board::image::io::{load_grayscale_image, load_raw, save_grayscale_png, save_raw};
use kernel_board::image::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
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
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 3 && args.len() != 5 {
        return Err(usage());
    }
    let (width, height) = if args.len() == 5 {
        (parse_dim(&args[3])?, parse_dim(&args[4])?)
    } else {
        (DEFAULT_WIDTH, DEFAULT_HEIGHT)
    };
    let input = Path::new(&args[1]);
    let output = Path::new(&args[2]);

    match args[0].as_str() {
        "to-raw" => {
            let img = load_grayscale_image(input, width, height).map_err(|e| e.to_string())?;
            save_raw(output, &img).map_err(|e| e.to_string())?;
        }
        "to-png" => {
            let img = load_raw(input, width, height).map_err(|e| e.to_string())?;
            save_grayscale_png(&img, output).map_err(|e| e.to_string())?;
        }
        _ => return Err(usage()),
    }
    println!(
        "Converted {} -> {} ({}x{} grayscale)",
        input.display(),
        output.display(),
        width,
        height
    );
    Ok(())
}

fn parse_dim(s: &str) -> Result<usize, String> {
    s.parse::<usize>()
        .ok()
        .filter(|&v| v > 0)
        .ok_or_else(|| format!("Invalid dimension '{s}'"))
}

fn usage() -> String {
    "Usage: raw_convert <to-raw|to-png> <input> <output> [width height]".to_string()
}
