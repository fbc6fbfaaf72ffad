use kernel_board::controller::{LogStatusSink, ProcessingController};
use kernel_board::image::GrayImageU8;
use kernel_board::selection::{CHAIN_BIT, RUN_BIT, SIZE_BIT};
use kernel_board::session::{run_session, ImageLibrary, ScriptedInput};
use kernel_board::ControllerParams;

fn main() {
    env_logger::init();

    // Demo stub: a synthetic 64×64 gradient with a bright square, run once
    // through a 5×5 Gaussian and then through an Edge → BoxBlur chain.
    let params = ControllerParams::default();
    let mut baseline = GrayImageU8::new(params.width, params.height);
    for y in 0..params.height {
        for x in 0..params.width {
            let v = if (24..40).contains(&x) && (24..40).contains(&y) {
                240
            } else {
                (x * 2) as u8
            };
            baseline.set(x, y, v);
        }
    }

    let mut controller = match ProcessingController::new(params, baseline) {
        Ok(controller) => controller,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    let mut input = ScriptedInput::default()
        .click(RUN_BIT | SIZE_BIT | 0b10)
        .click(RUN_BIT | CHAIN_BIT)
        .click(0b01);
    let mut sink = LogStatusSink::default();
    let report = run_session(&mut controller, &mut input, &ImageLibrary::default(), &mut sink);

    for pass in report.passes() {
        println!("{:<28} {:>8.3} ms", pass.label(), pass.elapsed_ms);
    }
    let out = controller.output();
    let mean = out.as_bytes().iter().map(|&v| v as u64).sum::<u64>() / out.len().max(1) as u64;
    println!(
        "ticks={} errors={} output_mean={} total_ms={:.3}",
        report.ticks,
        report.error_count(),
        mean,
        report.timing.total_ms
    );
}
