mod common;

use common::synthetic_image::{checkerboard_u8, impulse_u8, noise_u8};
use kernel_board::controller::{BufferSlot, Phase, RecordingStatusSink};
use kernel_board::image::GrayImageU8;
use kernel_board::selection::{CHAIN_BIT, RESET_BIT, RUN_BIT, SIZE_BIT};
use kernel_board::session::{run_session, ImageLibrary, ScriptedInput, SessionEvent};
use kernel_board::{
    convolve, ControllerParams, InputSample, KernelCatalog, KernelIdentity, KernelSize,
    ProcessingController, StepOutcome,
};

const W: usize = 64;
const H: usize = 64;

fn controller_with(baseline: GrayImageU8) -> ProcessingController {
    ProcessingController::new(ControllerParams::default(), baseline)
        .expect("64x64 baseline matches default params")
}

fn click(ctl: &mut ProcessingController, switches: u32) -> StepOutcome {
    ctl.step(InputSample::released(switches)).unwrap();
    let outcome = ctl.step(InputSample::pressed(switches)).unwrap();
    ctl.step(InputSample::released(switches)).unwrap();
    outcome
}

#[test]
fn zero_image_edge_3x3_stays_black() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut ctl = controller_with(GrayImageU8::new(W, H));
    let outcome = click(&mut ctl, RUN_BIT);
    assert!(matches!(outcome, StepOutcome::SingleApplied(_)));
    assert!(ctl.output_bytes().iter().all(|&v| v == 0));
}

#[test]
fn impulse_box_blur_3x3_spreads_to_neighbourhood() {
    let mut ctl = controller_with(impulse_u8(W, H, 20, 30, 255));
    click(&mut ctl, RUN_BIT | KernelIdentity::BoxBlur.code());
    let out = ctl.output();
    for y in 0..H {
        for x in 0..W {
            let near = (19..=21).contains(&x) && (29..=31).contains(&y);
            let expected = if near { 28 } else { 0 };
            assert_eq!(out.get(x, y), expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn chain_edge_then_box_blur_matches_sequential_passes() {
    let baseline = checkerboard_u8(W, H, 8);
    let edge = KernelCatalog::lookup(KernelIdentity::Edge, KernelSize::Small);
    let blur = KernelCatalog::lookup(KernelIdentity::BoxBlur, KernelSize::Small);
    let stage1 = convolve(&baseline.as_view(), edge).unwrap();
    let expected = convolve(&stage1.as_view(), blur).unwrap();
    let reversed = convolve(&convolve(&baseline.as_view(), blur).unwrap().as_view(), edge).unwrap();
    assert_ne!(expected, reversed, "order must matter for this fixture");

    let mut ctl = controller_with(baseline);
    let first = click(&mut ctl, RUN_BIT | CHAIN_BIT | KernelIdentity::Edge.code());
    assert!(matches!(first, StepOutcome::FirstStageApplied(_)));
    assert_eq!(ctl.phase(), Phase::AwaitingSecondConfirm);
    assert_eq!(ctl.buffer(BufferSlot::Temp), &stage1);

    // Operator flips to BoxBlur; run/chain bits are irrelevant for stage two.
    let second = click(&mut ctl, KernelIdentity::BoxBlur.code());
    assert!(matches!(second, StepOutcome::ChainApplied { .. }));
    assert_eq!(ctl.output(), &expected);
    assert_eq!(ctl.phase(), Phase::Idle);
}

#[test]
fn reset_restores_baseline_regardless_of_history() {
    let baseline = noise_u8(W, H, 7);
    let mut ctl = controller_with(baseline.clone());
    click(&mut ctl, RUN_BIT | SIZE_BIT | KernelIdentity::Sharpen.code());
    ctl.load_image(checkerboard_u8(W, H, 4).as_bytes()).unwrap();
    click(&mut ctl, RUN_BIT | CHAIN_BIT);
    click(&mut ctl, KernelIdentity::Gaussian.code());

    assert_eq!(click(&mut ctl, RESET_BIT), StepOutcome::Reset);
    assert_eq!(ctl.input(), &baseline);
    assert!(ctl.output_bytes().iter().all(|&v| v == 0));
    assert!(!ctl.image_loaded());
}

/// Straightforward i64 reference: skip out-of-frame taps, truncate, clamp.
fn reference_convolve(img: &GrayImageU8, identity: KernelIdentity, size: KernelSize) -> Vec<u8> {
    let kernel = KernelCatalog::lookup(identity, size);
    let k = kernel.size() as i64;
    let c = k / 2;
    let (w, h) = (img.width() as i64, img.height() as i64);
    let mut out = Vec::with_capacity(img.len());
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0i64;
            for ky in 0..k {
                for kx in 0..k {
                    let (ix, iy) = (x + kx - c, y + ky - c);
                    if ix >= 0 && ix < w && iy >= 0 && iy < h {
                        acc += img.get(ix as usize, iy as usize) as i64
                            * kernel.weight(kx as usize, ky as usize) as i64;
                    }
                }
            }
            let v = acc / kernel.divisor() as i64 + kernel.offset() as i64;
            out.push(v.clamp(0, 255) as u8);
        }
    }
    out
}

#[test]
fn every_kernel_matches_clamped_reference() {
    let img = noise_u8(W, H, 12345);
    for (identity, size, kernel) in KernelCatalog::entries() {
        let out = convolve(&img.as_view(), kernel).unwrap();
        assert_eq!(
            out.as_bytes(),
            &reference_convolve(&img, identity, size)[..],
            "{identity} {size}"
        );
        // Sharpen saturates on noise, so both clamp limits are exercised.
        if identity == KernelIdentity::Sharpen {
            assert!(out.as_bytes().contains(&0) && out.as_bytes().contains(&255));
        }
    }
}

#[test]
fn normalized_blurs_preserve_uniform_interior() {
    let value = 173u8;
    let img = GrayImageU8::filled(W, H, value);
    for identity in [KernelIdentity::BoxBlur, KernelIdentity::Gaussian] {
        for size in KernelSize::ALL {
            let kernel = KernelCatalog::lookup(identity, size);
            let out = convolve(&img.as_view(), kernel).unwrap();
            let r = size.side() / 2;
            for y in r..H - r {
                for x in r..W - r {
                    assert_eq!(out.get(x, y), value, "{identity} {size} at ({x}, {y})");
                }
            }
            assert!(out.get(0, 0) < value, "{identity} {size} corner must be under-weighted");
        }
    }
}

#[test]
fn scripted_session_runs_full_protocol() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut ctl = controller_with(GrayImageU8::filled(W, H, 100));
    let library = ImageLibrary::new(vec![
        impulse_u8(W, H, 10, 10, 255),
        GrayImageU8::filled(W, H, 1),
        GrayImageU8::filled(W, H, 2),
    ]);
    let mut input = ScriptedInput::default()
        .click(RUN_BIT | KernelIdentity::Sharpen.code())
        .click(RESET_BIT)
        .click(RUN_BIT) // ignored as a run: selects library slot 0
        .click(RUN_BIT | CHAIN_BIT | KernelIdentity::BoxBlur.code())
        .click(KernelIdentity::BoxBlur.code());
    let mut sink = RecordingStatusSink::default();
    let report = run_session(&mut ctl, &mut input, &library, &mut sink);

    assert_eq!(report.ticks, 15);
    assert_eq!(report.error_count(), 0);
    assert_eq!(sink.history.len(), 15);
    assert!(matches!(report.events[1], SessionEvent::Reset { tick: 4 }));
    assert!(matches!(
        report.events[2],
        SessionEvent::ImageLoaded {
            tick: 7,
            slot: Some(0)
        }
    ));
    assert_eq!(report.passes().count(), 3);
    assert_eq!(report.timing.stages.len(), 3);

    // Two box blurs of the impulse: 28 survives at the centre, 28/9 at the far corner.
    let blur = KernelCatalog::lookup(KernelIdentity::BoxBlur, KernelSize::Small);
    let once = convolve(&impulse_u8(W, H, 10, 10, 255).as_view(), blur).unwrap();
    let twice = convolve(&once.as_view(), blur).unwrap();
    assert_eq!(ctl.output(), &twice);
    assert_eq!(twice.get(10, 10), 28);
    assert_eq!(twice.get(12, 12), 3);
    assert_eq!(report.final_status.phase, Phase::Idle);
}
