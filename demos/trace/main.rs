//! Frenet trace: prints the frame report for a curve from the command line.
//!
//! Usage:
//! ```text
//! cargo run --example trace                                   # default helix
//! cargo run --example trace -- "cos(t)" "sin(t)" "t/4"        # custom curve
//! cargo run --example trace -- "t" "t^2" "t^3" -1 1 0.5 0.25  # + t_min t_max Δt t
//! ```
//!
//! Degenerate frames and skipped samples are logged as warnings; set
//! `RUST_LOG=frenet=debug` for more detail.

use std::process::ExitCode;

use frenet::operations::FrameSample;
use frenet::session::{Session, SessionParams};
use frenet::tessellation::{FrameGlyphs, Polyline};
use frenet::Result;

fn main() -> ExitCode {
    // Default: WARN for everything, INFO for frenet.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("trace=info".parse().unwrap_or_default())
        .add_directive("frenet=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<()> {
    let mut session = Session::new(SessionParams::default())?;

    if let [x, y, z, rest @ ..] = args {
        session.update_curve(x, y, z)?;
        if let [t_min, t_max, rest @ ..] = rest {
            session.update_range(t_min, t_max)?;
            if let [step, rest @ ..] = rest {
                session.set_frame_step(step)?;
                if let Some(t) = rest.first() {
                    session.set_t_text(t)?;
                }
            }
        }
    }

    let [x, y, z] = session.curve().sources().map(str::to_owned);
    let range = session.range();
    println!("r(t) = ({x}, {y}, {z}),  t in [{}, {}]", range.t_min(), range.t_max());

    let polyline = session.curve_polyline()?;
    println!(
        "curve: {} points, colour #{:06x}",
        polyline.len(),
        Polyline::COLOR.0
    );

    println!("{}", session.frame_report());
    if let Ok(resolved) = session.current_frame() {
        for arrow in FrameGlyphs::single(&FrameSample::from(&resolved)).arrows() {
            println!(
                "  arrow #{:06x} len {:.2} dir {}",
                arrow.color.0,
                arrow.length,
                frenet::math::format_vector(&arrow.direction)
            );
        }
    }

    let frames = session.all_frames()?;
    println!(
        "frames along curve (Δt = {}): {} drawn, {} skipped",
        session.frame_step(),
        frames.samples.len(),
        frames.skipped.len()
    );
    for sample in &frames.samples {
        let glyphs = FrameGlyphs::overlay(sample);
        println!(
            "  t = {:>7.3}  T {}  N {}  B {}",
            sample.t,
            frenet::math::format_vector(&glyphs.tangent.direction),
            frenet::math::format_vector(&glyphs.normal.direction),
            frenet::math::format_vector(&glyphs.binormal.direction),
        );
    }
    Ok(())
}
