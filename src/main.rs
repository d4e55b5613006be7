//! Pong Sim entry point
//!
//! Runs a headless session with two AI paddles on a simulated 60 Hz display
//! and logs every miss.
//!
//! Usage: `pong-sim [config.json|-] [seconds] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;

    use pong_sim::controller::Tracking;
    use pong_sim::{Config, Session};

    const FRAME_DT: f32 = 1.0 / 60.0;

    env_logger::init();
    log::info!("Pong Sim (headless) starting...");

    let mut args = std::env::args().skip(1);

    let config = match args.next().filter(|path| path != "-") {
        Some(path) => match Config::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let seconds: f32 = match args.next().map(|s| s.parse()) {
        Some(Ok(seconds)) => seconds,
        Some(Err(e)) => {
            log::error!("Invalid duration: {e}");
            return ExitCode::FAILURE;
        }
        None => 30.0,
    };

    let seed: u64 = match args.next().map(|s| s.parse()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Invalid seed: {e}");
            return ExitCode::FAILURE;
        }
        None => 0x5eed,
    };

    let max_speed = config.paddle_max_speed;
    let mut session = match Session::new(config, seed) {
        Ok(session) => {
            // Slightly uneven paddles so rallies end
            session.with_controllers(Tracking::new(max_speed), Tracking::new(max_speed * 0.8))
        }
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let frames = (seconds.max(0.0) / FRAME_DT).round() as u32;
    let mut paddle_hits = 0;
    for _ in 0..frames {
        match session.frame(FRAME_DT) {
            Ok(report) => paddle_hits += report.paddle_hits,
            Err(e) => {
                log::error!("Frame rejected: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    let score = session.score();
    log::info!(
        "Finished {} frames: {} paddle hits, score {} - {}",
        frames,
        paddle_hits,
        score.left,
        score.right
    );
    println!("{} - {}", score.left, score.right);
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page's frame loop on the web
}
