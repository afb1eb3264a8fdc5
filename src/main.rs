//! Shape Motion entry point
//!
//! Headless run: the autopilot plays against the tick thread while the main
//! thread renders into an in-memory display.
//!
//! Usage: `shape-motion [settings.json]`

use std::path::PathBuf;

use shape_motion::audio::LogTone;
use shape_motion::platform::{Autopilot, Host};
use shape_motion::sim::Outcome;
use shape_motion::{Engine, FrameBuffer, Settings};

/// Give up on runs that have not ended after this many ticks
const MAX_TICKS: u64 = 5000;

fn main() -> Result<(), shape_motion::Error> {
    env_logger::init();
    log::info!("Shape Motion starting...");

    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(path.as_deref());
    let seed = settings.seed;

    let engine = Engine::new(settings)?;
    let size = engine.settings().screen_max() + glam::IVec2::ONE;
    let mut screen = FrameBuffer::new(size.x, size.y, engine.settings().background);
    engine.draw_all(&mut screen);

    let host = Host::new(engine);
    let ticker = host.spawn_ticker(Autopilot::new(seed), LogTone::default());

    let mut frames = 0u64;
    while host.render_next(&mut screen).is_some() {
        frames += 1;
        let (ended, ticks) = host.with_engine(|e| (e.is_ended(), e.state().time_ticks));
        if ended || ticks >= MAX_TICKS {
            break;
        }
    }
    host.stop();
    if ticker.join().is_err() {
        log::error!("Tick thread panicked");
    }

    let (score, outcome) = host.with_engine(|e| (e.score(), e.outcome()));
    let result = match outcome {
        Some(Outcome::Won) => "won",
        Some(Outcome::Lost) => "lost",
        None => "unfinished",
    };
    log::info!("Rendered {} frames, {} pixels", frames, screen.written);
    println!("Score: {} ({})", score, result);
    Ok(())
}
