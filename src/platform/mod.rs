//! Host runtime
//!
//! Stands in for the board: a periodic tick thread plays the role of the
//! timer interrupt, and the render side sleeps until a frame is flagged.
//! The engine sits behind one mutex. The tick handler holds it for a single
//! tick; the renderer holds it only while taking a frame snapshot and paints
//! with the lock released.

pub mod input;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::audio::{Buzzer, ToneSink};
use crate::engine::Engine;
use crate::renderer::DisplaySink;
use crate::sim::{GameEvent, TickInput};

pub use input::{Autopilot, Button, InputSource, Script};

struct Shared {
    engine: Mutex<Engine>,
    frame_ready: Condvar,
    running: AtomicBool,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Engine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn tick(&self, input: &TickInput) -> Vec<GameEvent> {
        let events = self.lock().advance_one_tick(input);
        self.frame_ready.notify_all();
        events
    }
}

/// Shared engine plus the frame-ready signal
#[derive(Clone)]
pub struct Host {
    shared: Arc<Shared>,
}

impl Host {
    pub fn new(engine: Engine) -> Self {
        Self {
            shared: Arc::new(Shared {
                engine: Mutex::new(engine),
                frame_ready: Condvar::new(),
                running: AtomicBool::new(true),
            }),
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Run `f` with the engine locked
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        f(&mut self.shared.lock())
    }

    /// Run one tick on the calling thread and wake the renderer
    pub fn tick(&self, input: &TickInput) -> Vec<GameEvent> {
        self.shared.tick(input)
    }

    /// Start the tick thread at the configured tick rate. It polls `input`
    /// once per tick and feeds the resulting events to `tone`, until
    /// [`Host::stop`].
    pub fn spawn_ticker<I, T>(&self, mut input: I, mut tone: T) -> JoinHandle<()>
    where
        I: InputSource + Send + 'static,
        T: ToneSink + Send + 'static,
    {
        let shared = Arc::clone(&self.shared);
        let (interval, rule) = {
            let engine = shared.lock();
            let settings = engine.settings();
            log::info!("Tick thread starting at {} Hz", settings.tick_hz);
            (settings.tick_interval(), settings.end_tone_rule)
        };

        thread::spawn(move || {
            let mut buzzer = Buzzer::new(rule);
            let mut deadline = Instant::now();
            while shared.running.load(Ordering::Acquire) {
                deadline += interval;
                if let Some(wait) = deadline.checked_duration_since(Instant::now()) {
                    thread::sleep(wait);
                }
                let events = shared.tick(&input.poll());
                buzzer.play(&events, &mut tone);
            }
            tone.set_period(0);
            log::info!("Tick thread stopped");
        })
    }

    /// Block until a frame is pending, then paint it into `sink`.
    ///
    /// Returns the number of pixels painted, or `None` once the host has
    /// been stopped.
    pub fn render_next<S: DisplaySink + ?Sized>(&self, sink: &mut S) -> Option<u64> {
        let frame = {
            let mut engine = self.shared.lock();
            while !engine.frame_pending() {
                if !self.is_running() {
                    return None;
                }
                engine = self
                    .shared
                    .frame_ready
                    .wait(engine)
                    .unwrap_or_else(PoisonError::into_inner);
            }
            engine.take_frame()?
        };
        Some(frame.paint(sink))
    }

    /// Stop the tick thread and wake any waiting renderer
    pub fn stop(&self) {
        // Flip the flag under the lock so a renderer cannot miss the wakeup
        let _engine = self.shared.lock();
        self.shared.running.store(false, Ordering::Release);
        self.shared.frame_ready.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::renderer::{Color, FrameBuffer};
    use crate::settings::Settings;

    fn host() -> Host {
        Host::new(Engine::new(Settings::default()).unwrap())
    }

    #[test]
    fn test_tick_wakes_renderer() {
        let host = host();
        let mut fb = FrameBuffer::new(128, 160, Color::BEIGE);
        host.tick(&TickInput::default());
        // Only the player moves: one 21x21 window
        assert_eq!(host.render_next(&mut fb), Some(21 * 21));
        assert!(!host.with_engine(|e| e.frame_pending()));
    }

    #[test]
    fn test_stop_releases_waiting_renderer() {
        let host = host();
        let waiter = {
            let host = host.clone();
            thread::spawn(move || {
                let mut fb = FrameBuffer::new(128, 160, Color::BEIGE);
                host.render_next(&mut fb)
            })
        };
        thread::sleep(Duration::from_millis(20));
        host.stop();
        assert_eq!(waiter.join().unwrap(), None);
        assert!(!host.is_running());
    }

    #[test]
    fn test_ticker_drives_frames() {
        let settings = Settings {
            tick_hz: 500,
            ..Default::default()
        };
        let host = Host::new(Engine::new(settings).unwrap());
        let tones: Vec<u16> = Vec::new();
        let ticker = host.spawn_ticker(Autopilot::new(1), tones);

        let mut fb = FrameBuffer::new(128, 160, Color::BEIGE);
        for _ in 0..5 {
            assert!(host.render_next(&mut fb).is_some());
        }
        host.stop();
        ticker.join().unwrap();
        assert!(host.with_engine(|e| e.state().time_ticks) >= 5);
    }
}
