//! Host-facing entry points
//!
//! The host drives two calls:
//! - `advance_one_tick` from the periodic tick handler
//! - `render_frame_if_pending` (or `take_frame` + `Frame::paint`) from the
//!   main loop whenever it wakes up
//!
//! Each rendered frame reflects exactly one tick's worth of updates: taking a
//! frame commits pending positions and snapshots the scene in one step.

use crate::error::Result;
use crate::renderer::{DisplaySink, Frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Outcome, TickInput, tick};

#[derive(Debug, Clone)]
pub struct Engine {
    state: GameState,
    frame_pending: bool,
}

impl Engine {
    pub fn new(settings: Settings) -> Result<Self> {
        Ok(Self {
            state: GameState::new(settings)?,
            frame_pending: false,
        })
    }

    /// Run one physics/lifecycle step and flag a frame for rendering
    pub fn advance_one_tick(&mut self, input: &TickInput) -> Vec<GameEvent> {
        let events = tick(&mut self.state, input);
        self.frame_pending = true;
        events
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    /// Commit pending positions and snapshot the scene, if a frame is due.
    ///
    /// This is the only step that must be excluded from the tick handler;
    /// painting the returned frame can run concurrently with later ticks.
    pub fn take_frame(&mut self) -> Option<Frame> {
        if !self.frame_pending {
            return None;
        }
        self.frame_pending = false;
        self.state.scene.commit_positions();
        Some(
            Frame::capture(
                &self.state.scene,
                self.state.settings.background,
                self.state.mouth,
                self.state.settings.screen_max(),
            )
            .with_banner(self.state.banner()),
        )
    }

    /// Render one frame if the tick handler flagged one
    pub fn render_frame_if_pending<S: DisplaySink + ?Sized>(&mut self, sink: &mut S) -> bool {
        match self.take_frame() {
            Some(frame) => {
                frame.paint(sink);
                true
            }
            None => false,
        }
    }

    /// Paint the whole screen from the current positions (start-up draw)
    pub fn draw_all<S: DisplaySink + ?Sized>(&self, sink: &mut S) -> u64 {
        Frame::full_screen(
            &self.state.scene,
            self.state.settings.background,
            self.state.mouth,
            self.state.settings.screen_max(),
        )
        .with_banner(self.state.banner())
        .paint(sink)
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn is_ended(&self) -> bool {
        self.state.is_ended()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }

    pub fn is_won(&self) -> bool {
        self.outcome() == Some(Outcome::Won)
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
