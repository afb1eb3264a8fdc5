//! Button input sources

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::TickInput;

/// The four board switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Move left
    S1,
    /// Fire bullet slot 0
    S2,
    /// Fire bullet slot 1
    S3,
    /// Move right
    S4,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::S1, Button::S2, Button::S3, Button::S4];
}

/// Anything that can report held buttons once per tick
pub trait InputSource {
    fn is_pressed(&mut self, button: Button) -> bool;

    /// Sample all buttons into a tick input
    fn poll(&mut self) -> TickInput {
        TickInput {
            left: self.is_pressed(Button::S1),
            fire_a: self.is_pressed(Button::S2),
            fire_b: self.is_pressed(Button::S3),
            right: self.is_pressed(Button::S4),
        }
    }
}

/// Fixed input for every tick
impl InputSource for TickInput {
    fn is_pressed(&mut self, button: Button) -> bool {
        match button {
            Button::S1 => self.left,
            Button::S2 => self.fire_a,
            Button::S3 => self.fire_b,
            Button::S4 => self.right,
        }
    }

    fn poll(&mut self) -> TickInput {
        *self
    }
}

/// Replays a recorded list of inputs, then releases everything
#[derive(Debug, Clone, Default)]
pub struct Script {
    inputs: Vec<TickInput>,
    next: usize,
}

impl Script {
    pub fn new(inputs: Vec<TickInput>) -> Self {
        Self { inputs, next: 0 }
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.inputs.len()
    }
}

impl InputSource for Script {
    fn is_pressed(&mut self, button: Button) -> bool {
        self.inputs
            .get(self.next)
            .copied()
            .unwrap_or_default()
            .is_pressed(button)
    }

    fn poll(&mut self) -> TickInput {
        let input = self.inputs.get(self.next).copied().unwrap_or_default();
        self.next += 1;
        input
    }
}

/// Random player for headless runs.
///
/// Holds a steering direction for a random number of ticks before picking
/// a new one, and taps the fire buttons at random.
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    steer: Option<Button>,
    hold: u32,
    fire_chance: f64,
    current: TickInput,
}

impl Autopilot {
    const MIN_HOLD: u32 = 3;
    const MAX_HOLD: u32 = 12;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            steer: None,
            hold: 0,
            fire_chance: 0.3,
            current: TickInput::default(),
        }
    }

    /// Probability of pressing each fire button on a given tick
    pub fn with_fire_chance(mut self, chance: f64) -> Self {
        self.fire_chance = chance.clamp(0.0, 1.0);
        self
    }

    fn next_input(&mut self) -> TickInput {
        if self.hold == 0 {
            self.steer = match self.rng.random_range(0..3) {
                0 => Some(Button::S1),
                1 => Some(Button::S4),
                _ => None,
            };
            self.hold = self.rng.random_range(Self::MIN_HOLD..=Self::MAX_HOLD);
        }
        self.hold -= 1;

        TickInput {
            left: self.steer == Some(Button::S1),
            right: self.steer == Some(Button::S4),
            fire_a: self.rng.random_bool(self.fire_chance),
            fire_b: self.rng.random_bool(self.fire_chance),
        }
    }
}

impl InputSource for Autopilot {
    fn is_pressed(&mut self, button: Button) -> bool {
        self.current.is_pressed(button)
    }

    fn poll(&mut self) -> TickInput {
        self.current = self.next_input();
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_map_to_tick_input() {
        let mut held = TickInput {
            left: true,
            fire_b: true,
            ..Default::default()
        };
        assert!(held.is_pressed(Button::S1));
        assert!(!held.is_pressed(Button::S2));
        assert!(held.is_pressed(Button::S3));
        assert!(!held.is_pressed(Button::S4));
    }

    #[test]
    fn test_script_releases_when_done() {
        let fire = TickInput {
            fire_a: true,
            ..Default::default()
        };
        let mut script = Script::new(vec![fire, fire]);
        assert_eq!(script.poll(), fire);
        assert_eq!(script.poll(), fire);
        assert!(script.is_finished());
        assert_eq!(script.poll(), TickInput::default());
    }

    #[test]
    fn test_autopilot_is_deterministic() {
        let mut a = Autopilot::new(42);
        let mut b = Autopilot::new(42);
        for _ in 0..100 {
            assert_eq!(a.poll(), b.poll());
        }
    }

    #[test]
    fn test_autopilot_never_steers_both_ways() {
        let mut pilot = Autopilot::new(7).with_fire_chance(1.0);
        for _ in 0..200 {
            let input = pilot.poll();
            assert!(!(input.left && input.right));
            assert!(input.fire_a && input.fire_b);
            assert_eq!(pilot.is_pressed(Button::S2), input.fire_a);
        }
    }
}
