//! Tone feedback
//!
//! A single square-wave buzzer driven by period. Game events map to
//! periods; the last event of a tick that asks for a tone wins, and a tick
//! with no such event leaves the buzzer alone.

use serde::{Deserialize, Serialize};

use crate::sim::{GameEvent, Outcome};

/// Periods for bullet slots 0 and 1
pub const FIRE_PERIODS: [u16; 2] = [800, 850];
/// Enemy kill tone: base minus a step per point of score
pub const KILL_BASE_PERIOD: u16 = 2000;
pub const KILL_PERIOD_STEP: u16 = 100;
/// Center of the end-of-game sweep
pub const END_BASE_PERIOD: u16 = 2000;

/// Tone output device. A period of zero means silence.
pub trait ToneSink {
    fn set_period(&mut self, period: u16);
}

/// Logs tone changes at debug level
#[derive(Debug, Default)]
pub struct LogTone {
    last: Option<u16>,
}

impl ToneSink for LogTone {
    fn set_period(&mut self, period: u16) {
        if self.last != Some(period) {
            if period == 0 {
                log::debug!("Tone off");
            } else {
                log::debug!("Tone period {}", period);
            }
            self.last = Some(period);
        }
    }
}

/// Records every period, for tests and replays
impl ToneSink for Vec<u16> {
    fn set_period(&mut self, period: u16) {
        self.push(period);
    }
}

/// When the end-of-game sweep sounds.
///
/// The original firmware wrote `ended && !loss & (count % 100)`, which
/// binds as a bitwise AND with a 0/1 flag and so only sounds on odd
/// counters. `NonZeroRemainder` is the reading that was most likely meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EndToneRule {
    #[default]
    AsWritten,
    NonZeroRemainder,
}

impl EndToneRule {
    pub fn sounds(self, counter: u32) -> bool {
        match self {
            EndToneRule::AsWritten => (counter % 100) & 1 == 1,
            EndToneRule::NonZeroRemainder => counter % 100 != 0,
        }
    }
}

/// Event-to-tone mapping
#[derive(Debug, Clone, Default)]
pub struct Buzzer {
    pub rule: EndToneRule,
    period: u16,
}

impl Buzzer {
    pub fn new(rule: EndToneRule) -> Self {
        Self { rule, period: 0 }
    }

    /// Period currently playing
    pub fn period(&self) -> u16 {
        self.period
    }

    /// Tone one event asks for, if any
    pub fn period_for_event(&self, event: &GameEvent) -> Option<u16> {
        match *event {
            GameEvent::Silence | GameEvent::Victory => Some(0),
            GameEvent::BulletFired { slot } => FIRE_PERIODS.get(slot).copied(),
            GameEvent::EnemyDestroyed { score, .. } => Some(KILL_BASE_PERIOD.saturating_sub(
                KILL_PERIOD_STEP.saturating_mul(u16::try_from(score).unwrap_or(u16::MAX)),
            )),
            GameEvent::EndingPulse { counter, outcome } => {
                if !self.rule.sounds(counter) {
                    return None;
                }
                let counter = u16::try_from(counter).unwrap_or(u16::MAX);
                Some(match outcome {
                    Outcome::Won => END_BASE_PERIOD.saturating_add(counter),
                    Outcome::Lost => END_BASE_PERIOD.saturating_sub(counter),
                })
            }
            GameEvent::BulletExpired { .. }
            | GameEvent::EnemySpawned { .. }
            | GameEvent::EnemyEscaped { .. }
            | GameEvent::PlayerHit => None,
        }
    }

    /// Resulting tone for a tick's events (last request wins)
    pub fn period_for(&self, events: &[GameEvent]) -> Option<u16> {
        events.iter().rev().find_map(|e| self.period_for_event(e))
    }

    /// Apply a tick's events to `sink`
    pub fn play<T: ToneSink + ?Sized>(
        &mut self,
        events: &[GameEvent],
        sink: &mut T,
    ) -> Option<u16> {
        let period = self.period_for(events)?;
        self.period = period;
        sink.set_period(period);
        Some(period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_tones() {
        let buzzer = Buzzer::default();
        let events = [GameEvent::Silence, GameEvent::BulletFired { slot: 0 }];
        assert_eq!(buzzer.period_for(&events), Some(800));

        let events = [
            GameEvent::Silence,
            GameEvent::BulletFired { slot: 0 },
            GameEvent::BulletFired { slot: 1 },
        ];
        assert_eq!(buzzer.period_for(&events), Some(850));
    }

    #[test]
    fn test_kill_tone_drops_with_score() {
        let buzzer = Buzzer::default();
        let kill = |score| GameEvent::EnemyDestroyed { slot: 0, score };
        assert_eq!(buzzer.period_for(&[GameEvent::Silence, kill(1)]), Some(1900));
        assert_eq!(buzzer.period_for(&[kill(7)]), Some(1300));
        assert_eq!(buzzer.period_for(&[kill(400)]), Some(0));
    }

    #[test]
    fn test_victory_silences() {
        let buzzer = Buzzer::default();
        let events = [
            GameEvent::Silence,
            GameEvent::EnemyDestroyed { slot: 0, score: 8 },
            GameEvent::Victory,
        ];
        assert_eq!(buzzer.period_for(&events), Some(0));
    }

    #[test]
    fn test_quiet_events_leave_tone() {
        let buzzer = Buzzer::default();
        assert_eq!(buzzer.period_for(&[GameEvent::EnemyEscaped { slot: 0 }]), None);
        assert_eq!(buzzer.period_for(&[]), None);
    }

    #[test]
    fn test_end_rule_as_written_sounds_on_odd_counters() {
        let rule = EndToneRule::AsWritten;
        assert!(rule.sounds(1));
        assert!(!rule.sounds(2));
        assert!(rule.sounds(33));
        assert!(!rule.sounds(100));
        assert!(!rule.sounds(101 + 1));
    }

    #[test]
    fn test_end_rule_non_zero_remainder() {
        let rule = EndToneRule::NonZeroRemainder;
        assert!(rule.sounds(1));
        assert!(rule.sounds(2));
        assert!(!rule.sounds(0));
        assert!(!rule.sounds(300));
    }

    #[test]
    fn test_end_sweep_direction() {
        let buzzer = Buzzer::default();
        let pulse = |counter, outcome| GameEvent::EndingPulse { counter, outcome };
        let won = pulse(5, Outcome::Won);
        let lost = pulse(5, Outcome::Lost);
        assert_eq!(buzzer.period_for(&[won]), Some(2005));
        assert_eq!(buzzer.period_for(&[lost]), Some(1995));

        let even = pulse(6, Outcome::Won);
        assert_eq!(buzzer.period_for(&[even]), None);
    }

    #[test]
    fn test_play_records_periods() {
        let mut buzzer = Buzzer::default();
        let mut sink: Vec<u16> = Vec::new();
        buzzer.play(&[GameEvent::Silence, GameEvent::BulletFired { slot: 1 }], &mut sink);
        buzzer.play(&[GameEvent::EnemyEscaped { slot: 0 }], &mut sink);
        buzzer.play(&[GameEvent::Silence], &mut sink);
        assert_eq!(sink, vec![850, 0]);
        assert_eq!(buzzer.period(), 0);
    }
}
