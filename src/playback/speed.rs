//! Playback speed choices
//!
//! Speed is restricted to a fixed set of multipliers offered by the speed
//! selector. The tick interval is the base interval divided by the multiplier.

use std::time::Duration;

/// Default interval between ticks at 1.0x
pub const BASE_TICK_INTERVAL: Duration = Duration::from_millis(30);

/// Playback speed multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackSpeed {
    /// 0.5x
    Half,
    /// 0.8x
    Slow,
    /// 1.0x
    #[default]
    Normal,
    /// 1.2x
    Quick,
    /// 1.5x
    OneAndHalf,
    /// 2.0x
    Double,
    /// 3.0x
    Triple,
}

impl PlaybackSpeed {
    /// All speeds in selector order
    pub const ALL: [PlaybackSpeed; 7] = [
        PlaybackSpeed::Half,
        PlaybackSpeed::Slow,
        PlaybackSpeed::Normal,
        PlaybackSpeed::Quick,
        PlaybackSpeed::OneAndHalf,
        PlaybackSpeed::Double,
        PlaybackSpeed::Triple,
    ];

    /// Look up a speed by selector index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this speed in the selector
    pub fn index(self) -> usize {
        match self {
            PlaybackSpeed::Half => 0,
            PlaybackSpeed::Slow => 1,
            PlaybackSpeed::Normal => 2,
            PlaybackSpeed::Quick => 3,
            PlaybackSpeed::OneAndHalf => 4,
            PlaybackSpeed::Double => 5,
            PlaybackSpeed::Triple => 6,
        }
    }

    /// Multiplier in tenths, so interval math stays in integers
    fn tenths(self) -> u32 {
        match self {
            PlaybackSpeed::Half => 5,
            PlaybackSpeed::Slow => 8,
            PlaybackSpeed::Normal => 10,
            PlaybackSpeed::Quick => 12,
            PlaybackSpeed::OneAndHalf => 15,
            PlaybackSpeed::Double => 20,
            PlaybackSpeed::Triple => 30,
        }
    }

    /// Speed multiplier (1.0 = normal)
    pub fn multiplier(self) -> f64 {
        self.tenths() as f64 / 10.0
    }

    /// Selector label, e.g. "1.5x"
    pub fn label(self) -> &'static str {
        match self {
            PlaybackSpeed::Half => "0.5x",
            PlaybackSpeed::Slow => "0.8x",
            PlaybackSpeed::Normal => "1.0x",
            PlaybackSpeed::Quick => "1.2x",
            PlaybackSpeed::OneAndHalf => "1.5x",
            PlaybackSpeed::Double => "2.0x",
            PlaybackSpeed::Triple => "3.0x",
        }
    }

    /// Tick interval for this speed: `base / multiplier`
    pub fn interval(self, base: Duration) -> Duration {
        base * 10 / self.tenths()
    }
}

impl std::fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_is_base_over_multiplier() {
        for speed in PlaybackSpeed::ALL {
            let interval = speed.interval(BASE_TICK_INTERVAL);
            let expected = BASE_TICK_INTERVAL.as_secs_f64() / speed.multiplier();
            assert!(
                (interval.as_secs_f64() - expected).abs() < 1e-9,
                "{} gave {:?}",
                speed,
                interval
            );
        }
    }

    #[test]
    fn test_interval_values() {
        let expected_us = [60_000, 37_500, 30_000, 25_000, 20_000, 15_000, 10_000];
        for (speed, us) in PlaybackSpeed::ALL.iter().zip(expected_us) {
            assert_eq!(speed.interval(BASE_TICK_INTERVAL), Duration::from_micros(us));
        }
    }

    #[test]
    fn test_index_round_trip() {
        for (i, speed) in PlaybackSpeed::ALL.iter().enumerate() {
            assert_eq!(speed.index(), i);
            assert_eq!(PlaybackSpeed::from_index(i), Some(*speed));
        }
        assert_eq!(PlaybackSpeed::from_index(7), None);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = PlaybackSpeed::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["0.5x", "0.8x", "1.0x", "1.2x", "1.5x", "2.0x", "3.0x"]);
        assert_eq!(PlaybackSpeed::default(), PlaybackSpeed::Normal);
        assert_eq!(PlaybackSpeed::default().index(), 2);
    }
}
