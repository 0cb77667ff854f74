//! Looping time base for scenes.
//!
//! A [`CycleTime`] only exposes functions of `elapsed mod period`. Scenes that read time solely
//! through it repeat exactly every period.

use std::f64::consts::TAU;

/// Loop length of a scene, in whole seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cycle {
    seconds: u32,
}

impl Cycle {
    /// Loop of `seconds` (at least one).
    pub const fn seconds(seconds: u32) -> Self {
        Self {
            seconds: if seconds == 0 { 1 } else { seconds },
        }
    }

    /// Loop length in seconds.
    pub fn period(self) -> f64 {
        f64::from(self.seconds)
    }

    /// Position inside the loop after `elapsed` seconds. Non-finite or negative elapsed time maps
    /// to the loop start.
    pub fn at(self, elapsed: f64) -> CycleTime {
        let period = self.period();
        let elapsed = if elapsed.is_finite() {
            elapsed.max(0.0)
        } else {
            0.0
        };
        CycleTime {
            phase: elapsed.rem_euclid(period),
            period,
        }
    }
}

/// Phase within one loop plus the loop length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleTime {
    phase: f64,
    period: f64,
}

impl CycleTime {
    /// Seconds since the loop started, in `[0, period)`.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Loop length in seconds.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// `phase / period`, in `[0, 1)`.
    pub fn fraction(&self) -> f64 {
        self.phase / self.period
    }

    /// Linear ramp from 0 at `start` to 1 at `start + duration` seconds, clamped.
    pub fn progress(&self, start: f64, duration: f64) -> f64 {
        if duration <= 0.0 {
            return if self.phase >= start { 1.0 } else { 0.0 };
        }
        ((self.phase - start) / duration).clamp(0.0, 1.0)
    }

    /// Sine completing `harmonic` periods per loop, shifted by `offset` radians.
    pub fn wave(&self, harmonic: u32, offset: f64) -> f64 {
        (TAU * f64::from(harmonic) * self.fraction() + offset).sin()
    }

    /// Sawtooth in `[0, 1)` wrapping `repeats` times per loop, shifted by `offset` (in wraps).
    pub fn loop_fraction(&self, repeats: u32, offset: f64) -> f64 {
        (f64::from(repeats) * self.fraction() + offset).rem_euclid(1.0)
    }

    /// Index of the current slot when the loop is split into `slots` equal steps.
    pub fn step(&self, slots: u32) -> u32 {
        if slots == 0 {
            return 0;
        }
        ((self.fraction() * f64::from(slots)) as u32).min(slots - 1)
    }

    /// On/off toggle changing state `2 * blinks` times per loop; on in the first half of each
    /// blink.
    pub fn blink(&self, blinks: u32) -> bool {
        self.step(blinks.saturating_mul(2)) % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_wraps_on_period() {
        let c = Cycle::seconds(8);
        let t = c.at(8.3);
        assert!((t.phase() - 0.3).abs() < 1e-9);
        assert!((t.fraction() - 0.3 / 8.0).abs() < 1e-12);
        assert_eq!(c.at(16.0).phase(), 0.0);
    }

    #[test]
    fn invalid_elapsed_maps_to_start() {
        let c = Cycle::seconds(4);
        assert_eq!(c.at(-3.0).phase(), 0.0);
        assert_eq!(c.at(f64::NAN).phase(), 0.0);
        assert_eq!(c.at(f64::INFINITY).phase(), 0.0);
    }

    #[test]
    fn zero_length_cycle_is_clamped() {
        assert_eq!(Cycle::seconds(0).period(), 1.0);
    }

    #[test]
    fn helpers_repeat_exactly_after_one_period() {
        let c = Cycle::seconds(6);
        for k in 0..64 {
            let e = f64::from(k) * 0.125;
            let a = c.at(e);
            let b = c.at(e + 6.0);
            assert_eq!(a, b);
            assert_eq!(a.wave(3, 0.5), b.wave(3, 0.5));
            assert_eq!(a.loop_fraction(5, 0.25), b.loop_fraction(5, 0.25));
            assert_eq!(a.step(9), b.step(9));
            assert_eq!(a.blink(4), b.blink(4));
        }
    }

    #[test]
    fn progress_is_clamped_ramp() {
        let t = Cycle::seconds(10).at(3.0);
        assert_eq!(t.progress(1.0, 4.0), 0.5);
        assert_eq!(t.progress(5.0, 1.0), 0.0);
        assert_eq!(t.progress(0.0, 1.0), 1.0);
        assert_eq!(t.progress(3.0, 0.0), 1.0);
    }

    #[test]
    fn step_and_blink_partition_the_loop() {
        let c = Cycle::seconds(4);
        assert_eq!(c.at(0.0).step(4), 0);
        assert_eq!(c.at(1.0).step(4), 1);
        assert_eq!(c.at(3.999).step(4), 3);
        assert_eq!(c.at(1.0).step(0), 0);
        assert!(c.at(0.1).blink(2));
        assert!(!c.at(1.1).blink(2));
        assert!(c.at(2.1).blink(2));
    }
}
