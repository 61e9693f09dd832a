//! Timing for the loading spinner shown while a request is in flight.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SpinnerMode {
    Spinning,
    Idle,
}

const SPIN_SPEED: f64 = std::f64::consts::TAU;
const MAX_FRAME_DELTA: f64 = 0.25;
const FULL_TURN: f64 = std::f64::consts::TAU;
const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Spinner phase advanced from the browser's frame clock.
///
/// Frame gaps are clamped so a backgrounded tab doesn't jump ahead, and a
/// clock that runs backwards never reverses the spin.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Spinner {
    phase: f64,
    last_tick: Option<f64>,
}

impl Spinner {
    pub fn tick(&mut self, now_seconds: f64, mode: SpinnerMode) {
        let delta = self
            .last_tick
            .map_or(0.0, |last| (now_seconds - last).clamp(0.0, MAX_FRAME_DELTA));

        self.phase = match mode {
            SpinnerMode::Spinning => (self.phase + delta * SPIN_SPEED).rem_euclid(FULL_TURN),
            SpinnerMode::Idle => 0.0,
        };
        self.last_tick = Some(now_seconds);
    }

    pub fn frame(&self) -> &'static str {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let index = (self.phase / FULL_TURN * FRAMES.len() as f64) as usize;
        FRAMES[index % FRAMES.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual}, diff {diff}"
        );
    }

    #[test]
    fn first_tick_starts_the_clock_without_advancing() {
        let mut spinner = Spinner::default();
        spinner.tick(10.0, SpinnerMode::Spinning);

        assert_close(spinner.phase, 0.0);
        assert_eq!(spinner.last_tick, Some(10.0));
        assert_eq!(spinner.frame(), FRAMES[0]);
    }

    #[test]
    fn spinning_advances_and_wraps() {
        let mut spinner = Spinner {
            phase: FULL_TURN - 0.1,
            last_tick: Some(4.0),
        };
        spinner.tick(4.2, SpinnerMode::Spinning);

        let expected = (FULL_TURN - 0.1 + 0.2 * SPIN_SPEED).rem_euclid(FULL_TURN);
        assert_close(spinner.phase, expected);
        assert_eq!(spinner.last_tick, Some(4.2));
    }

    #[test]
    fn idle_resets_the_phase_but_keeps_time() {
        let mut spinner = Spinner {
            phase: 2.25,
            last_tick: Some(1.0),
        };
        spinner.tick(1.2, SpinnerMode::Idle);

        assert_close(spinner.phase, 0.0);
        assert_eq!(spinner.last_tick, Some(1.2));
    }

    #[test]
    fn large_frame_gap_is_clamped() {
        let mut spinner = Spinner {
            phase: 0.0,
            last_tick: Some(3.0),
        };
        spinner.tick(30.0, SpinnerMode::Spinning);

        assert_close(spinner.phase, MAX_FRAME_DELTA * SPIN_SPEED);
    }

    #[test]
    fn backwards_time_does_not_reverse_the_spin() {
        let mut spinner = Spinner {
            phase: 3.5,
            last_tick: Some(10.0),
        };
        spinner.tick(9.0, SpinnerMode::Spinning);

        assert_close(spinner.phase, 3.5);
        assert_eq!(spinner.last_tick, Some(9.0));
    }

    #[test]
    fn frames_step_through_a_full_turn() {
        let spinner = Spinner {
            phase: FULL_TURN / 2.0,
            last_tick: None,
        };
        assert_eq!(spinner.frame(), FRAMES[4]);
    }
}
