//! Frame timing: fixed-step accumulator and FPS counter

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame the accumulator will accept (stalls, tab switches)
pub const MAX_FRAME_DT: f32 = 0.1;

/// Fixed timestep accumulator
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame's elapsed time; returns how many ticks to run now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Leftover time not yet simulated
    pub fn pending(&self) -> f32 {
        self.accumulator
    }
}

const FPS_WINDOW: usize = 60;

/// Rolling FPS over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Record a frame at `now_ms` (milliseconds, monotonic)
    pub fn record(&mut self, now_ms: f64) {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample is the next slot to be overwritten
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = now_ms - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW as f64 - 1.0) * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_frame_runs_one_tick() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(SIM_DT), 1);
        assert!(step.pending() < 1e-6);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(SIM_DT * 0.4), 0);
        assert_eq!(step.advance(SIM_DT * 0.4), 0);
        assert_eq!(step.advance(SIM_DT * 0.4), 1);
    }

    #[test]
    fn test_leftover_carries_over() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(0.04), 2);
        let pending = step.pending();
        assert!(pending > 0.006 && pending < 0.007);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut step = FixedStep::new();
        let ticks = step.advance(5.0);
        assert!((5..=6).contains(&ticks));
        assert!(ticks <= MAX_SUBSTEPS);
        assert!(step.pending() < SIM_DT);
    }

    #[test]
    fn test_bad_dt_ignored() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(-1.0), 0);
        assert_eq!(step.advance(f32::NAN), 0);
        assert_eq!(step.pending(), 0.0);
    }

    #[test]
    fn test_fps_counter() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.fps(), 0);
        // 16ms frames starting at 1s
        for i in 0..120 {
            fps.record(1000.0 + i as f64 * 16.0);
        }
        assert_eq!(fps.fps(), 63);
    }
}
