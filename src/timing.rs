//! Frame pacing and frame-rate instrumentation.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Fixed-timestep throttle: sleeps out the remainder of a target frame
/// period and reports the elapsed delta.
pub struct FramePacer {
    step: Duration,
    prev: Instant,
}

impl FramePacer {
    /// Uncapped until a target is set.
    pub fn new() -> Self {
        Self {
            step: Duration::ZERO,
            prev: Instant::now(),
        }
    }

    /// Target frame rate; 0 disables the cap.
    pub fn set_target_fps(&mut self, fps: u32) {
        self.step = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / fps
        };
    }

    /// Block until the frame deadline, then return the elapsed delta in
    /// seconds. On-time frames advance the schedule by exactly one step so
    /// rounding error never accumulates; an overrun frame resets the
    /// schedule to now instead of compounding a growing debt.
    pub fn tick(&mut self) -> f32 {
        let prev = self.prev;
        let now = Instant::now();
        let deadline = prev + self.step;
        if !self.step.is_zero() && deadline > now {
            std::thread::sleep(deadline - now);
            self.prev = deadline;
        } else {
            self.prev = now;
        }
        (self.prev - prev).as_secs_f32()
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// FPS Counter
// ============================================================================

/// FPS counter with rolling average, for the demo overlay.
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    sample_count: usize,
}

impl FpsCounter {
    /// Create a new FPS counter with specified sample window
    pub fn new(sample_count: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: Instant::now(),
            sample_count,
        }
    }

    /// Call at the start of each frame to record timing
    /// Returns (delta_time, current_fps, average_fps)
    pub fn tick(&mut self) -> (f32, f32, f32) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        // Add to rolling window
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }

        let current_fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };
        let avg_dt: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        let avg_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        (dt, current_fps, avg_fps)
    }

    /// Get the average frame time in milliseconds
    pub fn avg_frame_time_ms(&self) -> f32 {
        let avg_dt: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        avg_dt * 1000.0
    }

    /// Get min/max FPS from sample window
    pub fn min_max_fps(&self) -> (f32, f32) {
        if self.frame_times.is_empty() {
            return (0.0, 0.0);
        }
        let min_dt = self
            .frame_times
            .iter()
            .cloned()
            .fold(f32::INFINITY, f32::min);
        let max_dt = self.frame_times.iter().cloned().fold(0.0, f32::max);
        let max_fps = if min_dt > 0.0 { 1.0 / min_dt } else { 0.0 };
        let min_fps = if max_dt > 0.0 { 1.0 / max_dt } else { 0.0 };
        (min_fps, max_fps)
    }
}
