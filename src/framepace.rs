use std::time::{Duration, Instant};

/// Where frames come from, standing in for the host's per-refresh callback.
///
/// The loop calls `begin_frame` before doing a frame's work and `end_frame` after it.
/// `end_frame` returns once the next frame is due.
pub trait TickSource {
    fn begin_frame(&mut self);
    fn end_frame(&mut self);

    /// Duration of the current frame so far, in seconds
    fn frametime(&self) -> f32 {
        0.0
    }

    /// Measured frames per second, `0` when the source doesn't track time
    fn framerate(&self) -> f32 {
        0.0
    }
}

/// Paces frames to a fixed framerate using wall-clock time.
///
/// Keeps the start of the current and previous frame so the measured framerate reflects
/// the whole period, pacing included.
pub struct Framepacer {
    instants: [Instant; 2],
    current: usize,
    limit_frametime: f32,
}

impl Framepacer {
    /// `framerate` of `0` runs as fast as possible
    pub fn new(framerate: u32) -> Self {
        let limit_frametime = if framerate == 0 {
            0.0
        } else {
            1.0 / framerate as f32
        };

        Self {
            instants: [Instant::now(); 2],
            current: 0,
            limit_frametime,
        }
    }

    fn previous(&self) -> usize {
        (self.current + 1) % 2
    }
}

impl TickSource for Framepacer {
    fn frametime(&self) -> f32 {
        self.instants[self.current].elapsed().as_secs_f32()
    }

    /// Frames per second over the last full frame period
    fn framerate(&self) -> f32 {
        let period = self.instants[self.current]
            .duration_since(self.instants[self.previous()])
            .as_secs_f32();
        if period > 0.0 {
            1.0 / period
        } else {
            0.0
        }
    }

    fn begin_frame(&mut self) {
        self.current = self.previous();
        self.instants[self.current] = Instant::now();
    }

    fn end_frame(&mut self) {
        let limit_frametime = self.limit_frametime;
        if limit_frametime > f32::EPSILON && limit_frametime.is_finite() {
            const ACCURACY: f32 = 0.0001; // 100 microseconds
            let sleep_time = limit_frametime - self.frametime() - ACCURACY;

            if sleep_time > 0.0 {
                std::thread::sleep(Duration::from_secs_f32(sleep_time));
            }

            while self.frametime() < limit_frametime {
                std::thread::yield_now();
            }
        }
    }
}

/// Ticks immediately, for stepping the loop deterministically
#[derive(Default)]
pub struct Unpaced {
    pub frames: u64,
}

impl TickSource for Unpaced {
    fn begin_frame(&mut self) {}

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}
