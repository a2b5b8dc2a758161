use std::time::Duration;

/// Rolling window of recent frame durations.
#[derive(Debug)]
pub struct FrameTimer {
    history: Vec<Duration>,
    capacity: usize,
    index: usize,
    filled: bool,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: vec![Duration::ZERO; capacity],
            capacity,
            index: 0,
            filled: false,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        self.history[self.index] = dt;
        self.index = (self.index + 1) % self.capacity;
        if self.index == 0 {
            self.filled = true;
        }
    }

    fn window(&self) -> &[Duration] {
        &self.history[..self.count()]
    }

    pub fn average(&self) -> Duration {
        match self.count() {
            0 => Duration::ZERO,
            n => self.window().iter().sum::<Duration>() / n as u32,
        }
    }

    pub fn max(&self) -> Duration {
        self.window().iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.window().iter().copied().min().unwrap_or(Duration::ZERO)
    }

    pub fn count(&self) -> usize {
        if self.filled { self.capacity } else { self.index }
    }
}

/// Frames-per-second over consecutive one-second windows.
///
/// Durations accumulate until they reach a second; the rate then becomes the
/// number of samples in that window minus one, and a new window starts.
#[derive(Debug, Default)]
pub struct FpsCounter {
    window: Vec<Duration>,
    fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the new rate when a window closes.
    pub fn record(&mut self, dt: Duration) -> Option<u32> {
        self.window.push(dt);
        if self.window.iter().sum::<Duration>() < Duration::from_secs(1) {
            return None;
        }
        self.fps = self.window.len().saturating_sub(1) as u32;
        self.window.clear();
        tracing::debug!(fps = self.fps, "fps window closed");
        Some(self.fps)
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
