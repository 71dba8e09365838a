//! Host-side glue shared by the web and native entry points
//!
//! The simulation never sleeps or reads clocks itself; the host turns wall
//! time into a number of ticks and polls the viewport before each one.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Viewport;

/// Where the rain is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowMode {
    /// Cover the whole screen (screensaver mode)
    Root,
    /// A window of the given size
    Windowed { width: u32, height: u32 },
}

impl Default for WindowMode {
    fn default() -> Self {
        let (width, height) = DEFAULT_WINDOW_SIZE;
        WindowMode::Windowed { width, height }
    }
}

impl WindowMode {
    /// Initial viewport; `screen` is the full screen size if the host knows it
    pub fn viewport(&self, screen: Option<(u32, u32)>) -> Viewport {
        match *self {
            WindowMode::Root => {
                let (w, h) = screen.unwrap_or(ROOT_FALLBACK_SIZE);
                Viewport::new(w, h)
            }
            WindowMode::Windowed { width, height } => Viewport::new(width, height),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowMode::Root => "root",
            WindowMode::Windowed { .. } => "windowed",
        }
    }
}

/// Fixed-interval tick accumulator
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval_ms: f64,
    accumulator_ms: f64,
    last_time_ms: Option<f64>,
    max_ticks: u32,
}

impl FrameClock {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1) as f64,
            accumulator_ms: 0.0,
            last_time_ms: None,
            max_ticks: MAX_TICKS_PER_FRAME,
        }
    }

    /// Feed a timestamp (ms); returns how many ticks are due.
    ///
    /// The first call only primes the clock and yields one tick so the first
    /// frame is never blank.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_time_ms.replace(now_ms) else {
            return 1;
        };

        // Clamp long stalls (background tabs, suspended laptops)
        let elapsed = (now_ms - last).clamp(0.0, self.interval_ms * self.max_ticks as f64);
        self.accumulator_ms += elapsed;

        let mut ticks = 0;
        while self.accumulator_ms >= self.interval_ms && ticks < self.max_ticks {
            self.accumulator_ms -= self.interval_ms;
            ticks += 1;
        }
        ticks
    }
}
