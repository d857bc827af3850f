use chrono::TimeDelta;
use std::time::Instant;

/// Timing information handed to [`UpdatableItem::update`](crate::renderable::UpdatableItem::update).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTime {
    /// Time since the clock was started.
    pub total: TimeDelta,
    /// Time since the previous frame.
    pub delta: TimeDelta,
    /// Number of frames ticked before this one.
    pub frame: u64,
}

impl FrameTime {
    pub const ZERO: FrameTime = FrameTime {
        total: TimeDelta::zero(),
        delta: TimeDelta::zero(),
        frame: 0,
    };

    /// Total elapsed time in seconds, at millisecond precision.
    pub fn total_seconds(&self) -> f32 {
        self.total.num_milliseconds() as f32 / 1000.0
    }

    pub fn delta_seconds(&self) -> f32 {
        self.delta.num_microseconds().unwrap_or(i64::MAX) as f32 / 1_000_000.0
    }
}

pub struct FrameClock {
    started: Instant,
    last_tick: Instant,
    frame: u64,
}

impl FrameClock {
    pub fn start() -> Self {
        Self::start_at(Instant::now())
    }

    pub fn start_at(now: Instant) -> Self {
        Self {
            started: now,
            last_tick: now,
            frame: 0,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        // Instants earlier than the last tick count as zero elapsed.
        let now = now.max(self.last_tick);
        let time = FrameTime {
            total: to_time_delta(now - self.started),
            delta: to_time_delta(now - self.last_tick),
            frame: self.frame,
        };
        self.last_tick = now;
        self.frame += 1;
        time
    }

    pub fn frames_ticked(&self) -> u64 {
        self.frame
    }
}

fn to_time_delta(duration: std::time::Duration) -> TimeDelta {
    TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX)
}
