use log::warn;

/// Host timestamps (ms) are multiplied by this to get scene time.
pub const DEFAULT_TIME_SCALE: f32 = 0.0002;

/// Largest frame delta handed to the camera, in seconds.
/// Keeps a backgrounded tab from finishing a transition in one jump.
pub const MAX_FRAME_DT: f32 = 0.25;

/// Scene time and wall-clock delta for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Scaled, monotonically non-decreasing scene time.
    pub time: f32,
    /// Wall seconds since the previous tick, capped at [`MAX_FRAME_DT`].
    pub dt: f32,
}

/// Converts host frame timestamps into scene time.
/// Scene time never decreases: a timestamp earlier than the last one
/// leaves it unchanged for that frame.
#[derive(Debug, Clone)]
pub struct SceneClock {
    time_scale: f32,
    last_timestamp: Option<f64>,
    time: f32,
}

impl SceneClock {
    pub fn new(time_scale: f32) -> Self {
        Self {
            time_scale,
            last_timestamp: None,
            time: 0.0,
        }
    }

    /// Advance to the host timestamp (milliseconds).
    pub fn tick(&mut self, timestamp_ms: f64) -> FrameTime {
        let dt = match self.last_timestamp {
            Some(last) if timestamp_ms < last => {
                warn!(
                    "host timestamp went backwards ({} ms -> {} ms); holding scene time",
                    last, timestamp_ms
                );
                return FrameTime { time: self.time, dt: 0.0 };
            }
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);
        self.time = self.time.max((timestamp_ms * self.time_scale as f64) as f32);
        FrameTime {
            time: self.time,
            dt: dt.min(MAX_FRAME_DT),
        }
    }

    /// Scene time as of the last tick.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }
}

impl Default for SceneClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE)
    }
}
