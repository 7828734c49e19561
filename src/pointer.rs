// Turns successive pointer positions into a speed value for spawning. No smoothing:
// a long pause between moves reads as a slow move regardless of distance.

use vecmath::{vec2_len, vec2_sub, Vector2};

use crate::config::FieldConfig;

pub struct PointerTracker {
    last_pos: Vector2<f64>,
    last_time_ms: f64,
    speed_scale: f64,
    min_interval_ms: f64,
}

impl PointerTracker {
    pub fn new(now_ms: f64, config: &FieldConfig) -> PointerTracker {
        PointerTracker {
            last_pos: [0.0, 0.0],
            last_time_ms: now_ms,
            speed_scale: config.pointer_speed_scale,
            min_interval_ms: config.min_pointer_interval_ms,
        }
    }

    // Records a move to (x, y) at `now_ms` and returns the speed since the previous one
    pub fn track(&mut self, x: f64, y: f64, now_ms: f64) -> f64 {
        let pos = [x, y];
        let elapsed = (now_ms - self.last_time_ms).max(self.min_interval_ms);
        let distance = vec2_len(vec2_sub(pos, self.last_pos));
        self.last_pos = pos;
        self.last_time_ms = now_ms;
        distance / elapsed * self.speed_scale
    }
}
