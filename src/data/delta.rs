use std::time::{Duration, Instant};

/// Longest step handed to the simulation. Anything above this is a
/// stall (suspended laptop, dragged window) rather than a frame.
pub const MAX_DELTA: Duration = Duration::from_secs(1);

pub struct Delta {
    last_call: Instant,
}

impl Delta {
    pub fn new() -> Self {
        Self {
            last_call: Instant::now(),
        }
    }

    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_call);
        self.last_call = now;
        elapsed.min(MAX_DELTA)
    }
}

impl Default for Delta {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_is_bounded() {
        let mut delta = Delta::new();

        if let Some(earlier) = delta.last_call.checked_sub(Duration::from_secs(30)) {
            delta.last_call = earlier;
            assert_eq!(delta.tick(), MAX_DELTA);
        }

        assert!(delta.tick() < MAX_DELTA);
    }
}
