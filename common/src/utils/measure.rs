//! Measuring the time of operations

use std::time::{Duration, Instant};

/// Logs the time elapsed since its creation when dropped.
pub struct MeasureTime(Instant);

impl MeasureTime {
    pub fn new() -> Self {
        Self(Instant::now())
    }
}

impl Default for MeasureTime {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate to whole milliseconds, good enough for a single round trip.
fn millis(elapsed: Duration) -> Duration {
    Duration::from_millis(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

impl Drop for MeasureTime {
    fn drop(&mut self) {
        log::info!(
            "Command took {}",
            humantime::format_duration(millis(self.0.elapsed()))
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn truncates_to_millis() {
        assert_eq!(
            millis(Duration::from_micros(1_500_700)),
            Duration::from_millis(1_500)
        );
        assert_eq!(millis(Duration::MAX), Duration::from_millis(u64::MAX));
    }
}
