use std::collections::VecDeque;
use std::time::{Duration, Instant};

// Rate window - timestamps of recent submissions for one page session
#[derive(Debug, Clone)]
pub struct RateWindow {
    timestamps: VecDeque<Instant>, // oldest first
    limit: usize,                  // max submissions allowed
    window: Duration,              // trailing window length
}

impl RateWindow {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            timestamps: VecDeque::new(),
            limit,
            window,
        }
    }

    // Drop timestamps that fell out of the trailing window
    pub fn prune(&mut self, now: Instant) {
        while let Some(&oldest) = self.timestamps.front() {
            if now.saturating_duration_since(oldest) < self.window {
                break;
            }
            self.timestamps.pop_front();
        }
    }

    // Record a submission at `now` if the window has room.
    // Returns false (and records nothing) once the limit is reached.
    pub fn try_record(&mut self, now: Instant) -> bool {
        self.prune(now);

        if self.timestamps.len() >= self.limit {
            return false;
        }

        self.timestamps.push_back(now);
        true
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    // Time until the oldest entry expires, i.e. when a slot frees up
    pub fn retry_after(&self, now: Instant) -> Option<Duration> {
        if self.timestamps.len() < self.limit {
            return None;
        }
        self.timestamps
            .front()
            .map(|&oldest| self.window.saturating_sub(now.saturating_duration_since(oldest)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: Duration = Duration::from_secs(60);

    #[test]
    fn fourth_attempt_inside_window_is_refused() {
        let start = Instant::now();
        let mut window = RateWindow::new(3, MINUTE);

        assert!(window.try_record(start));
        assert!(window.try_record(start + Duration::from_secs(10)));
        assert!(window.try_record(start + Duration::from_secs(20)));
        assert!(!window.try_record(start + Duration::from_secs(30)));
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn slot_frees_once_oldest_entry_is_a_minute_old() {
        let start = Instant::now();
        let mut window = RateWindow::new(3, MINUTE);
        for i in 0..3 {
            assert!(window.try_record(start + Duration::from_secs(i)));
        }

        assert!(!window.try_record(start + Duration::from_millis(59_999)));
        assert!(window.try_record(start + MINUTE));
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn retry_after_reports_time_until_oldest_expires() {
        let start = Instant::now();
        let mut window = RateWindow::new(1, MINUTE);
        assert!(window.is_empty());
        assert_eq!(window.retry_after(start), None);

        window.try_record(start);
        assert_eq!(
            window.retry_after(start + Duration::from_secs(15)),
            Some(Duration::from_secs(45))
        );
    }
}
