//! Duplicate killing-blow suppression.
//!
//! The host may report more than one killing blow for the same target (for
//! example a finishing hit and a trailing condition tick). Only the first one
//! inside the window counts.

#[derive(Debug, Clone, Default)]
pub struct KillDedup {
    window_ms: u64,
    last_counted: Option<(u64, u64)>,
}

impl KillDedup {
    /// `window_ms == 0` disables suppression.
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_counted: None,
        }
    }

    /// Target id `0` means the host did not name a target; such kills are
    /// never matched against each other.
    pub fn is_duplicate(&self, target: u64, time: u64) -> bool {
        if self.window_ms == 0 || target == 0 {
            return false;
        }
        match self.last_counted {
            Some((last_target, last_time)) => {
                last_target == target && time.abs_diff(last_time) < self.window_ms
            }
            None => false,
        }
    }

    pub fn record(&mut self, target: u64, time: u64) {
        self.last_counted = Some((target, time));
    }

    pub fn clear(&mut self) {
        self.last_counted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_target_inside_window() {
        let mut dedup = KillDedup::new(1000);
        assert!(!dedup.is_duplicate(7, 100));
        dedup.record(7, 100);
        assert!(dedup.is_duplicate(7, 600));
        assert!(!dedup.is_duplicate(7, 1100));
        assert!(!dedup.is_duplicate(8, 600));
    }

    #[test]
    fn test_disabled_window() {
        let mut dedup = KillDedup::new(0);
        dedup.record(7, 100);
        assert!(!dedup.is_duplicate(7, 100));
    }

    #[test]
    fn test_clear_forgets_target() {
        let mut dedup = KillDedup::new(1000);
        dedup.record(7, 100);
        dedup.clear();
        assert!(!dedup.is_duplicate(7, 100));
    }

    #[test]
    fn test_unnamed_target_never_duplicate() {
        let mut dedup = KillDedup::new(1000);
        dedup.record(0, 100);
        assert!(!dedup.is_duplicate(0, 300));
    }
}
