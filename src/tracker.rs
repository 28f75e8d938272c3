use crate::status::StatusCode;

/// Last-seen status and error text for one tracked submission.
///
/// Each check-and-update happens in a single call, so a value is announced at
/// most once until it changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeTracker {
    last_status: Option<StatusCode>,
    last_error: Option<String>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` and records `current` if it differs from the last status.
    pub fn observe_status(&mut self, current: StatusCode) -> bool {
        if self.last_status == Some(current) {
            return false;
        }
        self.last_status = Some(current);
        true
    }

    /// Whether `status` is the last announced one. Does not record anything.
    pub fn is_current(&self, status: StatusCode) -> bool {
        self.last_status == Some(status)
    }

    /// Returns `true` and records `text` if it differs from the last error.
    pub fn observe_error(&mut self, text: &str) -> bool {
        if self.last_error.as_deref() == Some(text) {
            return false;
        }
        self.last_error = Some(text.to_string());
        true
    }

    /// Forgets the last error after a clean iteration.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn last_status(&self) -> Option<StatusCode> {
        self.last_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_status_is_new() {
        let mut tracker = ChangeTracker::new();
        assert!(tracker.observe_status(StatusCode::Reviewing));
        assert_eq!(tracker.last_status(), Some(StatusCode::Reviewing));
    }

    #[test]
    fn repeated_status_is_reported_once() {
        let mut tracker = ChangeTracker::new();
        let seen: Vec<bool> = [
            StatusCode::Reviewing,
            StatusCode::Reviewing,
            StatusCode::Reviewing,
            StatusCode::Approved,
            StatusCode::Approved,
        ]
        .into_iter()
        .map(|code| tracker.observe_status(code))
        .collect();
        assert_eq!(seen, vec![true, false, false, true, false]);
    }

    #[test]
    fn status_can_flip_back() {
        let mut tracker = ChangeTracker::new();
        assert!(tracker.observe_status(StatusCode::Rejected));
        assert!(tracker.observe_status(StatusCode::Reviewing));
        assert!(tracker.observe_status(StatusCode::Rejected));
    }

    #[test]
    fn is_current_does_not_record() {
        let mut tracker = ChangeTracker::new();
        assert!(!tracker.is_current(StatusCode::Approved));
        assert_eq!(tracker.last_status(), None);
        assert!(tracker.observe_status(StatusCode::Approved));
        assert!(tracker.is_current(StatusCode::Approved));
        assert!(!tracker.is_current(StatusCode::Rejected));
    }

    #[test]
    fn error_slot_is_independent() {
        let mut tracker = ChangeTracker::new();
        assert!(tracker.observe_error("boom"));
        assert!(!tracker.observe_error("boom"));
        assert!(tracker.observe_status(StatusCode::Approved));
        assert!(tracker.observe_error("different"));
        assert!(!tracker.observe_error("different"));
    }

    #[test]
    fn cleared_error_is_reported_again() {
        let mut tracker = ChangeTracker::new();
        assert!(tracker.observe_error("boom"));
        tracker.clear_error();
        assert!(tracker.observe_error("boom"));
    }
}
