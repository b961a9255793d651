use crate::model::Severity;
use std::time::Duration;
use tokio::time::Instant;

/// A transient message for the user. Only one is shown at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    expires_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity, lifetime: Duration) -> Self {
        Self {
            message: message.into(),
            severity,
            expires_at: Instant::now() + lifetime,
        }
    }

    pub fn success(message: impl Into<String>, lifetime: Duration) -> Self {
        Self::new(message, Severity::Success, lifetime)
    }

    pub fn error(message: impl Into<String>, lifetime: Duration) -> Self {
        Self::new(message, Severity::Error, lifetime)
    }

    pub fn info(message: impl Into<String>, lifetime: Duration) -> Self {
        Self::new(message, Severity::Info, lifetime)
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Time left before it dismisses itself
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_expires_after_lifetime() {
        let notification = Notification::success("Added to favorites", Duration::from_millis(3000));
        assert!(!notification.is_expired());
        assert_eq!(notification.remaining(), Duration::from_millis(3000));

        tokio::time::advance(Duration::from_millis(2999)).await;
        assert!(!notification.is_expired());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(notification.is_expired());
        assert_eq!(notification.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_constructors_set_severity() {
        let lifetime = Duration::from_secs(1);
        assert_eq!(Notification::error("x", lifetime).severity, Severity::Error);
        assert_eq!(Notification::info("x", lifetime).severity, Severity::Info);
    }
}
