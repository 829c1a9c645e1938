//! Local notification center
//!
//! In-process facility for one-shot local notifications. Registration
//! requires a one-time authorization grant, requested once at process
//! startup. A background dispatcher task fires due notifications and
//! removes them; fired notifications never repeat.

use crate::config;
use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// A one-shot notification registration
#[derive(Debug, Clone, serde::Serialize)]
pub struct NotificationRequest {
    pub id: String,
    pub title: String,
    pub body: String,
    pub trigger_time: DateTime<Utc>,
}

impl NotificationRequest {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        trigger_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            body: body.into(),
            trigger_time,
        }
    }
}

/// Notification center with authorization gate and background dispatcher
#[derive(Clone, Default)]
pub struct NotificationCenter {
    authorized: Arc<AtomicBool>,
    pending: Arc<Mutex<Vec<NotificationRequest>>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the one-time authorization grant. Until this has been
    /// called, every registration fails with a permission error.
    pub async fn request_authorization(&self) -> bool {
        self.authorized.store(true, Ordering::SeqCst);
        tracing::info!("Notification authorization granted");
        true
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::SeqCst)
    }

    /// Register a one-shot notification
    pub async fn add_request(&self, request: NotificationRequest) -> Result<()> {
        if !self.is_authorized() {
            return Err(AppError::PermissionDenied);
        }

        tracing::debug!(
            "Registered notification {} for {}",
            request.id,
            request.trigger_time
        );

        let mut pending = self.pending.lock().await;
        pending.push(request);
        Ok(())
    }

    /// Snapshot of the pending (not yet fired) registrations
    pub async fn pending_requests(&self) -> Vec<NotificationRequest> {
        self.pending.lock().await.clone()
    }

    /// Start the background dispatcher
    pub fn start_dispatcher(self) {
        tokio::spawn(async move {
            tracing::info!("Starting notification dispatcher");

            let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(
                config::DISPATCH_INTERVAL_SECS,
            ));

            loop {
                interval.tick().await;
                self.dispatch_due(Utc::now()).await;
            }
        });
    }

    /// Fire every pending notification whose trigger time has passed.
    /// Returns the number fired.
    pub async fn dispatch_due(&self, now: DateTime<Utc>) -> usize {
        let mut pending = self.pending.lock().await;

        let mut fired = 0;
        pending.retain(|request| {
            if request.trigger_time <= now {
                tracing::info!("Notification: {} - {}", request.title, request.body);
                fired += 1;
                false
            } else {
                true
            }
        });

        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_add_request_denied_without_authorization() {
        let center = NotificationCenter::new();

        let request = NotificationRequest::new("Reminder", "Do it", Utc::now());
        let result = center.add_request(request).await;

        assert!(matches!(result, Err(AppError::PermissionDenied)));
        assert!(center.pending_requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_request_after_authorization() {
        let center = NotificationCenter::new();

        assert!(center.request_authorization().await);

        let request = NotificationRequest::new("Reminder", "Do it", Utc::now());
        center.add_request(request).await.unwrap();

        let pending = center.pending_requests().await;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].title, "Reminder");
    }

    #[tokio::test]
    async fn test_dispatch_fires_only_due_requests() {
        let center = NotificationCenter::new();
        center.request_authorization().await;

        let now = Utc::now();
        center
            .add_request(NotificationRequest::new("Past", "", now - Duration::minutes(5)))
            .await
            .unwrap();
        center
            .add_request(NotificationRequest::new("Future", "", now + Duration::hours(1)))
            .await
            .unwrap();

        let fired = center.dispatch_due(now).await;
        assert_eq!(fired, 1);

        let pending = center.pending_requests().await;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].title, "Future");

        // Fired requests never repeat
        let fired_again = center.dispatch_due(now).await;
        assert_eq!(fired_again, 0);
    }
}
