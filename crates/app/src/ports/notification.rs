//! Notification ports: storage of notifications and their outbound delivery.

use std::future::Future;

use homeguard_domain::effect::Notification;
use homeguard_domain::error::HomeGuardError;
use homeguard_domain::id::NotificationId;

/// Persisted notifications shown in the operator inbox.
pub trait NotificationStore {
    fn store(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<Notification, HomeGuardError>> + Send;

    /// Newest first.
    fn recent(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Notification>, HomeGuardError>> + Send;

    /// # Errors
    ///
    /// Returns [`HomeGuardError::NotFound`] when `id` does not exist.
    fn mark_read(&self, id: NotificationId) -> impl Future<Output = Result<(), HomeGuardError>> + Send;

    fn clear_notifications(&self) -> impl Future<Output = Result<(), HomeGuardError>> + Send;
}

/// Outbound delivery failed. Never converted into [`HomeGuardError`].
#[derive(Debug, thiserror::Error)]
#[error("notification delivery failed: {reason}")]
pub struct DeliveryError {
    pub reason: String,
}

/// Sends a notification outside the hub (email, push, ...).
pub trait Notifier {
    fn deliver(
        &self,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

impl<T: Notifier + Send + Sync> Notifier for std::sync::Arc<T> {
    fn deliver(
        &self,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send {
        (**self).deliver(notification)
    }
}
