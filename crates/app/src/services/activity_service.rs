//! Activity service: the operator's view of the event log and notifications.

use std::sync::Arc;

use homeguard_domain::effect::{LogEntry, LogKind, Notification};
use homeguard_domain::error::HomeGuardError;
use homeguard_domain::id::NotificationId;

use crate::ports::{Clock, EventLog, EventPublisher, NotificationStore, Notifier, Page};
use crate::services::emitter::Emitter;

/// Largest page or listing size served in one call.
pub const MAX_PAGE_SIZE: u32 = 100;

pub struct ActivityService<S, C, P, N> {
    store: Arc<S>,
    clock: C,
    emitter: Arc<Emitter<S, P, N>>,
}

impl<S, C, P, N> ActivityService<S, C, P, N>
where
    S: EventLog + NotificationStore + Send + Sync,
    C: Clock,
    P: EventPublisher + Send + Sync,
    N: Notifier + Send + Sync,
{
    pub fn new(store: Arc<S>, clock: C, emitter: Arc<Emitter<S, P, N>>) -> Self {
        Self {
            store,
            clock,
            emitter,
        }
    }

    /// Newest-first page of the event log. Page numbers start at 1 and
    /// `per_page` is clamped into `[1, 100]`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn events(&self, page: u32, per_page: u32) -> Result<Page<LogEntry>, HomeGuardError> {
        self.store
            .page(page.max(1), per_page.clamp(1, MAX_PAGE_SIZE))
            .await
    }

    /// Empty the log and record that it happened.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn clear_events(&self) -> Result<(), HomeGuardError> {
        self.store.clear_log().await?;
        self.emitter
            .log_message(LogKind::Info, "Event log cleared", self.clock.now())
            .await;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn notifications(&self, limit: u32) -> Result<Vec<Notification>, HomeGuardError> {
        self.store.recent(limit.clamp(1, MAX_PAGE_SIZE)).await
    }

    /// # Errors
    ///
    /// Returns [`HomeGuardError::NotFound`] when the notification does not
    /// exist, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn mark_read(&self, id: NotificationId) -> Result<(), HomeGuardError> {
        self.store.mark_read(id).await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn clear_notifications(&self) -> Result<(), HomeGuardError> {
        self.store.clear_notifications().await
    }
}
