//! Emitter: turns engine side effects into log rows, notifications and
//! hub events.
//!
//! Nothing here fails the caller. The control state has already been saved
//! when effects are applied, so a failed log write or delivery is reported
//! with `tracing::warn!` and the cycle still succeeds.

use std::sync::Arc;

use homeguard_domain::effect::{LogEntry, LogKind, Notification, SideEffect};
use homeguard_domain::engine::ControlState;
use homeguard_domain::event::HubEvent;
use homeguard_domain::time::Timestamp;

use crate::ports::{EventLog, EventPublisher, NotificationStore, Notifier};

pub struct Emitter<S, P, N> {
    store: Arc<S>,
    publisher: P,
    notifier: N,
}

impl<S, P, N> Emitter<S, P, N>
where
    S: EventLog + NotificationStore + Send + Sync,
    P: EventPublisher + Send + Sync,
    N: Notifier + Send + Sync,
{
    pub fn new(store: Arc<S>, publisher: P, notifier: N) -> Self {
        Self {
            store,
            publisher,
            notifier,
        }
    }

    /// Apply every log and notification effect, in order.
    pub async fn apply(&self, effects: &[SideEffect], now: Timestamp) {
        for effect in effects {
            match effect {
                SideEffect::PersistState => {}
                SideEffect::Log { kind, message } => {
                    self.log(LogEntry::new(*kind, message.clone(), now)).await;
                }
                SideEffect::Notify {
                    title,
                    message,
                    category,
                } => {
                    self.notify(Notification::new(title.clone(), message.clone(), *category, now))
                        .await;
                }
            }
        }
    }

    /// Append a log row and announce it.
    pub async fn log(&self, entry: LogEntry) {
        match self.store.append(entry).await {
            Ok(entry) => self.publish(HubEvent::LogRecorded(entry)).await,
            Err(err) => tracing::warn!(error = %err, "failed to append event log entry"),
        }
    }

    /// Shortcut for [`log`](Self::log) with a fresh entry.
    pub async fn log_message(&self, kind: LogKind, message: impl Into<String>, now: Timestamp) {
        self.log(LogEntry::new(kind, message, now)).await;
    }

    async fn notify(&self, notification: Notification) {
        if let Err(err) = self.notifier.deliver(&notification).await {
            tracing::warn!(error = %err, title = %notification.title, "failed to deliver notification");
        }
        match self.store.store(notification).await {
            Ok(stored) => self.publish(HubEvent::Notified(stored)).await,
            Err(err) => tracing::warn!(error = %err, "failed to store notification"),
        }
    }

    pub async fn actuators_changed(&self, state: &ControlState) {
        self.publish(HubEvent::ActuatorsChanged {
            actuators: state.actuators,
            mode: state.mode,
        })
        .await;
    }

    async fn publish(&self, event: HubEvent) {
        if let Err(err) = self.publisher.publish(event).await {
            tracing::warn!(error = %err, "failed to publish hub event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::InProcessEventBus;
    use crate::ports::Page;
    use crate::services::fakes::{InMemoryStore, RecordingNotifier};
    use homeguard_domain::effect::NotificationCategory;
    use homeguard_domain::time::now;

    fn emitter(
        store: &Arc<InMemoryStore>,
        notifier: &Arc<RecordingNotifier>,
    ) -> (Emitter<InMemoryStore, Arc<InProcessEventBus>, Arc<RecordingNotifier>>, Arc<InProcessEventBus>) {
        let bus = Arc::new(InProcessEventBus::new(16));
        (
            Emitter::new(Arc::clone(store), Arc::clone(&bus), Arc::clone(notifier)),
            bus,
        )
    }

    #[tokio::test]
    async fn should_store_logs_and_notifications_when_applied() {
        let store = Arc::new(InMemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let (emitter, bus) = emitter(&store, &notifier);
        let mut rx = bus.subscribe();

        emitter
            .apply(
                &[
                    SideEffect::PersistState,
                    SideEffect::log(LogKind::Alert, "Fire detected!"),
                    SideEffect::notify("Fire Alert", "fire", NotificationCategory::Fire),
                ],
                now(),
            )
            .await;

        let Page { items, .. } = store.page(1, 10).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].message, "Fire detected!");
        assert_eq!(store.recent(10).await.unwrap().len(), 1);
        assert_eq!(notifier.delivered(), vec!["Fire Alert".to_string()]);
        assert!(matches!(rx.recv().await.unwrap(), HubEvent::LogRecorded(_)));
        assert!(matches!(rx.recv().await.unwrap(), HubEvent::Notified(_)));
    }

    #[tokio::test]
    async fn should_still_store_notification_when_delivery_fails() {
        let store = Arc::new(InMemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::failing());
        let (emitter, _bus) = emitter(&store, &notifier);

        emitter
            .apply(
                &[SideEffect::notify("Door Alert", "open", NotificationCategory::Door)],
                now(),
            )
            .await;

        assert_eq!(store.recent(10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_swallow_log_failures() {
        let store = Arc::new(InMemoryStore::default());
        store.fail_writes(true);
        let notifier = Arc::new(RecordingNotifier::default());
        let (emitter, _bus) = emitter(&store, &notifier);

        emitter.log_message(LogKind::Info, "lost", now()).await;

        store.fail_writes(false);
        assert_eq!(store.page(1, 10).await.unwrap().total, 0);
    }
}
