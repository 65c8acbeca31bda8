//! Board service: settings handed to the sensor board on each poll.

use std::sync::Arc;

use homeguard_domain::board::SensorBoardSettings;
use homeguard_domain::effect::LogKind;
use homeguard_domain::error::HomeGuardError;

use crate::ports::{BoardSettingsRepository, Clock, EventLog, EventPublisher, NotificationStore, Notifier};
use crate::services::emitter::Emitter;

pub struct BoardService<S, C, P, N> {
    store: Arc<S>,
    clock: C,
    emitter: Arc<Emitter<S, P, N>>,
}

impl<S, C, P, N> BoardService<S, C, P, N>
where
    S: BoardSettingsRepository + EventLog + NotificationStore + Send + Sync,
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

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn settings(&self) -> Result<SensorBoardSettings, HomeGuardError> {
        self.store.load_settings().await
    }

    /// Store a new upload interval, clamped into `[1000, 10000]` ms.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn set_upload_interval(
        &self,
        interval_ms: i64,
    ) -> Result<SensorBoardSettings, HomeGuardError> {
        let mut settings = self.store.load_settings().await?;
        let applied = settings.set_upload_interval(interval_ms);
        self.save(
            settings,
            format!("Upload interval set to {applied} ms"),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn set_monitoring(&self, monitoring: bool) -> Result<SensorBoardSettings, HomeGuardError> {
        let mut settings = self.store.load_settings().await?;
        settings.monitoring = monitoring;
        let verb = if monitoring { "STARTED" } else { "STOPPED" };
        self.save(settings, format!("Sensor monitoring {verb} (manual)"))
            .await
    }

    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn set_encryption(&self, enabled: bool) -> Result<SensorBoardSettings, HomeGuardError> {
        let mut settings = self.store.load_settings().await?;
        settings.encryption_enabled = enabled;
        let verb = if enabled { "ENABLED" } else { "DISABLED" };
        self.save(settings, format!("Encryption {verb} (manual)")).await
    }

    async fn save(
        &self,
        settings: SensorBoardSettings,
        message: String,
    ) -> Result<SensorBoardSettings, HomeGuardError> {
        self.store.save_settings(&settings).await?;
        self.emitter
            .log_message(LogKind::Control, message, self.clock.now())
            .await;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::InProcessEventBus;
    use crate::ports::SystemClock;
    use crate::services::fakes::{InMemoryStore, RecordingNotifier};

    fn service(
        store: &Arc<InMemoryStore>,
    ) -> BoardService<InMemoryStore, SystemClock, InProcessEventBus, RecordingNotifier> {
        let emitter = Arc::new(Emitter::new(
            Arc::clone(store),
            InProcessEventBus::new(16),
            RecordingNotifier::default(),
        ));
        BoardService::new(Arc::clone(store), SystemClock, emitter)
    }

    #[tokio::test]
    async fn should_return_defaults_when_nothing_saved() {
        let store = Arc::new(InMemoryStore::default());
        let settings = service(&store).settings().await.unwrap();
        assert_eq!(settings, SensorBoardSettings::default());
    }

    #[tokio::test]
    async fn should_clamp_and_log_upload_interval() {
        let store = Arc::new(InMemoryStore::default());
        let service = service(&store);

        let settings = service.set_upload_interval(200).await.unwrap();
        assert_eq!(settings.upload_interval_ms, 1000);
        assert_eq!(service.settings().await.unwrap().upload_interval_ms, 1000);

        let page = store.page(1, 10).await.unwrap();
        assert_eq!(page.items[0].kind, LogKind::Control);
        assert_eq!(page.items[0].message, "Upload interval set to 1000 ms");
    }

    #[tokio::test]
    async fn should_toggle_monitoring_and_encryption() {
        let store = Arc::new(InMemoryStore::default());
        let service = service(&store);
        service.set_monitoring(true).await.unwrap();
        let settings = service.set_encryption(false).await.unwrap();
        assert!(settings.monitoring);
        assert!(!settings.encryption_enabled);
    }

    #[tokio::test]
    async fn should_not_change_settings_when_store_fails() {
        let store = Arc::new(InMemoryStore::default());
        let service = service(&store);
        store.fail_writes(true);
        assert!(service.set_monitoring(true).await.is_err());
        store.fail_writes(false);
        assert!(!service.settings().await.unwrap().monitoring);
    }
}
