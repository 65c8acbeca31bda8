//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod clock;
pub mod event_bus;
pub mod event_log;
pub mod notification;
pub mod storage;

pub use clock::{Clock, SystemClock};
pub use event_bus::EventPublisher;
pub use event_log::{EventLog, Page};
pub use notification::{DeliveryError, NotificationStore, Notifier};
pub use storage::{
    BoardSettingsRepository, ControlRepository, SnapshotRepository, Store, ToggleRepository,
};
