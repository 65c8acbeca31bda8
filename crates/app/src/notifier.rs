//! Notifier that records deliveries in the trace output.
//!
//! Used when no outbound channel is configured: notifications stay in the
//! inbox and are visible in the logs.

use std::future::Future;

use homeguard_domain::effect::Notification;

use crate::ports::{DeliveryError, Notifier};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn deliver(
        &self,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send {
        tracing::info!(
            title = %notification.title,
            category = %notification.category,
            message = %notification.message,
            "notification"
        );
        async { Ok(()) }
    }
}
