//! Event log port: the operator-facing history of alerts and commands.

use std::future::Future;

use serde::Serialize;

use homeguard_domain::effect::LogEntry;
use homeguard_domain::error::HomeGuardError;

/// One page of a newest-first listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.per_page))
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Append-only log of [`LogEntry`] rows.
pub trait EventLog {
    fn append(&self, entry: LogEntry) -> impl Future<Output = Result<LogEntry, HomeGuardError>> + Send;

    /// Newest first. `page` is 1-based.
    fn page(
        &self,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<Page<LogEntry>, HomeGuardError>> + Send;

    fn clear_log(&self) -> impl Future<Output = Result<(), HomeGuardError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: u32, per_page: u32, total: u64) -> Page<()> {
        Page {
            items: Vec::new(),
            page,
            per_page,
            total,
        }
    }

    #[test]
    fn should_round_total_pages_up() {
        assert_eq!(page(1, 10, 0).total_pages(), 0);
        assert_eq!(page(1, 10, 10).total_pages(), 1);
        assert_eq!(page(1, 10, 11).total_pages(), 2);
    }

    #[test]
    fn should_report_neighbours() {
        let first = page(1, 10, 25);
        assert!(first.has_next());
        assert!(!first.has_prev());
        let last = page(3, 10, 25);
        assert!(!last.has_next());
        assert!(last.has_prev());
    }
}
