use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::TableId;

/// Простая генерация id столов на основе монотонного счётчика.
#[derive(Debug)]
pub struct IdGenerator {
    table_counter: AtomicU64,
}

impl IdGenerator {
    /// Создать генератор с начальным значением 1.
    pub fn new() -> Self {
        Self {
            table_counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_table_id(&self) -> TableId {
        self.table_counter.fetch_add(1, Ordering::Relaxed)
    }

    /// Учесть id, пришедший снаружи, чтобы не выдать его повторно.
    pub fn observe_table_id(&self, id: TableId) {
        self.table_counter
            .fetch_max(id.saturating_add(1), Ordering::Relaxed);
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
