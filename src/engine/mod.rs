//! Движок столов: чистые переходы над коллекцией столов.
//!
//! Основные объекты:
//!   - `transitions` – функции «коллекция -> новая коллекция»
//!   - `TableManager` – синхронный владелец коллекции и RNG
//!   - `TableService` – асинхронный фронт: загрузка колоды и очередь на стол

pub mod errors;
pub mod service;
pub mod table_manager;
pub mod transitions;

pub use errors::{DeckError, EngineError};
pub use service::TableService;
pub use table_manager::TableManager;

/// RNG интерфейс для engine.
/// Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
