//! Инфраструктурный слой вокруг движка столов:
//! - генерация ID;
//! - RNG-реализации для движка;
//! - источники текста колоды;
//! - настройки из окружения.

pub mod config;
pub mod deck_source;
pub mod ids;
pub mod rng;

pub use config::EngineConfig;
pub use deck_source::{DeckSource, FileDeckSource, InMemoryDeckSource, SourceError};
pub use ids::*;
pub use rng::*;
