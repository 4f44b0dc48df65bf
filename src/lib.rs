//! Калькулятор рук блэкджека с несколькими столами.
//!
//! Слои:
//! - `domain` – карты, колоды, разбор описания колоды, столы;
//! - `eval` – подсчёт очков руки;
//! - `engine` – переходы состояния столов, менеджер и асинхронный сервис;
//! - `infra` – RNG, id, источники колоды, настройки;
//! - `api` – команды/запросы/DTO для фронта и CLI.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;

pub use domain::{Card, Deck, HandResult, Rank, Suit, Table, TableCollection, TableId};
pub use engine::{DeckError, EngineError, RandomSource, TableManager, TableService};
