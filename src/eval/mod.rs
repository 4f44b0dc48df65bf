//! Подсчёт очков руки блэкджека.
//!
//! Основная функция:
//!   `score(cards) -> HandResult`

pub mod hand_total;

pub use hand_total::{base_points, score};
