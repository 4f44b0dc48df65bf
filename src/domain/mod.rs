//! Доменная модель калькулятора блэкджека: карты, колоды, руки, столы.

pub mod card;
pub mod deck;
pub mod deck_text;
pub mod hand;
pub mod table;

// Базовые идентификаторы
pub type TableId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use card::*;
pub use deck::*;
pub use deck_text::parse_deck_text;
pub use hand::*;
pub use table::*;
