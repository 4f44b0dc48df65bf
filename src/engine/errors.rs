use crate::domain::card::MalformedCardError;
use crate::domain::TableId;

use thiserror::Error;

/// Ошибки загрузки колоды. На границе движка превращаются в `load_error`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("не удалось получить описание колоды: {0}")]
    Acquisition(String),

    #[error("в описании колоды не найдено ни одной карты")]
    EmptyDeck,

    #[error(transparent)]
    MalformedCard(#[from] MalformedCardError),
}

/// Ошибки переходов над столами, которые видит вызывающий код.
///
/// Если переход вернул ошибку, коллекция столов не меняется.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("В колоде игрока за столом {0} не осталось карт. Загрузите колоду или возьмите стандартную")]
    DeckExhausted(TableId),

    #[error("Стол с id={0} уже существует")]
    DuplicateTable(TableId),

    #[error(transparent)]
    MalformedCard(#[from] MalformedCardError),
}
