use serde::{Deserialize, Serialize};

use crate::domain::TableId;
use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Колода игрока пуста – блокирующее предупреждение, состояние не менялось.
    DeckExhausted { table_id: TableId, message: String },

    /// Неправильные входные данные (битая карта, повтор id и т.п.).
    BadRequest(String),
}

impl ApiError {
    /// Текст для показа пользователю.
    pub fn message(&self) -> &str {
        match self {
            ApiError::DeckExhausted { message, .. } => message,
            ApiError::BadRequest(message) => message,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match &err {
            EngineError::DeckExhausted(table_id) => ApiError::DeckExhausted {
                table_id: *table_id,
                message: err.to_string(),
            },
            _ => ApiError::BadRequest(err.to_string()),
        }
    }
}
