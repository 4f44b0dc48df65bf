use serde::{Deserialize, Serialize};

use crate::domain::hand::HandResult;
use crate::domain::TableId;

/// DTO стола для фронта: карты уже в отображаемом виде (`A♥`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableViewDto {
    pub table_id: TableId,
    pub name: String,
    /// Сколько карт осталось в колоде игрока.
    pub deck_remaining: usize,
    /// Сколько карт осталось в шу дилера.
    pub dealer_deck_remaining: usize,
    pub player_cards: Vec<String>,
    pub dealer_cards: Vec<String>,
    pub input: String,
    pub result: Option<HandResult>,
    pub dealer: Option<HandResult>,
    pub is_loading: bool,
    pub load_error: Option<String>,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Стола с таким id нет, ничего не изменилось.
    Ok,

    /// Создан новый стол.
    TableCreated(TableViewDto),

    /// Обновлённое состояние стола.
    TableState(TableViewDto),

    /// Стол удалён (или его и не было).
    TableRemoved(TableId),
}
