use serde::{Deserialize, Serialize};

use crate::domain::card::format_cards;
use crate::domain::table::Table;
use crate::domain::TableId;
use crate::engine::{RandomSource, TableService};
use crate::infra::deck_source::DeckSource;

use super::dto::TableViewDto;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Получить состояние стола.
    GetTable { table_id: TableId },

    /// Получить все столы в порядке создания.
    ListTables,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Table(Option<TableViewDto>),
    Tables(Vec<TableViewDto>),
}

/// Сформировать DTO стола.
pub fn build_table_view(table: &Table) -> TableViewDto {
    TableViewDto {
        table_id: table.id,
        name: table.name.clone(),
        deck_remaining: table.deck.len(),
        dealer_deck_remaining: table.dealer_deck.len(),
        player_cards: format_cards(&table.drawn_cards),
        dealer_cards: format_cards(&table.dealer_hand),
        input: table.input.clone(),
        result: table.result,
        dealer: table.dealer,
        is_loading: table.is_loading,
        load_error: table.load_error.clone(),
    }
}

/// Выполнить запрос на текущем снимке.
pub async fn query<S: DeckSource, R: RandomSource>(
    service: &TableService<S, R>,
    query: Query,
) -> QueryResponse {
    match query {
        Query::GetTable { table_id } => {
            QueryResponse::Table(service.table(table_id).await.as_ref().map(build_table_view))
        }
        Query::ListTables => {
            let snapshot = service.snapshot().await;
            QueryResponse::Tables(snapshot.iter().map(build_table_view).collect())
        }
    }
}
