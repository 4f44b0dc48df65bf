use serde::{Deserialize, Serialize};

use crate::domain::TableId;
use crate::engine::{RandomSource, TableService};
use crate::infra::deck_source::DeckSource;

use super::dto::CommandResponse;
use super::errors::ApiError;
use super::queries::build_table_view;

/// Команда верхнего уровня.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Создать новый стол.
    CreateTable(CreateTableCommand),

    /// Операция над конкретным столом.
    TableCommand(TableCommand),
}

/// Команда создания стола.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreateTableCommand {
    /// Имя стола. Без имени – «Table N».
    pub name: Option<String>,
}

/// Команды, которые относятся к существующему столу.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TableCommand {
    RemoveTable { table_id: TableId },

    /// Загрузить колоду из источника (файл сохранения).
    LoadDeck { table_id: TableId },

    /// Взять стандартную перемешанную колоду.
    LoadStandardDeck { table_id: TableId },

    /// Новый шу дилера.
    LoadDealerDeck { table_id: TableId },

    DrawPlayerCard { table_id: TableId },
    DrawDealerCard { table_id: TableId },

    /// Карта игроку и дилеру одним обновлением.
    DrawBoth { table_id: TableId },

    /// Посчитать руку из ручного ввода.
    Check { table_id: TableId, input: String },

    /// Сбросить руки.
    Clear { table_id: TableId },

    /// Полный сброс стола.
    ResetTable { table_id: TableId },

    UpdateInput { table_id: TableId, input: String },
}

impl TableCommand {
    pub fn table_id(&self) -> TableId {
        match self {
            TableCommand::RemoveTable { table_id }
            | TableCommand::LoadDeck { table_id }
            | TableCommand::LoadStandardDeck { table_id }
            | TableCommand::LoadDealerDeck { table_id }
            | TableCommand::DrawPlayerCard { table_id }
            | TableCommand::DrawDealerCard { table_id }
            | TableCommand::DrawBoth { table_id }
            | TableCommand::Check { table_id, .. }
            | TableCommand::Clear { table_id }
            | TableCommand::ResetTable { table_id }
            | TableCommand::UpdateInput { table_id, .. } => *table_id,
        }
    }
}

/// Выполнить команду и вернуть свежее состояние затронутого стола.
pub async fn execute<S: DeckSource, R: RandomSource>(
    service: &TableService<S, R>,
    command: Command,
) -> Result<CommandResponse, ApiError> {
    let table_cmd = match command {
        Command::CreateTable(CreateTableCommand { name }) => {
            let table_id = service.create_table(name).await?;
            return Ok(match service.table(table_id).await {
                Some(table) => CommandResponse::TableCreated(build_table_view(&table)),
                None => CommandResponse::Ok,
            });
        }
        Command::TableCommand(cmd) => cmd,
    };

    let table_id = table_cmd.table_id();
    match table_cmd {
        TableCommand::RemoveTable { .. } => {
            service.remove_table(table_id).await;
            return Ok(CommandResponse::TableRemoved(table_id));
        }
        TableCommand::LoadDeck { .. } => service.load_deck(table_id).await,
        TableCommand::LoadStandardDeck { .. } => service.load_standard_deck(table_id).await,
        TableCommand::LoadDealerDeck { .. } => service.load_dealer_deck(table_id).await,
        TableCommand::DrawPlayerCard { .. } => service.draw_player_card(table_id).await?,
        TableCommand::DrawDealerCard { .. } => service.draw_dealer_card(table_id).await,
        TableCommand::DrawBoth { .. } => service.draw_both(table_id).await?,
        TableCommand::Check { input, .. } => service.check(table_id, &input).await?,
        TableCommand::Clear { .. } => service.clear(table_id).await,
        TableCommand::ResetTable { .. } => service.reset_table(table_id).await,
        TableCommand::UpdateInput { input, .. } => service.update_input(table_id, &input).await,
    }

    Ok(match service.table(table_id).await {
        Some(table) => CommandResponse::TableState(build_table_view(&table)),
        None => CommandResponse::Ok,
    })
}
