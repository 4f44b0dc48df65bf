// src/engine/service.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::table::{Table, TableCollection};
use crate::domain::TableId;
use crate::engine::errors::{DeckError, EngineError};
use crate::engine::table_manager::TableManager;
use crate::engine::RandomSource;
use crate::infra::deck_source::DeckSource;

/// Асинхронная обёртка над `TableManager`.
///
/// - Переходы одного стола выполняются строго по очереди (очередь на стол),
///   в том числе загрузка колоды целиком вместе с ожиданием источника.
/// - Переходы разных столов друг друга не ждут, кроме короткой блокировки
///   снимка на время самого перехода.
/// - Удаление стола в очередь не встаёт: незавершённая загрузка после
///   удаления ничего не делает.
pub struct TableService<S, R: RandomSource> {
    manager: Mutex<TableManager<R>>,
    turns: StdMutex<HashMap<TableId, Arc<Mutex<()>>>>,
    source: S,
}

impl<S: DeckSource, R: RandomSource> TableService<S, R> {
    pub fn new(manager: TableManager<R>, source: S) -> Self {
        Self {
            manager: Mutex::new(manager),
            turns: StdMutex::new(HashMap::new()),
            source,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Снимок всей коллекции.
    pub async fn snapshot(&self) -> TableCollection {
        self.manager.lock().await.tables().clone()
    }

    pub async fn table(&self, table_id: TableId) -> Option<Table> {
        self.manager.lock().await.table(table_id).cloned()
    }

    pub async fn create_table(&self, name: Option<String>) -> Result<TableId, EngineError> {
        self.manager.lock().await.create_table(name)
    }

    pub async fn remove_table(&self, table_id: TableId) {
        self.manager.lock().await.remove_table(table_id);
        self.turns
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&table_id);
    }

    /// Загрузка колоды из источника.
    ///
    /// Единственная точка ожидания: между `begin_load` и `finish_load`.
    /// Ошибка источника идёт тем же путём, что и ошибка разбора.
    pub async fn load_deck(&self, table_id: TableId) {
        let turn = self.turn(table_id);
        let guard = turn.lock().await;

        let started = self.manager.lock().await.begin_load(table_id);
        if started {
            let fetched = self
                .source
                .fetch()
                .await
                .map_err(|err| DeckError::Acquisition(err.to_string()));
            debug!(table_id, ok = fetched.is_ok(), "источник колоды ответил");

            self.manager.lock().await.finish_load(table_id, fetched);
        }

        let gone = !self.manager.lock().await.has_table(table_id);
        drop(guard);
        if gone {
            self.release_turn(table_id, turn);
        }
    }

    pub async fn load_standard_deck(&self, table_id: TableId) {
        self.run(table_id, |m| m.load_standard_deck(table_id)).await
    }

    pub async fn load_dealer_deck(&self, table_id: TableId) {
        self.run(table_id, |m| m.load_dealer_deck(table_id)).await
    }

    pub async fn draw_player_card(&self, table_id: TableId) -> Result<(), EngineError> {
        self.run(table_id, |m| m.draw_player_card(table_id)).await
    }

    pub async fn draw_dealer_card(&self, table_id: TableId) {
        self.run(table_id, |m| m.draw_dealer_card(table_id)).await
    }

    pub async fn draw_both(&self, table_id: TableId) -> Result<(), EngineError> {
        self.run(table_id, |m| m.draw_both(table_id)).await
    }

    pub async fn check(&self, table_id: TableId, input: &str) -> Result<(), EngineError> {
        self.run(table_id, |m| m.check(table_id, input)).await
    }

    pub async fn clear(&self, table_id: TableId) {
        self.run(table_id, |m| m.clear(table_id)).await
    }

    pub async fn reset_table(&self, table_id: TableId) {
        self.run(table_id, |m| m.reset_table(table_id)).await
    }

    pub async fn update_input(&self, table_id: TableId, text: &str) {
        self.run(table_id, |m| m.update_input(table_id, text)).await
    }

    /// Выполнить переход, дождавшись своей очереди на столе.
    async fn run<T>(&self, table_id: TableId, f: impl FnOnce(&mut TableManager<R>) -> T) -> T {
        let turn = self.turn(table_id);
        let guard = turn.lock().await;
        let (out, gone) = {
            let mut manager = self.manager.lock().await;
            let out = f(&mut *manager);
            (out, !manager.has_table(table_id))
        };
        drop(guard);
        if gone {
            self.release_turn(table_id, turn);
        }
        out
    }

    fn turn(&self, table_id: TableId) -> Arc<Mutex<()>> {
        self.turns
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(table_id)
            .or_default()
            .clone()
    }

    /// Очередь стола, которого нет, больше не нужна. Убираем её, только если
    /// в ней никто не ждёт (ссылки есть лишь у карты и у нас).
    fn release_turn(&self, table_id: TableId, turn: Arc<Mutex<()>>) {
        let mut turns = self.turns.lock().unwrap_or_else(PoisonError::into_inner);
        let idle = turns
            .get(&table_id)
            .is_some_and(|queued| Arc::ptr_eq(queued, &turn) && Arc::strong_count(&turn) == 2);
        if idle {
            turns.remove(&table_id);
        }
    }
}
