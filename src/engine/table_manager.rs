// src/engine/table_manager.rs

use crate::domain::table::{Table, TableCollection};
use crate::domain::TableId;
use crate::engine::errors::{DeckError, EngineError};
use crate::engine::transitions;
use crate::engine::RandomSource;
use crate::infra::ids::IdGenerator;

/// Менеджер столов:
/// - хранит текущий снимок коллекции столов;
/// - владеет RNG и генератором id;
/// - каждый метод заменяет снимок целиком результатом перехода из `transitions`.
///
/// Наблюдатели видят только целые снимки (`tables()`), промежуточных
/// состояний нет.
pub struct TableManager<R: RandomSource> {
    tables: TableCollection,
    rng: R,
    ids: IdGenerator,
    player_deck_on_create: bool,
}

impl<R: RandomSource> TableManager<R> {
    /// Создать пустой менеджер.
    pub fn new(rng: R) -> Self {
        Self {
            tables: TableCollection::new(),
            rng,
            ids: IdGenerator::new(),
            player_deck_on_create: false,
        }
    }

    /// Выдавать ли новым столам сразу стандартную колоду игрока.
    pub fn with_player_deck_on_create(mut self, enabled: bool) -> Self {
        self.player_deck_on_create = enabled;
        self
    }

    /// Текущий снимок.
    pub fn tables(&self) -> &TableCollection {
        &self.tables
    }

    /// Есть ли стол с таким id.
    pub fn has_table(&self, table_id: TableId) -> bool {
        self.tables.contains(table_id)
    }

    pub fn table(&self, table_id: TableId) -> Option<&Table> {
        self.tables.get(table_id)
    }

    /// Создать стол со свежим id. Без имени – «Table N».
    pub fn create_table(&mut self, name: Option<String>) -> Result<TableId, EngineError> {
        let id = self.ids.next_table_id();
        let name = name.unwrap_or_else(|| format!("Table {}", self.tables.len() + 1));
        let table = transitions::create_table(id, name, self.player_deck_on_create, &mut self.rng);

        self.tables = transitions::add_table(&self.tables, table)?;
        Ok(id)
    }

    /// Добавить готовый стол.
    pub fn add_table(&mut self, table: Table) -> Result<(), EngineError> {
        self.ids.observe_table_id(table.id);
        self.tables = transitions::add_table(&self.tables, table)?;
        Ok(())
    }

    pub fn remove_table(&mut self, table_id: TableId) {
        self.tables = transitions::remove_table(&self.tables, table_id);
    }

    /// Загрузить колоду из уже полученного текста.
    pub fn load_deck(&mut self, table_id: TableId, source_text: &str) {
        self.tables = transitions::load_deck(&self.tables, table_id, source_text, &mut self.rng);
    }

    /// Первая половина асинхронной загрузки. `false`, если стола нет.
    pub fn begin_load(&mut self, table_id: TableId) -> bool {
        if !self.tables.contains(table_id) {
            return false;
        }
        self.tables = transitions::begin_load(&self.tables, table_id);
        true
    }

    /// Вторая половина асинхронной загрузки.
    pub fn finish_load(&mut self, table_id: TableId, fetched: Result<String, DeckError>) {
        self.tables = transitions::finish_load(&self.tables, table_id, fetched, &mut self.rng);
    }

    pub fn load_standard_deck(&mut self, table_id: TableId) {
        self.tables = transitions::load_standard_deck(&self.tables, table_id, &mut self.rng);
    }

    pub fn load_dealer_deck(&mut self, table_id: TableId) {
        self.tables = transitions::load_dealer_deck(&self.tables, table_id, &mut self.rng);
    }

    pub fn draw_player_card(&mut self, table_id: TableId) -> Result<(), EngineError> {
        self.tables = transitions::draw_player_card(&self.tables, table_id)?;
        Ok(())
    }

    pub fn draw_dealer_card(&mut self, table_id: TableId) {
        self.tables = transitions::draw_dealer_card(&self.tables, table_id, &mut self.rng);
    }

    pub fn draw_both(&mut self, table_id: TableId) -> Result<(), EngineError> {
        self.tables = transitions::draw_both(&self.tables, table_id, &mut self.rng)?;
        Ok(())
    }

    pub fn check(&mut self, table_id: TableId, input: &str) -> Result<(), EngineError> {
        self.tables = transitions::check(&self.tables, table_id, input)?;
        Ok(())
    }

    pub fn clear(&mut self, table_id: TableId) {
        self.tables = transitions::clear(&self.tables, table_id);
    }

    pub fn reset_table(&mut self, table_id: TableId) {
        self.tables = transitions::reset_table(&self.tables, table_id);
    }

    pub fn update_input(&mut self, table_id: TableId, text: &str) {
        self.tables = transitions::update_input(&self.tables, table_id, text);
    }
}
