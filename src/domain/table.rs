use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::deck::Deck;
use crate::domain::hand::HandResult;
use crate::domain::TableId;

/// Состояние одного стола.
///
/// Меняется только через переходы из `engine::transitions`;
/// `result`/`dealer` всегда соответствуют текущей руке (или `None`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: TableId,
    pub name: String,

    /// Колода игрока (может быть пустой, пока не загружена).
    pub deck: Deck,
    /// Рука игрока в порядке выдачи.
    pub drawn_cards: Vec<Card>,

    /// Шу дилера: при опустошении пополняется новой колодой.
    pub dealer_deck: Deck,
    pub dealer_hand: Vec<Card>,

    /// Ручной ввод руки; после выдачи зеркалит `drawn_cards`.
    pub input: String,

    /// Последний подсчёт руки игрока.
    pub result: Option<HandResult>,
    /// Последний подсчёт руки дилера.
    pub dealer: Option<HandResult>,

    pub is_loading: bool,
    pub load_error: Option<String>,
}

impl Table {
    /// Пустой стол: руки пустые, флаги сброшены.
    pub fn new(id: TableId, name: String, deck: Deck, dealer_deck: Deck) -> Self {
        Self {
            id,
            name,
            deck,
            drawn_cards: Vec::new(),
            dealer_deck,
            dealer_hand: Vec::new(),
            input: String::new(),
            result: None,
            dealer: None,
            is_loading: false,
            load_error: None,
        }
    }
}

/// Упорядоченный набор столов. Инвариант: id не повторяются.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableCollection {
    tables: Vec<Table>,
}

impl TableCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn ids(&self) -> Vec<TableId> {
        self.tables.iter().map(|t| t.id).collect()
    }

    pub fn contains(&self, id: TableId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: TableId) -> Option<&Table> {
        self.position(id).map(|idx| &self.tables[idx])
    }

    fn position(&self, id: TableId) -> Option<usize> {
        self.tables.iter().position(|t| t.id == id)
    }

    /// Новая коллекция со столом в конце.
    /// `None`, если стол с таким id уже есть.
    pub fn with_table(&self, table: Table) -> Option<Self> {
        if self.contains(table.id) {
            return None;
        }
        let mut next = self.clone();
        next.tables.push(table);
        Some(next)
    }

    /// Новая коллекция без стола `id`. Неизвестный id — копия без изменений.
    pub fn without(&self, id: TableId) -> Self {
        Self {
            tables: self.tables.iter().filter(|t| t.id != id).cloned().collect(),
        }
    }

    /// Применить `f` к столу `id`, остальные столы — как есть.
    ///
    /// `f` работает с копией стола; если `f` вернула ошибку, наружу уходит
    /// только ошибка, и исходная коллекция остаётся единственным состоянием.
    /// Неизвестный id — копия без изменений, `f` не вызывается.
    pub fn try_update<E>(
        &self,
        id: TableId,
        f: impl FnOnce(&mut Table) -> Result<(), E>,
    ) -> Result<Self, E> {
        let mut next = self.clone();
        if let Some(idx) = self.position(id) {
            f(&mut next.tables[idx])?;
        }
        Ok(next)
    }

    /// Безошибочный вариант `try_update`.
    pub fn update(&self, id: TableId, f: impl FnOnce(&mut Table)) -> Self {
        let mut next = self.clone();
        if let Some(idx) = self.position(id) {
            f(&mut next.tables[idx]);
        }
        next
    }
}

impl<'a> IntoIterator for &'a TableCollection {
    type Item = &'a Table;
    type IntoIter = std::slice::Iter<'a, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
