//! Переходы состояния столов.
//!
//! Каждая функция берёт текущую коллекцию и возвращает новую; исходная
//! коллекция не меняется. Неизвестный `id` – не ошибка: возвращается копия
//! без изменений. Ошибки (`EngineError`) означают, что переход не случился.

use tracing::{debug, info, warn};

use crate::domain::card::{join_canonical, normalize, Card};
use crate::domain::deck::Deck;
use crate::domain::deck_text::parse_deck_text;
use crate::domain::table::{Table, TableCollection};
use crate::domain::TableId;
use crate::engine::errors::{DeckError, EngineError};
use crate::engine::RandomSource;
use crate::eval::score;

/// Новый стол. Шу дилера сразу заполнен перемешанной колодой; колода
/// игрока – пустая или тоже стандартная, на выбор вызывающего.
pub fn create_table<R: RandomSource>(
    id: TableId,
    name: impl Into<String>,
    with_player_deck: bool,
    rng: &mut R,
) -> Table {
    let deck = if with_player_deck {
        Deck::shuffled_standard(rng)
    } else {
        Deck::default()
    };
    Table::new(id, name.into(), deck, Deck::shuffled_standard(rng))
}

/// Добавить стол в конец коллекции.
pub fn add_table(tables: &TableCollection, table: Table) -> Result<TableCollection, EngineError> {
    let id = table.id;
    tables
        .with_table(table)
        .ok_or(EngineError::DuplicateTable(id))
}

/// Первая половина загрузки: стол помечается как загружающийся.
pub fn begin_load(tables: &TableCollection, id: TableId) -> TableCollection {
    tables.update(id, |t| {
        t.is_loading = true;
        t.load_error = None;
    })
}

/// Вторая половина загрузки: разбор, перемешивание и запись колоды.
///
/// При любой ошибке колода и рука остаются прежними, а в `load_error`
/// пишется описание. `is_loading` сбрасывается в обоих случаях.
/// Если стол успели удалить, ничего не происходит.
pub fn finish_load<R: RandomSource>(
    tables: &TableCollection,
    id: TableId,
    fetched: Result<String, DeckError>,
    rng: &mut R,
) -> TableCollection {
    if !tables.contains(id) {
        debug!(table_id = id, "стол удалён до завершения загрузки");
        return tables.clone();
    }

    let parsed = fetched.and_then(|text| parse_deck_text(&text));

    tables.update(id, |t| {
        t.is_loading = false;
        match parsed {
            Ok(cards) => {
                info!(table_id = id, cards = cards.len(), "колода загружена");
                install_player_deck(t, Deck::new(cards).shuffled(rng));
            }
            Err(err) => {
                warn!(table_id = id, error = %err, "не удалось загрузить колоду");
                t.load_error = Some(format!("Ошибка загрузки колоды: {err}"));
            }
        }
    })
}

/// Синхронная загрузка колоды из уже полученного текста.
pub fn load_deck<R: RandomSource>(
    tables: &TableCollection,
    id: TableId,
    source_text: &str,
    rng: &mut R,
) -> TableCollection {
    let loading = begin_load(tables, id);
    finish_load(&loading, id, Ok(source_text.to_string()), rng)
}

/// Стандартная перемешанная колода игроку. Не может завершиться ошибкой.
pub fn load_standard_deck<R: RandomSource>(
    tables: &TableCollection,
    id: TableId,
    rng: &mut R,
) -> TableCollection {
    tables.update(id, |t| install_player_deck(t, Deck::shuffled_standard(rng)))
}

/// Новый шу дилера, рука дилера сбрасывается.
pub fn load_dealer_deck<R: RandomSource>(
    tables: &TableCollection,
    id: TableId,
    rng: &mut R,
) -> TableCollection {
    tables.update(id, |t| {
        t.dealer_deck = Deck::shuffled_standard(rng);
        t.dealer_hand.clear();
        t.dealer = None;
        t.load_error = None;
    })
}

/// Карта игроку. Пустая колода – `DeckExhausted`, состояние не меняется.
pub fn draw_player_card(
    tables: &TableCollection,
    id: TableId,
) -> Result<TableCollection, EngineError> {
    tables.try_update(id, deal_player)
}

/// Карта дилеру. Пустой шу пополняется свежей колодой.
pub fn draw_dealer_card<R: RandomSource>(
    tables: &TableCollection,
    id: TableId,
    rng: &mut R,
) -> TableCollection {
    tables.update(id, |t| deal_dealer(t, rng))
}

/// Карта игроку и карта дилеру одним обновлением.
///
/// Если у игрока колода пуста, не сдаётся ни одна карта.
pub fn draw_both<R: RandomSource>(
    tables: &TableCollection,
    id: TableId,
    rng: &mut R,
) -> Result<TableCollection, EngineError> {
    tables.try_update(id, |t| {
        deal_player(t)?;
        deal_dealer(t, rng);
        Ok(())
    })
}

/// Ручная проверка руки: токены через пробел.
///
/// Колоду и выданные карты не трогает; текст сохраняется в `input`.
pub fn check(
    tables: &TableCollection,
    id: TableId,
    input: &str,
) -> Result<TableCollection, EngineError> {
    if !tables.contains(id) {
        return Ok(tables.clone());
    }

    let cards = input
        .split_whitespace()
        .map(normalize)
        .collect::<Result<Vec<Card>, _>>()?;
    let result = score(&cards);

    Ok(tables.update(id, |t| {
        t.input = input.to_string();
        t.result = Some(result);
    }))
}

/// Сбросить руки, колоды остаются.
pub fn clear(tables: &TableCollection, id: TableId) -> TableCollection {
    tables.update(id, |t| {
        t.drawn_cards.clear();
        t.dealer_hand.clear();
        t.input.clear();
        t.result = None;
        t.dealer = None;
    })
}

/// Полный сброс стола: колода игрока опустошается, руки и ошибки сбрасываются.
/// Шу дилера остаётся.
pub fn reset_table(tables: &TableCollection, id: TableId) -> TableCollection {
    tables.update(id, |t| {
        t.deck = Deck::default();
        t.drawn_cards.clear();
        t.dealer_hand.clear();
        t.input.clear();
        t.result = None;
        t.dealer = None;
        t.load_error = None;
    })
}

pub fn remove_table(tables: &TableCollection, id: TableId) -> TableCollection {
    tables.without(id)
}

pub fn update_input(tables: &TableCollection, id: TableId, text: &str) -> TableCollection {
    tables.update(id, |t| t.input = text.to_string())
}

fn install_player_deck(table: &mut Table, deck: Deck) {
    table.deck = deck;
    table.drawn_cards.clear();
    table.input.clear();
    table.result = None;
    table.load_error = None;
}

fn deal_player(table: &mut Table) -> Result<(), EngineError> {
    let Some(card) = table.deck.draw_one() else {
        warn!(table_id = table.id, "колода игрока пуста");
        return Err(EngineError::DeckExhausted(table.id));
    };

    table.drawn_cards.push(card);
    table.result = Some(score(&table.drawn_cards));
    table.input = join_canonical(&table.drawn_cards);
    Ok(())
}

fn deal_dealer<R: RandomSource>(table: &mut Table, rng: &mut R) {
    if table.dealer_deck.is_empty() {
        info!(table_id = table.id, "шу дилера пуст, добавляем новую колоду");
        table.dealer_deck = Deck::shuffled_standard(rng);
    }

    if let Some(card) = table.dealer_deck.draw_one() {
        table.dealer_hand.push(card);
        table.dealer = Some(score(&table.dealer_hand));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::rng::DeterministicRng;

    fn one_table(rng: &mut DeterministicRng) -> TableCollection {
        let table = create_table(1, "Table 1", false, rng);
        add_table(&TableCollection::new(), table).unwrap()
    }

    #[test]
    fn new_table_has_dealer_shoe_only() {
        let mut rng = DeterministicRng::from_u64(1);
        let table = create_table(5, "T", false, &mut rng);
        assert!(table.deck.is_empty());
        assert_eq!(table.dealer_deck.len(), 52);
        assert!(table.result.is_none() && table.dealer.is_none());
        assert!(!table.is_loading && table.load_error.is_none());

        let with_deck = create_table(6, "T", true, &mut rng);
        assert_eq!(with_deck.deck.len(), 52);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut rng = DeterministicRng::from_u64(1);
        let tables = one_table(&mut rng);
        let again = create_table(1, "copy", false, &mut rng);
        assert_eq!(add_table(&tables, again), Err(EngineError::DuplicateTable(1)));
    }

    #[test]
    fn player_draw_mirrors_input_and_result() {
        let mut rng = DeterministicRng::from_u64(2);
        let tables = load_deck(&one_table(&mut rng), 1, "deck: [AH, KS]", &mut rng);
        let tables = draw_player_card(&tables, 1).unwrap();
        let tables = draw_player_card(&tables, 1).unwrap();

        let t = tables.get(1).unwrap();
        assert!(t.deck.is_empty());
        assert_eq!(t.drawn_cards.len(), 2);
        assert_eq!(t.result.unwrap().total, 21);
        assert_eq!(t.input, join_canonical(&t.drawn_cards));

        assert_eq!(draw_player_card(&tables, 1), Err(EngineError::DeckExhausted(1)));
    }

    #[test]
    fn check_does_not_touch_draw_pipeline() {
        let mut rng = DeterministicRng::from_u64(3);
        let tables = load_standard_deck(&one_table(&mut rng), 1, &mut rng);
        let tables = check(&tables, 1, "  A,H  KS ").unwrap();

        let t = tables.get(1).unwrap();
        assert_eq!(t.deck.len(), 52);
        assert!(t.drawn_cards.is_empty());
        assert_eq!(t.result.unwrap().total, 21);

        let err = check(&tables, 1, "AH XX").unwrap_err();
        assert!(matches!(err, EngineError::MalformedCard(_)));
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let mut rng = DeterministicRng::from_u64(4);
        let tables = one_table(&mut rng);

        assert_eq!(clear(&tables, 99), tables);
        assert_eq!(update_input(&tables, 99, "x"), tables);
        assert_eq!(draw_player_card(&tables, 99).unwrap(), tables);
        assert_eq!(draw_dealer_card(&tables, 99, &mut rng), tables);
        assert_eq!(check(&tables, 99, "garbage").unwrap(), tables);
        assert_eq!(load_deck(&tables, 99, "deck: [AH]", &mut rng), tables);
    }
}
