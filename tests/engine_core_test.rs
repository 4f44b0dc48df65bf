// tests/engine_core_test.rs
//
// Переходы состояния столов (engine::transitions + TableManager):
//  1) draw_both с пустым шу дилера: шу пополняется, обе руки растут вместе
//  2) draw_both с пустой колодой игрока – ни одна рука не меняется
//  3) remove_table с неизвестным id – коллекция не меняется
//  4) load_deck с битым текстом – колода и рука прежние, load_error выставлен;
//     следующая удачная загрузка load_error сбрасывает
//  5) clear / reset / update_input / load_dealer_deck

use blackjack_engine::domain::card::join_canonical;
use blackjack_engine::domain::{Deck, TableCollection};
use blackjack_engine::engine::transitions::*;
use blackjack_engine::engine::{EngineError, TableManager};
use blackjack_engine::eval::score;
use blackjack_engine::infra::DeterministicRng;

// -----------------------------
// ВСПОМОГАТЕЛЬНЫЕ КОНСТРУКТОРЫ
// -----------------------------

fn rng() -> DeterministicRng {
    DeterministicRng::from_u64(2024)
}

fn two_tables(rng: &mut DeterministicRng) -> TableCollection {
    let t1 = create_table(1, "Table 1", true, rng);
    let t2 = create_table(2, "Table 2", false, rng);
    let tables = add_table(&TableCollection::new(), t1).unwrap();
    add_table(&tables, t2).unwrap()
}

#[test]
fn draw_both_refills_empty_dealer_shoe() {
    let mut rng = rng();
    let tables = two_tables(&mut rng);
    let tables = tables.update(1, |t| t.dealer_deck = Deck::default());

    let next = draw_both(&tables, 1, &mut rng).unwrap();
    let before = tables.get(1).unwrap();
    let after = next.get(1).unwrap();

    assert_eq!(after.drawn_cards.len(), before.drawn_cards.len() + 1);
    assert_eq!(after.deck.len(), before.deck.len() - 1);
    assert_eq!(after.dealer_hand.len(), 1);
    assert_eq!(after.dealer_deck.len(), 51);

    // обе стороны обновились в одном снимке
    assert_eq!(after.result, Some(score(&after.drawn_cards)));
    assert_eq!(after.dealer, Some(score(&after.dealer_hand)));
    assert_eq!(after.input, join_canonical(&after.drawn_cards));

    // соседний стол не тронут
    assert_eq!(next.get(2), tables.get(2));
}

#[test]
fn draw_both_with_empty_player_deck_is_all_or_nothing() {
    let mut rng = rng();
    let tables = two_tables(&mut rng);

    let err = draw_both(&tables, 2, &mut rng).unwrap_err();
    assert_eq!(err, EngineError::DeckExhausted(2));

    // исходная коллекция – единственное состояние, дилер тоже не получил карту
    let t = tables.get(2).unwrap();
    assert!(t.dealer_hand.is_empty());
    assert_eq!(t.dealer_deck.len(), 52);
}

#[test]
fn player_draw_takes_front_card() {
    let mut rng = rng();
    let tables = two_tables(&mut rng);
    let front = *tables.get(1).unwrap().deck.peek().unwrap();

    let next = draw_player_card(&tables, 1).unwrap();
    assert_eq!(next.get(1).unwrap().drawn_cards, vec![front]);
}

#[test]
fn dealer_draw_never_blocks() {
    let mut rng = rng();
    let mut tables = two_tables(&mut rng);

    for _ in 0..60 {
        tables = draw_dealer_card(&tables, 2, &mut rng);
    }

    let t = tables.get(2).unwrap();
    assert_eq!(t.dealer_hand.len(), 60);
    // 52 из первой колоды + 8 из новой
    assert_eq!(t.dealer_deck.len(), 44);
    assert!(t.dealer.unwrap().bust);
}

#[test]
fn remove_unknown_table_is_no_op() {
    let mut rng = rng();
    let tables = two_tables(&mut rng);

    let next = remove_table(&tables, 42);
    assert_eq!(next.len(), 2);
    assert_eq!(next, tables);

    let next = remove_table(&tables, 1);
    assert_eq!(next.ids(), vec![2]);
}

#[test]
fn failed_load_keeps_deck_and_next_success_clears_error() {
    let mut rng = rng();
    let tables = two_tables(&mut rng);
    let tables = draw_player_card(&tables, 1).unwrap();
    let before = tables.get(1).unwrap().clone();

    let failed = load_deck(&tables, 1, "deck: [AH, nope]", &mut rng);
    let t = failed.get(1).unwrap();
    assert_eq!(t.deck, before.deck);
    assert_eq!(t.drawn_cards, before.drawn_cards);
    assert!(!t.is_loading);
    assert!(t.load_error.as_deref().unwrap().contains("nope"));

    let empty = load_deck(&failed, 1, "deck:\n", &mut rng);
    assert!(empty.get(1).unwrap().load_error.is_some());

    let ok = load_deck(&empty, 1, "deck:\n  - AH\n  - KS\n  - 5D\n", &mut rng);
    let t = ok.get(1).unwrap();
    assert!(t.load_error.is_none());
    assert!(!t.is_loading);
    assert_eq!(t.deck.len(), 3);
    assert!(t.drawn_cards.is_empty());
    assert!(t.result.is_none());
}

#[test]
fn acquisition_failure_goes_through_same_path() {
    use blackjack_engine::engine::DeckError;

    let mut rng = rng();
    let tables = two_tables(&mut rng);
    let loading = begin_load(&tables, 1);
    assert!(loading.get(1).unwrap().is_loading);

    let done = finish_load(
        &loading,
        1,
        Err(DeckError::Acquisition("404 Not Found".into())),
        &mut rng,
    );
    let t = done.get(1).unwrap();
    assert!(!t.is_loading);
    assert!(t.load_error.as_deref().unwrap().contains("404"));
    assert_eq!(t.deck, tables.get(1).unwrap().deck);
}

#[test]
fn finish_load_after_removal_does_not_resurrect_table() {
    let mut rng = rng();
    let tables = begin_load(&two_tables(&mut rng), 1);
    let removed = remove_table(&tables, 1);

    let done = finish_load(&removed, 1, Ok("deck: [AH]".into()), &mut rng);
    assert_eq!(done, removed);
    assert!(done.get(1).is_none());
}

#[test]
fn clear_keeps_decks() {
    let mut rng = rng();
    let tables = draw_both(&two_tables(&mut rng), 1, &mut rng).unwrap();
    let cleared = clear(&tables, 1);

    let before = tables.get(1).unwrap();
    let t = cleared.get(1).unwrap();
    assert!(t.drawn_cards.is_empty() && t.dealer_hand.is_empty());
    assert!(t.input.is_empty());
    assert!(t.result.is_none() && t.dealer.is_none());
    assert_eq!(t.deck, before.deck);
    assert_eq!(t.dealer_deck, before.dealer_deck);
}

#[test]
fn reset_and_dealer_shoe_reload() {
    let mut rng = rng();
    let tables = draw_both(&two_tables(&mut rng), 1, &mut rng).unwrap();

    let reset = reset_table(&tables, 1);
    let t = reset.get(1).unwrap();
    assert!(t.deck.is_empty());
    assert!(t.drawn_cards.is_empty() && t.dealer_hand.is_empty());
    assert_eq!(t.dealer_deck.len(), 51);

    let reloaded = load_dealer_deck(&tables, 1, &mut rng);
    let t = reloaded.get(1).unwrap();
    assert_eq!(t.dealer_deck.len(), 52);
    assert!(t.dealer_hand.is_empty() && t.dealer.is_none());
    assert_eq!(t.drawn_cards.len(), 1, "player hand untouched");
}

#[test]
fn update_input_is_plain_replacement() {
    let mut rng = rng();
    let tables = two_tables(&mut rng);
    let next = update_input(&tables, 2, "AH 5C");
    let t = next.get(2).unwrap();
    assert_eq!(t.input, "AH 5C");
    assert!(t.result.is_none());
}

#[test]
fn manager_replaces_snapshot_per_transition() {
    let mut manager = TableManager::new(rng());
    let a = manager.create_table(None).unwrap();
    let b = manager.create_table(Some("VIP".into())).unwrap();
    assert_ne!(a, b);
    assert_eq!(manager.table(a).unwrap().name, "Table 1");
    assert_eq!(manager.table(b).unwrap().name, "VIP");

    assert_eq!(manager.draw_player_card(a), Err(EngineError::DeckExhausted(a)));
    manager.load_standard_deck(a);
    manager.draw_both(a).unwrap();
    manager.check(b, "AH AD").unwrap();

    assert_eq!(manager.table(a).unwrap().deck.len(), 51);
    assert_eq!(manager.table(b).unwrap().result.unwrap().total, 12);

    manager.remove_table(a);
    assert!(!manager.has_table(a));
    assert_eq!(manager.tables().len(), 1);
}
