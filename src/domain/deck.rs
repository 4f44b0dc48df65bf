use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::RandomSource;

/// Колода карт. `cards[0]` — следующая карта на выдачу.
///
/// Колода из внешнего текста не обязана быть «честной»: дубликаты и
/// неполные колоды допустимы.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: VecDeque<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into(),
        }
    }

    /// Стандартная 52-карточная колода в порядке:
    /// Hearts A..K, Diamonds A..K, Clubs A..K, Spades A..K.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Self::new(cards)
    }

    /// Свежая перемешанная стандартная колода.
    pub fn shuffled_standard<R: RandomSource>(rng: &mut R) -> Self {
        Self::standard_52().shuffled(rng)
    }

    /// Новая колода — перестановка текущей. Сама колода не меняется.
    pub fn shuffled<R: RandomSource>(&self, rng: &mut R) -> Self {
        let mut cards = self.cards.clone();
        rng.shuffle(cards.make_contiguous());
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Следующая карта без извлечения.
    pub fn peek(&self) -> Option<&Card> {
        self.cards.front()
    }

    /// Взять одну карту с верха колоды.
    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::rng::DeterministicRng;

    #[test]
    fn standard_deck_is_suit_major() {
        let deck = Deck::standard_52();
        assert_eq!(deck.len(), 52);
        assert_eq!(deck.cards[0], Card::new(Rank::Ace, Suit::Hearts));
        assert_eq!(deck.cards[12], Card::new(Rank::King, Suit::Hearts));
        assert_eq!(deck.cards[13], Card::new(Rank::Ace, Suit::Diamonds));
        assert_eq!(deck.cards[51], Card::new(Rank::King, Suit::Spades));
    }

    #[test]
    fn draw_takes_from_the_front() {
        let mut deck = Deck::standard_52();
        assert_eq!(deck.draw_one(), Some(Card::new(Rank::Ace, Suit::Hearts)));
        assert_eq!(deck.peek(), Some(&Card::new(Rank::Two, Suit::Hearts)));
        assert_eq!(deck.len(), 51);

        let mut empty = Deck::default();
        assert_eq!(empty.draw_one(), None);

        let mut deck = Deck::standard_52();
        let drawn: Vec<Card> = std::iter::from_fn(|| deck.draw_one()).collect();
        assert_eq!(drawn, Deck::standard_52().cards.into_iter().collect::<Vec<_>>());
        assert!(deck.is_empty());
    }

    #[test]
    fn shuffled_leaves_source_untouched() {
        let source = Deck::standard_52();
        let mut rng = DeterministicRng::from_u64(7);
        let shuffled = source.shuffled(&mut rng);

        assert_eq!(source, Deck::standard_52());
        assert_eq!(shuffled.len(), 52);
    }
}
