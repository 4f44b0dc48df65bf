use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Масть карты. Порядок вариантов = порядок мастей в стандартной колоде.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Hearts,   // ♥
    Diamonds, // ♦
    Clubs,    // ♣
    Spades,   // ♠
}

/// Ранг карты. Туз идёт первым, как в стандартной колоде.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

/// Карта блэкджека. Значение, не сущность: равенство структурное.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

/// Токен карты не удалось разобрать. Внутри — исходный токен.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("некорректная карта: \"{0}\"")]
pub struct MalformedCardError(pub String);

/// Таблица глифов мастей для отображения (H→♥, D→♦, C→♣, S→♠).
pub const SUIT_GLYPHS: [(Suit, char); 4] = [
    (Suit::Hearts, '♥'),
    (Suit::Diamonds, '♦'),
    (Suit::Clubs, '♣'),
    (Suit::Spades, '♠'),
];

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Однобуквенный код масти: H, D, C, S.
    pub fn code(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
        }
    }

    pub fn from_code(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'H' => Some(Suit::Hearts),
            'D' => Some(Suit::Diamonds),
            'C' => Some(Suit::Clubs),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Текстовый код ранга: A, 2..10, J, Q, K.
    pub fn code(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        let upper = s.to_ascii_uppercase();
        Rank::ALL.into_iter().find(|r| r.code() == upper)
    }
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for Card {
    /// Канонический вид `A,H`, `10,D`, `7,C`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.rank, self.suit)
    }
}

/// Разбор токена карты.
///
/// Принимаются две формы:
/// - каноническая `"<ранг>,<масть>"` (`A,H`, `10,S`);
/// - компактная `"<ранг><масть>"` (`AH`, `10S`) — масть всегда последний символ.
pub fn normalize(token: &str) -> Result<Card, MalformedCardError> {
    let trimmed = token.trim();
    let malformed = || MalformedCardError(trimmed.to_string());

    let (rank_part, suit_part) = match trimmed.split_once(',') {
        Some((rank, suit)) => (rank.trim(), suit.trim()),
        None => {
            let suit_ch = trimmed.chars().last().ok_or_else(malformed)?;
            let cut = trimmed.len() - suit_ch.len_utf8();
            (&trimmed[..cut], &trimmed[cut..])
        }
    };

    let mut suit_chars = suit_part.chars();
    let suit = match (suit_chars.next(), suit_chars.next()) {
        (Some(ch), None) => Suit::from_code(ch).ok_or_else(malformed)?,
        _ => return Err(malformed()),
    };

    if rank_part.is_empty() {
        return Err(malformed());
    }
    let rank = Rank::from_code(rank_part).ok_or_else(malformed)?;

    Ok(Card::new(rank, suit))
}

/// Отображение карты с глифом масти: `A♥`, `10♠`.
pub fn format(card: &Card) -> String {
    format!("{}{}", card.rank, card.suit.glyph())
}

/// То же для последовательности карт.
pub fn format_cards(cards: &[Card]) -> Vec<String> {
    cards.iter().map(format).collect()
}

/// Канонические токены через пробел: `A,H 10,D`.
pub fn join_canonical(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl FromStr for Card {
    type Err = MalformedCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}
