//! Разбор текстового описания колоды (YAML-подобный формат сохранения).
//!
//! Поддерживаются две формы:
//!
//! ```text
//! deck: ["AH,2H,3H", "KS"]        # строчный список
//!
//! deck:                           # блочный список
//!   - "A,H"
//!   - 2H
//! ```
//!
//! Разбор в два прохода: сначала определяем форму, затем отдаём тело нужному
//! токенизатору. Строчный список главнее блочного: если в тексте есть хоть
//! одна строка `deck: [...]`, берётся первая такая, блоки не читаются.

use std::str::Lines;

use tracing::debug;

use crate::domain::card::{normalize, Card};
use crate::engine::errors::DeckError;

const DECK_KEY: &str = "deck:";

/// Найденная форма списка.
enum DeckShape<'a> {
    /// Содержимое между `[` и `]`.
    Inline(&'a str),
    /// Строки, идущие после `deck:`.
    Block(Lines<'a>),
}

/// Извлечь плоский список карт из описания колоды.
///
/// Порядок карт сохраняется, дубликаты не схлопываются.
/// Любой битый токен обрывает разбор целиком.
pub fn parse_deck_text(text: &str) -> Result<Vec<Card>, DeckError> {
    let cards = match detect_shape(text) {
        Some(DeckShape::Inline(body)) => {
            debug!(body, "найден строчный список колоды");
            parse_inline(body)?
        }
        Some(DeckShape::Block(lines)) => {
            debug!("найден блочный список колоды");
            parse_block(lines)?
        }
        None => {
            debug!("ключ `deck:` не найден");
            Vec::new()
        }
    };

    if cards.is_empty() {
        return Err(DeckError::EmptyDeck);
    }

    debug!(cards = cards.len(), "описание колоды разобрано");
    Ok(cards)
}

fn detect_shape(text: &str) -> Option<DeckShape<'_>> {
    if let Some(body) = text.lines().find_map(|line| deck_value(line).and_then(inline_body)) {
        return Some(DeckShape::Inline(body));
    }

    let mut lines = text.lines();
    while let Some(line) = lines.next() {
        if deck_value(line).is_some() {
            return Some(DeckShape::Block(lines));
        }
    }
    None
}

/// Всё, что стоит после `deck:` в строке.
fn deck_value(line: &str) -> Option<&str> {
    line.trim().strip_prefix(DECK_KEY).map(str::trim)
}

fn inline_body(value: &str) -> Option<&str> {
    value.strip_prefix('[')?.strip_suffix(']')
}

/// Строчный список: элементы через запятую, запятые внутри кавычек не делят.
///
/// Элемент в канонической форме (`"A,H"`) — одна карта. Иначе, если внутри
/// есть запятые, каждый фрагмент — отдельная компактная карта (`"AH,2H"`).
fn parse_inline(body: &str) -> Result<Vec<Card>, DeckError> {
    let mut cards = Vec::new();

    for raw in split_top_level(body) {
        let element = strip_quotes(raw.trim());
        if element.is_empty() {
            continue;
        }

        if is_canonical(element) || !element.contains(',') {
            cards.push(normalize(element)?);
            continue;
        }

        for fragment in element.split(',') {
            let fragment = fragment.trim();
            if !fragment.is_empty() {
                cards.push(normalize(fragment)?);
            }
        }
    }

    Ok(cards)
}

/// Блочный список: строки `- <токен>`; пустые строки и `#`-комментарии
/// пропускаются, любая другая строка завершает список.
fn parse_block(lines: Lines<'_>) -> Result<Vec<Card>, DeckError> {
    let mut cards = Vec::new();

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(entry) = trimmed.strip_prefix('-') else {
            debug!(line = trimmed, "конец блочного списка");
            break;
        };
        cards.push(normalize(strip_quotes(entry.trim()))?);
    }

    Ok(cards)
}

fn split_top_level(body: &str) -> Vec<String> {
    let mut elements = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in body.chars() {
        match (quote, ch) {
            (None, '"' | '\'') => {
                quote = Some(ch);
                current.push(ch);
            }
            (Some(q), c) if c == q => {
                quote = None;
                current.push(ch);
            }
            (None, ',') => elements.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    elements.push(current);

    elements
}

/// Кавычки снимаются с каждого края отдельно: `"AH`, `AH'` и `"AH"` — это `AH`.
fn strip_quotes(s: &str) -> &str {
    const QUOTES: [char; 2] = ['"', '\''];
    s.trim_start_matches(QUOTES).trim_end_matches(QUOTES).trim()
}

fn is_canonical(element: &str) -> bool {
    element.matches(',').count() == 1 && normalize(element).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::{Rank, Suit};

    fn c(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn inline_composite_string_is_split_into_cards() {
        let cards = parse_deck_text(r#"deck: ["AH,2H,3H"]"#).unwrap();
        assert_eq!(
            cards,
            vec![
                c(Rank::Ace, Suit::Hearts),
                c(Rank::Two, Suit::Hearts),
                c(Rank::Three, Suit::Hearts),
            ]
        );
    }

    #[test]
    fn inline_canonical_elements_stay_whole() {
        let cards = parse_deck_text(r#"deck: ["A,H", '10,S', KD, "QC"]"#).unwrap();
        assert_eq!(
            cards,
            vec![
                c(Rank::Ace, Suit::Hearts),
                c(Rank::Ten, Suit::Spades),
                c(Rank::King, Suit::Diamonds),
                c(Rank::Queen, Suit::Clubs),
            ]
        );
    }

    #[test]
    fn block_list_stops_at_first_foreign_line() {
        let text = "name: demo\ndeck:\n  - \"A,H\"\n\n  # comment\n  - 2H\nplayers: 2\n  - KS\n";
        let cards = parse_deck_text(text).unwrap();
        assert_eq!(cards, vec![c(Rank::Ace, Suit::Hearts), c(Rank::Two, Suit::Hearts)]);
    }

    #[test]
    fn inline_list_wins_over_later_block() {
        let text = "deck: [AS]\ndeck:\n  - 2H\n";
        assert_eq!(parse_deck_text(text).unwrap(), vec![c(Rank::Ace, Suit::Spades)]);
    }

    #[test]
    fn later_inline_list_wins_over_earlier_block() {
        let text = "deck:\n  - 2H\n  - 3H\ndeck: [AS]\n";
        assert_eq!(parse_deck_text(text).unwrap(), vec![c(Rank::Ace, Suit::Spades)]);
    }

    #[test]
    fn unbalanced_quotes_are_tolerated() {
        let text = "deck:\n  - \"AH\n  - 2H'\n  - '3,H\"\n";
        assert_eq!(
            parse_deck_text(text).unwrap(),
            vec![
                c(Rank::Ace, Suit::Hearts),
                c(Rank::Two, Suit::Hearts),
                c(Rank::Three, Suit::Hearts),
            ]
        );

        let cards = parse_deck_text(r#"deck: ["AH, KS']"#).unwrap();
        assert_eq!(cards, vec![c(Rank::Ace, Suit::Hearts), c(Rank::King, Suit::Spades)]);
    }

    #[test]
    fn duplicates_are_preserved() {
        let cards = parse_deck_text("deck:\n  - AH\n  - AH\n").unwrap();
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn empty_inputs_report_empty_deck() {
        assert_eq!(parse_deck_text(""), Err(DeckError::EmptyDeck));
        assert_eq!(parse_deck_text("deck: []"), Err(DeckError::EmptyDeck));
        assert_eq!(parse_deck_text("deck:\nother: 1"), Err(DeckError::EmptyDeck));
    }

    #[test]
    fn malformed_token_aborts_parse() {
        let err = parse_deck_text("deck:\n  - AH\n  - ZZ\n").unwrap_err();
        assert!(matches!(err, DeckError::MalformedCard(ref e) if e.0 == "ZZ"));

        let err = parse_deck_text(r#"deck: ["AH,1H"]"#).unwrap_err();
        assert!(matches!(err, DeckError::MalformedCard(ref e) if e.0 == "1H"));
    }
}
