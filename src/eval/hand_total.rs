use crate::domain::card::{Card, Rank};
use crate::domain::hand::HandResult;

const BLACKJACK: u32 = 21;

/// Очки карты без туза: картинки по 10, числовые по номиналу.
/// Для туза возвращает 0, тузы считаются отдельно.
pub fn base_points(rank: Rank) -> u32 {
    match rank {
        Rank::Ace => 0,
        Rank::Jack | Rank::Queen | Rank::King => 10,
        r => r as u32,
    }
}

/// Подсчёт руки блэкджека.
///
/// Сначала суммируются все карты кроме тузов. Затем тузы разрешаются по
/// одному в порядке выдачи: 11, если сумма не превысит 21, иначе 1.
/// Это жадная схема, а не поиск лучшей суммы: `[10, A, A]` даёт 22
/// (перебор), хотя 12 было бы допустимо.
pub fn score(cards: &[Card]) -> HandResult {
    let mut total: u32 = cards.iter().map(|c| base_points(c.rank)).sum();
    let aces = cards.iter().filter(|c| c.is_ace()).count();

    for _ in 0..aces {
        total += if total + 11 > BLACKJACK { 1 } else { 11 };
    }

    HandResult::new(total)
}
