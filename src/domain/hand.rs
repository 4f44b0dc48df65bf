use serde::{Deserialize, Serialize};

/// Результат подсчёта руки. Производное значение: всегда пересчитывается
/// из карт руки, отдельно не правится.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandResult {
    /// Сумма очков. Не обрезается при переборе.
    pub total: u32,
    /// `total > 21`.
    pub bust: bool,
}

impl HandResult {
    pub fn new(total: u32) -> Self {
        Self {
            total,
            bust: total > 21,
        }
    }
}
