use std::path::PathBuf;

/// Настройки калькулятора. Читаются из окружения, CLI может переопределить.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Файл с описанием колоды.
    pub deck_path: PathBuf,
    /// Seed для воспроизводимых перемешиваний. `None` – системный RNG.
    pub seed: Option<u64>,
    /// Сколько столов создать на старте.
    pub tables: usize,
    /// Выдавать ли новым столам сразу стандартную колоду игрока.
    pub player_deck_on_create: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            deck_path: PathBuf::from("save.yaml"),
            seed: None,
            tables: 1,
            player_deck_on_create: false,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            deck_path: std::env::var("BLACKJACK_DECK_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.deck_path),
            seed: read_parsed("BLACKJACK_SEED"),
            tables: read_parsed("BLACKJACK_TABLES").unwrap_or(defaults.tables),
            player_deck_on_create: read_parsed("BLACKJACK_PLAYER_DECK_ON_CREATE")
                .unwrap_or(defaults.player_deck_on_create),
        }
    }
}

fn read_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
}
