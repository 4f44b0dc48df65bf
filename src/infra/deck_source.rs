//! Источник текста колоды – внешний по отношению к движку.
//!
//! Движок получает от источника либо текст, либо ошибку получения и
//! дальше работает синхронно.

use std::future::Future;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use thiserror::Error;

/// Ошибка получения текста колоды.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("не удалось прочитать {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Unavailable(String),
}

/// Откуда берётся описание колоды.
pub trait DeckSource {
    fn fetch(&self) -> impl Future<Output = Result<String, SourceError>> + Send;
}

/// Файл на диске (по умолчанию `save.yaml`).
#[derive(Clone, Debug)]
pub struct FileDeckSource {
    path: PathBuf,
}

impl FileDeckSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl DeckSource for FileDeckSource {
    async fn fetch(&self) -> Result<String, SourceError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

/// Текст в памяти. Пустой источник ведёт себя как недоступный.
#[derive(Debug, Default)]
pub struct InMemoryDeckSource {
    text: RwLock<Option<String>>,
}

impl InMemoryDeckSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: RwLock::new(Some(text.into())),
        }
    }

    /// Заменить текст (`None` – источник недоступен).
    pub fn set_text(&self, text: Option<String>) {
        *self.text.write().unwrap_or_else(PoisonError::into_inner) = text;
    }
}

impl DeckSource for InMemoryDeckSource {
    async fn fetch(&self) -> Result<String, SourceError> {
        self.text
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| SourceError::Unavailable("источник колоды пуст".to_string()))
    }
}
