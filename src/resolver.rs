//! Maps a selection request (file, id, difficulty, language) to a passage.
//!
//! All range checks happen here, before the store is opened.

use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::error::SelectError;
use crate::language::{Language, PRIMARY_ROWS};
use crate::store::TextStore;

pub const MAX_DIFFICULTY: u8 = 5;

/// Number of ids in each difficulty band of the primary partition
pub const BAND_SIZE: u32 = PRIMARY_ROWS / MAX_DIFFICULTY as u32;

/// Where a passage came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    File(String),
    Id(u32),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::File(name) => write!(f, "{name}"),
            Origin::Id(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub text: String,
    pub origin: Origin,
}

/// Raw selection inputs, as handed over by the command line
#[derive(Debug, Clone, Default)]
pub struct SelectionRequest {
    pub file: Option<PathBuf>,
    pub id: Option<i64>,
    pub difficulty: Option<i64>,
    pub language: Language,
    /// Used when neither file, id, nor difficulty is given; `None` means random
    pub default_difficulty: Option<u8>,
}

/// Inclusive id range of difficulty band `level` (1..=5)
pub fn difficulty_band(level: u8) -> RangeInclusive<u32> {
    let upper = level as u32 * BAND_SIZE;
    (upper - BAND_SIZE + 1)..=upper
}

pub struct TextResolver<'a> {
    store: &'a TextStore,
}

impl<'a> TextResolver<'a> {
    pub fn new(store: &'a TextStore) -> Self {
        Self { store }
    }

    /// Dispatch on the request: file, then id, then difficulty, then default.
    pub fn resolve(&self, request: &SelectionRequest) -> Result<Selection, SelectError> {
        if let Some(ref path) = request.file {
            self.from_file(path)
        } else if let Some(id) = request.id {
            self.from_id(id, request.language)
        } else if let Some(level) = request.difficulty {
            self.from_difficulty(Some(level), request.language)
        } else {
            self.from_difficulty(request.default_difficulty.map(i64::from), request.language)
        }
    }

    pub fn from_file<P: AsRef<Path>>(&self, path: P) -> Result<Selection, SelectError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SelectError::FileNotFound(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path).map_err(|source| SelectError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        info!(file = %name, "selected text from file");
        Ok(Selection {
            text,
            origin: Origin::File(name),
        })
    }

    pub fn from_id(&self, id: i64, language: Language) -> Result<Selection, SelectError> {
        let id = u32::try_from(id)
            .ok()
            .filter(|id| (1..=PRIMARY_ROWS).contains(id))
            .ok_or(SelectError::IdOutOfRange(id))?;

        let text = self.store.fetch(id, language)?;
        info!(id, %language, "selected text by id");
        Ok(Selection {
            text,
            origin: Origin::Id(id),
        })
    }

    /// Random passage of the given level; `None` draws the level itself.
    pub fn from_difficulty(
        &self,
        level: Option<i64>,
        language: Language,
    ) -> Result<Selection, SelectError> {
        let rng = &mut rand::thread_rng();

        let level = match level {
            Some(level) => u8::try_from(level)
                .ok()
                .filter(|l| (1..=MAX_DIFFICULTY).contains(l))
                .ok_or(SelectError::DifficultyOutOfRange(level))?,
            None => rng.gen_range(1..=MAX_DIFFICULTY),
        };

        let id = self.sample_id(rng, level, language)?;
        let text = self.store.fetch(id, language)?;

        info!(id, level, %language, "selected text by difficulty");
        Ok(Selection {
            text,
            origin: Origin::Id(id),
        })
    }

    fn sample_id<R: Rng>(
        &self,
        rng: &mut R,
        level: u8,
        language: Language,
    ) -> Result<u32, SelectError> {
        if language.samples_by_column() {
            let ids = self.store.ids_with_difficulty(language, level)?;
            if let Some(&id) = ids.choose(rng) {
                return Ok(id);
            }
            debug!(level, %language, "no rows at this level, sampling the id band");
        }

        Ok(rng.gen_range(difficulty_band(level)))
    }
}
