use include_dir::{include_dir, Dir};
use serde::Deserialize;

use crate::error::{Result, StoreError};
use crate::language::Language;

static SEED_DIR: Dir = include_dir!("src/store/seed");

/// One practice text as stored in a partition
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct TextRecord {
    pub id: u32,
    pub txt: String,
    pub difficulty: u8,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SeedSet {
    pub language: Language,
    pub texts: Vec<TextRecord>,
}

/// Embedded seed rows for a lazily initialized partition, if it has any.
pub fn seed_for(language: Language) -> Result<Option<SeedSet>> {
    let Some(file) = SEED_DIR.get_file(format!("{language}.json")) else {
        return Ok(None);
    };

    let contents = file
        .contents_utf8()
        .ok_or_else(|| StoreError::Seed(format!("{language}.json is not utf-8")))?;

    let seed: SeedSet =
        serde_json::from_str(contents).map_err(|e| StoreError::Seed(e.to_string()))?;

    Ok(Some(seed))
}
