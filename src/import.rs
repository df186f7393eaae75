//! Bulk load of the English partition from CSV (`id,txt,difficulty`).

use std::io::Read;

use rusqlite::params;
use serde::Deserialize;
use tracing::info;

use crate::error::ImportError;
use crate::language::PRIMARY_ROWS;
use crate::resolver::MAX_DIFFICULTY;
use crate::store::{schema, TextStore};

#[derive(Debug, Deserialize)]
struct CsvRow {
    id: i64,
    txt: String,
    difficulty: i64,
}

/// Upsert every row of `reader` into `data` in one transaction.
///
/// Nothing is written unless all rows validate. Returns the row count.
pub fn import_csv<R: Read>(store: &TextStore, reader: R) -> Result<usize, ImportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for (index, result) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        // header is line 1
        let line = index as u64 + 2;
        if !(1..=PRIMARY_ROWS as i64).contains(&row.id) {
            return Err(ImportError::Id { line, id: row.id });
        }
        if !(1..=MAX_DIFFICULTY as i64).contains(&row.difficulty) {
            return Err(ImportError::Difficulty {
                line,
                difficulty: row.difficulty,
            });
        }
        rows.push(row);
    }

    let mut conn = store.connect()?;
    conn.execute(schema::DATA, [])?;
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO data (id, txt, difficulty) VALUES (?1, ?2, ?3)",
        )?;
        for row in &rows {
            stmt.execute(params![row.id, row.txt, row.difficulty])?;
        }
    }
    tx.commit()?;

    info!(rows = rows.len(), path = %store.path().display(), "imported texts");
    Ok(rows.len())
}
