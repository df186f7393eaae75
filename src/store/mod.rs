//! [`TextStore`]: language-partitioned practice texts in a single SQLite file.
//!
//! The store keeps no connection around. Every operation opens its own
//! connection and drops it before returning, on error paths included.

pub mod schema;
pub mod seed;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::app_dirs::AppDirs;
use crate::error::{Result, StoreError};
use crate::language::{Fallback, Language};

pub use seed::TextRecord;

#[derive(Debug, Clone)]
pub struct TextStore {
    path: PathBuf,
}

impl TextStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store at the default location, next to the installed binary
    pub fn open_default() -> Self {
        Self::new(AppDirs::db_path().unwrap_or_else(|| PathBuf::from("data.db")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn connect(&self) -> Result<Connection> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!(path = %self.path.display(), "opening text store");
        Ok(Connection::open(&self.path)?)
    }

    /// Create the Chinese partition and seed it if it is empty.
    ///
    /// Safe to call before every lookup: once rows exist this is one
    /// `CREATE TABLE IF NOT EXISTS` and one `COUNT(*)`.
    pub fn ensure_initialized(&self) -> Result<()> {
        let mut conn = self.connect()?;
        conn.execute(schema::ZH_DATA, [])?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM zh_data", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }

        let Some(seed) = seed::seed_for(Language::Chinese)? else {
            return Ok(());
        };

        let tx = conn.transaction()?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO zh_data (id, txt, difficulty) VALUES (?1, ?2, ?3)")?;
            for record in &seed.texts {
                stmt.execute(params![record.id, record.txt, record.difficulty])?;
            }
        }
        tx.commit()?;

        info!(rows = seed.texts.len(), "seeded zh_data");
        Ok(())
    }

    /// Text for `id` in the partition of `language`.
    ///
    /// A missing row never surfaces as an error: English falls back to row 1,
    /// Chinese to a fixed placeholder.
    pub fn fetch(&self, id: u32, language: Language) -> Result<String> {
        self.ensure_initialized()?;

        let conn = self.connect()?;
        let sql = format!("SELECT txt FROM {} WHERE id = ?1", language.table());

        if let Some(text) = query_text(&conn, &sql, id)? {
            return Ok(text);
        }

        match language.fallback() {
            Fallback::Text(text) => {
                debug!(id, %language, "no row, using placeholder text");
                Ok(text.to_string())
            }
            Fallback::Row(fallback_id) => {
                warn!(id, fallback_id, %language, "no row, falling back");
                query_text(&conn, &sql, fallback_id)?
                    .ok_or(StoreError::MissingFallback { id, language })
            }
        }
    }

    pub fn row_count(&self, language: Language) -> Result<u32> {
        if language == Language::Chinese {
            self.ensure_initialized()?;
        }

        let conn = self.connect()?;
        let count: u32 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", language.table()),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Ids whose stored difficulty equals `level`, ascending.
    pub fn ids_with_difficulty(&self, language: Language, level: u8) -> Result<Vec<u32>> {
        if language == Language::Chinese {
            self.ensure_initialized()?;
        }

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id FROM {} WHERE difficulty = ?1 ORDER BY id",
            language.table()
        ))?;

        let ids = stmt
            .query_map([level], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<u32>>>()?;
        Ok(ids)
    }
}

fn query_text(conn: &Connection, sql: &str, id: u32) -> Result<Option<String>> {
    Ok(conn.query_row(sql, [id], |row| row.get(0)).optional()?)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::language::ZH_PLACEHOLDER;
    use assert_matches::assert_matches;
    use tempfile::{tempdir, TempDir};

    /// Store whose English partition holds rows `1..=rows`
    pub(crate) fn create_test_store(rows: u32) -> (TempDir, TextStore) {
        let dir = tempdir().unwrap();
        let store = TextStore::new(dir.path().join("data.db"));

        let mut conn = store.connect().unwrap();
        conn.execute(schema::DATA, []).unwrap();
        let tx = conn.transaction().unwrap();
        {
            let mut stmt = tx
                .prepare("INSERT INTO data (id, txt, difficulty) VALUES (?1, ?2, ?3)")
                .unwrap();
            for id in 1..=rows {
                let difficulty = (id - 1) / 1200 + 1;
                stmt.execute(params![id, format!("english text {id}"), difficulty])
                    .unwrap();
            }
        }
        tx.commit().unwrap();

        (dir, store)
    }

    #[test]
    fn test_fetch_existing_english_row() {
        let (_dir, store) = create_test_store(10);

        assert_eq!(store.fetch(7, Language::English).unwrap(), "english text 7");
    }

    #[test]
    fn test_missing_english_row_falls_back_to_first() {
        let (_dir, store) = create_test_store(10);

        let first = store.fetch(1, Language::English).unwrap();
        assert_eq!(store.fetch(11, Language::English).unwrap(), first);
        assert_eq!(store.fetch(5999, Language::English).unwrap(), first);
    }

    #[test]
    fn test_missing_english_fallback_row_is_an_error() {
        let (_dir, store) = create_test_store(0);

        assert_matches!(
            store.fetch(3, Language::English),
            Err(StoreError::MissingFallback { id: 3, language: Language::English })
        );
    }

    #[test]
    fn test_missing_primary_table_is_a_database_error() {
        let dir = tempdir().unwrap();
        let store = TextStore::new(dir.path().join("empty.db"));

        assert_matches!(
            store.fetch(1, Language::English),
            Err(StoreError::Database(_))
        );
    }

    #[test]
    fn test_initialization_is_idempotent() {
        let (_dir, store) = create_test_store(1);

        store.ensure_initialized().unwrap();
        let before: Vec<String> = (1..=15)
            .map(|id| store.fetch(id, Language::Chinese).unwrap())
            .collect();
        store.ensure_initialized().unwrap();
        let after: Vec<String> = (1..=15)
            .map(|id| store.fetch(id, Language::Chinese).unwrap())
            .collect();

        assert_eq!(store.row_count(Language::Chinese).unwrap(), 15);
        assert_eq!(before, after);
    }

    #[test]
    fn test_initialization_does_not_touch_populated_partition() {
        let (_dir, store) = create_test_store(1);
        {
            let conn = store.connect().unwrap();
            conn.execute(schema::ZH_DATA, []).unwrap();
            conn.execute(
                "INSERT INTO zh_data (id, txt, difficulty) VALUES (1, '自定义', 1)",
                [],
            )
            .unwrap();
        }

        store.ensure_initialized().unwrap();

        assert_eq!(store.row_count(Language::Chinese).unwrap(), 1);
        assert_eq!(store.fetch(1, Language::Chinese).unwrap(), "自定义");
    }

    #[test]
    fn test_seeded_chinese_rows() {
        let (_dir, store) = create_test_store(1);

        assert_eq!(
            store.fetch(1, Language::Chinese).unwrap(),
            "这是一个简单的打字测试。"
        );
        assert_eq!(
            store.fetch(15, Language::Chinese).unwrap(),
            "坚持练习是提高打字速度的关键。"
        );
    }

    #[test]
    fn test_missing_chinese_row_uses_placeholder() {
        let (_dir, store) = create_test_store(1);

        for id in [16, 200, 6000] {
            assert_eq!(store.fetch(id, Language::Chinese).unwrap(), ZH_PLACEHOLDER);
        }
    }

    #[test]
    fn test_chinese_placeholder_without_primary_table() {
        let dir = tempdir().unwrap();
        let store = TextStore::new(dir.path().join("zh_only.db"));

        assert_eq!(store.fetch(99, Language::Chinese).unwrap(), ZH_PLACEHOLDER);
    }

    #[test]
    fn test_ids_with_difficulty() {
        let (_dir, store) = create_test_store(2400);

        assert_eq!(
            store.ids_with_difficulty(Language::Chinese, 4).unwrap(),
            vec![10, 11, 12]
        );
        let english = store.ids_with_difficulty(Language::English, 2).unwrap();
        assert_eq!(english.len(), 1200);
        assert_eq!(english.first(), Some(&1201));
        assert!(store
            .ids_with_difficulty(Language::English, 3)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_store_creates_missing_parent_directory() {
        let dir = tempdir().unwrap();
        let store = TextStore::new(dir.path().join("nested").join("data.db"));

        store.ensure_initialized().unwrap();
        assert!(store.path().exists());
    }
}
