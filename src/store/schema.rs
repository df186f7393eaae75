//! DDL for the text partitions. Both tables share one shape.

/// Secondary partition, created on first lookup.
pub const ZH_DATA: &str = "
CREATE TABLE IF NOT EXISTS zh_data (
    id          INTEGER PRIMARY KEY,
    txt         TEXT NOT NULL,
    difficulty  INTEGER NOT NULL
)";

/// Primary partition; normally shipped pre-populated, created by the importer
/// otherwise.
pub const DATA: &str = "
CREATE TABLE IF NOT EXISTS data (
    id          INTEGER PRIMARY KEY,
    txt         TEXT,
    difficulty  INTEGER
)";
