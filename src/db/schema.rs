//! SQL DDL for initializing the record store.

/// SQLite schema with:
/// - `children`: demographic data, `dob` kept as ISO `YYYY-MM-DD` text (nullable)
/// - `vaccinations`: one row per scheduled dose, cascading with its child
/// - `status` stored as the literal `Upcoming` / `Done`
/// - timestamps as RFC3339 text
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS children (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    dob TEXT NULL,
    parent_name TEXT NULL,
    phone TEXT NULL,
    notes TEXT NULL,
    created_at TEXT NOT NULL -- RFC3339
);

CREATE TABLE IF NOT EXISTS vaccinations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    child_id INTEGER NOT NULL REFERENCES children(id) ON DELETE CASCADE,
    vaccine TEXT NOT NULL,
    due_date TEXT NOT NULL, -- YYYY-MM-DD
    status TEXT NOT NULL DEFAULT 'Upcoming',
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_vaccinations_child_id ON vaccinations(child_id);

CREATE INDEX IF NOT EXISTS idx_vaccinations_status_due ON vaccinations(status, due_date);
"#;
