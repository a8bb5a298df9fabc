//! SQL schema for the SQLite-backed store.
//!
//! Mirrors the hosted `feeding_points` table. Timestamps are stored as RFC 3339
//! text in UTC with a fixed width so they sort lexicographically.

/// Returns the full SQL schema as a single batch string.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS feeding_points (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        status TEXT NOT NULL CHECK (status IN ('ok', 'needs_water', 'needs_food', 'needs_maintenance')),
        latitude REAL NOT NULL,
        longitude REAL NOT NULL,
        notes TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_points_updated ON feeding_points(updated_at);
    CREATE INDEX IF NOT EXISTS idx_points_created ON feeding_points(created_at);
    "#
}
