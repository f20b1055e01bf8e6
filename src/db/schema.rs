/// Schema for the album cache. Safe to run on every open.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS albums (
    id INTEGER PRIMARY KEY,
    group_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    image_url TEXT NOT NULL,
    thumbnail_url TEXT NOT NULL
);

-- Single-row bookkeeping for the last successful bulk write
CREATE TABLE IF NOT EXISTS sync_state (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    last_written_at TEXT NOT NULL
);
"#;
