use anyhow::{Context, Result};
use directories::ProjectDirs;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Returns the examdeck data directory, creating it if needed.
/// Location: `~/.local/share/examdeck/` (XDG-compliant)
pub fn data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "examdeck").context("Could not determine data directory")?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

/// Path to the preferences database.
pub fn db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("examdeck.db"))
}

/// Opens (or creates) the database in the data directory.
pub fn open_db() -> Result<Connection> {
    open_db_at(&db_path()?)
}

/// Opens (or creates) a database at `path` and makes sure the schema exists.
pub fn open_db_at(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database at {}", path.display()))?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    init_db(&conn)?;
    Ok(conn)
}

/// Open an in-memory database for testing.
pub fn open_memory_db() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_db(&conn)?;
    Ok(conn)
}

/// Initialize the preferences table.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS preferences (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_db_at_creates_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.db");
        let conn = open_db_at(&path).unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'preferences'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
        assert!(path.exists());
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let conn = open_memory_db().unwrap();
        init_db(&conn).unwrap();
        init_db(&conn).unwrap();
    }
}
