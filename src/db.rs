use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

const DB_PATH: &str = "data/profiles.sqlite";

pub fn path() -> PathBuf {
    env::var("PROFILE_LOGGER_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DB_PATH))
}

pub fn connect() -> Result<Connection> {
    let p = path();
    if let Some(dir) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }
    let conn = Connection::open(&p).with_context(|| format!("Failed to open {:?}", p))?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS settings (
            key        TEXT PRIMARY KEY,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Append-only sheet; column order mirrors the spreadsheet
        CREATE TABLE IF NOT EXISTS sheet_rows (
            id          INTEGER PRIMARY KEY,
            name        TEXT NOT NULL,
            company     TEXT NOT NULL,
            position    TEXT NOT NULL,
            location    TEXT NOT NULL,
            date        TEXT NOT NULL,
            profile_url TEXT NOT NULL,
            appended_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}

// ── Settings ──

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| row.get(0))
        .optional()?;
    Ok(value)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
        rusqlite::params![key, value],
    )?;
    Ok(())
}

// ── Sheet ──

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    pub name: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub date: String,
    pub profile_url: String,
}

pub fn append_row(conn: &Connection, r: &SheetRow) -> Result<i64> {
    conn.execute(
        "INSERT INTO sheet_rows (name, company, position, location, date, profile_url)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![r.name, r.company, r.position, r.location, r.date, r.profile_url],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn fetch_rows(conn: &Connection, limit: Option<usize>) -> Result<Vec<SheetRow>> {
    let sql = format!(
        "SELECT name, company, position, location, date, profile_url
         FROM sheet_rows ORDER BY id{}",
        match limit {
            Some(n) => format!(" LIMIT {}", n),
            None => String::new(),
        }
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(SheetRow {
                name: row.get(0)?,
                company: row.get(1)?,
                position: row.get(2)?,
                location: row.get(3)?,
                date: row.get(4)?,
                profile_url: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Tests ──

#[cfg(test)]
pub(crate) fn memory() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}
