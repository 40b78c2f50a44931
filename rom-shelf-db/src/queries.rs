//! Read queries for the library store.

use rusqlite::{Connection, params};

use crate::operations::{ArtworkRow, OperationError, SystemRow};

/// A game row slimmed down to what name resolution needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub id: i64,
    pub title: String,
    pub platform_id: i64,
}

/// Row counts for the whole store.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreStats {
    pub systems: i64,
    pub games: i64,
    pub artwork: i64,
}

// ── System Queries ──────────────────────────────────────────────────────────

/// List all systems in id order.
pub fn list_systems(conn: &Connection) -> Result<Vec<SystemRow>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, name, alias FROM systems ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(SystemRow {
            id: row.get(0)?,
            name: row.get(1)?,
            alias: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Game Lookups ────────────────────────────────────────────────────────────

/// Find a game on a platform by case-insensitive exact title match.
///
/// Ties are broken by primary-key order; the first match wins.
pub fn find_game_exact(
    conn: &Connection,
    platform_id: i64,
    title: &str,
) -> Result<Option<GameRecord>, OperationError> {
    let result = conn.query_row(
        "SELECT id, game_title, platform FROM games
         WHERE platform = ?1 AND LOWER(game_title) = LOWER(?2)
         ORDER BY id LIMIT 1",
        params![platform_id, title],
        row_to_game_record,
    );
    match result {
        Ok(record) => Ok(Some(record)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Find a game on a platform whose title contains `needle`, case-insensitive.
///
/// Containment is one-directional: the needle must appear inside the stored
/// title. Ties are broken by primary-key order.
pub fn find_game_containing(
    conn: &Connection,
    platform_id: i64,
    needle: &str,
) -> Result<Option<GameRecord>, OperationError> {
    let result = conn.query_row(
        "SELECT id, game_title, platform FROM games
         WHERE platform = ?1 AND LOWER(game_title) LIKE '%' || LOWER(?2) || '%'
         ORDER BY id LIMIT 1",
        params![platform_id, needle],
        row_to_game_record,
    );
    match result {
        Ok(record) => Ok(Some(record)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Artwork Queries ─────────────────────────────────────────────────────────

/// All cover (stored as `boxart`) and screenshot rows for a game,
/// ordered by type then id.
pub fn artwork_for_game(
    conn: &Connection,
    game_id: i64,
) -> Result<Vec<ArtworkRow>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT game_id, type, side, filename, resolution FROM game_artwork
         WHERE game_id = ?1 AND (type = 'boxart' OR type = 'screenshot')
         ORDER BY type, id",
    )?;
    let rows = stmt.query_map(params![game_id], |row| {
        Ok(ArtworkRow {
            game_id: row.get(0)?,
            kind: row.get(1)?,
            side: row.get(2)?,
            filename: row.get(3)?,
            resolution: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Row counts across the store, for the post-import summary.
pub fn store_stats(conn: &Connection) -> Result<StoreStats, OperationError> {
    let systems: i64 = conn.query_row("SELECT COUNT(*) FROM systems", [], |row| row.get(0))?;
    let games: i64 = conn.query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))?;
    let artwork: i64 =
        conn.query_row("SELECT COUNT(*) FROM game_artwork", [], |row| row.get(0))?;
    Ok(StoreStats {
        systems,
        games,
        artwork,
    })
}

// ── Row Converters ──────────────────────────────────────────────────────────

fn row_to_game_record(row: &rusqlite::Row) -> rusqlite::Result<GameRecord> {
    Ok(GameRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        platform_id: row.get(2)?,
    })
}
