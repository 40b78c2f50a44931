//! Exact-then-approximate game lookup.

use rom_shelf_db::{GameRecord, OperationError, find_game_containing, find_game_exact};
use rusqlite::Connection;

use crate::normalize::{NormalizerConfig, normalize};

/// Resolve a raw ROM filename to a game record on the given platform.
///
/// The name is normalized first, then matched against stored titles by
/// case-insensitive exact equality, then by one-directional containment
/// (the normalized name inside a stored title). Returns `None` when
/// neither pass finds a row.
pub fn resolve_game(
    conn: &Connection,
    raw_name: &str,
    platform_id: i64,
    config: &NormalizerConfig,
) -> Result<Option<GameRecord>, OperationError> {
    let needle = normalize(raw_name, config);
    if let Some(hit) = find_game_exact(conn, platform_id, &needle)? {
        return Ok(Some(hit));
    }
    find_game_containing(conn, platform_id, &needle)
}
