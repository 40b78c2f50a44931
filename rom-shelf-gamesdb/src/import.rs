//! Import a parsed dump into the library store.
//!
//! Platforms and games are upserted keyed on the dump's own ids; join
//! rows and artwork use `INSERT OR IGNORE`, so re-running the import
//! against the same dump leaves the store unchanged. One malformed game
//! record is logged and skipped, never fatal.

use rom_shelf_db::{ArtworkRow, GameRow, OperationError, SystemRow, operations};
use rusqlite::Connection;
use thiserror::Error;

use crate::model::{Dump, GameEntry};
use crate::progress::ImportProgress;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Statistics from a single dump import.
#[derive(Debug, Default)]
pub struct ImportStats {
    pub platforms: u64,
    pub games: u64,
    pub skipped_malformed: u64,
    pub skipped_bad_refs: u64,
    pub artwork: u64,
    pub artwork_bad_keys: u64,
    pub artwork_orphaned: u64,
    pub total_games: u64,
}

/// Constraint failures (an unknown platform or game id, a duplicate the
/// unique index rejects at the row level) are per-item problems, never
/// batch failures. `INSERT OR IGNORE` does not cover foreign keys, so
/// these surface as errors and must be caught per row.
fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(f, _)
            if f.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Load a dump into the store inside a single transaction.
///
/// The optional `progress` callback is invoked after each game record.
pub fn import_dump(
    conn: &Connection,
    dump: &Dump,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportStats, ImportError> {
    let mut stats = ImportStats {
        total_games: dump.data.games.len() as u64,
        ..ImportStats::default()
    };

    let tx = conn.unchecked_transaction()?;

    if let Some(platforms) = dump.include.platform.as_ref() {
        if let Some(p) = progress {
            p.on_phase("Importing platforms...");
        }
        for entry in platforms.data.values() {
            operations::upsert_system(
                &tx,
                &SystemRow {
                    id: entry.id,
                    name: entry.name.clone(),
                    alias: entry.alias.clone(),
                },
            )?;
            stats.platforms += 1;
        }
    }

    if let Some(p) = progress {
        p.on_phase("Importing games...");
    }
    for (i, raw) in dump.data.games.iter().enumerate() {
        match serde_json::from_value::<GameEntry>(raw.clone()) {
            Ok(game) => match import_game(&tx, &game) {
                Ok(()) => stats.games += 1,
                Err(
                    ImportError::Db(OperationError::Sqlite(ref e)) | ImportError::Sqlite(ref e),
                ) if is_constraint_violation(e) => {
                    log::warn!(
                        "Skipping game {} ({}): {e}",
                        game.id,
                        game.game_title
                    );
                    stats.skipped_bad_refs += 1;
                }
                Err(e) => return Err(e),
            },
            Err(e) => {
                log::warn!("Skipping malformed game record at index {i}: {e}");
                stats.skipped_malformed += 1;
            }
        }
        if let Some(p) = progress {
            p.on_game(i + 1, dump.data.games.len());
        }
    }

    if let Some(boxart) = dump.include.boxart.as_ref() {
        if let Some(p) = progress {
            p.on_phase("Importing artwork...");
        }
        for (game_key, rows) in &boxart.data {
            let Ok(game_id) = game_key.parse::<i64>() else {
                log::warn!("Skipping artwork with unparseable game id '{game_key}'");
                stats.artwork_bad_keys += 1;
                continue;
            };
            for art in rows {
                let row = ArtworkRow {
                    game_id,
                    kind: art.kind.clone(),
                    side: art.side.clone(),
                    filename: art.filename.clone(),
                    resolution: art.resolution.clone(),
                };
                match operations::insert_artwork(&tx, &row) {
                    Ok(true) => stats.artwork += 1,
                    Ok(false) => {}
                    Err(OperationError::Sqlite(ref e)) if is_constraint_violation(e) => {
                        // The game this row points at was skipped or is
                        // simply not in the dump
                        log::warn!("Skipping artwork for unknown game {game_id}");
                        stats.artwork_orphaned += 1;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }

    tx.commit()?;
    Ok(stats)
}

/// Import a single game record with its join rows.
fn import_game(conn: &Connection, game: &GameEntry) -> Result<(), ImportError> {
    operations::upsert_game(
        conn,
        &GameRow {
            id: game.id,
            title: game.game_title.clone(),
            release_date: game.release_date.clone(),
            platform: game.platform,
            region_id: game.region_id,
            country_id: game.country_id,
            overview: game.overview.clone(),
            youtube: game.youtube.clone(),
            players: game.players,
            coop: game.coop.clone(),
            rating: game.rating.clone(),
        },
    )?;

    for &dev_id in game.developers.iter().flatten() {
        operations::insert_developer(conn, game.id, dev_id)?;
    }
    for &genre_id in game.genres.iter().flatten() {
        operations::insert_genre(conn, game.id, genre_id)?;
    }
    for &pub_id in game.publishers.iter().flatten() {
        operations::insert_publisher(conn, game.id, pub_id)?;
    }

    // Nulls and empties are dropped; the first occurrence of a title wins
    let mut seen: Vec<&str> = Vec::new();
    for alt in game.alternates.iter().flatten().flatten() {
        if alt.is_empty() || seen.contains(&alt.as_str()) {
            continue;
        }
        seen.push(alt);
        operations::insert_alternate(conn, game.id, alt)?;
    }

    Ok(())
}
