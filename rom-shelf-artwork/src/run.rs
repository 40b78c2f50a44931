//! Orchestration: walk the core tree, resolve games, download artwork.

use std::path::Path;

use rom_shelf_db::{artwork_for_game, list_systems};
use rom_shelf_resolve::{NormalizerConfig, SYSTEM_ALIASES, SystemMap, resolve_game};
use rusqlite::Connection;

use crate::client::CdnClient;
use crate::cores::CoreSystem;
use crate::download::{DownloadOptions, build_jobs, download_game_artwork};
use crate::error::ArtworkError;
use crate::log::{RomEntry, RunLog};

/// Process every system in the core tree and return the run log.
///
/// The platform map is built once up front; systems it cannot place are
/// warned and skipped. Within a system, each file is resolved against
/// the store and its artwork downloaded on a pool scoped to that game.
pub async fn run_artwork(
    conn: &Connection,
    cores: &[CoreSystem],
    roms_root: &Path,
    options: &DownloadOptions,
) -> Result<RunLog, ArtworkError> {
    let stored = list_systems(conn)?;
    let canonicals: Vec<&str> = cores.iter().map(|s| s.name.as_str()).collect();
    let system_map = SystemMap::build(&canonicals, &stored, SYSTEM_ALIASES);

    let client = CdnClient::new(&options.base_url)?;
    let normalizer = NormalizerConfig::default();
    let mut run_log = RunLog::new();

    for system in cores {
        let Some(system_id) = system_map.get(&system.name) else {
            // Already warned by the mapper
            continue;
        };
        log::info!("Processing system: {} (ID: {system_id})", system.name);
        let system_dir = roms_root.join(&system.name);

        for file_name in system.file_names() {
            process_file(
                conn,
                &client,
                file_name,
                system_id,
                &system_dir,
                &normalizer,
                options,
                &mut run_log,
            )
            .await?;
            tokio::time::sleep(options.game_delay).await;
        }
    }

    Ok(run_log)
}

#[allow(clippy::too_many_arguments)]
async fn process_file(
    conn: &Connection,
    client: &CdnClient,
    file_name: &str,
    system_id: i64,
    system_dir: &Path,
    normalizer: &NormalizerConfig,
    options: &DownloadOptions,
    run_log: &mut RunLog,
) -> Result<(), ArtworkError> {
    let Some(game) = resolve_game(conn, file_name, system_id, normalizer)? else {
        log::warn!("Could not find game in database: {file_name}");
        run_log.add(RomEntry::Unmatched {
            file: file_name.to_string(),
        });
        return Ok(());
    };

    let rows = artwork_for_game(conn, game.id)?;
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    let jobs = build_jobs(&rows, stem, system_dir);

    if jobs.is_empty() {
        log::warn!("No artwork found for: {}", game.title);
        run_log.add(RomEntry::NoArtwork {
            file: file_name.to_string(),
            game_title: game.title,
        });
        return Ok(());
    }

    let jobs_outcomes = download_game_artwork(client, jobs, options).await;
    run_log.add(RomEntry::Matched {
        file: file_name.to_string(),
        game_title: game.title,
        jobs: jobs_outcomes,
    });

    Ok(())
}
