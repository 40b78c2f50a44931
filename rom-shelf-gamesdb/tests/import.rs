use rom_shelf_db::{open_memory, store_stats};
use rom_shelf_gamesdb::{Dump, import_dump};

/// A small dump with two platforms, two games, one bad record, and artwork.
fn test_dump() -> Dump {
    serde_json::from_value(serde_json::json!({
        "data": {
            "games": [
                {
                    "id": 1,
                    "game_title": "Super Mario Bros",
                    "platform": 7,
                    "release_date": "1985-09-13",
                    "developers": [100],
                    "genres": [5, 9],
                    "publishers": [42],
                    "alternates": ["SMB", null, "SMB", ""]
                },
                { "id": 2, "this_record_has_no_title": true },
                { "id": 3, "game_title": "Sonic the Hedgehog", "platform": 18 }
            ]
        },
        "include": {
            "platform": {
                "data": {
                    "7": { "id": 7, "name": "Nintendo Entertainment System (NES)", "alias": "nes" },
                    "18": { "id": 18, "name": "Sega Mega Drive", "alias": "genesis" }
                }
            },
            "boxart": {
                "data": {
                    "1": [
                        { "type": "boxart", "side": "front", "filename": "boxart/front/1-1.jpg", "resolution": "1530x2100" },
                        { "type": "screenshot", "filename": "screenshots/1-1.jpg" }
                    ],
                    "not-a-number": [
                        { "type": "boxart", "filename": "boxart/front/x.jpg" }
                    ]
                }
            }
        }
    }))
    .unwrap()
}

#[test]
fn imports_platforms_games_and_artwork() {
    let conn = open_memory().unwrap();
    let stats = import_dump(&conn, &test_dump(), None).unwrap();

    assert_eq!(stats.platforms, 2);
    assert_eq!(stats.games, 2);
    assert_eq!(stats.total_games, 3);
    assert_eq!(stats.artwork, 2);

    let store = store_stats(&conn).unwrap();
    assert_eq!(store.systems, 2);
    assert_eq!(store.games, 2);
    assert_eq!(store.artwork, 2);
}

#[test]
fn malformed_record_is_skipped_not_fatal() {
    let conn = open_memory().unwrap();
    let stats = import_dump(&conn, &test_dump(), None).unwrap();

    assert_eq!(stats.skipped_malformed, 1);
    // The record after the bad one still made it in
    let title: String = conn
        .query_row("SELECT game_title FROM games WHERE id = 3", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(title, "Sonic the Hedgehog");
}

#[test]
fn unparseable_artwork_key_is_skipped() {
    let conn = open_memory().unwrap();
    let stats = import_dump(&conn, &test_dump(), None).unwrap();
    assert_eq!(stats.artwork_bad_keys, 1);
}

#[test]
fn alternates_filter_nulls_empties_and_duplicates() {
    let conn = open_memory().unwrap();
    import_dump(&conn, &test_dump(), None).unwrap();

    let count: i32 = conn
        .query_row(
            "SELECT COUNT(*) FROM game_alternates WHERE game_id = 1",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn artwork_for_absent_game_is_skipped_not_fatal() {
    // The boxart include references game 999, which exists nowhere in
    // the games array; with foreign keys on, that row must become a
    // per-item skip rather than rolling back the transaction
    let conn = open_memory().unwrap();
    let dump: Dump = serde_json::from_value(serde_json::json!({
        "data": {
            "games": [{ "id": 1, "game_title": "Super Mario Bros", "platform": 7 }]
        },
        "include": {
            "platform": {
                "data": { "7": { "id": 7, "name": "NES", "alias": "nes" } }
            },
            "boxart": {
                "data": {
                    "1": [{ "type": "boxart", "filename": "boxart/front/1-1.jpg" }],
                    "999": [{ "type": "boxart", "filename": "boxart/front/999-1.jpg" }]
                }
            }
        }
    }))
    .unwrap();

    let stats = import_dump(&conn, &dump, None).unwrap();
    assert_eq!(stats.artwork, 1);
    assert_eq!(stats.artwork_orphaned, 1);

    // The good game and its artwork survived the orphaned row
    let store = store_stats(&conn).unwrap();
    assert_eq!(store.games, 1);
    assert_eq!(store.artwork, 1);
}

#[test]
fn game_with_unknown_platform_is_skipped_not_fatal() {
    let conn = open_memory().unwrap();
    let dump: Dump = serde_json::from_value(serde_json::json!({
        "data": {
            "games": [
                { "id": 1, "game_title": "Super Mario Bros", "platform": 7 },
                { "id": 2, "game_title": "Phantom Game", "platform": 99 },
                { "id": 3, "game_title": "Kirby's Dream Land", "platform": 7 }
            ]
        },
        "include": {
            "platform": {
                "data": { "7": { "id": 7, "name": "NES", "alias": "nes" } }
            }
        }
    }))
    .unwrap();

    let stats = import_dump(&conn, &dump, None).unwrap();
    assert_eq!(stats.games, 2);
    assert_eq!(stats.skipped_bad_refs, 1);

    // The record after the bad reference still made it in
    let title: String = conn
        .query_row("SELECT game_title FROM games WHERE id = 3", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(title, "Kirby's Dream Land");
}

#[test]
fn reimport_does_not_duplicate_rows() {
    let conn = open_memory().unwrap();
    let dump = test_dump();
    import_dump(&conn, &dump, None).unwrap();
    let first = store_stats(&conn).unwrap();
    let joins_before: i32 = conn
        .query_row("SELECT COUNT(*) FROM game_genres", [], |row| row.get(0))
        .unwrap();

    import_dump(&conn, &dump, None).unwrap();
    let second = store_stats(&conn).unwrap();
    let joins_after: i32 = conn
        .query_row("SELECT COUNT(*) FROM game_genres", [], |row| row.get(0))
        .unwrap();

    assert_eq!(first.games, second.games);
    assert_eq!(first.artwork, second.artwork);
    assert_eq!(joins_before, joins_after);
}
