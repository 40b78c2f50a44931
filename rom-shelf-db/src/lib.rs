//! SQLite persistence layer for the game library store.
//!
//! Provides schema creation, insert/upsert operations, and read queries
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    ArtworkRow, GameRow, OperationError, SystemRow, insert_alternate, insert_artwork,
    insert_developer, insert_genre, insert_publisher, upsert_game, upsert_system,
};
pub use queries::{
    GameRecord, StoreStats, artwork_for_game, find_game_containing, find_game_exact,
    list_systems, store_stats,
};
pub use schema::{SchemaError, create_schema, open_database, open_memory};
