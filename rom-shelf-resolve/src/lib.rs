//! Name matching between ROM files and library store records.
//!
//! Two layers: a pure filename normalizer, and lookups that pair a
//! normalized name (or a system display name) with a store row.

pub mod normalize;
pub mod platforms;
pub mod resolve;

pub use normalize::{NormalizerConfig, STOCK_SUFFIXES, normalize};
pub use platforms::{
    MIN_SYSTEM_SIMILARITY, MapMethod, MappedSystem, SYSTEM_ALIASES, SystemAliases, SystemMap,
};
pub use resolve::resolve_game;
