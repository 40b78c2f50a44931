//! TheGamesDB dump handling: the serde model of the JSON dump, the
//! importer that loads it into the library store, and the shape
//! sketcher behind `inspect`.

pub mod import;
pub mod model;
pub mod progress;
pub mod sketch;

pub use import::{ImportError, ImportStats, import_dump};
pub use model::{BoxartEntry, Dump, DumpError, GameEntry, PlatformEntry, load_dump};
pub use progress::ImportProgress;
pub use sketch::{sketch_file, sketch_value};
