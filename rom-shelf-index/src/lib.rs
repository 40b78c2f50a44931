//! Library index generation: scan a `ROMs/` tree and emit a JSON
//! mapping plus a self-contained HTML page.

pub mod html;
pub mod scanner;

pub use html::{format_size, generate_html};
pub use scanner::{ArtworkSidecars, IndexError, LibraryMap, RomInfo, SystemRoms, scan_roms, to_json};
