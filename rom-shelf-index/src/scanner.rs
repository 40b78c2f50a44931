//! ROM tree scanner.
//!
//! Each immediate subdirectory of the root is a system; `.zip` and
//! `.dosz` files directly inside it are ROMs. Artwork sidecars are
//! detected by their `{stem}-cover.jpg` / `{stem}-screenshot.jpg`
//! naming. Systems without ROMs are omitted.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Extensions treated as ROM files (case-insensitive).
const ROM_EXTENSIONS: &[&str] = &["zip", "dosz"];

/// The whole mapping, keyed by system name. `BTreeMap` keeps systems in
/// sorted order in the JSON output.
pub type LibraryMap = BTreeMap<String, SystemRoms>;

#[derive(Debug, Serialize)]
pub struct SystemRoms {
    pub count: usize,
    pub roms: Vec<RomInfo>,
}

#[derive(Debug, Serialize)]
pub struct RomInfo {
    pub file: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artwork: Option<ArtworkSidecars>,
}

#[derive(Debug, Serialize)]
pub struct ArtworkSidecars {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
}

/// Scan the ROM tree rooted at `root`.
pub fn scan_roms(root: &Path) -> Result<LibraryMap, IndexError> {
    let mut mapping = LibraryMap::new();

    let mut system_dirs: Vec<_> = std::fs::read_dir(root)?
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    system_dirs.sort();

    for system_dir in system_dirs {
        let Some(system_name) = system_dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let mut files: Vec<_> = std::fs::read_dir(&system_dir)?
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_file() && has_rom_extension(p))
            .collect();
        files.sort();

        let roms: Vec<RomInfo> = files
            .iter()
            .filter_map(|path| rom_info(path).ok())
            .collect();

        if !roms.is_empty() {
            mapping.insert(
                system_name.to_string(),
                SystemRoms {
                    count: roms.len(),
                    roms,
                },
            );
        }
    }

    Ok(mapping)
}

/// Serialize the mapping as pretty-printed JSON.
pub fn to_json(mapping: &LibraryMap) -> Result<String, IndexError> {
    Ok(serde_json::to_string_pretty(mapping)?)
}

fn has_rom_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_lowercase();
            ROM_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

fn rom_info(path: &Path) -> std::io::Result<RomInfo> {
    let file = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let size = path.metadata()?.len();

    let cover = sidecar(path, stem, "cover");
    let screenshot = sidecar(path, stem, "screenshot");
    let artwork = if cover.is_some() || screenshot.is_some() {
        Some(ArtworkSidecars { cover, screenshot })
    } else {
        None
    };

    Ok(RomInfo {
        file,
        size,
        artwork,
    })
}

fn sidecar(rom_path: &Path, stem: &str, suffix: &str) -> Option<String> {
    let name = format!("{stem}-{suffix}.jpg");
    let path = rom_path.with_file_name(&name);
    path.exists().then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path, bytes: &[u8]) {
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn scans_systems_roms_and_sidecars() {
        let root = tempfile::tempdir().unwrap();
        let gb = root.path().join("Nintendo - GameBoy");
        fs::create_dir(&gb).unwrap();
        touch(&gb.join("Tetris.zip"), b"rom");
        touch(&gb.join("Tetris-cover.jpg"), b"img");
        touch(&gb.join("Deadeus.zip"), b"rom");
        // Ignored: wrong extension, and a stray artwork with no ROM
        touch(&gb.join("notes.txt"), b"x");
        touch(&gb.join("Orphan-cover.jpg"), b"img");

        let dos = root.path().join("DOS");
        fs::create_dir(&dos).unwrap();
        touch(&dos.join("Commander_Keen.DOSZ"), b"romrom");

        let mapping = scan_roms(root.path()).unwrap();
        assert_eq!(mapping.len(), 2);

        let gb_roms = &mapping["Nintendo - GameBoy"];
        assert_eq!(gb_roms.count, 2);
        // Sorted: Deadeus before Tetris
        assert_eq!(gb_roms.roms[0].file, "Deadeus.zip");
        assert!(gb_roms.roms[0].artwork.is_none());
        assert_eq!(gb_roms.roms[1].file, "Tetris.zip");
        let art = gb_roms.roms[1].artwork.as_ref().unwrap();
        assert_eq!(art.cover.as_deref(), Some("Tetris-cover.jpg"));
        assert_eq!(art.screenshot, None);

        // Extension match is case-insensitive
        assert_eq!(mapping["DOS"].roms[0].file, "Commander_Keen.DOSZ");
        assert_eq!(mapping["DOS"].roms[0].size, 6);
    }

    #[test]
    fn empty_systems_are_omitted() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("Empty System")).unwrap();
        let mapping = scan_roms(root.path()).unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn json_output_skips_absent_artwork() {
        let root = tempfile::tempdir().unwrap();
        let gb = root.path().join("gb");
        fs::create_dir(&gb).unwrap();
        touch(&gb.join("Deadeus.zip"), b"rom");

        let mapping = scan_roms(root.path()).unwrap();
        let json = to_json(&mapping).unwrap();
        assert!(json.contains("\"file\": \"Deadeus.zip\""));
        assert!(!json.contains("artwork"));
    }
}
