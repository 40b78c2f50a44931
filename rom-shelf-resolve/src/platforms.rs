//! Mapping core-tree system names onto store system ids.
//!
//! The core-tree asset and the metadata dump disagree about what most
//! systems are called. A static alias table covers the known cases; a
//! similarity fallback catches renames the table has not caught up with.

use std::collections::HashMap;

use rom_shelf_db::SystemRow;

/// One core-tree system name and the store names/aliases it is known under.
#[derive(Debug, Clone, Copy)]
pub struct SystemAliases {
    /// Name used by the core-tree asset.
    pub canonical: &'static str,
    /// Store-side display names or aliases that identify the same system.
    pub aliases: &'static [&'static str],
}

/// Minimum normalized similarity for the fuzzy fallback to accept a match.
pub const MIN_SYSTEM_SIMILARITY: f64 = 0.6;

/// Alias table for every system that ships on the shelf devices.
pub static SYSTEM_ALIASES: &[SystemAliases] = &[
    SystemAliases {
        canonical: "Arcade",
        aliases: &["Arcade", "arcade"],
    },
    SystemAliases {
        canonical: "EasyRPG",
        aliases: &["RPG Maker", "rpg-maker"],
    },
    SystemAliases {
        canonical: "NEC - PC Engine - TurboGrafx 16",
        aliases: &["TurboGrafx 16", "turbografx-16"],
    },
    SystemAliases {
        canonical: "Nintendo - Nintendo 64",
        aliases: &["Nintendo 64", "nintendo-64"],
    },
    SystemAliases {
        canonical: "Nintendo - Virtual Boy",
        aliases: &["Nintendo Virtual Boy", "nintendo-virtual-boy"],
    },
    SystemAliases {
        canonical: "Nintendo - GameBoy",
        aliases: &["Nintendo Game Boy", "nintendo-gameboy"],
    },
    SystemAliases {
        canonical: "Nintendo - GameBoy Advance",
        aliases: &["Nintendo Game Boy Advance", "nintendo-gameboy-advance"],
    },
    SystemAliases {
        canonical: "Nintendo - Nintendo Entertainment System",
        aliases: &["Nintendo Entertainment System (NES)", "nes"],
    },
    SystemAliases {
        canonical: "Nintendo - Super Nintendo Entertainment System",
        aliases: &["Super Nintendo Entertainment System (SNES)", "snes"],
    },
    SystemAliases {
        canonical: "Nintendo - GameCube - Wii",
        aliases: &["Nintendo GameCube", "gamecube"],
    },
    SystemAliases {
        canonical: "Nintendo - Nintendo 3DS",
        aliases: &["Nintendo 3DS", "nintendo-3ds"],
    },
    SystemAliases {
        canonical: "Nintendo - Pokemon Mini",
        aliases: &["Nintendo Pokémon Mini", "pokemon-mini"],
    },
    SystemAliases {
        canonical: "Sega - Master System - Mark III",
        aliases: &["Sega Master System", "master-system"],
    },
    SystemAliases {
        canonical: "Sega - Mega Drive - Genesis",
        aliases: &["Sega Mega Drive", "genesis"],
    },
    SystemAliases {
        canonical: "Sega - Game Gear",
        aliases: &["Sega Game Gear", "game-gear"],
    },
    SystemAliases {
        canonical: "Sega - Saturn",
        aliases: &["Sega Saturn", "saturn"],
    },
    SystemAliases {
        canonical: "Sega - Dreamcast",
        aliases: &["Sega Dreamcast", "dreamcast"],
    },
    SystemAliases {
        canonical: "Sony - PlayStation",
        aliases: &["Sony Playstation", "playstation"],
    },
    SystemAliases {
        canonical: "Sony - PlayStation Portable",
        aliases: &["Sony Playstation Portable", "psp"],
    },
    SystemAliases {
        canonical: "Bandai - WonderSwan Color",
        aliases: &["WonderSwan Color", "wonderswan-color"],
    },
    SystemAliases {
        canonical: "SNK - Neo Geo Pocket",
        aliases: &["Neo Geo Pocket", "neo-geo-pocket"],
    },
    SystemAliases {
        canonical: "Coleco - Colecovision",
        aliases: &["Colecovision", "colecovision"],
    },
    SystemAliases {
        canonical: "Mattel - Intellivision",
        aliases: &["Intellivision", "intellivision"],
    },
    SystemAliases {
        canonical: "GCE - Vectrex",
        aliases: &["Vectrex", "vectrex"],
    },
    SystemAliases {
        canonical: "Atari - 2600",
        aliases: &["Atari 2600", "atari-2600"],
    },
    SystemAliases {
        canonical: "NEC - PC Engine SuperGrafx",
        aliases: &["PC Engine SuperGrafx", "supergrafx"],
    },
    // Engines and standalone game ports
    SystemAliases {
        canonical: "CHIP-8",
        aliases: &["CHIP-8", "chip-8"],
    },
    SystemAliases {
        canonical: "DOS",
        aliases: &["DOS", "ms-dos"],
    },
    SystemAliases {
        canonical: "ScummVM",
        aliases: &["ScummVM", "scummvm"],
    },
    SystemAliases {
        canonical: "TIC-80",
        aliases: &["TIC-80", "tic-80"],
    },
    SystemAliases {
        canonical: "WASM-4",
        aliases: &["WASM-4", "wasm-4"],
    },
    SystemAliases {
        canonical: "LowResNX",
        aliases: &["LowRes NX", "lowres-nx"],
    },
    SystemAliases {
        canonical: "VaporSpec",
        aliases: &["VaporSpec", "vaporspec"],
    },
    SystemAliases {
        canonical: "Uzebox",
        aliases: &["Uzebox", "uzebox"],
    },
    SystemAliases {
        canonical: "ChaiLove",
        aliases: &["ChaiLove", "chailove"],
    },
    SystemAliases {
        canonical: "Lutro",
        aliases: &["Lutro", "lutro"],
    },
    SystemAliases {
        canonical: "Cave Story",
        aliases: &["Cave Story", "cave-story"],
    },
    SystemAliases {
        canonical: "Quake",
        aliases: &["Quake", "quake"],
    },
    SystemAliases {
        canonical: "Quake II",
        aliases: &["Quake II", "quake-2"],
    },
    SystemAliases {
        canonical: "DOOM",
        aliases: &["DOOM", "doom"],
    },
    SystemAliases {
        canonical: "Wolfenstein 3D",
        aliases: &["Wolfenstein 3D", "wolfenstein-3d"],
    },
    SystemAliases {
        canonical: "Tomb Raider",
        aliases: &["Tomb Raider", "tomb-raider"],
    },
    SystemAliases {
        canonical: "Cannonball",
        aliases: &["Cannonball", "cannonball"],
    },
    SystemAliases {
        canonical: "Rick Dangerous",
        aliases: &["Rick Dangerous", "rick-dangerous"],
    },
    SystemAliases {
        canonical: "Dinothawr",
        aliases: &["Dinothawr", "dinothawr"],
    },
    SystemAliases {
        canonical: "Super Bros War",
        aliases: &["Super Bros War", "super-bros-war"],
    },
    SystemAliases {
        canonical: "Vircon32",
        aliases: &["Vircon32", "vircon32"],
    },
    // Utilities and misc
    SystemAliases {
        canonical: "Utilities",
        aliases: &["Utilities", "utils"],
    },
    SystemAliases {
        canonical: "MicroW8",
        aliases: &["MicroW8", "micro-w8"],
    },
    SystemAliases {
        canonical: "PocketCDG",
        aliases: &["PocketCDG", "pocket-cdg"],
    },
    SystemAliases {
        canonical: "Jump 'n Bump",
        aliases: &["Jump 'n Bump", "jump-n-bump"],
    },
    SystemAliases {
        canonical: "Video",
        aliases: &["Video Player", "video-player"],
    },
    SystemAliases {
        canonical: "Arduous",
        aliases: &["Arduino", "arduino"],
    },
    SystemAliases {
        canonical: "Images",
        aliases: &["Image Viewer", "image-viewer"],
    },
    SystemAliases {
        canonical: "Handheld Electronic Game",
        aliases: &["Handheld Electronic Games (LCD)", "lcd-games"],
    },
];

/// How a system name was paired with its store row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapMethod {
    /// Matched through the alias table.
    Alias,
    /// Matched the store name/alias directly.
    Direct,
    /// Best similarity score at or above [`MIN_SYSTEM_SIMILARITY`].
    Fuzzy { score: f64 },
}

/// A successfully mapped system.
#[derive(Debug, Clone)]
pub struct MappedSystem {
    pub canonical: String,
    pub system_id: i64,
    pub store_name: String,
    pub method: MapMethod,
}

/// The startup name-to-id mapping for every system in the core tree.
#[derive(Debug, Default)]
pub struct SystemMap {
    mapped: Vec<MappedSystem>,
    unmapped: Vec<String>,
    ids: HashMap<String, i64>,
}

impl SystemMap {
    /// Pair each canonical name with a store system, trying the alias
    /// table, then direct equality, then the similarity fallback.
    pub fn build(canonicals: &[&str], stored: &[SystemRow], table: &[SystemAliases]) -> Self {
        let mut map = SystemMap::default();
        for &canonical in canonicals {
            match match_one(canonical, stored, table) {
                Some((row, method)) => {
                    map.ids.insert(canonical.to_string(), row.id);
                    map.mapped.push(MappedSystem {
                        canonical: canonical.to_string(),
                        system_id: row.id,
                        store_name: row.name.clone(),
                        method,
                    });
                }
                None => {
                    log::warn!("No store mapping found for system '{canonical}'");
                    map.unmapped.push(canonical.to_string());
                }
            }
        }
        map
    }

    /// Store id for a canonical name, if it was mapped.
    pub fn get(&self, canonical: &str) -> Option<i64> {
        self.ids.get(canonical).copied()
    }

    pub fn mapped(&self) -> &[MappedSystem] {
        &self.mapped
    }

    pub fn unmapped(&self) -> &[String] {
        &self.unmapped
    }
}

fn match_one<'a>(
    canonical: &str,
    stored: &'a [SystemRow],
    table: &[SystemAliases],
) -> Option<(&'a SystemRow, MapMethod)> {
    // (a) alias-table pass; first store row hit wins
    if let Some(entry) = table.iter().find(|e| e.canonical == canonical) {
        for row in stored {
            let name_hit = entry
                .aliases
                .iter()
                .any(|a| a.eq_ignore_ascii_case(&row.name));
            let alias_hit = row
                .alias
                .as_deref()
                .is_some_and(|al| entry.aliases.iter().any(|a| a.eq_ignore_ascii_case(al)));
            if name_hit || alias_hit {
                return Some((row, MapMethod::Alias));
            }
        }
    }

    // (b) direct equality against store name or alias
    for row in stored {
        let direct = canonical.eq_ignore_ascii_case(&row.name)
            || row
                .alias
                .as_deref()
                .is_some_and(|al| canonical.eq_ignore_ascii_case(al));
        if direct {
            return Some((row, MapMethod::Direct));
        }
    }

    // (c) best similarity against store names; ties keep store order
    let target = canonical.to_lowercase();
    let mut best: Option<(&SystemRow, f64)> = None;
    for row in stored {
        let score = strsim::normalized_levenshtein(&target, &row.name.to_lowercase());
        if best.is_none_or(|(_, b)| score > b) {
            best = Some((row, score));
        }
    }
    match best {
        Some((row, score)) if score >= MIN_SYSTEM_SIMILARITY => {
            Some((row, MapMethod::Fuzzy { score }))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Vec<SystemRow> {
        vec![
            SystemRow {
                id: 7,
                name: "Nintendo Entertainment System (NES)".to_string(),
                alias: Some("nes".to_string()),
            },
            SystemRow {
                id: 6,
                name: "Super Nintendo (SNES)".to_string(),
                alias: Some("snes".to_string()),
            },
            SystemRow {
                id: 31,
                name: "ColecoVision".to_string(),
                alias: Some("colecovision".to_string()),
            },
        ]
    }

    #[test]
    fn alias_table_match() {
        let stored = store();
        let map = SystemMap::build(
            &["Nintendo - Nintendo Entertainment System"],
            &stored,
            SYSTEM_ALIASES,
        );
        assert_eq!(map.get("Nintendo - Nintendo Entertainment System"), Some(7));
        assert_eq!(map.mapped()[0].method, MapMethod::Alias);
    }

    #[test]
    fn alias_match_is_case_insensitive() {
        // The store alias differs in case from the table's "nes"
        let stored = vec![SystemRow {
            id: 7,
            name: "Famicom".to_string(),
            alias: Some("NES".to_string()),
        }];
        let map = SystemMap::build(
            &["Nintendo - Nintendo Entertainment System"],
            &stored,
            SYSTEM_ALIASES,
        );
        assert_eq!(map.get("Nintendo - Nintendo Entertainment System"), Some(7));
    }

    #[test]
    fn direct_match_without_table_entry() {
        let stored = store();
        let map = SystemMap::build(&["colecovision"], &stored, SYSTEM_ALIASES);
        assert_eq!(map.get("colecovision"), Some(31));
        assert_eq!(map.mapped()[0].method, MapMethod::Direct);
    }

    #[test]
    fn fuzzy_fallback_above_threshold() {
        let stored = store();
        // Typo: not a table key, not a direct match, but close enough
        let map = SystemMap::build(&["Colecovison"], &stored, SYSTEM_ALIASES);
        assert_eq!(map.get("Colecovison"), Some(31));
        assert!(matches!(
            map.mapped()[0].method,
            MapMethod::Fuzzy { score } if score >= MIN_SYSTEM_SIMILARITY
        ));
    }

    #[test]
    fn below_threshold_stays_unmapped() {
        let stored = store();
        let map = SystemMap::build(&["Commodore Amiga CD32"], &stored, SYSTEM_ALIASES);
        assert_eq!(map.get("Commodore Amiga CD32"), None);
        assert_eq!(map.unmapped(), &["Commodore Amiga CD32".to_string()]);
    }

    #[test]
    fn first_store_row_wins_on_ties() {
        let stored = vec![
            SystemRow {
                id: 1,
                name: "Arcade".to_string(),
                alias: None,
            },
            SystemRow {
                id: 2,
                name: "arcade".to_string(),
                alias: None,
            },
        ];
        let map = SystemMap::build(&["Arcade"], &stored, SYSTEM_ALIASES);
        assert_eq!(map.get("Arcade"), Some(1));
    }

    #[test]
    fn missing_store_alias_is_tolerated() {
        let stored = vec![SystemRow {
            id: 3,
            name: "Sega Mega Drive".to_string(),
            alias: None,
        }];
        let map = SystemMap::build(&["Sega - Mega Drive - Genesis"], &stored, SYSTEM_ALIASES);
        assert_eq!(map.get("Sega - Mega Drive - Genesis"), Some(3));
    }
}
