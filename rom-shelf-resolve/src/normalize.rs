//! Filename normalization for library searches.
//!
//! Turns a raw ROM filename into the canonical string used as a title
//! lookup key. The steps run in a fixed order; later steps assume the
//! earlier ones already ran.

use std::path::Path;

/// Suffixes stripped from names as they appear on the shelf devices.
/// Applied verbatim and case-sensitively, in this order.
pub static STOCK_SUFFIXES: &[&str] = &[
    "-latest",
    "by MooglyGuy (PD)",
    "_Win64",
    "(Nintendo, Wide Screen)",
    "(VTech, Time & Fun)",
    "(Gakken, LCD Card Game)",
    "(Tomytronic)",
    "(Nintendo, Panorama Screen)",
    "(Nintendo, Table Top)",
    "(Mattel Electronics)",
    "(VTech, Electronic Tini-Arcade)",
    "(VTech, Sporty Time & Fun)",
    "(VTech, Explorer Time & Fun)",
    "(Bandai, LSI Game Double Play)",
];

/// Normalization settings, passed explicitly so callers can swap the
/// suffix list without touching a global.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Substrings removed verbatim in step 5, in list order.
    pub suffixes: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            suffixes: STOCK_SUFFIXES.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Normalize a raw filename into a title search key.
///
/// Steps, in order: strip the extension, strip one trailing
/// parenthesized group, turn underscores into spaces, split camelCase,
/// remove the configured suffixes, and collapse whitespace. Total over
/// all inputs; an empty result is possible and valid.
///
/// # Examples
///
/// ```
/// use rom_shelf_resolve::{NormalizerConfig, normalize};
///
/// let config = NormalizerConfig::default();
/// assert_eq!(normalize("Super_Mario_Bros_(USA).zip", &config), "Super Mario Bros");
/// assert_eq!(normalize("SpiderMan.zip", &config), "Spider Man");
/// ```
pub fn normalize(raw: &str, config: &NormalizerConfig) -> String {
    // 1. Extension off
    let stem = Path::new(raw)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(raw);

    // 2. One trailing "(...)" group, if any
    let stripped = strip_trailing_group(stem);

    // 3. Underscores become spaces
    let spaced = stripped.replace('_', " ");

    // 4. camelCase gets split
    let mut split = split_camel_case(&spaced);

    // 5. Known platform suffixes removed verbatim, in list order
    for suffix in &config.suffixes {
        split = split.replace(suffix.as_str(), "");
    }

    // 6. Whitespace collapsed and trimmed
    split.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove a single parenthesized group anchored at the end of the name,
/// along with surrounding whitespace. The group itself must not contain
/// a closing parenthesis.
fn strip_trailing_group(name: &str) -> &str {
    let trimmed = name.trim_end();
    if !trimmed.ends_with(')') {
        return name;
    }
    let body = &trimmed[..trimmed.len() - 1];
    match body.rfind('(') {
        Some(open) if !body[open + 1..].contains(')') => name[..open].trim_end(),
        _ => name,
    }
}

/// Insert a space wherever an ASCII lowercase letter is immediately
/// followed by an ASCII uppercase letter.
fn split_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 8);
    let mut prev_lower = false;
    for c in name.chars() {
        if prev_lower && c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c);
        prev_lower = c.is_ascii_lowercase();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(raw: &str) -> String {
        normalize(raw, &NormalizerConfig::default())
    }

    #[test]
    fn strips_extension_and_region_tag() {
        assert_eq!(norm("Super_Mario_Bros_(USA).zip"), "Super Mario Bros");
    }

    #[test]
    fn splits_camel_case() {
        assert_eq!(norm("SpiderMan.zip"), "Spider Man");
    }

    #[test]
    fn strips_only_the_trailing_group() {
        // The inner group is part of the name body and must survive
        assert_eq!(norm("Game (USA) (Rev 1).zip"), "Game (USA)");
        assert_eq!(norm("Mario (Europe).zip"), "Mario");
    }

    #[test]
    fn leaves_non_trailing_groups_alone() {
        assert_eq!(norm("Game (USA) extra.zip"), "Game (USA) extra");
    }

    #[test]
    fn unbalanced_parens_are_kept() {
        assert_eq!(norm("weird).zip"), "weird)");
    }

    #[test]
    fn removes_configured_suffixes() {
        assert_eq!(norm("doom-latest.zip"), "doom");
        assert_eq!(
            norm("Ball (Nintendo, Wide Screen).zip"),
            // Trailing-group stripping takes the suffix first; a midway
            // occurrence is caught by the denylist pass
            "Ball"
        );
        assert_eq!(norm("Fire_(Nintendo, Wide Screen)_v2.zip"), "Fire v2");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(norm("A__Very___Spaced_Game.zip"), "A Very Spaced Game");
    }

    #[test]
    fn empty_and_degenerate_inputs() {
        assert_eq!(norm(""), "");
        // A leading dot means there is no extension to strip
        assert_eq!(norm(".zip"), ".zip");
        assert_eq!(norm("(USA).zip"), "");
    }

    #[test]
    fn custom_suffix_list() {
        let config = NormalizerConfig {
            suffixes: vec!["[demo]".to_string()],
        };
        assert_eq!(normalize("Tetris [demo].gb", &config), "Tetris");
    }

    #[test]
    fn no_extension_is_fine() {
        assert_eq!(norm("Super_Mario_Bros"), "Super Mario Bros");
    }
}
