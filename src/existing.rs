//! The set of keys a language file already defines.

use std::path::Path;

use crate::block::Block;
use crate::helpers::TooltipHashSet;
use crate::lowercase::Lowercase;
use crate::parse::kvfile::parse_kv;
use crate::report::{err, warn, ErrorKey, Reports};
use crate::token::Loc;

/// Case-insensitive index of the keys in all `Tokens` blocks of one language file.
#[derive(Clone, Debug, Default)]
pub struct LocaIndex {
    keys: TooltipHashSet<Lowercase<'static>>,
}

impl LocaIndex {
    /// Parse a language file and index its keys.
    ///
    /// A file that does not parse is reported and gives an empty index, so that every derived
    /// key counts as missing.
    pub fn parse(pathname: &Path, content: &str, reports: &mut Reports) -> Self {
        match parse_kv(pathname, content) {
            Ok(block) => Self::from_block(&block, reports),
            Err(e) => {
                err(ErrorKey::ParseError)
                    .msg(format!("could not parse language file: {e}"))
                    .info("every key will be listed as missing")
                    .loc(&e.loc)
                    .push(reports);
                Self::default()
            }
        }
    }

    /// Index the keys of a parsed language file.
    pub fn from_block(file: &Block, reports: &mut Reports) -> Self {
        let mut index = Self::default();
        let mut found_tokens = false;
        if let Some((_, root)) = file.root_block() {
            for tokens in root.get_field_blocks("Tokens") {
                found_tokens = true;
                for field in tokens.iter_fields() {
                    index.keys.insert(Lowercase::new(field.key().as_str()).into_owned());
                }
            }
        }
        if !found_tokens {
            warn(ErrorKey::Localization)
                .msg("no `Tokens` block found")
                .info("every key will be listed as missing")
                .loc(&Loc::for_file(file.loc.pathname()))
                .push(reports);
        }
        index
    }

    /// Whether the file defines this key, ignoring case.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(Lowercase::new(key).as_str())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGLISH: &str = r#"
"lang"
{
    "Language"  "English"
    "Tokens"
    {
        "DOTA_Tooltip_ability_fireball"     "Fireball"
        "DOTA_Tooltip_ability_fireball_damage"  "DAMAGE:"
        "addon_game_name"   "Fire Arena"
    }
    "Tokens"
    {
        "npc_dota_creep_golem"  "Golem"
    }
}
"#;

    #[test]
    fn test_case_insensitive_contains() {
        let mut reports = Reports::default();
        let index = LocaIndex::parse(Path::new("resource/addon_english.txt"), ENGLISH, &mut reports);
        assert!(reports.is_empty());
        assert_eq!(index.len(), 4);
        assert!(index.contains("DOTA_Tooltip_ability_fireball"));
        assert!(index.contains("dota_tooltip_Ability_FIREBALL_damage"));
        assert!(index.contains("NPC_DOTA_CREEP_GOLEM"));
        assert!(!index.contains("DOTA_Tooltip_ability_fireball_radius"));
        assert!(!index.contains("Language"));
    }

    #[test]
    fn test_parse_error_gives_empty_index() {
        let mut reports = Reports::default();
        let index = LocaIndex::parse(
            Path::new("resource/addon_english.txt"),
            "\"lang\" { \"Tokens\" { \"a\" \"b\" }",
            &mut reports,
        );
        assert!(index.is_empty());
        assert_eq!(reports.len(), 1);
        assert_eq!(reports.iter().next().unwrap().key, ErrorKey::ParseError);
    }

    #[test]
    fn test_no_tokens_block() {
        let mut reports = Reports::default();
        let index = LocaIndex::parse(
            Path::new("resource/addon_english.txt"),
            "\"lang\" { \"Language\" \"English\" }",
            &mut reports,
        );
        assert!(index.is_empty());
        let report = reports.iter().next().unwrap();
        assert_eq!(report.key, ErrorKey::Localization);
        assert_eq!(report.pointers[0].loc.line, 0);
    }
}
