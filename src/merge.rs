//! Building the text of a tooltip document: the derived entries a language file still lacks.

use std::fmt::Write;

use crate::derive::{AbilityTooltip, LocaEntry, ModifierTooltip, TooltipSet};
use crate::existing::LocaIndex;
use crate::helpers::{kv_quote, TooltipHashSet};
use crate::lowercase::Lowercase;

const HEADER_HEROES: &str = "HEROES";
const HEADER_UNITS: &str = "UNITS";
const HEADER_ABILITY_MODIFIERS: &str = "ABILITY MODIFIERS";
const HEADER_ITEM_MODIFIERS: &str = "ITEM MODIFIERS";
const HEADER_ABILITIES: &str = "ABILITIES";
const HEADER_ITEMS: &str = "ITEMS";

/// Accumulates the document text and remembers which keys it already holds.
struct Document<'a> {
    index: &'a LocaIndex,
    text: String,
    emitted: TooltipHashSet<Lowercase<'a>>,
}

impl<'a> Document<'a> {
    fn header(&mut self, title: &str) {
        let _ = write!(self.text, "\n\t\t// ******************** {title} ********************\n");
    }

    /// Whether the entry is neither in the language file nor already in this document.
    fn is_missing(&self, entry: &LocaEntry) -> bool {
        let lowercase = Lowercase::new(&entry.key);
        !self.index.contains(&entry.key) && !self.emitted.contains(lowercase.as_str())
    }

    /// Add the entry's line unless this document already has its key.
    fn line(&mut self, entry: &'a LocaEntry) -> bool {
        if !self.emitted.insert(Lowercase::new(&entry.key)) {
            return false;
        }
        let _ = writeln!(self.text, "\t\t{}\t\t{}", kv_quote(&entry.key), kv_quote(&entry.text));
        true
    }

    fn simple(&mut self, entry: &'a LocaEntry) {
        if self.is_missing(entry) {
            self.line(entry);
        }
    }

    fn modifier(&mut self, modifier: &'a ModifierTooltip) {
        if self.is_missing(&modifier.name) {
            for entry in modifier.entries() {
                self.line(entry);
            }
            self.text.push('\n');
        }
    }

    /// A missing ability gets its whole block. An ability the file already has only gets the
    /// special variable entries it is missing.
    fn ability(&mut self, ability: &'a AbilityTooltip) {
        if self.is_missing(&ability.name) {
            for entry in ability.entries() {
                self.line(entry);
            }
            self.text.push('\n');
        } else if !self.emitted.contains(Lowercase::new(&ability.name.key).as_str()) {
            let mut patched = false;
            for special in &ability.specials {
                if self.is_missing(special) {
                    patched |= self.line(special);
                }
            }
            if patched {
                self.text.push('\n');
            }
        }
    }
}

/// Build the tooltip document for one language file.
///
/// `addon` and `language_file` only appear in the preamble. The result depends on nothing but
/// the arguments, so running again against the same files gives the same text.
pub fn merge_document(
    tooltips: &TooltipSet,
    index: &LocaIndex,
    addon: &str,
    language_file: &str,
) -> String {
    let mut doc = Document { index, text: String::new(), emitted: TooltipHashSet::default() };
    let _ = writeln!(doc.text, "\t\t// GENERATED TOOLTIPS FOR: {addon}");
    let _ = writeln!(
        doc.text,
        "\t\t// Keys already defined in {language_file} are not listed, \
         nor are modifiers with \"IsHidden\" \"1\"."
    );

    doc.header(HEADER_HEROES);
    for hero in &tooltips.heroes {
        doc.simple(hero);
    }
    doc.header(HEADER_UNITS);
    for unit in &tooltips.units {
        doc.simple(unit);
    }
    doc.header(HEADER_ABILITY_MODIFIERS);
    for modifier in &tooltips.ability_modifiers {
        doc.modifier(modifier);
    }
    doc.header(HEADER_ITEM_MODIFIERS);
    for modifier in &tooltips.item_modifiers {
        doc.modifier(modifier);
    }
    doc.header(HEADER_ABILITIES);
    for ability in &tooltips.abilities {
        doc.ability(ability);
    }
    doc.header(HEADER_ITEMS);
    for item in &tooltips.items {
        doc.ability(item);
    }
    doc.text
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::definitions::{AbilityCategory, AbilityDefinition, Definitions, UnitDefinition};
    use crate::derive::{derive_tooltips, ExtraEntries};
    use crate::naming::NamingConvention;
    use crate::report::Reports;

    fn fireball() -> Definitions {
        Definitions {
            abilities: vec![AbilityDefinition {
                name: "fireball".to_string(),
                category: AbilityCategory::Ability,
                specials: vec!["damage".to_string(), "radius".to_string()],
                modifiers: Vec::new(),
            }],
            ..Definitions::default()
        }
    }

    fn index(tokens: &str) -> LocaIndex {
        let content = format!("\"lang\" {{ \"Tokens\" {{ {tokens} }} }}");
        let mut reports = Reports::default();
        LocaIndex::parse(Path::new("addon_english.txt"), &content, &mut reports)
    }

    fn merge(defs: &Definitions, index: &LocaIndex) -> String {
        let tooltips = derive_tooltips(defs, &NamingConvention::default(), ExtraEntries::default());
        merge_document(&tooltips, index, "fire_arena", "addon_english.txt")
    }

    fn section<'a>(doc: &'a str, title: &str) -> &'a str {
        let header = format!("// ******************** {title} ********************\n");
        let start = doc.find(&header).unwrap() + header.len();
        let rest = &doc[start..];
        let end = rest.find("\n\t\t// ****").unwrap_or(rest.len());
        &rest[..end]
    }

    #[test]
    fn test_fireball_without_existing_entries() {
        let doc = merge(&fireball(), &LocaIndex::default());
        assert_eq!(
            section(&doc, "ABILITIES"),
            [
                "\t\t\"DOTA_Tooltip_ability_fireball\"\t\t\"fireball\"",
                "\t\t\"DOTA_Tooltip_ability_fireball_Description\"\t\t\"\"",
                "\t\t\"DOTA_Tooltip_ability_fireball_damage\"\t\t\"damage\"",
                "\t\t\"DOTA_Tooltip_ability_fireball_radius\"\t\t\"radius\"",
                "",
                "",
            ]
            .join("\n")
        );
        assert!(doc.starts_with("\t\t// GENERATED TOOLTIPS FOR: fire_arena\n"));
    }

    #[test]
    fn test_partial_patch() {
        let index = index(
            r#""DOTA_Tooltip_ability_fireball" "Fireball" "dota_tooltip_ability_fireball_DAMAGE" "Damage:""#,
        );
        let doc = merge(&fireball(), &index);
        assert_eq!(
            section(&doc, "ABILITIES"),
            "\t\t\"DOTA_Tooltip_ability_fireball_radius\"\t\t\"radius\"\n\n"
        );
    }

    #[test]
    fn test_complete_file_gives_only_headers() {
        let index = index(
            r#""DOTA_Tooltip_ability_fireball" "" "DOTA_Tooltip_ability_fireball_damage" ""
               "DOTA_Tooltip_ability_fireball_radius" """#,
        );
        let doc = merge(&fireball(), &index);
        assert_eq!(section(&doc, "ABILITIES"), "");
        assert!(!doc.contains("\"DOTA_Tooltip"));
    }

    #[test]
    fn test_section_order() {
        let doc = merge(&fireball(), &LocaIndex::default());
        let positions: Vec<usize> = [
            HEADER_HEROES,
            HEADER_UNITS,
            HEADER_ABILITY_MODIFIERS,
            HEADER_ITEM_MODIFIERS,
            HEADER_ABILITIES,
            HEADER_ITEMS,
        ]
        .iter()
        .map(|title| doc.find(&format!("** {title} **")).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_idempotent() {
        let mut defs = fireball();
        defs.units.push(UnitDefinition { name: "npc_golem".to_string() });
        let index = index(r#""npc_golem" "Golem""#);
        assert_eq!(merge(&defs, &index), merge(&defs, &index));
    }

    #[test]
    fn test_no_key_twice() {
        let defs = Definitions {
            units: vec![
                UnitDefinition { name: "npc_golem".to_string() },
                UnitDefinition { name: "NPC_GOLEM".to_string() },
            ],
            ..Definitions::default()
        };
        let doc = merge(&defs, &LocaIndex::default());
        assert_eq!(section(&doc, "UNITS"), "\t\t\"npc_golem\"\t\t\"npc_golem\"\n");
    }

    #[test]
    fn test_modifier_block() {
        let mut defs = fireball();
        defs.abilities[0].modifiers.push("modifier_burn".to_string());
        let doc = merge(&defs, &LocaIndex::default());
        assert_eq!(
            section(&doc, "ABILITY MODIFIERS"),
            "\t\t\"DOTA_Tooltip_modifier_burn\"\t\t\"modifier_burn\"\n\t\t\"DOTA_Tooltip_modifier_burn_Description\"\t\t\"\"\n\n"
        );
    }
}
