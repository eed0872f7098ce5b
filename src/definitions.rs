//! Scanning the npc script files for the abilities, items, units and heroes that need tooltips.

use strum_macros::{Display, EnumIter};

use crate::block::{Block, Field};
use crate::helpers::TooltipHashMap;
use crate::report::{warn, ErrorKey, Reports};
use crate::token::Token;

/// The top-level key that holds the file format version. It is never a definition.
const VERSION_KEY: &str = "Version";

/// The four npc script files, in the order they are scanned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum DefinitionFile {
    Items,
    Abilities,
    Units,
    Heroes,
}

impl DefinitionFile {
    /// The file's name under `scripts/npc`.
    pub fn filename(self) -> &'static str {
        match self {
            DefinitionFile::Items => "npc_items_custom.txt",
            DefinitionFile::Abilities => "npc_abilities_custom.txt",
            DefinitionFile::Units => "npc_units_custom.txt",
            DefinitionFile::Heroes => "npc_heroes_custom.txt",
        }
    }
}

/// Abilities and items are defined the same way. This says which one a definition is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum AbilityCategory {
    Ability,
    Item,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbilityDefinition {
    pub name: String,
    pub category: AbilityCategory,
    /// Names from all `AbilitySpecial` blocks, in first-seen order, without duplicates.
    pub specials: Vec<String>,
    /// Modifiers from all `Modifiers` blocks that are not `"IsHidden" "1"`.
    pub modifiers: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitDefinition {
    pub name: String,
}

/// A hero entry with an `override_hero` field. The hero is displayed under the name of the
/// unit it overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeroDefinition {
    pub name: String,
    pub overrides: String,
}

/// Everything scanned from one addon's npc files.
#[derive(Clone, Debug, Default)]
pub struct Definitions {
    pub abilities: Vec<AbilityDefinition>,
    pub items: Vec<AbilityDefinition>,
    pub units: Vec<UnitDefinition>,
    pub heroes: Vec<HeroDefinition>,
}

impl Definitions {
    /// All visible modifier names of abilities in this category, first-seen order, no duplicates.
    pub fn modifiers(&self, category: AbilityCategory) -> Vec<&str> {
        let defs = match category {
            AbilityCategory::Ability => &self.abilities,
            AbilityCategory::Item => &self.items,
        };
        let mut seen = Vec::new();
        for modifier in defs.iter().flat_map(|def| &def.modifiers) {
            push_unique(&mut seen, modifier.as_str());
        }
        seen
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
            && self.items.is_empty()
            && self.units.is_empty()
            && self.heroes.is_empty()
    }
}

fn push_unique<T: PartialEq>(vec: &mut Vec<T>, item: T) {
    if !vec.contains(&item) {
        vec.push(item);
    }
}

/// Iterate over the definitions in a file's root block, skipping `Version` and warning about
/// names that are defined twice. Only the first definition of a name is kept.
fn iter_definitions<'a>(
    root: &'a Block,
    reports: &'a mut Reports,
) -> impl Iterator<Item = &'a Field> + 'a {
    let mut seen: TooltipHashMap<&'a str, &'a Token> = TooltipHashMap::default();
    root.iter_fields().filter(move |field| {
        let field: &'a Field = *field;
        let key = field.key();
        if key.is(VERSION_KEY) {
            return false;
        }
        if let Some(first) = seen.get(key.as_str()) {
            warn(ErrorKey::Duplicate)
                .msg(format!("`{key}` is defined twice; only the first one is used"))
                .loc(&key.loc)
                .loc_msg(&first.loc, "the first one is here")
                .push(reports);
            return false;
        }
        seen.insert(key.as_str(), key);
        true
    })
}

/// Scan the root block of `npc_abilities_custom.txt` or `npc_items_custom.txt`.
pub fn scan_abilities(
    root: &Block,
    category: AbilityCategory,
    reports: &mut Reports,
) -> Vec<AbilityDefinition> {
    iter_definitions(root, reports)
        .map(|field| AbilityDefinition {
            name: field.key().to_string(),
            category,
            specials: special_names(field),
            modifiers: visible_modifiers(field),
        })
        .collect()
}

fn special_names(definition: &Field) -> Vec<String> {
    let mut names = Vec::new();
    for block in definition.children().iter().filter(|f| f.key().is("AbilitySpecial")) {
        // Each special is wrapped in a numbered group such as "01" { "var_type" ... "damage" ... }
        for group in block.children() {
            for variable in group.children() {
                if !variable.key().is("var_type") {
                    push_unique(&mut names, variable.key().to_string());
                }
            }
        }
    }
    names
}

fn visible_modifiers(definition: &Field) -> Vec<String> {
    let mut names = Vec::new();
    for block in definition.children().iter().filter(|f| f.key().is("Modifiers")) {
        for modifier in block.children() {
            let hidden = modifier.children().iter().any(|field| {
                field.key().is("IsHidden") && field.get_value().is_some_and(|value| value.is("1"))
            });
            if !hidden {
                push_unique(&mut names, modifier.key().to_string());
            }
        }
    }
    names
}

/// Scan the root block of `npc_units_custom.txt`.
pub fn scan_units(root: &Block, reports: &mut Reports) -> Vec<UnitDefinition> {
    iter_definitions(root, reports)
        .map(|field| UnitDefinition { name: field.key().to_string() })
        .collect()
}

/// Scan the root block of `npc_heroes_custom.txt`.
///
/// Every hero is also a unit. Heroes with an `override_hero` field are additionally returned as
/// [`HeroDefinition`].
pub fn scan_heroes(
    root: &Block,
    reports: &mut Reports,
) -> (Vec<UnitDefinition>, Vec<HeroDefinition>) {
    let mut units = Vec::new();
    let mut heroes = Vec::new();
    for field in iter_definitions(root, reports) {
        let name = field.key().to_string();
        let overrides = field
            .children()
            .iter()
            .find(|child| child.key().is("override_hero"))
            .and_then(Field::get_value);
        if let Some(overrides) = overrides {
            heroes.push(HeroDefinition { name: name.clone(), overrides: overrides.to_string() });
        }
        units.push(UnitDefinition { name });
    }
    (units, heroes)
}
