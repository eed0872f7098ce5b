//! Turning scanned definitions into the localization entries the game will look up.

use strum_macros::Display;

use crate::definitions::{AbilityCategory, AbilityDefinition, Definitions};
use crate::helpers::TooltipHashSet;
use crate::lowercase::Lowercase;
use crate::naming::NamingConvention;

/// What kind of definition a localization entry is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum LocaSource {
    Hero,
    Unit,
    AbilityModifier,
    ItemModifier,
    Ability,
    Item,
}

/// One localization key with its placeholder text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaEntry {
    /// The key exactly as the game looks it up.
    pub key: String,
    pub text: String,
    pub source: LocaSource,
    /// For special variable entries, the key of the ability or item they belong to.
    pub parent: Option<String>,
}

impl LocaEntry {
    fn new(key: String, text: &str, source: LocaSource) -> Self {
        LocaEntry { key, text: text.to_string(), source, parent: None }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModifierTooltip {
    pub name: LocaEntry,
    pub description: LocaEntry,
}

impl ModifierTooltip {
    pub fn entries(&self) -> [&LocaEntry; 2] {
        [&self.name, &self.description]
    }
}

/// The entries for one ability or item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbilityTooltip {
    pub name: LocaEntry,
    /// Description, and optionally note and lore.
    pub extras: Vec<LocaEntry>,
    /// One per special variable, each with `parent` set to `name.key`.
    pub specials: Vec<LocaEntry>,
}

impl AbilityTooltip {
    /// All entries of the tooltip, in output order.
    pub fn entries(&self) -> impl Iterator<Item = &LocaEntry> {
        std::iter::once(&self.name).chain(&self.extras).chain(&self.specials)
    }
}

/// Which optional entries to generate for abilities and items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtraEntries {
    pub note0: bool,
    pub lore: bool,
}

/// All entries derived from one addon's definitions, grouped the way they are output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TooltipSet {
    pub heroes: Vec<LocaEntry>,
    pub units: Vec<LocaEntry>,
    pub ability_modifiers: Vec<ModifierTooltip>,
    pub item_modifiers: Vec<ModifierTooltip>,
    pub abilities: Vec<AbilityTooltip>,
    pub items: Vec<AbilityTooltip>,
}

impl TooltipSet {
    /// Number of distinct entries over all categories.
    pub fn len(&self) -> usize {
        self.heroes.len()
            + self.units.len()
            + (self.ability_modifiers.len() + self.item_modifiers.len()) * 2
            + self.abilities.iter().chain(&self.items).map(|a| a.entries().count()).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Derive every localization entry the game will look up for these definitions.
pub fn derive_tooltips(
    defs: &Definitions,
    naming: &NamingConvention,
    extra: ExtraEntries,
) -> TooltipSet {
    let units: Vec<LocaEntry> = defs
        .units
        .iter()
        .map(|unit| LocaEntry::new(naming.unit_key(&unit.name), &unit.name, LocaSource::Unit))
        .collect();

    // A hero shown under the name of a unit that is itself defined needs no entry of its own.
    let unit_keys: TooltipHashSet<Lowercase> =
        units.iter().map(|entry| Lowercase::new(&entry.key)).collect();
    let heroes = defs
        .heroes
        .iter()
        .map(|hero| LocaEntry::new(naming.unit_key(&hero.overrides), &hero.name, LocaSource::Hero))
        .filter(|entry| !unit_keys.contains(entry.key.to_lowercase().as_str()))
        .collect();

    TooltipSet {
        heroes,
        units,
        ability_modifiers: modifier_tooltips(defs, AbilityCategory::Ability, naming),
        item_modifiers: modifier_tooltips(defs, AbilityCategory::Item, naming),
        abilities: defs.abilities.iter().map(|def| ability_tooltip(def, naming, extra)).collect(),
        items: defs.items.iter().map(|def| ability_tooltip(def, naming, extra)).collect(),
    }
}

fn modifier_tooltips(
    defs: &Definitions,
    category: AbilityCategory,
    naming: &NamingConvention,
) -> Vec<ModifierTooltip> {
    let source = match category {
        AbilityCategory::Ability => LocaSource::AbilityModifier,
        AbilityCategory::Item => LocaSource::ItemModifier,
    };
    defs.modifiers(category)
        .into_iter()
        .map(|modifier| {
            let key = naming.modifier_key(modifier);
            ModifierTooltip {
                description: LocaEntry::new(naming.description_key(&key), "", source),
                name: LocaEntry::new(key, modifier, source),
            }
        })
        .collect()
}

fn ability_tooltip(
    def: &AbilityDefinition,
    naming: &NamingConvention,
    extra: ExtraEntries,
) -> AbilityTooltip {
    let (key, source) = match def.category {
        AbilityCategory::Ability => (naming.ability_key(&def.name), LocaSource::Ability),
        AbilityCategory::Item => (naming.item_key(&def.name), LocaSource::Item),
    };

    let mut extras = vec![LocaEntry::new(naming.description_key(&key), "", source)];
    if extra.note0 {
        extras.push(LocaEntry::new(naming.note0_key(&key), "", source));
    }
    if extra.lore {
        extras.push(LocaEntry::new(naming.lore_key(&key), "", source));
    }

    let specials = def
        .specials
        .iter()
        .map(|variable| LocaEntry {
            key: naming.special_key(&key, variable),
            text: variable.clone(),
            source,
            parent: Some(key.clone()),
        })
        .collect();

    AbilityTooltip { name: LocaEntry::new(key, &def.name, source), extras, specials }
}
