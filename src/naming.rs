//! The table of prefixes and suffixes that turn definition names into localization keys.
//!
//! The game engine decides these, not us. The defaults are the engine's current convention;
//! the settings file can override any of them.

/// How localization keys are built from definition names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamingConvention {
    /// Prefix for unit and hero name keys. Units are looked up by their bare name.
    pub unit_prefix: String,
    pub ability_prefix: String,
    /// Items are abilities to the engine and share the ability prefix by default.
    pub item_prefix: String,
    pub modifier_prefix: String,
    /// Joins an ability key and one of its special variable names.
    pub separator: String,
    pub description_suffix: String,
    pub note0_suffix: String,
    pub lore_suffix: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        NamingConvention {
            unit_prefix: String::new(),
            ability_prefix: "DOTA_Tooltip_ability_".to_string(),
            item_prefix: "DOTA_Tooltip_ability_".to_string(),
            modifier_prefix: "DOTA_Tooltip_".to_string(),
            separator: "_".to_string(),
            description_suffix: "_Description".to_string(),
            note0_suffix: "_Note0".to_string(),
            lore_suffix: "_Lore".to_string(),
        }
    }
}

impl NamingConvention {
    pub fn unit_key(&self, name: &str) -> String {
        format!("{}{name}", self.unit_prefix)
    }

    pub fn ability_key(&self, name: &str) -> String {
        format!("{}{name}", self.ability_prefix)
    }

    pub fn item_key(&self, name: &str) -> String {
        format!("{}{name}", self.item_prefix)
    }

    pub fn modifier_key(&self, name: &str) -> String {
        format!("{}{name}", self.modifier_prefix)
    }

    pub fn special_key(&self, owner_key: &str, variable: &str) -> String {
        format!("{owner_key}{}{variable}", self.separator)
    }

    pub fn description_key(&self, key: &str) -> String {
        format!("{key}{}", self.description_suffix)
    }

    pub fn note0_key(&self, key: &str) -> String {
        format!("{key}{}", self.note0_suffix)
    }

    pub fn lore_key(&self, key: &str) -> String {
        format!("{key}{}", self.lore_suffix)
    }

    /// Set one entry of the table by its settings-file name.
    /// Returns false if there is no entry by that name.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        let field = match name {
            "unit_prefix" => &mut self.unit_prefix,
            "ability_prefix" => &mut self.ability_prefix,
            "item_prefix" => &mut self.item_prefix,
            "modifier_prefix" => &mut self.modifier_prefix,
            "separator" => &mut self.separator,
            "description_suffix" => &mut self.description_suffix,
            "note0_suffix" => &mut self.note0_suffix,
            "lore_suffix" => &mut self.lore_suffix,
            _ => return false,
        };
        value.clone_into(field);
        true
    }
}
