//! Loading and interpreting the settings file.
//!
//! The settings file is named `dota-tooltips.conf` and sits at the top of the addon's game
//! directory. It uses the same key-value syntax as the addon's own script files:
//!
//! ```text
//! "dota-tooltips"
//! {
//!     "generate_note0"    "1"
//!     "generate_lore"     "no"
//!     "generate_utf8"     "yes"
//!     "naming"            { "item_prefix" "DOTA_Tooltip_item_" }
//!     "colors"            { "warning" "purple" }
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::block::{Block, Field};
use crate::derive::ExtraEntries;
use crate::naming::NamingConvention;
use crate::parse::kvfile::parse_kv;
use crate::parse::ParseError;
use crate::report::{warn, ErrorKey, OutputStyle, Reports, Severity};
use crate::textfile::FileAccess;
use crate::token::{Loc, Token};

/// The default name of the settings file.
pub const SETTINGS_FILE: &str = "dota-tooltips.conf";

/// The key of the block that may wrap the settings.
const ROOT_KEY: &str = "dota-tooltips";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{loc}: `{key}` must be 1, 0, true, false, yes or no, not `{value}`")]
    InvalidBool { key: String, value: String, loc: Loc },
    #[error("{}: {}", .0.loc, .0)]
    Parse(#[from] ParseError),
    #[error("could not read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
}

/// Options for one synchronization run.
#[derive(Debug)]
pub struct Settings {
    pub naming: NamingConvention,
    /// Add a `_Note0` entry to every new ability and item.
    pub generate_note0: bool,
    /// Add a `_Lore` entry to every new ability and item.
    pub generate_lore: bool,
    /// Write UTF-8 copies of the addon's resource files to the content directory.
    pub generate_utf8: bool,
    pub styles: OutputStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            naming: NamingConvention::default(),
            generate_note0: false,
            generate_lore: false,
            generate_utf8: true,
            styles: OutputStyle::default(),
        }
    }
}

impl Settings {
    pub fn extra_entries(&self) -> ExtraEntries {
        ExtraEntries { note0: self.generate_note0, lore: self.generate_lore }
    }

    /// Load the settings file. A missing file gives the default settings.
    ///
    /// Keys and color names that are not recognized are reported and skipped. A malformed file
    /// or a bad boolean is an error.
    pub fn load(
        files: &dyn FileAccess,
        path: &Path,
        reports: &mut Reports,
    ) -> Result<Self, SettingsError> {
        match files.read_text(path) {
            Ok(Some((content, _))) => Self::from_block(&parse_kv(path, &content)?, reports),
            Ok(None) => Ok(Self::default()),
            Err(source) => Err(SettingsError::Read { path: path.to_path_buf(), source }),
        }
    }

    /// Interpret a parsed settings file.
    pub fn from_block(block: &Block, reports: &mut Reports) -> Result<Self, SettingsError> {
        let block = block.get_field_block(ROOT_KEY).unwrap_or(block);
        let mut settings = Settings::default();
        for field in block.iter_fields() {
            let key = field.key();
            match key.as_str() {
                "generate_note0" | "generateNote0" => {
                    settings.generate_note0 = field_bool(field, reports)?.unwrap_or(false);
                }
                "generate_lore" | "generateLore" => {
                    settings.generate_lore = field_bool(field, reports)?.unwrap_or(false);
                }
                "generate_utf8" | "generateUTF8" => {
                    settings.generate_utf8 = field_bool(field, reports)?.unwrap_or(true);
                }
                "naming" => {
                    for (name, value) in table_entries(field, reports) {
                        if !settings.naming.set(name.as_str(), value.as_str()) {
                            warn(ErrorKey::Config)
                                .msg(format!("unknown naming entry `{name}`"))
                                .loc(&name.loc)
                                .push(reports);
                        }
                    }
                }
                "colors" => {
                    for (name, value) in table_entries(field, reports) {
                        let Ok(severity) = name.as_str().to_ascii_lowercase().parse::<Severity>()
                        else {
                            warn(ErrorKey::Config)
                                .msg(format!("unknown severity `{name}`"))
                                .info("valid severities are tips, warning and error")
                                .loc(&name.loc)
                                .push(reports);
                            continue;
                        };
                        if !settings.styles.set(severity, value.as_str()) {
                            warn(ErrorKey::Config)
                                .msg(format!("unknown color `{value}`"))
                                .loc(&value.loc)
                                .push(reports);
                        }
                    }
                }
                _ => {
                    warn(ErrorKey::Config)
                        .msg(format!("unknown setting `{key}`"))
                        .loc(&key.loc)
                        .push(reports);
                }
            }
        }
        Ok(settings)
    }
}

/// Interpret a settings value as a boolean.
///
/// `1`, `true` and `yes` are true; `0`, `false` and `no` are false. Case does not matter.
pub fn parse_bool(key: &Token, value: &Token) -> Result<bool, SettingsError> {
    match value.as_str().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(SettingsError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
            loc: value.loc.clone(),
        }),
    }
}

/// The boolean value of a field. A block instead of a value is reported and gives `None`.
fn field_bool(field: &Field, reports: &mut Reports) -> Result<Option<bool>, SettingsError> {
    match field.get_value() {
        Some(value) => parse_bool(field.key(), value).map(Some),
        None => {
            warn(ErrorKey::Config)
                .msg(format!("`{}` should be a value, not a block", field.key()))
                .loc(&field.key().loc)
                .push(reports);
            Ok(None)
        }
    }
}

/// The `"name" "value"` pairs of a table block such as `naming` or `colors`.
fn table_entries<'a>(field: &'a Field, reports: &mut Reports) -> Vec<(&'a Token, &'a Token)> {
    let Some(block) = field.get_block() else {
        warn(ErrorKey::Config)
            .msg(format!("`{}` should be a block", field.key()))
            .loc(&field.key().loc)
            .push(reports);
        return Vec::new();
    };
    let mut entries = Vec::new();
    for entry in block.iter_fields() {
        if let Some(value) = entry.get_value() {
            entries.push((entry.key(), value));
        } else {
            warn(ErrorKey::Config)
                .msg(format!("`{}` should be a value, not a block", entry.key()))
                .loc(&entry.key().loc)
                .push(reports);
        }
    }
    entries
}

/// Check if a settings file passed in with `--config` is usable.
/// If it is not, say so and return `None` so that the default file is used instead.
pub fn validate_config_file(config: Option<PathBuf>) -> Option<PathBuf> {
    let config = config?;
    if !config.is_file() {
        eprintln!(
            "{} is not a valid file. Using the default settings file instead.",
            config.display()
        );
        return None;
    }
    if config.extension().is_some_and(|s| s != "conf") {
        eprintln!(
            "{} is not a valid .conf file. Using the default settings file instead.",
            config.display()
        );
        return None;
    }
    eprintln!("Using settings file: {}", config.display());
    Some(config)
}
