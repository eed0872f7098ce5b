//! This library forms the bulk of the `dota-tooltips` application.
//!
//! It reads a Dota 2 addon's npc script files, works out which localization keys the game will
//! look up for the abilities, items, units and heroes defined there, and builds a document per
//! language file listing the keys that file does not have yet.

pub use crate::block::{Block, Field, BV};
pub use crate::definitions::{
    AbilityCategory, AbilityDefinition, DefinitionFile, Definitions, HeroDefinition,
    UnitDefinition,
};
pub use crate::derive::{
    derive_tooltips, AbilityTooltip, ExtraEntries, LocaEntry, LocaSource, ModifierTooltip,
    TooltipSet,
};
pub use crate::existing::LocaIndex;
pub use crate::merge::merge_document;
pub use crate::naming::NamingConvention;
pub use crate::parse::kvfile::parse_kv;
pub use crate::parse::ParseError;
pub use crate::report::{
    log_reports_json, ErrorKey, LogReport, OutputStyle, ReportWriter, Reports, Severity,
};
pub use crate::settings::{
    parse_bool, validate_config_file, Settings, SettingsError, SETTINGS_FILE,
};
pub use crate::sync::{
    mirror_utf8, scan_definitions, sync_addon, synchronize, write_documents, Addon, DocumentKind,
    SyncDocument, SyncOutcome,
};
pub use crate::textfile::{language_files, language_of, FileAccess, FsFiles, TextEncoding};
pub use crate::token::{Loc, Token};

mod block;
pub mod definitions;
mod derive;
mod existing;
mod helpers;
mod lowercase;
mod merge;
mod naming;
mod parse;
pub mod report;
mod settings;
mod sync;
mod textfile;
mod token;
