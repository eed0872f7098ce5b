//! Running a whole synchronization for one addon: scan its definitions, derive the tooltip
//! entries, and build one document per language file with the entries that file lacks.
//!
//! Nothing here writes to the addon. The documents come back as values and the caller decides
//! whether to write them, with [`write_documents`] or otherwise.

use std::path::{Component, Path, PathBuf};

use strum::IntoEnumIterator;

use crate::block::Block;
use crate::definitions::{
    scan_abilities, scan_heroes, scan_units, AbilityCategory, DefinitionFile, Definitions,
};
use crate::derive::derive_tooltips;
use crate::existing::LocaIndex;
use crate::merge::merge_document;
use crate::parse::kvfile::parse_kv;
use crate::report::{err, tips, ErrorKey, Reports};
use crate::settings::{Settings, SETTINGS_FILE};
use crate::textfile::{file_name, language_files, language_of, FileAccess, TextEncoding};
use crate::token::Loc;

/// Where one addon's files are.
///
/// An addon has a game directory, with its scripts and resource files, and a content directory,
/// where the tooltip documents are written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Addon {
    pub name: String,
    pub game_dir: PathBuf,
    pub content_dir: PathBuf,
}

impl Addon {
    pub fn new(name: &str, game_dir: PathBuf, content_dir: PathBuf) -> Self {
        Addon { name: name.to_string(), game_dir, content_dir }
    }

    /// Work out the addon's name and content directory from its game directory.
    ///
    /// `<dota>/game/dota_addons/<name>` has its content in `<dota>/content/dota_addons/<name>`.
    /// Returns `None` if the path does not end in that shape.
    pub fn from_game_dir(game_dir: &Path) -> Option<Self> {
        let components: Vec<Component> = game_dir.components().collect();
        let [base @ .., game, addons, name] = components.as_slice() else {
            return None;
        };
        if game.as_os_str() != "game" || addons.as_os_str() != "dota_addons" {
            return None;
        }
        let name = name.as_os_str().to_str()?;
        let content_dir: PathBuf =
            base.iter().collect::<PathBuf>().join("content").join("dota_addons").join(name);
        Some(Addon::new(name, game_dir.to_path_buf(), content_dir))
    }

    pub fn definition_path(&self, file: DefinitionFile) -> PathBuf {
        self.game_dir.join("scripts").join("npc").join(file.filename())
    }

    pub fn resource_dir(&self) -> PathBuf {
        self.game_dir.join("resource")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.game_dir.join(SETTINGS_FILE)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    /// The entries missing from one language file.
    Tooltips,
    /// A UTF-8 copy of a resource file.
    Utf8Copy,
}

/// A document ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncDocument {
    pub kind: DocumentKind,
    pub language: String,
    /// The resource file this document was made from.
    pub source: PathBuf,
    /// Where the document should be written.
    pub path: PathBuf,
    pub encoding: TextEncoding,
    pub text: String,
}

/// The result of a run. A run always produces an outcome; the problems it ran into are in
/// `reports`, and the documents cover whatever could still be done.
#[derive(Debug, Default)]
pub struct SyncOutcome {
    pub documents: Vec<SyncDocument>,
    pub reports: Reports,
}

/// Read and parse one file. Missing files give `None` without a report.
fn load_file(files: &dyn FileAccess, path: &Path, reports: &mut Reports) -> Option<Block> {
    let text = match files.read_text(path) {
        Ok(Some((text, _))) => text,
        Ok(None) => return None,
        Err(e) => {
            err(ErrorKey::ReadError)
                .msg(format!("could not read file: {e}"))
                .loc(&Loc::for_file(path))
                .push(reports);
            return None;
        }
    };
    match parse_kv(path, &text) {
        Ok(block) => Some(block),
        Err(e) => {
            err(ErrorKey::ParseError)
                .msg(format!("could not parse {}: {e}", file_name(path)))
                .info("no definitions are taken from this file")
                .loc(&e.loc)
                .push(reports);
            None
        }
    }
}

/// Scan all four npc files of the addon. A file that is missing or broken contributes nothing;
/// the others are still scanned.
pub fn scan_definitions(
    files: &dyn FileAccess,
    addon: &Addon,
    reports: &mut Reports,
) -> Definitions {
    let mut defs = Definitions::default();
    for file in DefinitionFile::iter() {
        let path = addon.definition_path(file);
        let Some(block) = load_file(files, &path, reports) else {
            continue;
        };
        let Some((_, root)) = block.root_block() else {
            err(ErrorKey::ParseError)
                .msg(format!("could not parse {}: expected a root block", file.filename()))
                .info("the definitions should be inside a block such as \"DOTAAbilities\" { }")
                .loc(&Loc::for_file(&path))
                .push(reports);
            continue;
        };
        match file {
            DefinitionFile::Items => {
                defs.items = scan_abilities(root, AbilityCategory::Item, reports);
            }
            DefinitionFile::Abilities => {
                defs.abilities = scan_abilities(root, AbilityCategory::Ability, reports);
            }
            DefinitionFile::Units => {
                defs.units.extend(scan_units(root, reports));
            }
            DefinitionFile::Heroes => {
                let (units, heroes) = scan_heroes(root, reports);
                defs.units.extend(units);
                defs.heroes = heroes;
            }
        }
    }
    if defs.is_empty() {
        let npc_dir = addon.game_dir.join("scripts").join("npc");
        tips(ErrorKey::Localization)
            .msg("no abilities, items, units or heroes found")
            .info("the documents will only have their preamble")
            .loc(&Loc::for_file(&npc_dir))
            .push(reports);
    }
    defs
}

/// Build the tooltip document for each of the given language files.
///
/// The definitions are scanned once. A language file that cannot be read is skipped, and one
/// that cannot be parsed counts as empty, so its document lists every entry.
pub fn synchronize(
    files: &dyn FileAccess,
    addon: &Addon,
    language_files: &[PathBuf],
    settings: &Settings,
) -> SyncOutcome {
    let mut outcome = SyncOutcome::default();
    let defs = scan_definitions(files, addon, &mut outcome.reports);
    let tooltips = derive_tooltips(&defs, &settings.naming, settings.extra_entries());

    for path in language_files {
        let (text, encoding) = match files.read_text(path) {
            Ok(Some(read)) => read,
            Ok(None) => {
                err(ErrorKey::ReadError)
                    .msg("language file not found")
                    .loc(&Loc::for_file(path))
                    .push(&mut outcome.reports);
                continue;
            }
            Err(e) => {
                err(ErrorKey::ReadError)
                    .msg(format!("could not read language file: {e}"))
                    .loc(&Loc::for_file(path))
                    .push(&mut outcome.reports);
                continue;
            }
        };
        let index = LocaIndex::parse(path, &text, &mut outcome.reports);
        let source_name = file_name(path);
        let language = language_of(path);
        outcome.documents.push(SyncDocument {
            kind: DocumentKind::Tooltips,
            path: addon.content_dir.join(format!("tooltips_{language}.txt")),
            text: merge_document(&tooltips, &index, &addon.name, &source_name),
            language,
            source: path.clone(),
            encoding: encoding.for_output(),
        });
    }
    outcome
}

/// Make a UTF-8 copy of every file in the addon's resource directory, for tools that cannot
/// read UTF-16. Files that are themselves such copies are skipped.
pub fn mirror_utf8(
    files: &dyn FileAccess,
    addon: &Addon,
    reports: &mut Reports,
) -> Vec<SyncDocument> {
    let listing = list_resources(files, addon, reports);
    let mut documents = Vec::new();
    for path in listing {
        let name = file_name(&path);
        if name.contains("utf8") {
            continue;
        }
        match files.read_text(&path) {
            Ok(Some((text, _))) => {
                let stem = name.strip_suffix(".txt").unwrap_or(&name);
                documents.push(SyncDocument {
                    kind: DocumentKind::Utf8Copy,
                    language: language_of(&path),
                    path: addon.content_dir.join(format!("{stem}_utf8.txt")),
                    source: path.clone(),
                    encoding: TextEncoding::Utf8,
                    text,
                });
            }
            Ok(None) => (),
            Err(e) => {
                err(ErrorKey::ReadError)
                    .msg(format!("could not read file: {e}"))
                    .loc(&Loc::for_file(&path))
                    .push(reports);
            }
        }
    }
    documents
}

fn list_resources(files: &dyn FileAccess, addon: &Addon, reports: &mut Reports) -> Vec<PathBuf> {
    let dir = addon.resource_dir();
    match files.list_dir(&dir) {
        Ok(listing) => listing,
        Err(e) => {
            err(ErrorKey::ReadError)
                .msg(format!("could not list the resource directory: {e}"))
                .loc(&Loc::for_file(&dir))
                .push(reports);
            Vec::new()
        }
    }
}

/// Do a complete run for the addon: find its language files, build their tooltip documents,
/// and add the UTF-8 copies if the settings ask for them.
pub fn sync_addon(files: &dyn FileAccess, addon: &Addon, settings: &Settings) -> SyncOutcome {
    let mut reports = Reports::default();
    let languages = language_files(&list_resources(files, addon, &mut reports));
    let mut outcome = synchronize(files, addon, &languages, settings);
    outcome.reports.append(reports);
    if settings.generate_utf8 {
        let mirrors = mirror_utf8(files, addon, &mut outcome.reports);
        outcome.documents.extend(mirrors);
    }
    outcome
}

/// Write each document to its path. Returns the paths that were written; failures are reported.
pub fn write_documents(
    files: &dyn FileAccess,
    documents: &[SyncDocument],
    reports: &mut Reports,
) -> Vec<PathBuf> {
    let mut written = Vec::new();
    for document in documents {
        match files.write_text(&document.path, &document.text, document.encoding) {
            Ok(()) => written.push(document.path.clone()),
            Err(e) => {
                err(ErrorKey::WriteError)
                    .msg(format!("could not write file: {e}"))
                    .loc(&Loc::for_file(&document.path))
                    .loc_msg(&Loc::for_file(&document.source), "made from this file")
                    .push(reports);
            }
        }
    }
    written
}
