use std::fs::{read, read_to_string};
use std::path::{Path, PathBuf};

use tooltip_lib::{
    sync_addon, write_documents, Addon, DocumentKind, ErrorKey, FsFiles, LogReport, Reports,
    Settings, Severity, SyncOutcome, TextEncoding,
};

fn addon(name: &str) -> Addon {
    let game_dir = PathBuf::from(format!("tests/files/dota/game/dota_addons/{name}"));
    Addon::from_game_dir(&game_dir).unwrap()
}

fn sync_addon_helper(addon: &Addon) -> SyncOutcome {
    let mut reports = Reports::default();
    let settings = Settings::load(&FsFiles, &addon.settings_path(), &mut reports).unwrap();
    let mut outcome = sync_addon(&FsFiles, addon, &settings);
    outcome.reports.append(reports);
    outcome
}

fn take_report(vec: &mut Vec<LogReport>, pathname: &Path, msg_contains: &str) -> Option<LogReport> {
    for (i, report) in vec.iter().enumerate() {
        if report.msg.contains(msg_contains) && report.pointers[0].loc.pathname() == pathname {
            return Some(vec.remove(i));
        }
    }
    None
}

#[test]
fn test_fire_arena() {
    let addon = addon("fire_arena");
    let outcome = sync_addon_helper(&addon);
    assert!(outcome.reports.is_empty(), "{:?}", outcome.reports);

    let english = &outcome.documents[0];
    assert_eq!(english.kind, DocumentKind::Tooltips);
    assert_eq!(english.path, addon.content_dir.join("tooltips_english.txt"));
    assert_eq!(english.encoding, TextEncoding::Utf16Le);
    let expected = read_to_string("tests/files/expected/fire_arena_tooltips_english.txt").unwrap();
    assert_eq!(english.text, expected);

    let russian = &outcome.documents[1];
    assert_eq!(russian.language, "russian");
    assert_eq!(russian.encoding, TextEncoding::Utf8);
    for line in [
        "\t\t\"npc_fire_golem\"\t\t\"npc_fire_golem\"\n",
        "\t\t\"DOTA_Tooltip_ability_fireball\"\t\t\"fireball\"\n",
        "\t\t\"DOTA_Tooltip_ability_fireball_damage\"\t\t\"damage\"\n",
        "\t\t\"DOTA_Tooltip_ability_item_fire_orb_Note0\"\t\t\"\"\n",
    ] {
        assert!(russian.text.contains(line), "missing {line:?}");
    }
    assert!(!russian.text.contains("modifier_fireball_thinker"));
    assert!(!russian.text.contains("modifier_item_fire_orb\""));

    let copies: Vec<&Path> = outcome.documents[2..].iter().map(|d| d.path.as_path()).collect();
    assert_eq!(
        copies,
        vec![
            addon.content_dir.join("addon_english_utf8.txt").as_path(),
            addon.content_dir.join("addon_russian_utf8.txt").as_path(),
        ]
    );
}

#[test]
fn test_broken_arena() {
    let addon = addon("broken_arena");
    let outcome = sync_addon_helper(&addon);
    let mut reports = outcome.reports.into_sorted();

    let units = addon.game_dir.join("scripts/npc/npc_units_custom.txt");
    let report = take_report(&mut reports, &units, "could not parse npc_units_custom.txt");
    let report = report.expect("unclosed block in units file");
    assert_eq!(report.severity, Severity::Error);
    assert_eq!(report.key, ErrorKey::ParseError);

    let abilities = addon.game_dir.join("scripts/npc/npc_abilities_custom.txt");
    let report = take_report(&mut reports, &abilities, "`ice_shard` is defined twice");
    assert_eq!(report.expect("duplicate ability").key, ErrorKey::Duplicate);

    let english = addon.resource_dir().join("addon_english.txt");
    let report = take_report(&mut reports, &english, "no `Tokens` block found");
    assert_eq!(report.expect("language file without tokens").severity, Severity::Warning);

    assert!(reports.is_empty(), "{reports:?}");

    // The abilities still made it into the document.
    let document = &outcome.documents[0];
    assert!(document.text.contains("\t\t\"DOTA_Tooltip_ability_ice_shard\"\t\t\"ice_shard\"\n"));
    assert!(!document.text.contains("npc_ice_golem"));
}

#[test]
fn test_write_and_rerun() {
    let content = tempfile::tempdir().unwrap();
    let addon = Addon { content_dir: content.path().to_path_buf(), ..addon("fire_arena") };

    let first = sync_addon_helper(&addon);
    let mut reports = Reports::default();
    let written = write_documents(&FsFiles, &first.documents, &mut reports);
    assert!(reports.is_empty());
    assert_eq!(written.len(), 4);

    let bytes = read(content.path().join("tooltips_english.txt")).unwrap();
    assert!(bytes.starts_with(&[0xff, 0xfe]));
    let utf8 = read_to_string(content.path().join("addon_english_utf8.txt")).unwrap();
    assert!(utf8.contains("\"DOTA_Tooltip_ability_fireball_damage\"\t\t\"DAMAGE:\""));

    let second = sync_addon_helper(&addon);
    assert_eq!(first.documents, second.documents);
}
