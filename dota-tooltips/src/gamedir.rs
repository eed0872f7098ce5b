//! Helper functions for finding the Dota 2 directory and the addons in it.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use steamlocate::SteamDir;

/// Steam's id for Dota 2.
pub const DOTA_APP_ID: u32 = 570;

/// A file that should be present if this is the Dota 2 directory.
const DOTA_SIGNATURE_FILE: &str = "game/dota/gameinfo.gi";

/// Tries to locate the game files through the Steam installation.
pub fn find_game_directory_steam(steam_app_id: u32) -> Result<PathBuf> {
    let steamdir = SteamDir::locate()?;
    if let Some((app, library)) = steamdir.find_app(steam_app_id)? {
        Ok(library.resolve_app_dir(&app))
    } else {
        bail!("Game not found in Steam library")
    }
}

/// Check that `dota` is the Dota 2 directory. People sometimes give the `game` directory inside
/// it instead, so the parent is tried too.
pub fn check_dota_directory(mut dota: PathBuf) -> Result<PathBuf> {
    eprintln!("Using Dota 2 directory: {}", dota.display());
    if dota.join(DOTA_SIGNATURE_FILE).is_file() {
        return Ok(dota);
    }
    eprintln!("That does not look like a Dota 2 directory.");
    dota.push("..");
    eprintln!("Trying: {}", dota.display());
    if dota.join(DOTA_SIGNATURE_FILE).is_file() {
        eprintln!("Ok.");
        Ok(dota)
    } else {
        bail!("Cannot find Dota 2 directory. Please supply it as the --dota option.");
    }
}

/// The game directory of an addon that is named rather than given as a path.
pub fn addon_game_dir(dota: &Path, name: &str) -> PathBuf {
    dota.join("game").join("dota_addons").join(name)
}
