use std::fs::canonicalize;
use std::io::{stdout, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use rayon::prelude::*;
use tooltip_lib::{
    log_reports_json, sync_addon, validate_config_file, write_documents, Addon, FsFiles,
    LogReport, OutputStyle, ReportWriter, Reports, Settings,
};

use crate::gamedir::{
    addon_game_dir, check_dota_directory, find_game_directory_steam, DOTA_APP_ID,
};

#[derive(Parser)]
#[clap(version)]
/// Lists the tooltip keys that a Dota 2 addon's language files are missing.
struct Cli {
    /// Addons to make tooltips for. Either the path of an addon's game directory, or the name
    /// of an addon in the Dota 2 directory.
    #[clap(required = true)]
    addons: Vec<String>,
    /// Path to Dota 2 main directory.
    #[clap(long)]
    dota: Option<PathBuf>,
    /// Write the documents to this directory instead of the addon's content directory.
    /// Only possible with a single addon.
    #[clap(long)]
    content: Option<PathBuf>,
    /// Path to custom .conf file.
    #[clap(long)]
    config: Option<PathBuf>,
    /// Output the reports in JSON format
    #[clap(long)]
    json: bool,
    /// Omit color from the output. False by default.
    /// Colors can also be configured in the settings file.
    #[clap(long)]
    no_color: bool,
    /// Don't write UTF-8 copies of the resource files.
    #[clap(long)]
    no_utf8: bool,
    /// Add a `_Note0` key to every new ability and item.
    #[clap(long)]
    note0: bool,
    /// Add a `_Lore` key to every new ability and item.
    #[clap(long)]
    lore: bool,
    /// Build the documents and show the reports, but don't write anything.
    #[clap(long)]
    dry_run: bool,
}

/// One addon to process, with the settings that apply to it.
struct Job {
    addon: Addon,
    settings: Settings,
    reports: Reports,
}

/// Run the dota-tooltips application.
pub fn run() -> Result<()> {
    let mut args = Cli::parse();

    #[cfg(windows)]
    if !args.no_color {
        let _ = ansiterm::enable_ansi_support()
            .map_err(|_| eprintln!("Failed to enable ANSI support for Windows10 users. Continuing probably without colored output."));
    }

    if args.content.is_some() && args.addons.len() > 1 {
        bail!("The --content option can only be used with a single addon.");
    }
    args.config = validate_config_file(args.config);

    let mut dota = None;
    let mut jobs: Vec<Job> = Vec::new();
    for name in &args.addons {
        let game_dir = if PathBuf::from(name).is_dir() {
            PathBuf::from(name)
        } else {
            if dota.is_none() {
                let found = match args.dota.take() {
                    Some(dir) => dir,
                    None => find_game_directory_steam(DOTA_APP_ID)?,
                };
                dota = Some(check_dota_directory(found)?);
            }
            let Some(dota) = &dota else {
                bail!("Cannot find Dota 2 directory. Please supply it as the --dota option.");
            };
            let dir = addon_game_dir(dota, name);
            if !dir.is_dir() {
                eprintln!("Looking for addon in {}", dir.display());
                bail!("Cannot find addon `{name}`.");
            }
            dir
        };
        let game_dir = canonicalize(&game_dir).unwrap_or(game_dir);

        let addon = match (&args.content, Addon::from_game_dir(&game_dir)) {
            (Some(content), Some(addon)) => Addon { content_dir: content.clone(), ..addon },
            (Some(content), None) => {
                let name = game_dir.file_name().map(|s| s.to_string_lossy().into_owned());
                Addon::new(&name.unwrap_or_default(), game_dir, content.clone())
            }
            (None, Some(addon)) => addon,
            (None, None) => {
                eprintln!("Expected the addon to be in a game/dota_addons directory.");
                bail!(
                    "Cannot find the content directory of {}. Please supply it as the --content option.",
                    game_dir.display()
                );
            }
        };
        if jobs.iter().any(|job| job.addon.game_dir == addon.game_dir) {
            bail!("Addon {} is named more than once.", addon.game_dir.display());
        }
        eprintln!("Using addon directory: {}", addon.game_dir.display());

        let mut reports = Reports::default();
        let config = args.config.clone().unwrap_or_else(|| addon.settings_path());
        let mut settings = Settings::load(&FsFiles, &config, &mut reports)?;
        // Command line flags override the settings file.
        if args.no_utf8 {
            settings.generate_utf8 = false;
        }
        if args.note0 {
            settings.generate_note0 = true;
        }
        if args.lore {
            settings.generate_lore = true;
        }
        if args.no_color {
            settings.styles = OutputStyle::no_color();
        }
        jobs.push(Job { addon, settings, reports });
    }

    // Print a blank line between the preamble and the first report:
    eprintln!();

    let outcomes: Vec<_> =
        jobs.par_iter().map(|job| sync_addon(&FsFiles, &job.addon, &job.settings)).collect();

    let mut json_reports: Vec<LogReport> = Vec::new();
    for (job, outcome) in jobs.into_iter().zip(outcomes) {
        let mut reports = job.reports;
        reports.append(outcome.reports);
        if args.dry_run {
            for document in &outcome.documents {
                eprintln!("Would write {}", document.path.display());
            }
        } else {
            for path in write_documents(&FsFiles, &outcome.documents, &mut reports) {
                eprintln!("Wrote {}", path.display());
            }
        }

        if args.json {
            json_reports.extend(reports.into_sorted());
        } else {
            let mut out = stdout().lock();
            let mut writer = ReportWriter::new(&job.settings.styles);
            for report in reports.into_sorted() {
                writer.log_report(&mut out, &report)?;
            }
            out.flush()?;
        }
    }
    if args.json {
        log_reports_json(&mut stdout().lock(), &json_reports)?;
    }
    Ok(())
}
