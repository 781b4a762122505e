use std::{
    env,
    io::{self, Write},
};

use anyhow::{Context, Result, bail};
use colored::Colorize;

use super::super::{args::ScanCommand, exit_status::ExitStatus};
use crate::{
    config::{CONFIG_FILE_NAME, load_config},
    render::{OutputFormat, render_json, render_text},
    scanner,
};

/// Run the extractor and write the keybinding reference to stdout.
///
/// Settings come from the CLI, then `.keyscanrc.json`, then defaults.
/// The first extraction error aborts the command; in text mode, groups for
/// files scanned before the failing one have already been written.
pub fn scan(cmd: ScanCommand) -> Result<ExitStatus> {
    let verbose = cmd.verbose;
    let start_dir = env::current_dir().context("Failed to read current directory")?;

    let loaded = load_config(&start_dir)?;
    if verbose && !loaded.from_file() {
        eprintln!(
            "{} No {} found, using default configuration",
            "note:".cyan(),
            CONFIG_FILE_NAME
        );
    }

    let root = cmd
        .source_root
        .clone()
        .unwrap_or_else(|| loaded.source_root(&start_dir));

    let mut config = loaded.config;
    if !cmd.extensions.is_empty() {
        config.extensions = cmd.extensions;
    }
    if let Some(lookahead) = cmd.lookahead {
        config.lookahead = lookahead;
    }
    config.validate()?;

    if !root.is_dir() {
        bail!("Source root is not a directory: {}", root.display());
    }
    if verbose {
        eprintln!("{} {}", "source root:".cyan(), root.display());
    }

    let options = config.scan_options(verbose);
    let mut scan = scanner::scan(&root, &options);
    let mut out = io::stdout().lock();

    match cmd.format {
        OutputFormat::Text => render_text(scan.by_ref(), &mut out)?,
        OutputFormat::Json => {
            let files = scan.by_ref().collect::<Result<Vec<_>, _>>()?;
            render_json(&files, &mut out)?;
        }
    }
    out.flush()?;

    let skipped_count = scan.skipped_count();
    if skipped_count > 0 {
        eprintln!(
            "{} {} path(s) skipped due to access errors{}",
            "warning:".bold().yellow(),
            skipped_count,
            if verbose { "" } else { " (use -v for details)" }
        );
    }

    Ok(ExitStatus::Success)
}
