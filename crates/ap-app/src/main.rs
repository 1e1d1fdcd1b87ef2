use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

pub mod cli;
pub mod listing;
pub mod pipeline;

fn main() -> ExitCode {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Convertir ; toute erreur est fatale, une seule ligne de diagnostic.
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &cli::Cli) -> Result<()> {
    if cli.list_charsets {
        let mut out = io::stdout().lock();
        listing::write_palettes(&mut out)?;
        out.flush()?;
        return Ok(());
    }

    let Some(input) = cli.input.as_deref() else {
        listing::write_palettes(&mut io::stderr().lock())?;
        anyhow::bail!("aucune image d'entrée : utilisez --input <FICHIER>");
    };

    let config = pipeline::resolve_config(cli)?;
    log::info!("Conversion de {}", input.display());

    let mut out = BufWriter::new(io::stdout().lock());
    let outcome = pipeline::convert_file(input, &config, &mut out)?;
    out.flush()?;
    log::debug!("Terminé : {outcome:?}");
    Ok(())
}
