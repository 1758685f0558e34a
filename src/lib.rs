pub mod cli;
pub mod columns;
pub mod config;
pub mod db;
pub mod emit;
pub mod error;
pub mod key;
pub mod parse;

#[cfg(test)]
pub mod testutil;

use std::io::Write;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use cli::Args;
use config::{Settings, load_config};
use emit::{Provenance, create_emitter};
use parse::parse_source;
use parse::source::SourceFile;

pub use db::{Database, Record, Subsystem};
pub use error::ParseError;
pub use parse::{Context as ParseContext, Hierarchy, parse_str, step};

/// Log filter for the binary. `env` is the value of `RUST_LOG`, which wins
/// when it holds any directive; otherwise `debug` picks between debug and
/// info.
pub fn log_filter(debug: bool, env: Option<&str>) -> EnvFilter {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(env.unwrap_or_default())
}

/// Run the generator. Returns the exit code: 0 = done, 1 = `--check` found
/// stale output.
pub fn run(args: Args) -> Result<i32> {
    let config = load_config(args.config.as_deref())?;
    if let Some(dir) = config.config_dir() {
        tracing::debug!("config loaded from: {}", dir.display());
    } else {
        tracing::debug!("no config file found");
    }

    let settings = Settings::resolve(&args, &config)?;
    tracing::debug!(?settings, "resolved settings");

    let source = SourceFile::from_path(&settings.input)?;
    let db = parse_source(&source)
        .with_context(|| format!("failed to parse {}", source.path.display()))?;

    let provenance = Provenance::from_source(&source);
    let emitter = create_emitter(&settings.format, settings.visibility);
    let rendered = emitter
        .render(&db, &provenance)
        .context("failed to render output")?;

    if settings.check {
        return check_output(&settings, &rendered);
    }

    match &settings.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(
                entries = db.counts().total(),
                "wrote {}",
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(&rendered).context("failed to write stdout")?;
            lock.flush().context("failed to write stdout")?;
        }
    }
    Ok(0)
}

fn check_output(settings: &Settings, rendered: &[u8]) -> Result<i32> {
    let Some(path) = &settings.output else {
        anyhow::bail!("--check needs an output file");
    };
    let existing = match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    match existing {
        Some(bytes) if bytes == rendered => {
            tracing::debug!("{} is up to date", path.display());
            Ok(0)
        }
        Some(_) => {
            eprintln!("{} is out of date; regenerate it", path.display());
            Ok(1)
        }
        None => {
            eprintln!("{} does not exist; generate it", path.display());
            Ok(1)
        }
    }
}
