//! Diagnostic CLI for inspecting and resolving locale resources.

use std::fmt;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use tscat::args::{Cli, Command};
use tscat::{Catalog, I18nConfig, Registry, choose_locale, load_catalog_file, resolve};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Resolve {
            locales_dir,
            locale,
            config,
            context,
            source,
            args,
            count,
        } => run_resolve(
            &locales_dir,
            locale.as_deref(),
            config.as_deref(),
            &context,
            &source,
            &args,
            count,
        ),
        Command::Check { locales_dir } => run_check(&locales_dir),
    }
}

/// What: Load every `.ts` resource in a directory.
///
/// Output:
/// - `(catalogs, failures)` where failures counts unparseable resources
fn load_dir(dir: &Path) -> (Vec<Catalog>, usize) {
    let mut catalogs = Vec::new();
    let mut failures = 0usize;

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            eprintln!("error: cannot read {}: {err}", dir.display());
            return (catalogs, 1);
        }
    };
    let mut paths: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "ts"))
        .collect();
    paths.sort();

    for path in paths {
        match load_catalog_file(&path) {
            Ok(catalog) => catalogs.push(catalog),
            Err(err) => {
                eprintln!("error: {}: {err}", path.display());
                failures += 1;
            }
        }
    }
    (catalogs, failures)
}

/// Resolve one message and print it to stdout.
fn run_resolve(
    locales_dir: &Path,
    locale: Option<&str>,
    config_path: Option<&Path>,
    context: &str,
    source: &str,
    args: &[String],
    count: Option<i64>,
) -> ExitCode {
    let config = config_path.map_or_else(I18nConfig::default, I18nConfig::load);
    let (catalogs, failures) = load_dir(locales_dir);
    if failures > 0 {
        return ExitCode::FAILURE;
    }

    let registry = Registry::new(config.default_locale.clone());
    for catalog in catalogs {
        registry.register(catalog);
    }

    let chosen = choose_locale(locale, &config, &registry.locales());
    if let Err(err) = registry.set_active_locale(&chosen) {
        // The chosen locale can only miss when the default itself has no
        // catalog; stay on the fallback and say so.
        tracing::warn!(locale = chosen, error = %err, "staying on source language");
    }

    let display_args: Vec<&dyn fmt::Display> =
        args.iter().map(|a| a as &dyn fmt::Display).collect();
    println!("{}", resolve(&registry, context, source, &display_args, count));
    ExitCode::SUCCESS
}

/// Parse all resources and print per-catalog status totals.
fn run_check(locales_dir: &Path) -> ExitCode {
    let (catalogs, failures) = load_dir(locales_dir);

    for catalog in &catalogs {
        let counts = catalog.status_counts();
        println!(
            "{}: {} entries ({} finished, {} unfinished, {} obsolete)",
            catalog.locale(),
            catalog.len(),
            counts.finished,
            counts.unfinished,
            counts.obsolete
        );
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
