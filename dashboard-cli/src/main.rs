mod cli;
mod paths;
mod render;
mod table;

use std::fs;
use std::fs::File;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use dashboard_lib::config::DashboardConfig;
use dashboard_lib::dates;
use dashboard_lib::session::FileSessionStore;
use dashboard_lib::session::MemorySessionStore;
use dashboard_lib::session::Session;
use log::LevelFilter;
use log::info;
use log::warn;
use simplelog::ColorChoice;
use simplelog::CombinedLogger;
use simplelog::Config;
use simplelog::SharedLogger;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use simplelog::WriteLogger;

use crate::cli::Args;
use crate::cli::Command;
use crate::cli::OutputFormat;
use crate::cli::SessionAction;

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    init_logging(args.verbose, config.log_level);

    let today = args
        .today
        .or(config.reference_date)
        .unwrap_or_else(dates::today_local);
    info!("Using {} as today", dates::format_date(today));

    match args.command {
        Command::Resolve { tokens } => resolve(&tokens, today),
        Command::Rewrite { condition } => {
            println!("{}", dates::rewrite_condition(&condition, today));
            Ok(())
        }
        Command::Split { expression } => {
            for part in dates::split_list_expression(&expression, today) {
                println!("{}", part);
            }
            Ok(())
        }
        Command::Table(table_args) => {
            let engine = table::build(&table_args, &config)?;
            match table_args.format {
                OutputFormat::Text => print!("{}", render::text(&engine)),
                OutputFormat::Json => println!("{}", render::json(&engine)?),
            }
            Ok(())
        }
        Command::Session { action } => session(action, &config),
    }
}

/// Reads `--config`, or the default config file if one exists.
fn load_config(explicit: Option<&Path>) -> Result<DashboardConfig> {
    if let Some(path) = explicit {
        return DashboardConfig::load(path).context("cannot load config");
    }
    match paths::config_file() {
        Some(path) if path.exists() => DashboardConfig::load(&path).context("cannot load config"),
        _ => Ok(DashboardConfig::default()),
    }
}

/// Logs to `latest.log` in the cache directory, and to stderr when verbose.
fn init_logging(verbose: u8, file_level: LevelFilter) {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if let Err(err) = paths::rotate_logs() {
        eprintln!("warning: cannot rotate old logs: {}", err);
    }
    if let Some(path) = paths::log_file() {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match File::create(&path) {
            Ok(file) => loggers.push(WriteLogger::new(file_level, Config::default(), file)),
            Err(err) => eprintln!("warning: cannot create log file {}: {}", path.display(), err),
        }
    }

    let term_level = match verbose {
        0 => None,
        1 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    };
    if let Some(level) = term_level {
        loggers.push(TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }

    let _ = CombinedLogger::init(loggers);
}

fn resolve(tokens: &[String], today: NaiveDate) -> Result<()> {
    let mut failed = 0;
    for token in tokens {
        match dates::resolve(token, today) {
            Ok(date) => println!("{}\t{}", token, dates::format_date(date)),
            Err(err) => {
                eprintln!("{}", err);
                failed += 1;
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{} of {} tokens could not be resolved", failed, tokens.len());
    }
    Ok(())
}

fn session(action: SessionAction, config: &DashboardConfig) -> Result<()> {
    let path = config.session_file.clone().or_else(paths::session_file);
    let session = match &path {
        Some(path) => Session::new(
            FileSessionStore::open(path)
                .with_context(|| format!("cannot open session file {}", path.display()))?,
        ),
        None => {
            warn!("No session file location; the session will not persist");
            Session::new(MemorySessionStore::new())
        }
    };

    match action {
        SessionAction::Show => {
            let state = if session.is_signed_in()? {
                "signed in"
            } else {
                "signed out"
            };
            println!("{}", state);
        }
        SessionAction::SetToken { token } => {
            session.set_token(&token)?;
            info!("Stored auth token");
        }
        SessionAction::SignOut => {
            session.sign_out()?;
            info!("Session cleared");
        }
    }
    Ok(())
}
