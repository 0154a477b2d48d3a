//! Evernote Logger Binary Entry Point

mod cli;

use std::error::Error;
use std::process::ExitCode;

use chrono::Local;
use evernote_logger_core::pipeline::{self, LogOptions, Publication};
use evernote_logger_core::{DayWindow, LoggerConfig};
use evernote_logger_edam::EvernoteService;

use crate::cli::{CliArgs, Command};

/// Malformed day, config, network or contract failure
const EXIT_FAILURE: u8 = 1;
/// Unknown flag or missing flag value
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match cli::parse_args(std::env::args().skip(1)) {
        Ok(Command::Help) => {
            print!("{}", cli::usage());
            return ExitCode::SUCCESS;
        }
        Ok(Command::Run(args)) => args,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, cli::usage());
            return ExitCode::from(EXIT_USAGE);
        }
    };

    // Validate the day before touching the network
    let window = match &args.ymd {
        Some(ymd) => match DayWindow::parse(ymd) {
            Ok(window) => window,
            Err(e) => {
                log::debug!("{}", e);
                println!("Error!");
                println!("yyyymmdd = {}", ymd);
                return ExitCode::from(EXIT_FAILURE);
            }
        },
        None => DayWindow::today(),
    };

    match run(&args, &window) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(args: &CliArgs, window: &DayWindow) -> Result<(), Box<dyn Error>> {
    let config_path = cli::resolve_config_path(&args.config);
    log::debug!("Loading config from {}", config_path.display());
    let config = LoggerConfig::load(&config_path)?;
    config.day_label(window)?;

    let service = EvernoteService::connect(
        &config.service_host,
        &config.user_name,
        &config.auth_token,
    )?;

    let options = LogOptions {
        full_timestamp: args.full_timestamp,
        group_by_notebook: args.group_by_notebook,
        dry_run: args.dry_run,
    };
    let (log, publication) = pipeline::run(&service, &config, window, &options, &Local)?;

    match publication {
        Publication::DryRun => println!("{}", log.document),
        Publication::Created(note) => {
            println!("Successfully created a new note with GUID: {}", note.guid)
        }
    }
    Ok(())
}
