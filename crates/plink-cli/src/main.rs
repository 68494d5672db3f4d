//! patient-link CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use plink_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use plink_cli::commands::{run_config, run_permissions, run_rank, run_score};
use plink_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod summary;

use crate::summary::{print_permissions, print_ranking, print_score};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<i32> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Command::Score(args) => {
            let outcome = run_score(args, config_path)?;
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&outcome.explanation.result)?
                );
            } else {
                print_score(&outcome);
            }
            Ok(0)
        }
        Command::Rank(args) => {
            let outcome = run_rank(args, config_path)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&outcome.rows)?);
            } else {
                print_ranking(&outcome);
            }
            Ok(0)
        }
        Command::Config => {
            let config = run_config(config_path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(0)
        }
        Command::Permissions(args) => {
            let outcome = run_permissions(args)?;
            print_permissions(&outcome);
            Ok(outcome.exit_code())
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
