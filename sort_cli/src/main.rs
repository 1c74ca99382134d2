//! # sortexpr
//!
//! Command-line front end for parsing, compressing and decoding item sort
//! expressions.

mod commands;
mod error;
mod resists;

use clap::{Parser, Subcommand};
use commands::CompressArgs;
use error::CliError;
use sort_compiler::{logging, BatchConfig, ItemType, ParseOptions};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "sortexpr", version, about = "Item sort expression compiler")]
struct Cli {
    /// TOML file with `resists = [..]`; the built-in element list is used otherwise
    #[arg(long, global = true)]
    resists: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse an expression and print its pretty, compact and computed forms
    Parse {
        expression: String,
        #[arg(long)]
        ignore_length_limit: bool,
        #[arg(long)]
        json: bool,
    },

    /// Encode sort filters into a compact record
    Compress {
        expression: String,
        #[arg(long)]
        item_type: ItemType,
        #[arg(long)]
        ascending: bool,
        #[arg(long)]
        element: Option<String>,
        #[arg(long)]
        max_level: Option<u32>,
        #[arg(long)]
        min_level: Option<u32>,
        #[arg(long, default_value = "s")]
        mode: String,
    },

    /// Decode a compact record
    Decode {
        record: String,
        #[arg(long)]
        json: bool,
    },

    /// Parse a file of expressions, one per line
    Batch {
        file: PathBuf,
        #[arg(long)]
        threads: Option<usize>,
        #[arg(long)]
        ignore_length_limit: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    logging::init_global_logging().map_err(CliError::Logging)?;

    let resists = resists::load_resists(cli.resists.as_deref())?;
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Parse {
            expression,
            ignore_length_limit,
            json,
        } => commands::parse(
            &mut out,
            &expression,
            &resists,
            ParseOptions {
                ignore_length_limit,
            },
            json,
        ),

        Command::Compress {
            expression,
            item_type,
            ascending,
            element,
            max_level,
            min_level,
            mode,
        } => commands::compress_filters(
            &mut out,
            CompressArgs {
                expression: &expression,
                item_type,
                ascending,
                element: element.as_deref(),
                max_level,
                min_level,
                mode: &mode,
            },
            &resists,
        ),

        Command::Decode { record, json } => commands::decode(&mut out, &record, json),

        Command::Batch {
            file,
            threads,
            ignore_length_limit,
        } => {
            let config = BatchConfig {
                max_threads: threads.unwrap_or_else(num_cpus::get).clamp(1, 32),
                ignore_length_limit,
            };
            commands::batch(&mut out, &file, &resists, &config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_compress_arguments() {
        let cli = Cli::try_parse_from([
            "sortexpr",
            "compress",
            "str + dex",
            "--item-type",
            "weapon",
            "--ascending",
            "--min-level",
            "10",
        ])
        .unwrap();

        match cli.command {
            Command::Compress {
                item_type,
                ascending,
                min_level,
                max_level,
                ..
            } => {
                assert_eq!(item_type, ItemType::Weapon);
                assert!(ascending);
                assert_eq!(min_level, Some(10));
                assert_eq!(max_level, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_item_type_is_rejected() {
        assert!(Cli::try_parse_from([
            "sortexpr",
            "compress",
            "str",
            "--item-type",
            "boots"
        ])
        .is_err());
    }

    #[test]
    fn test_global_resists_flag() {
        let cli = Cli::try_parse_from(["sortexpr", "decode", "s`w``str`", "--resists", "r.toml"])
            .unwrap();
        assert_eq!(cli.resists, Some(PathBuf::from("r.toml")));
    }
}
