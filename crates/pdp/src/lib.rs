pub mod commands;
pub mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::commands::CommandResult;
use crate::config::PdpConfig;

#[derive(Debug, Parser)]
#[command(
    name = "caufi-pdp",
    about = "Caufi product page CLI",
    long_about = "Inspect the product page, cart summary and admin variant matrix derived from backend JSON documents.",
    after_help = "Examples:\n  caufi-pdp view product.json --color Red --size M\n  caufi-pdp cart cart.json --json\n  caufi-pdp matrix product.json --color Red=#ff0000 --size S --size M"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Show the derived product page for a color/size selection")]
    View {
        product: PathBuf,
        #[arg(long, help = "Color to select (case-insensitive)")]
        color: Option<String>,
        #[arg(long, help = "Size to select")]
        size: Option<String>,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Price a cart document and print the order summary")]
    Cart {
        cart: PathBuf,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Regenerate the variant list from color and size attributes")]
    Matrix {
        product: PathBuf,
        #[arg(long = "color", value_name = "NAME=HEX", help = "Color attribute, repeatable")]
        colors: Vec<String>,
        #[arg(long = "size", value_name = "SIZE", help = "Size attribute, repeatable")]
        sizes: Vec<String>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match PdpConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::from(2);
        }
    };
    caufi_observability::init_with(config.log_format);

    let result = execute(cli, &config);
    if result.exit_code == 0 {
        println!("{}", result.output);
    } else {
        eprintln!("{}", result.output);
    }
    ExitCode::from(result.exit_code)
}

fn execute(cli: Cli, config: &PdpConfig) -> CommandResult {
    let outcome = match cli.command {
        Command::View { product, color, size, json } => {
            commands::view::run(&product, color.as_deref(), size.as_deref(), json, config)
        }
        Command::Cart { cart, json } => commands::cart::run(&cart, json, config),
        Command::Matrix { product, colors, sizes } => commands::matrix::run(&product, &colors, &sizes),
    };
    if let Err(error) = &outcome {
        tracing::warn!(error = %format!("{error:#}"), "command failed");
    }
    CommandResult::from_outcome(outcome)
}
