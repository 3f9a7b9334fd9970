pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "stint",
    about = "Stint operator CLI",
    long_about = "Run the local chat engine, inspect the opportunity catalog, and review effective configuration.",
    after_help = "Examples:\n  stint ask \"Show me tech internships\"\n  stint catalog --category marketing\n  stint config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Run one utterance through the local chat engine and print the resulting turns"
    )]
    Ask {
        #[arg(help = "Utterance to submit")]
        text: String,
        #[arg(long, help = "Seed the fallback selection for reproducible output")]
        seed: Option<u64>,
    },
    #[command(about = "List the built-in opportunity catalog")]
    Catalog {
        #[arg(long, help = "Only show entries in this category")]
        category: Option<String>,
    },
    #[command(about = "Inspect effective configuration values")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Ask { text, seed } => commands::ask::run(&text, seed),
        Command::Catalog { category } => commands::catalog::run(category.as_deref()),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
