mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::mortgage::{CalculateArgs, CompareArgs};

/// Mortgage amortization schedules and loan comparisons
#[derive(Parser)]
#[command(
    name = "mcalc",
    version,
    about = "Mortgage amortization schedules and loan comparisons",
    long_about = "A CLI for computing payment-by-payment amortization schedules with \
                  decimal precision. Supports fixed and interest-only loans, monthly, \
                  bi-weekly and weekly payments, temporary rate buydowns, recurring \
                  extra principal, and side-by-side comparison of up to five options."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log engine diagnostics to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate payment, totals and the full amortization schedule for one loan
    Calculate(CalculateArgs),
    /// Compare 2 to 5 mortgage options side by side
    Compare(CompareArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::mortgage::run_calculate(args),
        Commands::Compare(args) => commands::mortgage::run_compare(args),
        Commands::Version => {
            println!("mcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_flags_parse() {
        let cli = Cli::try_parse_from([
            "mcalc",
            "calculate",
            "--loan-amount",
            "200000",
            "--rate",
            "6",
            "--term-years",
            "30",
            "--frequency",
            "bi-weekly",
            "--buydown",
            "two-one",
            "--output",
            "table",
        ])
        .unwrap();
        assert!(matches!(cli.output, OutputFormat::Table));
        match cli.command {
            Commands::Calculate(args) => {
                assert_eq!(args.term_years, Some(30));
                assert!(matches!(
                    args.frequency,
                    commands::mortgage::FrequencyArg::BiWeekly
                ));
                assert!(matches!(
                    args.buydown,
                    Some(commands::mortgage::BuydownArg::TwoOne)
                ));
            }
            _ => panic!("Expected calculate command"),
        }
    }

    #[test]
    fn test_rejects_unknown_frequency() {
        let parsed = Cli::try_parse_from([
            "mcalc",
            "calculate",
            "--loan-amount",
            "200000",
            "--frequency",
            "daily",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["mcalc", "compare", "-v", "--input", "opts.json"]).unwrap();
        assert!(cli.verbose);
    }
}
