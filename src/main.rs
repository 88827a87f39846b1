//! `liquidar`: command line front end for the liquidation engine.
//!
//! Usage:
//!   liquidar run --config <dir> [--settlement-date YYYY-MM-DD] [--json]
//!   liquidar interest <principal> <start> [end] [--json]
//!   liquidar periods <hire> <cutoff> [--kind cts|gratificacion]

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

use liquidation_engine::batch::BatchRunner;
use liquidation_engine::calculation::{
    SemesterCalendar, interest_report, parse_iso_date, segment_semesters,
};
use liquidation_engine::config::ConfigLoader;
use liquidation_engine::error::LiquidationResult;

#[derive(Parser)]
#[command(name = "liquidar", version, about = "CTS and gratificación liquidation")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Liquidate every worker of the roster into template workbooks
    Run {
        /// Configuration directory holding run.yaml, remuneration.yaml and layout.yaml
        #[arg(short, long, default_value = "config/pe_liquidacion")]
        config: PathBuf,

        /// Date interest runs up to (defaults to run.yaml, then today)
        #[arg(long)]
        settlement_date: Option<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Statutory interest on a principal between two dates
    Interest {
        /// Principal amount
        principal: Decimal,
        /// Start date, YYYY-MM-DD
        start: String,
        /// End date, YYYY-MM-DD (defaults to today)
        end: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Semesters and computable months and days between two dates
    Periods {
        /// Hire date, YYYY-MM-DD
        hire: String,
        /// Cutoff date, YYYY-MM-DD
        cutoff: String,
        /// Semester calendar
        #[arg(long, value_enum, default_value_t = Kind::Cts)]
        kind: Kind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Cts,
    Gratificacion,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Run {
            config,
            settlement_date,
            json,
        } => run(config, settlement_date, json),
        Commands::Interest {
            principal,
            start,
            end,
            json,
        } => interest(principal, &start, end.as_deref(), json),
        Commands::Periods { hire, cutoff, kind } => periods(&hire, &cutoff, kind),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(2)
        }
    }
}

fn run(config_dir: PathBuf, settlement_date: Option<String>, json: bool) -> LiquidationResult<ExitCode> {
    let mut config = ConfigLoader::load(&config_dir)?.into_config();
    if let Some(date) = settlement_date {
        config = config.with_settlement_date(parse_iso_date(&date)?);
    }

    let summary = BatchRunner::new(config).run()?;

    if json {
        println!("{}", to_json(&summary)?);
    } else {
        println!("Run {} (interest to {})", summary.run_id, summary.settlement_date);
        for generated in &summary.generated {
            println!(
                "  {}  {}  total {}",
                generated.worker,
                generated.path.display(),
                generated.totals.grand_total
            );
        }
        for failure in &summary.failures {
            println!("  FAILED {}: {}", failure.worker, failure.message);
        }
        println!(
            "{} generated, {} failed, {} cells skipped",
            summary.generated.len(),
            summary.failures.len(),
            summary.skipped_writes()
        );
    }

    Ok(if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn interest(principal: Decimal, start: &str, end: Option<&str>, json: bool) -> LiquidationResult<ExitCode> {
    let report = interest_report(principal, start, end);

    if json {
        println!("{}", to_json(&report)?);
    } else {
        println!("Principal:       {}", report.principal);
        println!("Period:          {} to {}", report.start_date, report.end_date);
        println!("Days:            {}", report.elapsed_days);
        println!("Interest:        {}", report.interest);
        println!("Total:           {}", report.total);
        println!("Effective rate:  {}%", report.effective_rate_percent);
    }

    Ok(ExitCode::SUCCESS)
}

fn periods(hire: &str, cutoff: &str, kind: Kind) -> LiquidationResult<ExitCode> {
    let hire = parse_iso_date(hire)?;
    let cutoff = parse_iso_date(cutoff)?;
    let calendar = match kind {
        Kind::Cts => SemesterCalendar::CTS,
        Kind::Gratificacion => SemesterCalendar::GRATIFICACION,
    };

    for (i, period) in segment_semesters(calendar, hire, cutoff).iter().enumerate() {
        println!(
            "{:>2}  {}  {} meses  {} días",
            i + 1,
            period.label(),
            period.months,
            period.days
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn to_json<T: serde::Serialize>(value: &T) -> LiquidationResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        liquidation_engine::error::LiquidationError::CalculationError {
            message: e.to_string(),
        }
    })
}
