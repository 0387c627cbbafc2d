//! finstat CLI binary.
//!
//! Lists reporting dates and prints or exports report tables.

mod output;

use clap::{Parser, Subcommand};
use finstat::catalog::{MetricSection, select_section};
use finstat_data::{ReportCollector, ReportPaths};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{Level, debug};

#[derive(Debug, Parser)]
#[command(name = "finstat")]
#[command(about = "Quarterly financial statement reports", long_about = None)]
#[command(version)]
struct Cli {
    /// Base data directory (default: platform data directory)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Report subdirectory below the data directory
    #[arg(long, global = true)]
    report_dir: Option<PathBuf>,

    /// JSON file with report paths
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print report tables
    Reports {
        /// Security code
        #[arg(long)]
        code: Option<String>,

        /// Reporting date (YYYYMMDD); all dates when omitted
        #[arg(long)]
        date: Option<String>,

        /// Only show one statement section
        #[arg(long)]
        section: Option<MetricSection>,

        /// Write the table to a CSV file instead of printing it
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// List available reporting dates
    Dates,

    /// List metric sections
    Sections,
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let paths = report_paths(&cli)?;
    debug!(dir = %paths.report_directory().display(), "Using report directory");

    match cli.command {
        Commands::Reports {
            code,
            date,
            section,
            csv,
        } => {
            show_reports(paths, code.as_deref(), date.as_deref(), section, csv.as_deref())?;
        }
        Commands::Dates => list_dates(paths)?,
        Commands::Sections => list_sections(),
    }

    Ok(())
}

fn report_paths(cli: &Cli) -> Result<ReportPaths, Box<dyn std::error::Error>> {
    let mut paths = match &cli.config {
        Some(file) => ReportPaths::from_json_file(file)?,
        None => ReportPaths::default(),
    };
    if let Some(dir) = &cli.data_dir {
        paths.data_dir = dir.clone();
    }
    if let Some(dir) = &cli.report_dir {
        paths.report_dir = dir.clone();
    }
    Ok(paths)
}

fn show_reports(
    paths: ReportPaths,
    code: Option<&str>,
    date: Option<&str>,
    section: Option<MetricSection>,
    csv: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut df = ReportCollector::new(paths).collect(code, date)?;
    if let Some(section) = section {
        df = select_section(&df, section)?;
    }

    match csv {
        Some(path) => {
            output::write_csv_file(&df, path)?;
            println!("Wrote {} rows to {}", df.height(), path.display());
        }
        None => println!("{}", df),
    }

    Ok(())
}

fn list_dates(paths: ReportPaths) -> Result<(), Box<dyn std::error::Error>> {
    let dates = ReportCollector::new(paths).available_dates()?;
    if dates.is_empty() {
        println!("No reports found");
    }
    for date in dates {
        println!("{}", date);
    }
    Ok(())
}

fn list_sections() {
    println!("Metric Sections:");
    println!("================\n");

    for section in MetricSection::all() {
        let range = section.range();
        println!(
            "{:>3}-{:<3}  {:<20}  {}",
            range.start(),
            range.end(),
            section.slug(),
            section.name()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reports() {
        let cli = Cli::try_parse_from([
            "finstat",
            "--data-dir",
            "/opt/tdx",
            "reports",
            "--code",
            "600000",
            "--section",
            "balance-sheet",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, Some(PathBuf::from("/opt/tdx")));
        match cli.command {
            Commands::Reports {
                code,
                date,
                section,
                csv,
            } => {
                assert_eq!(code.as_deref(), Some("600000"));
                assert_eq!(date, None);
                assert_eq!(section, Some(MetricSection::BalanceSheet));
                assert_eq!(csv, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["finstat", "dates", "--report-dir", "cw", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.report_dir, Some(PathBuf::from("cw")));
        assert!(matches!(cli.command, Commands::Dates));
    }

    #[test]
    fn test_rejects_unknown_section() {
        assert!(Cli::try_parse_from(["finstat", "reports", "--section", "dividends"]).is_err());
    }

    #[test]
    fn test_report_paths_overrides() {
        let cli =
            Cli::try_parse_from(["finstat", "--data-dir", "/srv", "--report-dir", "q", "sections"])
                .unwrap();
        let paths = report_paths(&cli).unwrap();
        assert_eq!(paths.report_directory(), PathBuf::from("/srv/q"));
        assert_eq!(paths.file_prefix, "gpcw");
    }

    #[test]
    fn test_report_paths_from_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = dir.path().join("finstat.json");
        std::fs::write(&config, r#"{"data_dir": "/opt/tdx", "report_dir": "cw"}"#).unwrap();

        let cli = Cli::try_parse_from([
            "finstat",
            "--config",
            config.to_str().unwrap(),
            "--report-dir",
            "vipdoc/cw",
            "dates",
        ])
        .unwrap();
        let paths = report_paths(&cli).unwrap();
        assert_eq!(paths.data_dir, PathBuf::from("/opt/tdx"));
        assert_eq!(paths.report_dir, PathBuf::from("vipdoc/cw"));
    }
}
