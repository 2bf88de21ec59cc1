//! Command-line interface for the harvester.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{
    HarvestConfig, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_WAIT_SECS, DEFAULT_TIMEOUT_BUDGET_SECS,
};
use crate::error::Result;
use crate::harvester::harvest;
use crate::json::save_json;

/// arXiv harvester - Download paper metadata from the arXiv OAI-PMH repository.
#[derive(Parser)]
#[command(name = "arxiv-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Harvest records for a category and save them as JSON.
    Harvest {
        /// Category (OAI setSpec) to harvest, e.g. "cs" or "physics:hep-th"
        category: String,

        /// Start of the date range, YYYY-MM-DD (default: first day of current month)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End of the date range, YYYY-MM-DD (default: today)
        #[arg(long)]
        until: Option<NaiveDate>,

        /// Seconds to wait before retrying after a 503 response
        #[arg(long, default_value_t = DEFAULT_RETRY_WAIT_SECS)]
        retry_wait: u64,

        /// Wall-clock budget in seconds; the run stops with partial results when spent
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_BUDGET_SECS)]
        timeout: u64,

        /// Maximum consecutive 503 retries before giving up
        #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
        max_retries: u32,

        /// Output file (default: records.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Harvest {
            category,
            from,
            until,
            retry_wait,
            timeout,
            max_retries,
            output,
        } => {
            let mut config = HarvestConfig::new(category);
            if let Some(from) = from {
                config.date_from = from;
            }
            if let Some(until) = until {
                config.date_until = until;
            }
            config.retry_wait_secs = retry_wait;
            config.timeout_budget_secs = timeout;
            config.max_retries = max_retries;

            harvest_command(&config, output.as_deref())
        }
    }
}

/// Execute the harvest command.
fn harvest_command(config: &HarvestConfig, output: Option<&Path>) -> Result<()> {
    // Validate inputs before making HTTP requests
    config.validate()?;

    let output_path = output.unwrap_or(Path::new("records.json"));

    println!(
        "{} {} from {} until {}",
        style("Harvesting").bold(),
        style(&config.category).cyan(),
        style(config.date_from).green(),
        style(config.date_until).green()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Fetching records...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = match harvest(config) {
        Ok(result) => result,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Saving JSON...");

    let saved = match save_json(&result.records, output_path) {
        Ok(path) => path,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!("  Records: {}", style(result.records.len()).green());
    println!("  Pages: {}", result.pages);
    println!("  Elapsed: {:.1}s", result.elapsed.as_secs_f64());
    println!();
    println!("{} {}", style("Saved to:").green().bold(), saved.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_harvest() {
        let cli = Cli::parse_from(["arxiv-harvester", "harvest", "cs"]);

        let Commands::Harvest {
            category,
            from,
            until,
            retry_wait,
            timeout,
            max_retries,
            output,
        } = cli.command;
        assert_eq!(category, "cs");
        assert!(from.is_none());
        assert!(until.is_none());
        assert_eq!(retry_wait, DEFAULT_RETRY_WAIT_SECS);
        assert_eq!(timeout, DEFAULT_TIMEOUT_BUDGET_SECS);
        assert_eq!(max_retries, DEFAULT_MAX_RETRIES);
        assert!(output.is_none());
    }

    #[test]
    fn test_cli_parse_harvest_with_range() {
        let cli = Cli::parse_from([
            "arxiv-harvester",
            "harvest",
            "stat",
            "--from",
            "2024-04-01",
            "--until",
            "2024-04-30",
            "--timeout",
            "600",
        ]);

        let Commands::Harvest {
            category,
            from,
            until,
            timeout,
            ..
        } = cli.command;
        assert_eq!(category, "stat");
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(until, NaiveDate::from_ymd_opt(2024, 4, 30));
        assert_eq!(timeout, 600);
    }

    #[test]
    fn test_cli_rejects_malformed_date() {
        let result = Cli::try_parse_from(["arxiv-harvester", "harvest", "cs", "--from", "April 1"]);
        assert!(result.is_err());
    }
}
