// cardsync CLI - contact dedup and sync operations

mod dupes;
mod exit_codes;
mod filter;
mod master;
mod missing;
mod report;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_PARSE, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "cardsync")]
#[command(about = "Deduplicate, merge, and reconcile exported contact lists")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect duplicate contacts across one or more vCard exports
    #[command(after_help = "\
Examples:
  cardsync dupes google.vcf
  cardsync dupes google.vcf icloud.vcf --name-threshold 0.8
  cardsync dupes google.vcf --json")]
    Dupes {
        /// vCard export files to scan
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Name similarity threshold for duplicate detection (0.0-1.0)
        #[arg(long, default_value_t = 0.85)]
        name_threshold: f64,

        /// Do not treat shared phone numbers as duplicate evidence
        #[arg(long)]
        no_phone_match: bool,

        /// Directory for report files
        #[arg(long, default_value = "out")]
        output_dir: PathBuf,

        /// Output the pair list as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Report contacts present in one store but absent from another
    #[command(after_help = "\
Examples:
  cardsync missing --source google.vcf --target icloud.vcf
  cardsync missing --source google.vcf --target icloud.vcf --output-dir sync/")]
    Missing {
        /// Store to look for missing contacts in
        #[arg(long)]
        source: PathBuf,

        /// Store whose identities are the reference
        #[arg(long)]
        target: PathBuf,

        /// Directory for report and export files
        #[arg(long, default_value = "out")]
        output_dir: PathBuf,
    },

    /// Auto-merge duplicates into a single master contacts file
    #[command(after_help = "\
Examples:
  cardsync merge google.vcf
  cardsync merge google.vcf icloud.vcf --name-threshold 0.9
  cardsync merge google.vcf icloud.vcf --json")]
    Merge {
        /// vCard export files to combine and deduplicate
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Name similarity threshold for auto-merging (0.0-1.0).
        /// Stricter than detection by default: merging is destructive.
        #[arg(long, default_value_t = 0.90)]
        name_threshold: f64,

        /// Do not treat shared phone numbers as duplicate evidence
        #[arg(long)]
        no_phone_match: bool,

        /// Directory for the master file and merge log
        #[arg(long, default_value = "out")]
        output_dir: PathBuf,

        /// Output the run summary as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Drop contacts matching exclusion rules from a contacts file
    #[command(after_help = "\
Examples:
  cardsync filter master.vcf
  cardsync filter master.vcf --rules my_rules.toml --output-dir filtered/")]
    Filter {
        /// Input contacts file
        input: PathBuf,

        /// TOML exclusion rules file; a missing file means no exclusions
        #[arg(long, default_value = "filter_rules.toml")]
        rules: PathBuf,

        /// Directory for filtered output and report files
        #[arg(long, default_value = "out")]
        output_dir: PathBuf,
    },
}

pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_PARSE, message: msg.into(), hint: None }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dupes { files, name_threshold, no_phone_match, output_dir, json } => {
            dupes::cmd_dupes(files, name_threshold, no_phone_match, output_dir, json)
        }
        Commands::Missing { source, target, output_dir } => {
            missing::cmd_missing(source, target, output_dir)
        }
        Commands::Merge { files, name_threshold, no_phone_match, output_dir, json } => {
            master::cmd_merge(files, name_threshold, no_phone_match, output_dir, json)
        }
        Commands::Filter { input, rules, output_dir } => {
            filter::cmd_filter(input, rules, output_dir)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            if let Some(hint) = e.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(e.code)
        }
    }
}
