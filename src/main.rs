use anyhow::Context;
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use latam_readiness::assessment::{self, AssessmentNotFound, AssessmentRecord, LeadTier};
use latam_readiness::{browser, config, email, output, questionnaire, scoring};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_NOT_FOUND: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Tsv,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a questionnaire file (YAML or JSON) and store the assessment
    Assess {
        /// Questionnaire document with contact fields and answers
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Write admin.html and client.html email previews to this directory
        #[arg(long)]
        email_dir: Option<PathBuf>,

        /// Open the client email preview in the browser
        #[arg(long, requires = "email_dir")]
        open: bool,

        /// Score without saving to the assessment store
        #[arg(long)]
        no_save: bool,
    },
    /// Print a stored assessment
    Show {
        /// Assessment id
        id: String,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// List recent assessments, newest first
    List {
        #[arg(short, long, default_value_t = assessment::DEFAULT_LIST_LIMIT)]
        limit: usize,

        /// Only assessments newer than this (e.g. "7d", "12h")
        #[arg(long, value_parser = humantime::parse_duration)]
        since: Option<Duration>,

        /// Only leads in this score tier (high >= 80, medium 60-79, low < 60)
        #[arg(long)]
        tier: Option<LeadTier>,
    },
    /// Export stored assessments as a CSV lead sheet
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only assessments newer than this (e.g. "7d", "12h")
        #[arg(long, value_parser = humantime::parse_duration)]
        since: Option<Duration>,

        /// Only leads in this score tier (high >= 80, medium 60-79, low < 60)
        #[arg(long)]
        tier: Option<LeadTier>,
    },
    /// Print the target market catalog
    Markets,
    /// Answer the questionnaire interactively and save it as YAML
    Wizard {
        #[arg(short, long, default_value = "questionnaire.yaml")]
        output: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(name = "latam-readiness")]
#[command(about = "LATAM healthcare market readiness assessment", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and score breakdowns
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/latam-readiness/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_record(record: &AssessmentRecord, format: OutputFormat, verbose: bool) {
    match format {
        OutputFormat::Text => {
            let use_colors = output::should_use_colors();
            println!("{}", output::format_report(record, verbose, use_colors));
        }
        OutputFormat::Json => match serde_json::to_string_pretty(record) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize assessment: {}", e);
                std::process::exit(EXIT_INPUT);
            }
        },
        OutputFormat::Tsv => println!("{}", output::format_tsv(&record.market_fit)),
    }
}

/// Turn a `--since` window into an absolute cutoff
fn since_cutoff(since: Option<Duration>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match since.map(chrono::Duration::from_std).transpose() {
        Ok(window) => window.map(|w| now - w),
        Err(_) => {
            eprintln!("--since window is too large");
            std::process::exit(EXIT_INPUT);
        }
    }
}

fn write_export(path: &Path, csv: &str) -> anyhow::Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    writeln!(file, "{}", csv).with_context(|| format!("Failed to write {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;
    Ok(())
}

fn store_dir(config: &config::Config) -> PathBuf {
    match config::data_dir(config) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        eprintln!("Failed to install rustls crypto provider");
        std::process::exit(EXIT_CONFIG);
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);
    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    match cli.command {
        Commands::Assess {
            file,
            format,
            email_dir,
            open,
            no_save,
        } => {
            let document = match questionnaire::load_document(&file) {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            let parsed = questionnaire::parse_contact(&document)
                .and_then(|contact| Ok((contact, questionnaire::parse_questionnaire(&document)?)));
            let (contact, responses) = match parsed {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            if let Err(errors) = scoring::validate_submission(&contact, &responses) {
                eprintln!("Submission errors:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_INPUT);
            }

            let record = AssessmentRecord::new(contact, responses);

            if !no_save {
                let dir = store_dir(&config);
                if let Err(e) = assessment::save_assessment(&dir, &record) {
                    eprintln!("Storage error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }

            if let Some(dir) = email_dir {
                match email::write_email_files(&record, &config, &dir) {
                    Ok(client_path) => {
                        tracing::info!(dir = %dir.display(), "Wrote email previews");
                        if open {
                            if let Err(e) = browser::open_file(&client_path) {
                                eprintln!("Failed to open browser: {}", e);
                                std::process::exit(EXIT_NETWORK);
                            }
                        }
                    }
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                }
            }

            let api_key = config::get_api_key_from_env();
            email::send_assessment_emails(&record, &config, api_key.as_deref()).await;

            print_record(&record, format, cli.verbose);
            if !no_save {
                eprintln!("Results: {}", record.results_url(&config.site_url));
            }
        }
        Commands::Show { id, format } => {
            let id = match Uuid::parse_str(&id) {
                Ok(id) => id,
                Err(_) => {
                    eprintln!("Invalid assessment id: {}", id);
                    std::process::exit(EXIT_INPUT);
                }
            };

            let dir = store_dir(&config);
            match assessment::load_assessment(&dir, &id) {
                Ok(record) => print_record(&record, format, cli.verbose),
                Err(e) if e.downcast_ref::<AssessmentNotFound>().is_some() => {
                    eprintln!("{}", e);
                    std::process::exit(EXIT_NOT_FOUND);
                }
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            }
        }
        Commands::List { limit, since, tier } => {
            let now = Utc::now();
            let cutoff = since_cutoff(since, now);

            let dir = store_dir(&config);
            match assessment::list_assessments(&dir, limit, cutoff, tier) {
                Ok(summaries) => {
                    let use_colors = output::should_use_colors();
                    println!("{}", output::format_summaries(&summaries, now, use_colors));
                }
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
        Commands::Export {
            output: path,
            since,
            tier,
        } => {
            let cutoff = since_cutoff(since, Utc::now());

            let dir = store_dir(&config);
            let records = match assessment::load_assessments(&dir, cutoff, tier) {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            let csv = output::format_csv(&records);
            match path {
                Some(path) => {
                    if let Err(e) = write_export(&path, &csv) {
                        eprintln!("{:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                    eprintln!("Exported {} assessments to {}", records.len(), path.display());
                }
                None => println!("{}", csv),
            }
        }
        Commands::Markets => {
            println!("{}", output::format_catalog(output::should_use_colors()));
        }
        Commands::Wizard { output: path } => {
            if let Err(e) = questionnaire::run_questionnaire_wizard(&path) {
                eprintln!("{:#}", e);
                std::process::exit(EXIT_INPUT);
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
