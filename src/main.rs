mod capture;
mod controller;
mod db;
mod message;
mod parser;
mod settings;
mod sink;
mod submit;

use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::warn;

use parser::ProfileRecord;

#[derive(Parser)]
#[command(name = "profile-logger", about = "Profile page field extractor and sheet logger")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract profile fields from saved pages (JSON per page)
    Extract {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Page address to report (single file only)
        #[arg(long)]
        url: Option<String>,
    },
    /// Show what the experience section of a page looks like
    Debug {
        file: PathBuf,
        #[arg(long)]
        url: Option<String>,
        /// Print the raw debug object instead of the report
        #[arg(long)]
        json: bool,
    },
    /// Answer a {"action": ...} request read from stdin
    Message {
        file: PathBuf,
        #[arg(long)]
        url: Option<String>,
    },
    /// Extract a page and submit it to the configured endpoint
    Save {
        file: PathBuf,
        #[arg(long)]
        url: Option<String>,
    },
    /// Show or set the submission endpoint URL
    Options {
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Append a posted payload to the local sheet (stdin when no body given)
    Append {
        #[arg(long)]
        body: Option<String>,
    },
    /// List rows of the local sheet
    Rows {
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract { files, url } => {
            if files.len() == 1 {
                let page = capture::load(&files[0], url.as_deref())?;
                let record = parser::extract(&page);
                println!("{}", serde_json::to_string_pretty(&record)?);
                return Ok(());
            }
            if url.is_some() {
                bail!("--url only applies when extracting a single file");
            }
            let results = extract_pages(&files);
            let mut counts = ExtractCounts::default();
            for (path, result) in results {
                match result {
                    Ok(record) => {
                        counts.record(&record);
                        println!("{}", serde_json::to_string(&record)?);
                    }
                    Err(e) => {
                        counts.errors += 1;
                        warn!("Skipping {:?}: {:#}", path, e);
                    }
                }
            }
            counts.print();
            Ok(())
        }
        Commands::Debug { file, url, json } => {
            let page = capture::load(&file, url.as_deref())?;
            if let Some(status) = controller::require_profile_page(&page) {
                println!("{}", status);
                bail!("not a profile page");
            }
            let info = parser::debug_experience(&page);
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}", controller::debug_report(&info));
                eprintln!(
                    "{}",
                    controller::Status::info("Debug info above. Set RUST_LOG=debug for the log line.")
                );
            }
            Ok(())
        }
        Commands::Message { file, url } => {
            let page = capture::load(&file, url.as_deref())?;
            let raw = read_stdin()?;
            let request: message::Request =
                serde_json::from_str(&raw).context("Failed to parse request message")?;
            if let Some(response) = message::handle(&page, &request) {
                println!("{}", serde_json::to_string(&response)?);
            }
            Ok(())
        }
        Commands::Save { file, url } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let settings = settings::Settings::load(&conn)?;
            let page = capture::load(&file, url.as_deref())?;
            let submitter = submit::Submitter::new();
            let outcome = controller::save_profile(&page, &settings, &submitter).await;
            if let Some(preview) = outcome.record.as_ref().and_then(controller::preview) {
                println!("{}\n", preview);
            }
            println!("{}", outcome.status);
            if outcome.status.is_error() {
                bail!("profile not saved");
            }
            Ok(())
        }
        Commands::Options { endpoint } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            match endpoint {
                Some(raw) => println!("{}", settings::save_endpoint(&conn, &raw)?),
                None => {
                    let s = settings::Settings::load(&conn)?;
                    println!("Endpoint: {}", s.endpoint().unwrap_or("(not set)"));
                }
            }
            Ok(())
        }
        Commands::Append { body } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let body = match body {
                Some(b) => b,
                None => read_stdin()?,
            };
            let response = sink::do_post(&conn, &body);
            println!("{}", serde_json::to_string(&response)?);
            Ok(())
        }
        Commands::Rows { limit } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let rows = db::fetch_rows(&conn, Some(limit))?;
            if rows.is_empty() {
                println!("No rows yet.");
                return Ok(());
            }

            println!(
                "{:>3} | {:<20} | {:<20} | {:<24} | {:<18} | {:<12} | {}",
                "#", "Name", "Company", "Position", "Location", "Date", "Profile"
            );
            println!("{}", "-".repeat(120));
            for (i, r) in rows.iter().enumerate() {
                println!(
                    "{:>3} | {:<20} | {:<20} | {:<24} | {:<18} | {:<12} | {}",
                    i + 1,
                    truncate(&r.name, 20),
                    truncate(&r.company, 20),
                    truncate(&r.position, 24),
                    truncate(&r.location, 18),
                    r.date,
                    r.profile_url
                );
            }
            println!("\n{} rows", rows.len());
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

#[derive(Default)]
struct ExtractCounts {
    pages: usize,
    named: usize,
    with_company: usize,
    errors: usize,
}

impl ExtractCounts {
    fn record(&mut self, r: &ProfileRecord) {
        self.pages += 1;
        if !r.name.is_empty() {
            self.named += 1;
        }
        if !r.company.is_empty() {
            self.with_company += 1;
        }
    }

    fn print(&self) {
        eprintln!(
            "Extracted {} pages ({} with name, {} with company, {} errors).",
            self.pages, self.named, self.with_company, self.errors,
        );
    }
}

/// Parse and extract many captures in parallel. Each worker owns its document.
fn extract_pages(files: &[PathBuf]) -> Vec<(PathBuf, anyhow::Result<ProfileRecord>)> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut out = Vec::with_capacity(files.len());
    for chunk in files.chunks(200) {
        let results: Vec<_> = chunk
            .par_iter()
            .map(|path| {
                let record = capture::load(path, None).map(|page| parser::extract(&page));
                (path.clone(), record)
            })
            .collect();
        out.extend(results);
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    out
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
