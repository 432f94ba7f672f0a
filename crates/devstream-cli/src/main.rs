//! DevStream - mock software-delivery event generation.
//!
//! The `devstream` command produces JSON fixture files for analytics and
//! ingestion pipelines.
//!
//! ## Commands
//!
//! - `devops`: causally linked PR / commit / CI build / deployment stream
//! - `deployments`: independent deployment records
//! - `github`: independent repository activity records
//! - `jenkins`: independent CI job records

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, Level};

use devstream_core::{init_tracing, Event, EventStream, StreamConfig};

mod output;
mod single;

#[derive(Parser)]
#[command(name = "devstream")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mock software-delivery event generator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the causally linked DevOps event stream
    Devops {
        /// Number of pull request lifecycles
        #[arg(long, default_value_t = 2_500)]
        pull_requests: usize,

        /// Number of commit events
        #[arg(long, default_value_t = 10_000)]
        commits: usize,

        /// Number of CI build lifecycles
        #[arg(long, default_value_t = 3_000)]
        builds: usize,

        /// Generation window in days, counting back from now
        #[arg(long, default_value_t = 90)]
        time_span_days: u32,

        /// Seed for reproducible branch structure (entropy-seeded when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Output file path
        #[arg(short, long, default_value = "data/raw/devops_events.json")]
        output: PathBuf,
    },

    /// Generate independent deployment records
    Deployments {
        /// Number of records
        #[arg(short = 'n', long, default_value_t = 10_000)]
        count: usize,

        /// Output file path
        #[arg(short, long, default_value = "data/raw/deployments.json")]
        output: PathBuf,
    },

    /// Generate independent repository activity records
    Github {
        /// Number of records
        #[arg(short = 'n', long, default_value_t = 10_000)]
        count: usize,

        /// Output file path
        #[arg(short, long, default_value = "data/raw/github_events.json")]
        output: PathBuf,
    },

    /// Generate independent CI job records
    Jenkins {
        /// Number of records
        #[arg(short = 'n', long, default_value_t = 10_000)]
        count: usize,

        /// Output file path
        #[arg(short, long, default_value = "data/raw/jenkins_events.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    match cli.command {
        Commands::Devops {
            pull_requests,
            commits,
            builds,
            time_span_days,
            seed,
            output,
        } => {
            let config = StreamConfig {
                pull_requests,
                commits,
                builds,
                time_span_days,
            };
            cmd_devops(config, seed, &output)
        }
        Commands::Deployments { count, output } => {
            let records = single::deployments(&mut rand::thread_rng(), count);
            output::write_json(&output, &records)?;
            println!(
                "Generated {} deployment records -> {}",
                records.len(),
                output.display()
            );
            Ok(())
        }
        Commands::Github { count, output } => {
            let records = single::github_activity(&mut rand::thread_rng(), count);
            output::write_json(&output, &records)?;
            println!(
                "Generated {} activity records -> {}",
                records.len(),
                output.display()
            );
            Ok(())
        }
        Commands::Jenkins { count, output } => {
            let records = single::jenkins_jobs(&mut rand::thread_rng(), count);
            output::write_json(&output, &records)?;
            println!(
                "Generated {} job records -> {}",
                records.len(),
                output.display()
            );
            Ok(())
        }
    }
}

/// Drain the causal stream and persist it as one JSON array.
fn cmd_devops(config: StreamConfig, seed: Option<u64>, output: &Path) -> Result<()> {
    let requested_builds = config.builds;
    let mut stream = match seed {
        Some(seed) => EventStream::with_rng(config, StdRng::seed_from_u64(seed))?,
        None => EventStream::new(config)?,
    };

    let events: Vec<Event> = stream.by_ref().collect();
    output::write_json(output, &events)?;

    info!(
        events = events.len(),
        builds_skipped = stream.builds_skipped(),
        "stream generation complete"
    );
    if stream.builds_skipped() > 0 {
        println!(
            "Warning: {} of {} requested builds were skipped (no commits to anchor them)",
            stream.builds_skipped(),
            requested_builds
        );
    }
    println!("Generated {} events -> {}", events.len(), output.display());
    Ok(())
}
