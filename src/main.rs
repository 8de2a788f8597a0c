use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{ArgGroup, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dropout_analytics::engine::{analyze, EngineConfig};
use dropout_analytics::snapshot::{self, Scope};
use dropout_analytics::{report, seed};

#[derive(Parser)]
#[command(name = "dropout-analytics")]
#[command(about = "Chart-ready dropout analytics from student record snapshots", long_about = None)]
struct Cli {
    /// Log per-record exclusions
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
#[command(group(
    ArgGroup::new("scope")
        .args(["school", "added_by"])
        .multiple(false)
))]
struct SnapshotArgs {
    /// Snapshot file (.json array, keyed JSON export, or .csv)
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    school: Option<String>,
    #[arg(long)]
    added_by: Option<String>,
    /// Date assigned to records without addedDate (YYYY-MM-DD, default today)
    #[arg(long)]
    today: Option<NaiveDate>,
    #[arg(long, default_value_t = 5)]
    school_top_n: usize,
    #[arg(long, default_value_t = 10)]
    district_top_n: usize,
}

impl SnapshotArgs {
    fn scope(&self) -> Option<Scope> {
        self.school
            .clone()
            .map(Scope::School)
            .or_else(|| self.added_by.clone().map(Scope::AddedBy))
    }

    fn config(&self) -> EngineConfig {
        EngineConfig {
            school_top_n: self.school_top_n,
            district_top_n: self.district_top_n,
            reference_date: self.today.unwrap_or_else(|| Utc::now().date_naive()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write every analytics view as JSON
    Analyze {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        #[arg(long)]
        pretty: bool,
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate a markdown report
    Report {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Write a demo snapshot
    Seed {
        #[arg(long, default_value = "snapshot.json")]
        out: PathBuf,
        #[arg(long, default_value_t = 40)]
        count: usize,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_snapshot(args: &SnapshotArgs) -> anyhow::Result<Vec<dropout_analytics::RawRecord>> {
    let raws = snapshot::load(&args.input)
        .with_context(|| format!("failed to load snapshot {}", args.input.display()))?;
    Ok(snapshot::apply_scope(raws, args.scope().as_ref()))
}

fn write_output(out: &Path, contents: &str) -> anyhow::Result<()> {
    std::fs::write(out, contents).with_context(|| format!("failed to write {}", out.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze {
            snapshot,
            pretty,
            out,
        } => {
            let raws = load_snapshot(&snapshot)?;
            let analysis = analyze(&raws, &snapshot.config());
            let json = if pretty {
                serde_json::to_string_pretty(&analysis.result)?
            } else {
                serde_json::to_string(&analysis.result)?
            };

            match out {
                Some(path) => {
                    write_output(&path, &json)?;
                    eprintln!(
                        "Analysed {} records ({} rejected); views written to {}.",
                        analysis.result.total_records,
                        analysis.rejected.len(),
                        path.display()
                    );
                }
                None => println!("{json}"),
            }
        }
        Commands::Report { snapshot, out } => {
            let raws = load_snapshot(&snapshot)?;
            let config = snapshot.config();
            let analysis = analyze(&raws, &config);
            let scope = snapshot.scope();
            let report = report::build_report(
                scope.as_ref().map(Scope::label),
                config.reference_date,
                &analysis,
            );
            write_output(&out, &report)?;
            println!("Report written to {}.", out.display());
        }
        Commands::Seed { out, count } => {
            let demo = seed::demo_snapshot(count, Utc::now().date_naive());
            write_output(&out, &serde_json::to_string_pretty(&demo)?)?;
            println!("Wrote {count} demo records to {}.", out.display());
        }
    }

    Ok(())
}
