use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use vocab_graph::DependencyGraphBuilder;
use vocab_model::VocabularyCollection;
use vocab_progression::{LearningUnitScheduler, ProgressionPath, ProgressionProfile};

mod errors;
mod report;

pub use errors::{classify_error, InvalidProfile};

const PROFILE_ENV: &str = "VOCAB_PROFILE";
const DEFAULT_PROFILE: &str = "default";

#[derive(Parser)]
#[command(name = "vocab-progression")]
#[command(about = "Plan a learning path through a CEFR vocabulary collection", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Machine-readable output; failures print an error envelope to stdout
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build units, order them and write the learning path export
    Plan(PlanArgs),

    /// Export the term prerequisite graph
    Graph(GraphArgs),

    /// Print the JSON Schema of the learning path export
    Schema,
}

#[derive(Args)]
struct PlanArgs {
    /// Vocabulary JSON file
    input: PathBuf,

    /// Where to write the learning path JSON
    output: PathBuf,

    /// Builtin profile name or path to a JSON/TOML profile (env: VOCAB_PROFILE)
    #[arg(long)]
    profile: Option<String>,

    /// Also write a Markdown summary of the path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Args)]
struct GraphArgs {
    /// Vocabulary JSON file
    input: PathBuf,

    /// Write to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Only list the transitive prerequisites of this term
    #[arg(long)]
    term: Option<String>,

    /// Maximum hops when --term is given
    #[arg(long, default_value_t = 3)]
    depth: usize,
}

#[derive(Serialize)]
struct PlanSummary<'a> {
    status: &'static str,
    profile: &'a str,
    output: String,
    units: usize,
    total_duration: u64,
}

#[derive(Serialize)]
struct TermPrerequisites {
    term: String,
    depth: usize,
    prerequisites: Vec<PrerequisiteEntry>,
}

#[derive(Serialize)]
struct PrerequisiteEntry {
    term: String,
    distance: usize,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();
    if cli.json {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let json = cli.json;
    let outcome = match cli.command {
        Commands::Plan(args) => run_plan(args, json),
        Commands::Graph(args) => run_graph(args),
        Commands::Schema => run_schema(),
    };

    match outcome {
        Err(err) if json => {
            let envelope = classify_error(&err);
            print_stdout(&serde_json::to_string_pretty(&envelope)?)?;
            std::process::exit(1);
        }
        other => other,
    }
}

fn run_plan(args: PlanArgs, json: bool) -> Result<()> {
    let profile_name = args
        .profile
        .or_else(|| env::var(PROFILE_ENV).ok())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string());
    let profile = ProgressionProfile::resolve(&profile_name)
        .context(InvalidProfile(profile_name.clone()))?;
    log::debug!(
        "Profile '{}': levels={:?} min_unit_terms={} unit_minutes={}",
        profile.name(),
        profile.levels(),
        profile.min_unit_terms(),
        profile.unit_minutes()
    );

    let collection = load_collection(&args.input)?;
    let graph = DependencyGraphBuilder::new().build(collection.records());
    let path = LearningUnitScheduler::new(profile)
        .schedule(collection.records(), &graph)
        .with_context(|| format!("Failed to plan {}", args.input.display()))?;

    let export = path
        .to_export()
        .context("Failed to serialize learning path")?;
    write_json(&args.output, &export)?;
    log::info!("Wrote learning path to {}", args.output.display());

    if let Some(report_path) = &args.report {
        ensure_parent(report_path)?;
        fs::write(report_path, report::render_progression_report(&args.input, &path))
            .with_context(|| format!("Failed to write report {}", report_path.display()))?;
        log::info!("Wrote report to {}", report_path.display());
    }

    if json {
        print_summary(&args.output, &path)?;
    }
    Ok(())
}

fn run_graph(args: GraphArgs) -> Result<()> {
    let collection = load_collection(&args.input)?;
    let graph = DependencyGraphBuilder::new().build(collection.records());

    let body = match &args.term {
        Some(term) => {
            let prerequisites = graph
                .transitive_prerequisites(term, args.depth)?
                .into_iter()
                .map(|(term, distance)| PrerequisiteEntry { term, distance })
                .collect();
            serde_json::to_string_pretty(&TermPrerequisites {
                term: term.clone(),
                depth: args.depth,
                prerequisites,
            })?
        }
        None => serde_json::to_string_pretty(&graph.to_prerequisite_map())?,
    };

    match &args.output {
        Some(path) => {
            ensure_parent(path)?;
            fs::write(path, format!("{body}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote graph to {}", path.display());
        }
        None => print_stdout(&body)?,
    }
    Ok(())
}

fn run_schema() -> Result<()> {
    let schema = vocab_protocol::export_schema();
    print_stdout(&serde_json::to_string_pretty(&schema)?)
}

fn load_collection(input: &Path) -> Result<VocabularyCollection> {
    VocabularyCollection::from_path(input)
        .with_context(|| format!("Failed to load vocabulary from {}", input.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, format!("{body}\n"))
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}

fn print_summary(output: &Path, path: &ProgressionPath) -> Result<()> {
    let summary = PlanSummary {
        status: "ok",
        profile: &path.profile,
        output: output.display().to_string(),
        units: path.units.len(),
        total_duration: path.total_minutes,
    };
    print_stdout(&serde_json::to_string_pretty(&summary)?)
}

fn print_stdout(body: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{body}")?;
    stdout.flush()?;
    Ok(())
}
