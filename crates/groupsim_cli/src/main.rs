//! `groupsim` command-line front end.
//!
//! # Responsibility
//! - Wire CSV inputs and built-in scenarios to core operations.
//! - Print reports to stdout; failures exit with status 1.

use clap::{Args, Parser, Subcommand};
use groupsim_core::convert::{ConverterConfig, WorldEntityConverter};
use groupsim_core::output::{resolve_prefix, slugify};
use groupsim_core::scenarios::{spatial_scenarios, timeline_scenarios};
use groupsim_core::schedule::{
    minute_breakdown, render_group_table, save_schedule_summary, validate_schedule,
    ScheduleSummary,
};
use groupsim_core::simulation::{SimulationConfig, SpatialSimulator};
use groupsim_core::table::{load_scheduled_groups, load_spatial_groups};
use groupsim_core::timeline::{TimelineReport, DEFAULT_TIMELINE_POINTS};
use groupsim_core::{default_log_level, init_logging, ScheduledGroup, SpatialGroup};
use log::info;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

type CliResult = Result<(), Box<dyn Error>>;

const DEFAULT_OUTPUT_DIR: &str = "results";
const DEFAULT_SIMULATION_POINTS: usize = 50;
const DEFAULT_SEED: u64 = 42;
const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Parser)]
#[command(name = "groupsim", version, about = "Group scheduling and spatial trajectory scenarios")]
struct Cli {
    /// Log level used when `--log-dir` is given.
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rotating log files; logging is off without it.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a scheduling table and save its summary.
    Validate(ValidateArgs),
    /// Print timeline tables, overlaps and concurrency statistics.
    Timeline(TimelineArgs),
    /// Run the spatial trajectory simulator.
    Simulate(SimulateArgs),
    /// Convert trajectory CSV files into world-entity files.
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Directory for saved files.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
    /// File name prefix; defaults to the local time as YYYYMMDD_HHMM.
    #[arg(long)]
    prefix: Option<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Scheduling table with group_id, group_size, start_percent, stop_percent.
    csv: PathBuf,
    /// Session length in minutes for a per-group minute breakdown.
    #[arg(long)]
    total_time: Option<f64>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct TimelineArgs {
    /// Scheduling table; built-in scenarios run when omitted.
    #[arg(long)]
    csv: Option<PathBuf>,
    #[arg(long, default_value_t = DEFAULT_TIMELINE_POINTS)]
    num_points: usize,
    /// Save one text report per table.
    #[arg(long)]
    save: bool,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct SimulateArgs {
    /// Spatial group table; built-in scenarios run when omitted.
    #[arg(long)]
    csv: Option<PathBuf>,
    #[arg(long, default_value_t = DEFAULT_SIMULATION_POINTS)]
    time_points: usize,
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Save group, object, trajectory and summary files.
    #[arg(long)]
    save: bool,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct ConvertArgs {
    /// Trajectory CSV files, converted in order with continuous keys.
    #[arg(required = true)]
    csv: Vec<PathBuf>,
    #[arg(long, default_value = "./trajectories")]
    output_dir: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    match cli.command {
        Command::Validate(args) => validate(args),
        Command::Timeline(args) => timeline(args),
        Command::Simulate(args) => simulate(args),
        Command::Convert(args) => convert(args),
    }
}

fn validate(args: ValidateArgs) -> CliResult {
    let groups = load_scheduled_groups(&args.csv)?;
    validate_schedule(&groups)?;
    println!("Validated {} groups from {}\n", groups.len(), args.csv.display());
    print!("{}", render_group_table(&groups));

    if let Some(summary) = ScheduleSummary::from_groups(&groups) {
        println!("\nSummary:");
        print!("{}", summary.render_text());
    }

    if let Some(total_minutes) = args.total_time {
        println!("\nTime breakdown ({total_minutes} minutes total):");
        for row in minute_breakdown(&groups, total_minutes) {
            println!(
                "  Group {}: {:.1} - {:.1} min ({:.1} min, {} participants)",
                row.group_id, row.start_minute, row.stop_minute, row.duration_minutes, row.group_size
            );
        }
    }

    let path = save_schedule_summary(
        &args.output.output_dir,
        args.output.prefix.as_deref(),
        &args.csv.display().to_string(),
        &groups,
    )?;
    println!("\nSummary saved to {}", path.display());
    Ok(())
}

fn timeline(args: TimelineArgs) -> CliResult {
    if args.save {
        resolve_prefix(args.output.prefix.as_deref())?;
    }
    let tables = match &args.csv {
        Some(path) => {
            let groups = load_scheduled_groups(path)?;
            validate_schedule(&groups)?;
            vec![(table_name(path), groups)]
        }
        None => timeline_scenarios()
            .into_iter()
            .map(|scenario| (scenario.name.to_string(), scenario.groups))
            .collect(),
    };

    for (name, groups) in &tables {
        print_timeline(name, groups, &args)?;
    }
    Ok(())
}

fn print_timeline(name: &str, groups: &[ScheduledGroup], args: &TimelineArgs) -> CliResult {
    let report = TimelineReport::generate(groups, args.num_points);
    println!("{}", "=".repeat(70));
    println!("{name}");
    println!("{}\n", "=".repeat(70));
    println!("{}\n", report.table);
    println!("Overlapping Groups:");
    print!("{}", report.render_overlaps());
    println!("\nConcurrent Stats:");
    print!("{}", report.render_stats());
    println!("\nActivity Patterns:");
    print!("{}", report.render_patterns());
    println!();

    if args.save {
        let path = report.save(&args.output.output_dir, name, args.output.prefix.as_deref())?;
        println!("Report saved to {}\n", path.display());
    }
    Ok(())
}

fn simulate(args: SimulateArgs) -> CliResult {
    let config = SimulationConfig::seeded(args.time_points, args.seed);
    let tables = match &args.csv {
        Some(path) => vec![(table_name(path), load_spatial_groups(path)?)],
        None => spatial_scenarios()
            .into_iter()
            .map(|scenario| (scenario.name.to_string(), scenario.groups))
            .collect(),
    };

    let base_prefix = resolve_prefix(args.output.prefix.as_deref())?;
    for (name, groups) in tables {
        run_simulation(&name, groups, config, &args, &base_prefix)?;
    }
    Ok(())
}

fn run_simulation(
    name: &str,
    groups: Vec<SpatialGroup>,
    config: SimulationConfig,
    args: &SimulateArgs,
    base_prefix: &str,
) -> CliResult {
    let mut simulator = SpatialSimulator::new(groups, config)?;
    simulator.generate_objects();
    simulator.generate_trajectories()?;

    println!("{}", "=".repeat(70));
    println!("Scenario: {name}");
    println!("{}\n", "=".repeat(70));
    print!("{}", simulator.summary()?.render_text());

    println!("\nGroup windows:");
    for group in simulator.groups() {
        println!(
            "  Group {}: {:.1}% - {:.1}% ({:.1}% active, {} objects, category {})",
            group.group_id,
            group.start_percent,
            group.stop_percent,
            group.schedule().duration_percent(),
            group.group_size,
            group.category
        );
    }

    let objects = simulator.objects()?;
    println!("\nSample objects:");
    for object in objects.iter().take(PREVIEW_ROWS) {
        println!(
            "  #{} group {} start=({}) end=({}) travel={:.2}",
            object.object_id, object.group_id, object.start, object.end, object.travel_distance
        );
    }

    if let Some(first) = objects.first() {
        println!("\nTrajectory of object {}:", first.object_id);
        let samples = simulator
            .trajectories()?
            .iter()
            .filter(|sample| sample.object_id == first.object_id)
            .collect::<Vec<_>>();
        for sample in samples.iter().take(PREVIEW_ROWS) {
            println!("  t={:6.2}%  ({})", sample.time_percent, sample.position);
        }
        if samples.len() > PREVIEW_ROWS {
            println!("  ... {} samples total", samples.len());
        }
    }

    if args.save {
        let prefix = format!("{base_prefix}_{}", slugify(name));
        let saved = simulator.save_outputs(&args.output.output_dir, Some(&prefix))?;
        println!("\nSaved:");
        println!("  {}", saved.input_groups.display());
        println!("  {}", saved.objects.display());
        if let Some(path) = &saved.trajectories {
            println!("  {}", path.display());
        }
        println!("  {}", saved.summary.display());
    }
    println!();
    Ok(())
}

fn convert(args: ConvertArgs) -> CliResult {
    let mut converter = WorldEntityConverter::new(ConverterConfig::with_output_dir(args.output_dir.clone()));
    let result = converter.convert_many(&args.csv)?;
    info!(
        "event=cli_convert module=cli status=ok files={} entities={}",
        args.csv.len(),
        result.num_entities
    );

    println!("Conversion complete");
    println!("Entities created: {}", result.num_entities);
    println!("Trajectory files: {}", result.trajectory_files.len());
    println!("Consolidated file: {}", result.consolidated_file.display());
    let keys = result
        .entity_blocks
        .keys()
        .map(u32::to_string)
        .collect::<Vec<_>>();
    println!("Entity keys: [{}]", keys.join(", "));
    Ok(())
}

fn table_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "custom".to_string())
}
