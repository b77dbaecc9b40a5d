//! devplan CLI - development plan progress and feature priorities.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use devplan_core::{DevelopmentTask, Phase, Plan, TaskStatus};
use devplan_priority::PriorityMatrix;
use devplan_progress::{
    CompletionEstimator, ProgressReport, ProgressTracker, ReportConfig, TaskTracker,
};
use devplan_storage::{JsonPlanFile, PlanSource, SeedPlan};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "devplan")]
#[command(about = "Development plan tracker and feature prioritisation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Plan file to use instead of the built-in plan
    #[arg(short, long, env = "DEVPLAN_PLAN", global = true)]
    plan: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Working hours per day used for estimates
    #[arg(long, default_value = "8", global = true)]
    hours_per_day: f32,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the progress report
    Report {
        /// Number of critical-path tasks to list
        #[arg(long, default_value = "5")]
        limit: usize,
    },
    /// Show the tasks of one phase
    Phase {
        /// Phase (phase1..phase5)
        phase: Phase,
        /// Start date for the completion estimate (defaults to today)
        #[arg(long)]
        from: Option<NaiveDate>,
    },
    /// Show high-priority tasks in critical-path order
    CriticalPath {
        /// Maximum number of tasks
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show tasks in dependency order
    Order,
    /// Set a task's status
    Update {
        /// Task ID
        id: String,
        /// New status (todo, in-progress, testing, completed, blocked)
        status: TaskStatus,
        /// Write the change back to the plan file
        #[arg(long)]
        save: bool,
    },
    /// Show features ranked by priority score
    Priorities,
    /// Show development recommendations
    Recommend,
    /// Write the current plan to a JSON file
    Export {
        /// Output path
        path: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Logs go to stderr so JSON output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source: Box<dyn PlanSource> = match &cli.plan {
        Some(path) => Box::new(JsonPlanFile::new(path)),
        None => Box::new(SeedPlan),
    };
    info!("Using {}", source.describe());
    let plan = source
        .load()
        .await
        .with_context(|| format!("failed to load {}", source.describe()))?;

    let config = ReportConfig::default().with_hours_per_day(cli.hours_per_day);
    let mut tracker = TaskTracker::from_plan(&plan).with_config(config);
    let matrix = PriorityMatrix::new(plan.features.clone())?;

    match cli.command {
        Commands::Report { limit } => {
            let config = tracker.config().clone().with_critical_path_limit(limit);
            let tracker = tracker.clone().with_config(config);
            let report = tracker.build_report();

            if cli.json {
                print_json(&report)?;
            } else {
                print_report(&report);
            }
        }
        Commands::Phase { phase, from } => {
            let estimator = CompletionEstimator::from_config(tracker.config());
            let tasks = tracker.tasks_in_phase(phase);
            let progress = tracker.phase_progress(phase);
            let remaining = estimator.remaining_hours(tasks.iter().copied());
            let from = from.unwrap_or_else(|| Utc::now().date_naive());
            let eta = estimator.estimate_phase(&tracker, phase, from);

            if cli.json {
                print_json(&serde_json::json!({
                    "phase": phase,
                    "progress": progress,
                    "remainingHours": remaining,
                    "estimatedCompletion": eta,
                    "tasks": tasks,
                }))?;
            } else {
                println!("{} - {}% complete ({} tasks)", phase, progress, tasks.len());
                for task in &tasks {
                    print_task(task);
                }
                println!("Remaining: {:.1}h", remaining);
                match eta {
                    Some(date) => println!("Estimated completion: {}", date),
                    None => println!("Estimated completion: unknown"),
                }
            }
        }
        Commands::CriticalPath { limit } => {
            let path: Vec<_> = tracker
                .critical_path()
                .into_iter()
                .take(limit.unwrap_or(usize::MAX))
                .collect();

            if cli.json {
                print_json(&path)?;
            } else {
                println!("Critical path ({})", path.len());
                for (i, task) in path.iter().enumerate() {
                    print!("{:>3}. ", i + 1);
                    print_task(task);
                }
            }
        }
        Commands::Order => {
            for dangling in tracker.dangling_dependencies() {
                tracing::warn!("{} depends on missing task {}", dangling.task, dangling.missing);
            }
            let order = tracker.dependency_order()?;

            if cli.json {
                print_json(&order)?;
            } else {
                println!("Dependency order ({})", order.len());
                for (i, task) in order.iter().enumerate() {
                    print!("{:>3}. ", i + 1);
                    print_task(task);
                }
            }
        }
        Commands::Update { id, status, save } => {
            if !tracker.set_task_status(&id, status) {
                println!("Task not found: {}", id);
                return Ok(());
            }

            let Some(task) = tracker.task(&id) else {
                bail!("task {} disappeared after update", id);
            };
            let phase = task.phase;
            if cli.json {
                print_json(task)?;
            } else {
                print_task(task);
                println!("{} is now {}% complete", phase, tracker.phase_progress(phase));
            }

            if save {
                let Some(path) = &cli.plan else {
                    bail!("--save needs a plan file (--plan or DEVPLAN_PLAN)");
                };
                JsonPlanFile::new(path)
                    .save(&current_plan(&tracker, &matrix))
                    .await
                    .with_context(|| format!("failed to save {}", path.display()))?;
            }
        }
        Commands::Priorities => {
            let ranked = matrix.ranked_features();

            if cli.json {
                print_json(&ranked)?;
            } else {
                println!("Feature priorities ({})", ranked.len());
                for (i, f) in ranked.iter().enumerate() {
                    println!(
                        "{:>3}. {:>6.2}  {}  (value {}/{}, cost {}/{}/{})",
                        i + 1,
                        f.priority_score,
                        f.impact.feature,
                        f.impact.user_value,
                        f.impact.business_value,
                        f.impact.technical_complexity,
                        f.impact.resource_required,
                        f.impact.risk_level,
                    );
                }
            }
        }
        Commands::Recommend => {
            let lines = matrix.recommendations();

            if cli.json {
                print_json(&lines)?;
            } else {
                for line in lines {
                    println!("{}", line);
                }
            }
        }
        Commands::Export { path } => {
            JsonPlanFile::new(&path)
                .save(&current_plan(&tracker, &matrix))
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Exported plan to {}", path.display());
        }
    }

    Ok(())
}

fn current_plan(tracker: &TaskTracker, matrix: &PriorityMatrix) -> Plan {
    let mut plan = tracker.to_plan();
    plan.features = matrix.features().to_vec();
    plan
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_report(report: &ProgressReport) {
    let o = &report.overview;
    println!("Development progress ({})", report.generated_at.format("%Y-%m-%d %H:%M"));
    println!(
        "  Tasks: {} | Completed: {} | In progress: {} | Blocked: {}",
        o.total_tasks, o.completed_tasks, o.in_progress_tasks, o.blocked_tasks
    );

    println!("Phases");
    for (phase, progress) in &report.phases {
        println!("  {}  {}  {:>3}%", phase, progress_bar(*progress), progress);
    }

    println!("Milestones");
    for m in &report.milestones {
        println!(
            "  {}  {:>3}%  {}  target {}",
            m.title,
            m.progress,
            m.status.as_str(),
            m.target_date
        );
    }

    println!("Critical path");
    for (i, task) in report.critical_path.iter().enumerate() {
        print!("{:>3}. ", i + 1);
        print_task(task);
    }
}

fn print_task(task: &DevelopmentTask) {
    println!(
        "{} | {} | {} | {} | {}h - {}",
        task.id,
        format_status(task.status),
        task.priority.as_str(),
        task.category.as_str(),
        task.estimated_hours,
        task.title,
    );
}

fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) / 5;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(20 - filled))
}

fn format_status(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "TODO",
        TaskStatus::InProgress => "IN PROGRESS",
        TaskStatus::Testing => "TESTING",
        TaskStatus::Completed => "DONE",
        TaskStatus::Blocked => "BLOCKED",
    }
}
