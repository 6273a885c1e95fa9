//! Taskpad command-line surface.
//!
//! # Responsibility
//! - Provide the interactive presentation layer over `taskpad_core`.
//! - Own the delete confirmation prompt; the store performs no confirmation.
//!
//! # Invariants
//! - Records are only ever mutated through the store operations.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use taskpad_core::db::open_db;
use taskpad_core::{
    default_log_level, init_logging, FormController, SqliteKvRepository, Task, TaskId, TaskStore,
};

#[derive(Parser)]
#[command(name = "taskpad", version, about = "Single-user task list manager")]
struct Cli {
    /// Data directory override (defaults to the platform data dir).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level override (trace|debug|info|warn|error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new task.
    Add {
        title: String,
        /// Longer free-form description.
        #[arg(long)]
        desc: Option<String>,
        /// Calendar date, YYYY-MM-DD.
        #[arg(long)]
        date: Option<String>,
        /// Time of day, HH:MM.
        #[arg(long)]
        time: Option<String>,
    },
    /// List tasks, newest first.
    List,
    /// Edit an existing task; omitted flags keep their stored values.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
    },
    /// Delete a task after confirmation.
    Rm {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    let log_level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
    if let Err(err) = init_logging(log_level, &data_dir.join("logs").to_string_lossy()) {
        // Logging is ambient; a broken log setup must not block the user.
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = open_db(data_dir.join("taskpad.db"))?;
    let repo = SqliteKvRepository::try_new(&conn)?;
    let mut store = TaskStore::load(repo);

    match cli.command {
        Command::Add {
            title,
            desc,
            date,
            time,
        } => {
            let mut form = FormController::new();
            form.set_title(title);
            if let Some(desc) = desc {
                form.set_description(desc);
            }
            if let Some(date) = date {
                form.set_date(date);
            }
            if let Some(time) = time {
                form.set_time(time);
            }

            let task = form.submit(&mut store)?;
            println!("added {}", task.id);
        }
        Command::List => {
            if store.is_empty() {
                println!("no tasks");
            }
            for task in store.list() {
                print_task(task);
            }
        }
        Command::Edit {
            id,
            title,
            desc,
            date,
            time,
        } => {
            let id = parse_id(&id)?;
            let task = store
                .get(id)
                .ok_or_else(|| anyhow!("no task with id {id}"))?;

            let mut form = FormController::new();
            form.begin_edit(task);
            if let Some(title) = title {
                form.set_title(title);
            }
            if let Some(desc) = desc {
                form.set_description(desc);
            }
            if let Some(date) = date {
                form.set_date(date);
            }
            if let Some(time) = time {
                form.set_time(time);
            }

            let task = form.submit(&mut store)?;
            println!("updated {}", task.id);
        }
        Command::Rm { id, yes } => {
            let id = parse_id(&id)?;
            if !yes && !confirm_delete()? {
                println!("aborted");
                return Ok(());
            }

            if store.delete(id) {
                println!("deleted {id}");
            } else {
                println!("no task with id {id}");
            }
        }
    }

    Ok(())
}

fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    let data_dir = match override_dir {
        Some(dir) => dir,
        None => dirs::data_dir()
            .context("could not determine a platform data directory; pass --data-dir")?
            .join("taskpad"),
    };
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory `{}`", data_dir.display()))?;
    // Logging requires an absolute directory; normalize relative overrides.
    data_dir
        .canonicalize()
        .with_context(|| format!("failed to resolve data directory `{}`", data_dir.display()))
}

fn parse_id(value: &str) -> Result<TaskId> {
    TaskId::parse_str(value).with_context(|| format!("invalid task id `{value}`"))
}

fn confirm_delete() -> Result<bool> {
    print!("Delete this task? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn print_task(task: &Task) {
    let schedule = task
        .scheduled_at
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "—".to_string());
    let audit = match task.updated_at {
        Some(at) => format!("updated {}", at.format("%Y-%m-%d %H:%M")),
        None => format!("created {}", task.created_at.format("%Y-%m-%d %H:%M")),
    };

    println!("{}  {:<16}  {}  ({audit})", task.id, schedule, task.title);
    if !task.description.is_empty() {
        println!("{:38}{}", "", task.description);
    }
}
