use std::error::Error;
use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};

use taskgrid::bucketing::{self, TaskFilter};
use taskgrid::calendar::MonthCursor;
use taskgrid::client::Client;
use taskgrid::config::{ViewSettings, API_BASE_URL};
use taskgrid::memory_store::MemoryStore;
use taskgrid::traits::TaskStore;
use taskgrid::utils::comparison;
use taskgrid::views::{self, DateModal, TaskStats};
use taskgrid::{MonthGrid, Priority, Task, TaskDraft, TaskId, Workspace};

#[derive(Parser)]
#[command(name = "taskgrid", about = "Dated tasks, on a dashboard, a list and a month calendar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the task API (defaults to $TASKGRID_API_URL, or a URL that depends on the host name)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Use the tasks of a JSON file instead of the API. Changes are not saved
    #[arg(long, global = true)]
    offline: Option<PathBuf>,

    /// Display settings (JSON)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Counters and alerts
    Dashboard,

    /// List tasks
    List {
        /// all, pending, completed, overdue or upcoming
        #[arg(long, default_value = "all")]
        filter: TaskFilter,

        /// Sort by due date instead of the store order
        #[arg(long)]
        by_due: bool,
    },

    /// Show a month calendar
    Calendar {
        /// YYYY-MM (defaults to the current month)
        #[arg(long)]
        month: Option<String>,
    },

    /// Show the tasks of a day
    Day {
        /// YYYY-MM-DD
        date: NaiveDate,
    },

    /// Create a task
    Add {
        title: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// HH:MM
        #[arg(long, default_value = taskgrid::form::DEFAULT_DUE_TIME)]
        time: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "MEDIUM")]
        priority: Priority,
    },

    /// Mark a task as completed, or as pending again
    Toggle {
        id: TaskId,
    },

    /// Delete a task
    Delete {
        id: TaskId,
    },
}


#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(url) = &cli.api_url {
        match API_BASE_URL.lock() {
            Ok(mut base_url) => *base_url = url.clone(),
            Err(_) => log::warn!("Unable to override the API URL"),
        }
    }

    let settings = match &cli.settings {
        None => ViewSettings::default(),
        Some(path) => ViewSettings::from_file(path)?,
    };

    match &cli.offline {
        Some(path) => {
            let file = std::fs::File::open(path)
                .map_err(|err| format!("Unable to open file {:?}: {}", path, err))?;
            let tasks: Vec<Task> = serde_json::from_reader(file)?;
            log::info!("Using {} task(s) from {:?}", tasks.len(), path);
            run(Workspace::new(MemoryStore::with_tasks(tasks)), cli.command, &settings).await
        },
        None => {
            let client = Client::from_config()?;
            run(Workspace::new(client), cli.command, &settings).await
        },
    }
}

async fn run<S: TaskStore>(workspace: Workspace<S>, command: Commands, settings: &ViewSettings) -> Result<(), Box<dyn Error>> {
    workspace.reload().await?;
    let now: NaiveDateTime = Local::now().naive_local();

    match command {
        Commands::Dashboard => {
            let stats = workspace.with_tasks(|tasks| TaskStats::compute(tasks, now, settings.horizon()));
            print!("{}", views::dashboard::render(&stats, &settings.palette));
        },

        Commands::List { filter, by_due } => {
            let mut tasks = workspace.tasks();
            if by_due {
                tasks.sort_by(comparison::compare_by_due);
            }
            let rows = views::task_list::rows(&tasks, filter, now, settings.horizon());
            print!("{}", views::task_list::render(&rows, filter));
        },

        Commands::Calendar { month } => {
            let reference = match month {
                None => now.date(),
                Some(month) => parse_month(&month)?.first_day(),
            };
            let text = workspace.with_tasks(|tasks| {
                let grid = MonthGrid::from_tasks(reference, tasks, settings.week_start);
                views::calendar_view::render(&grid, now, settings)
            });
            print!("{}", text);
        },

        Commands::Day { date } => {
            let text = workspace.with_tasks(|tasks| DateModal::open(date, tasks).render(now));
            print!("{}", text);
        },

        Commands::Add { title, date, time, description, priority } => {
            let draft = TaskDraft { title, description, due_date: date, due_time: time, priority };
            let created = workspace.create(&draft).await?;
            println!("Created:");
            taskgrid::utils::print_task(&created);
            if bucketing::is_overdue(&created, now) {
                log::warn!("Task {} is already overdue", created.id());
            }
        },

        Commands::Toggle { id } => {
            let toggled = workspace.toggle_completion(&id).await?;
            taskgrid::utils::print_task(&toggled);
        },

        Commands::Delete { id } => {
            workspace.delete(&id).await?;
            println!("Deleted task {}", id);
        },
    }

    for notice in workspace.notices() {
        log::warn!("{}", notice.message());
    }
    Ok(())
}

/// Parse `YYYY-MM`
fn parse_month(text: &str) -> Result<MonthCursor, Box<dyn Error>> {
    let (year, month) = text.split_once('-')
        .ok_or_else(|| format!("Invalid month {:?} (expected YYYY-MM)", text))?;
    let year: i32 = year.parse()?;
    let month: u32 = month.parse()?;
    MonthCursor::new(year, month)
        .ok_or_else(|| format!("Invalid month {:?} (expected YYYY-MM)", text).into())
}
