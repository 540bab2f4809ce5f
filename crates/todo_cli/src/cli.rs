use crate::shell;
use crate::text_renderer::TextRenderer;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::io::Stdout;
use std::path::PathBuf;
use todo_core::{
    ControllerConfig, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, TodoController,
    TodoId, TodoStore, UserIntent, DEFAULT_CAPACITY,
};

const APP_DIR_NAME: &str = "todo-list";
const DB_FILE_NAME: &str = "todos.sqlite3";

pub type CliController = TodoController<Box<dyn KeyValueStore>, TextRenderer<Stdout>>;

#[derive(Debug, Parser, Clone)]
#[command(name = "todo", version, about = "Small persisted task list with inline editing")]
pub struct Cli {
    /// SQLite database file holding the task list
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Keep tasks in memory only; nothing is saved
    #[arg(long, conflicts_with = "db")]
    pub memory: bool,

    /// Maximum number of tasks
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Log level: trace, debug, info, warn or error
    #[arg(long)]
    pub log_level: Option<String>,

    /// Absolute directory for log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print all tasks
    List,
    /// Add a task
    Add { text: String },
    /// Flip a task between open and done
    Toggle { id: TodoId },
    /// Replace a task's text
    Edit { id: TodoId, text: String },
    /// Remove a task
    Delete { id: TodoId },
    /// Remove all completed tasks
    Clean,
    /// Interactive session (default)
    Shell,
}

pub fn run(args: Cli) -> Result<()> {
    if args.capacity == 0 {
        bail!("--capacity must be at least 1");
    }

    start_logging(&args);

    let storage = open_storage(&args)?;
    let store = TodoStore::open(storage);
    let renderer = TextRenderer::new(std::io::stdout());
    let mut controller = TodoController::new(
        store,
        renderer,
        ControllerConfig::with_capacity(args.capacity),
    );

    match args.command.clone().unwrap_or(Command::Shell) {
        Command::Shell => shell::run_shell(&mut controller, std::io::stdin().lock()),
        command => {
            run_once(&mut controller, command);
            Ok(())
        }
    }
}

/// Applies one command silently, then prints the resulting list.
fn run_once(controller: &mut CliController, command: Command) {
    controller.renderer_mut().set_muted(true);
    let intents = match command {
        Command::List | Command::Shell => Vec::new(),
        Command::Add { text } => vec![UserIntent::SubmitNew(text)],
        Command::Toggle { id } => vec![UserIntent::Toggle(id)],
        Command::Edit { id, text } => {
            vec![UserIntent::StartEdit(id), UserIntent::CommitEdit(id, text)]
        }
        Command::Delete { id } => vec![UserIntent::Delete(id)],
        Command::Clean => vec![UserIntent::CleanCompleted],
    };
    for intent in intents {
        controller.handle(intent);
    }
    controller.renderer_mut().set_muted(false);
    controller.mount();
}

fn open_storage(args: &Cli) -> Result<Box<dyn KeyValueStore>> {
    if args.memory {
        info!("event=storage_open module=cli status=ok mode=memory");
        return Ok(Box::new(MemoryKeyValueStore::new()));
    }

    let path = match &args.db {
        Some(path) => path.clone(),
        None => default_app_dir()?.join(DB_FILE_NAME),
    };
    let storage = SqliteKeyValueStore::open(&path)
        .with_context(|| format!("failed to open task database {}", path.display()))?;
    info!(
        "event=storage_open module=cli status=ok mode=file path={}",
        path.display()
    );
    Ok(Box::new(storage))
}

fn start_logging(args: &Cli) {
    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| todo_core::default_log_level().to_string());
    let log_dir = match args.log_dir.clone() {
        Some(dir) => dir,
        None => match default_app_dir() {
            Ok(dir) => dir.join("logs"),
            Err(err) => {
                eprintln!("logging disabled: {err:#}");
                return;
            }
        },
    };

    if let Err(err) = todo_core::init_logging(&level, &log_dir) {
        eprintln!("logging disabled: {err}");
        return;
    }
    info!(
        "event=cli_start module=cli status=ok capacity={} storage={}",
        args.capacity,
        if args.memory { "memory" } else { "file" }
    );
}

fn default_app_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("could not determine a data directory; pass --db")?;
    Ok(base.join(APP_DIR_NAME))
}
