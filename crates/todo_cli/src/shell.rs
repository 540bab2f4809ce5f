//! Interactive line-based session.
//!
//! Each line maps to exactly one user intent; the controller's renderer
//! prints the effect.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use todo_core::{KeyValueStore, Renderer, TodoController, TodoId, UserIntent};

const HELP: &str = "\
commands:
  add <text>        add a task
  toggle <id>       mark done / not done
  edit <id>         start editing a task
  save <id> <text>  save the edited text
  cancel <id>       discard the edit
  delete <id>       remove a task
  clean             remove completed tasks
  list              show all tasks
  help              show this help
  quit              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Intent(UserIntent),
    List,
    Help,
    Quit,
    Blank,
}

pub fn run_shell<S, R>(
    controller: &mut TodoController<S, R>,
    input: impl BufRead,
) -> Result<()>
where
    S: KeyValueStore,
    R: Renderer,
{
    controller.mount();
    prompt()?;

    for line in input.lines() {
        let line = line.context("failed to read command")?;
        match parse_line(&line) {
            Ok(ShellCommand::Intent(intent)) => {
                controller.handle(intent);
            }
            Ok(ShellCommand::List) => controller.mount(),
            Ok(ShellCommand::Help) => println!("{HELP}"),
            Ok(ShellCommand::Quit) => return Ok(()),
            Ok(ShellCommand::Blank) => {}
            Err(message) => eprintln!("{message} (type `help`)"),
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> Result<()> {
    let mut out = std::io::stdout();
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// Parses one input line into a shell command.
pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim_start();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (line.trim_end(), ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => ShellCommand::Blank,
        "add" => ShellCommand::Intent(UserIntent::SubmitNew(rest.trim().to_string())),
        "toggle" => ShellCommand::Intent(UserIntent::Toggle(parse_id(rest)?)),
        "edit" => ShellCommand::Intent(UserIntent::StartEdit(parse_id(rest)?)),
        "save" => {
            let rest = rest.trim_start();
            let (id, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            ShellCommand::Intent(UserIntent::CommitEdit(parse_id(id)?, text.trim().to_string()))
        }
        "cancel" => ShellCommand::Intent(UserIntent::CancelEdit(parse_id(rest)?)),
        "delete" | "rm" => ShellCommand::Intent(UserIntent::Delete(parse_id(rest)?)),
        "clean" => ShellCommand::Intent(UserIntent::CleanCompleted),
        "list" | "ls" => ShellCommand::List,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command `{other}`")),
    };
    Ok(command)
}

fn parse_id(raw: &str) -> Result<TodoId, String> {
    raw.parse::<TodoId>()
        .map_err(|_| format!("expected a task id, got `{}`", raw.trim()))
}
