//! Line-oriented front end over [`TasksStore`].
//!
//! Rows are addressed by their number in the most recently printed list, which is
//! translated back to the task's (description, timestamp) key before mutating.

use crate::tasks::types::{TaskKey, TaskView, EMPTY_LIST_PLACEHOLDER};
use crate::tasks::TasksStore;
use std::io::{self, BufRead, Write};
use thiserror::Error;

pub const APP_NAME: &str = "My To-Do List";

const HELP: &str = "\
Commands:
  list              show tasks
  add <text>        add a task
  done <n>          mark task n complete (or undo it)
  rm <n>            remove task n
  help              show this help
  quit              save and exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Add(String),
    Toggle(usize),
    Remove(usize),
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandParseError {
    #[error("Unknown command: {0}. Type 'help' for commands.")]
    Unknown(String),
    #[error("Expected a task number, got '{0}'")]
    BadIndex(String),
}

pub fn parse_command(line: &str) -> Result<Command, CommandParseError> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(word, rest)| (word, rest.trim()))
        .unwrap_or((line, ""));

    match word.to_lowercase().as_str() {
        "" | "list" | "ls" => Ok(Command::List),
        "add" => Ok(Command::Add(rest.to_string())),
        "done" | "undo" | "toggle" => parse_index(rest).map(Command::Toggle),
        "rm" | "remove" | "del" => parse_index(rest).map(Command::Remove),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(CommandParseError::Unknown(other.to_string())),
    }
}

fn parse_index(arg: &str) -> Result<usize, CommandParseError> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandParseError::BadIndex(arg.to_string())),
    }
}

pub fn render_row(number: usize, row: &TaskView) -> String {
    let mark = if row.done { "x" } else { " " };
    format!(
        "{:>3}. [{}] {}  ({}) [{}]",
        number, mark, row.description, row.added_label, row.action_label
    )
}

pub struct Shell {
    store: TasksStore,
    rows: Vec<TaskView>,
}

impl Shell {
    pub fn new(store: TasksStore) -> Self {
        let rows = store.display_list();
        Self { store, rows }
    }

    /// Runs until `quit` or end of input, then performs the shutdown flush.
    pub fn run<R: BufRead, W: Write>(mut self, input: R, output: &mut W) -> io::Result<()> {
        let result = self.session(input, output);
        self.store.shutdown();
        result
    }

    fn session<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> io::Result<()> {
        writeln!(output, "{}", APP_NAME)?;
        writeln!(output, "Type 'help' for commands.")?;
        self.print_list(output)?;

        for line in input.lines() {
            let command = match parse_command(&line?) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(output, "{}", e)?;
                    continue;
                }
            };

            match command {
                Command::Quit => break,
                Command::Help => writeln!(output, "{}", HELP)?,
                Command::List => {
                    self.rows = self.store.display_list();
                    self.print_list(output)?;
                }
                Command::Add(text) => {
                    let result = self.store.add(&text);
                    self.apply(result, output)?;
                }
                Command::Toggle(number) => {
                    if let Some(key) = self.key_for(number, output)? {
                        let result = self.store.toggle(&key);
                        self.apply(result, output)?;
                    }
                }
                Command::Remove(number) => {
                    if let Some(key) = self.key_for(number, output)? {
                        let result = self.store.remove(&key);
                        self.apply(result, output)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn key_for<W: Write>(&self, number: usize, output: &mut W) -> io::Result<Option<TaskKey>> {
        match self.rows.get(number - 1) {
            Some(row) => Ok(Some(row.key.clone())),
            None => {
                writeln!(output, "No task #{} in the list", number)?;
                Ok(None)
            }
        }
    }

    fn apply<W: Write>(
        &mut self,
        result: Result<Vec<TaskView>, crate::tasks::TaskError>,
        output: &mut W,
    ) -> io::Result<()> {
        match result {
            Ok(rows) => {
                self.rows = rows;
                self.print_list(output)
            }
            Err(e) => writeln!(output, "{}", e),
        }
    }

    fn print_list<W: Write>(&self, output: &mut W) -> io::Result<()> {
        if self.rows.is_empty() {
            return writeln!(output, "{}", EMPTY_LIST_PLACEHOLDER);
        }

        for (index, row) in self.rows.iter().enumerate() {
            writeln!(output, "{}", render_row(index + 1, row))?;
        }
        Ok(())
    }
}
