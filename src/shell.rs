use crate::errors::ShellError;
use crate::ledger::Ledger;
use crate::query::Query;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::{debug, trace};

const PROMPT: &str = "> ";

const HELP: &str = "Commands:
  list All         show the balance of every account
  list <account>   show the outgoing and incoming transactions of an account
  bye              exit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `list <target>` with the target already unquoted and joined.
    List(String),
    Bye,
    Help,
    Empty,

    /// A line that could not be understood, with the message to show.
    Invalid(String),
}

impl Command {
    /// Parses one line of input. Everything after `list` is the target, so
    /// `list Jon A` and `list "Jon A"` both name the account `Jon A`.
    pub fn parse(line: &str) -> Self {
        let tokens = match shell_words::split(line) {
            Ok(tokens) => tokens,
            Err(err) => return Command::Invalid(format!("Unable to parse command: {}", err)),
        };

        let (name, args) = match tokens.split_first() {
            Some(split) => split,
            None => return Command::Empty,
        };

        match name.as_str() {
            "list" if args.is_empty() => Command::Invalid(String::from("Usage: list <All|account>")),
            "list" => Command::List(args.join(" ")),
            "bye" => Command::Bye,
            "help" => Command::Help,
            _ => Command::Invalid(String::from("Requested command is not available")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Runs one command against the ledger, writing any output to `out`.
pub fn handle_line<W: Write>(
    ledger: &Ledger,
    line: &str,
    out: &mut W,
) -> Result<LoopControl, ShellError> {
    let command = Command::parse(line);
    trace!("dispatching {:?}", command);

    match command {
        Command::List(target) => {
            let result = ledger.answer(&Query::from_selector(&target));
            write!(out, "{}", result)?;
        }
        Command::Bye => return Ok(LoopControl::Exit),
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Empty => {}
        Command::Invalid(message) => writeln!(out, "{}", message)?,
    }

    Ok(LoopControl::Continue)
}

/// Reads commands from the terminal with line editing and history when stdin
/// is interactive, otherwise one command per line of stdin.
pub fn run(ledger: &Ledger) -> Result<(), ShellError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if io::stdin().is_terminal() {
        run_interactive(ledger, &mut out)
    } else {
        let stdin = io::stdin();
        run_script(ledger, stdin.lock(), &mut out)
    }
}

pub fn run_interactive<W: Write>(ledger: &Ledger, out: &mut W) -> Result<(), ShellError> {
    let mut editor = DefaultEditor::new()?;

    loop {
        out.flush()?;
        match editor.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    editor.add_history_entry(trimmed).ok();
                }
                if handle_line(ledger, trimmed, out)? == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                debug!("input closed, leaving the shell");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    writeln!(out, "Exited")?;
    Ok(())
}

/// Runs every command read from `input` until `bye` or end of input.
pub fn run_script<R: BufRead, W: Write>(
    ledger: &Ledger,
    input: R,
    out: &mut W,
) -> Result<(), ShellError> {
    for line in input.lines() {
        let line = line?;
        if handle_line(ledger, line.trim(), out)? == LoopControl::Exit {
            break;
        }
    }

    writeln!(out, "Exited")?;
    Ok(())
}
