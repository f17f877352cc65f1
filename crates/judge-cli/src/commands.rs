//! Command parsing for the interactive screening REPL

use anyhow::{Result, bail};

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Search companies by name or symbol
    Search { query: String },
    /// Select a company from the last search, by list number or symbol
    Select { target: SelectTarget },
    /// Drop the current selection
    Deselect,
    /// Fetch metrics for the selection and score them
    Evaluate,
    /// Generate the AI narrative for the current result in the background
    Narrative,
    /// Show the session state
    Status,
    /// Show help
    Help,
    /// Exit the REPL
    Exit,
}

/// How a company is picked out of the last search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectTarget {
    /// 1-based position in the last result list
    Index(usize),
    /// Ticker symbol, upper-cased
    Symbol(String),
}

impl Command {
    /// Parse a command from user input
    ///
    /// Input without a leading `/` is treated as a search query.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            bail!("Empty input");
        }

        let Some(rest) = input.strip_prefix('/') else {
            return Ok(Command::Search {
                query: input.to_string(),
            });
        };

        let mut parts = rest.split_whitespace();
        let Some(cmd) = parts.next() else {
            bail!("Empty command");
        };
        let args: Vec<&str> = parts.collect();

        match cmd.to_lowercase().as_str() {
            "search" | "s" | "検索" => {
                if args.is_empty() {
                    bail!("Missing query for search command");
                }
                Ok(Command::Search {
                    query: args.join(" "),
                })
            }
            "select" | "sel" | "選択" => {
                let Some(arg) = args.first() else {
                    bail!("Missing number or symbol for select command");
                };
                let target = match arg.parse::<usize>() {
                    Ok(0) => bail!("List numbers start at 1"),
                    Ok(index) => SelectTarget::Index(index),
                    Err(_) => SelectTarget::Symbol(arg.to_uppercase()),
                };
                Ok(Command::Select { target })
            }
            "deselect" | "clear" => Ok(Command::Deselect),
            "evaluate" | "eval" | "e" | "判定" => Ok(Command::Evaluate),
            "narrative" | "ai" | "n" | "解説" => Ok(Command::Narrative),
            "status" | "st" => Ok(Command::Status),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            other => bail!("Unknown command: {other}"),
        }
    }

    pub fn help_text() -> &'static str {
        r"
Commands:
  <text>                 Search companies (same as /search)
  /search <query>        Search companies by name or symbol
  /select <n|symbol>     Select a company from the last search
  /deselect              Clear the selection
  /evaluate              Fetch metrics and score the selection
  /narrative             Generate the AI commentary in the background
  /status                Show the current selection and result
  /help                  Show this help
  /exit                  Exit
"
    }
}
