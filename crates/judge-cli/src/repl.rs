//! Interactive screening loop
//!
//! Narrative generation runs on a spawned clone of the session so the prompt
//! stays usable; selecting another company while it runs makes the result
//! stale and it is discarded silently.

use crate::commands::{Command, SelectTarget};
use crate::render;
use anyhow::Result;
use judge_stock::{Company, Language, Outcome, ScreeningSession};
use std::io::{self, BufRead, Write};
use tracing::debug;

pub struct Repl {
    session: ScreeningSession,
    language: Language,
    last_search: Vec<Company>,
}

impl Repl {
    pub fn new(session: ScreeningSession, language: Language) -> Self {
        Self {
            session,
            language,
            last_search: Vec::new(),
        }
    }

    fn prompt(&self) -> String {
        match self.session.snapshot().selected {
            Some(company) => format!("judge [{}]> ", company.symbol),
            None => "judge> ".to_string(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("stock-judge screening REPL. Type /help for commands.");
        if !self.session.has_narrator() {
            println!("GEMINI_API_KEY is not set; /narrative is disabled.");
        }

        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            print!("{}", self.prompt());
            stdout.flush()?;

            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => {
                    println!();
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reading input: {e}");
                    continue;
                }
            }

            if input.trim().is_empty() {
                continue;
            }

            let command = match Command::parse(&input) {
                Ok(command) => command,
                Err(e) => {
                    eprintln!("{e}");
                    continue;
                }
            };

            if command == Command::Exit {
                break;
            }

            if let Err(e) = self.handle(command).await {
                eprintln!("Error: {e}\n");
            }
        }

        // Invalidate any narrative still running
        self.session.select(None);
        Ok(())
    }

    async fn handle(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Search { query } => {
                let companies = self.session.search(&query).await?;
                if companies.is_empty() {
                    println!("No matching companies.\n");
                } else {
                    println!("{}\n", render::companies_table(&companies));
                }
                self.last_search = companies;
            }
            Command::Select { target } => {
                let company = self.resolve(&target)?;
                println!("Selected {} ({})\n", company.name, company.symbol);
                self.session.select(Some(company));
            }
            Command::Deselect => {
                self.session.select(None);
            }
            Command::Evaluate => {
                if let Outcome::Current(result) = self.session.evaluate().await? {
                    println!("{}", render::evaluation_table(&result, &self.language));
                    println!("{}\n", render::verdict_line(&result));
                }
            }
            Command::Narrative => self.spawn_narrative()?,
            Command::Status => self.print_status(),
            Command::Help => println!("{}", Command::help_text()),
            Command::Exit => {}
        }
        Ok(())
    }

    fn resolve(&self, target: &SelectTarget) -> Result<Company> {
        let found = match target {
            SelectTarget::Index(index) => index
                .checked_sub(1)
                .and_then(|i| self.last_search.get(i)),
            SelectTarget::Symbol(symbol) => self.last_search.iter().find(|c| &c.symbol == symbol),
        };
        found
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Not in the last search results; run /search first"))
    }

    fn spawn_narrative(&self) -> Result<()> {
        if !self.session.has_narrator() {
            anyhow::bail!("Narrative generation is disabled");
        }
        if self.session.snapshot().result.is_none() {
            anyhow::bail!("Run /evaluate first");
        }

        let session = self.session.clone();
        let language = self.language.clone();
        println!("Generating narrative in the background...\n");

        tokio::spawn(async move {
            match session.generate_narrative().await {
                Ok(Outcome::Current(narrative)) => {
                    println!("\n{}\n", render::narrative_text(&narrative, &language));
                }
                Ok(Outcome::Stale) => debug!("Narrative superseded"),
                Err(e) => eprintln!("\nNarrative failed: {e}\n"),
            }
        });
        Ok(())
    }

    fn print_status(&self) {
        let state = self.session.snapshot();
        match &state.selected {
            Some(company) => println!("Selected: {} ({})", company.name, company.symbol),
            None => println!("Selected: -"),
        }
        if let Some(result) = &state.result {
            println!("Result:   {}", render::verdict_line(result));
        }
        if state.narrating {
            println!("Narrative: generating");
        } else if state.narrative.is_some() {
            println!("Narrative: ready");
        }
        if let Some(error) = &state.error {
            println!("Last error: {error}");
        }
        println!();
    }
}
