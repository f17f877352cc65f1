//! Command-line interface for stock-judge
//!
//! # Usage
//!
//! ```bash
//! export FMP_API_KEY=...
//! export GEMINI_API_KEY=...   # only needed for narratives
//!
//! judge search "coca cola"
//! judge evaluate KO --lang en --narrative
//! judge repl
//! ```

mod commands;
mod render;
mod repl;

use anyhow::bail;
use clap::{Parser, Subcommand};
use judge_llm::providers::{GeminiConfig, GeminiProvider};
use judge_stock::{FmpClient, Language, NarrativeGenerator, Outcome, ScreeningSession, StockConfig};
use judge_utils::{LogFormat, init_tracing_with};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "judge")]
#[command(about = "Screen US-listed stocks against seven fundamental criteria", long_about = None)]
struct Cli {
    /// Response language code (ja, en); defaults to RESPONSE_LANGUAGE or ja
    #[arg(short, long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search companies by name or symbol
    Search {
        query: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Evaluate one company by ticker symbol
    Evaluate {
        symbol: String,
        /// Also generate the AI narrative (needs GEMINI_API_KEY)
        #[arg(short, long)]
        narrative: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Interactive screening session
    Repl,
}

fn build_session(config: &StockConfig, require_narrator: bool) -> anyhow::Result<ScreeningSession> {
    config.validate()?;

    let source = FmpClient::from_config(config)?;
    let mut session =
        ScreeningSession::new(Arc::new(source)).with_language(config.response_language.clone());

    match config.gemini_api_key.as_deref() {
        Some(key) => {
            let gemini = GeminiConfig::new(key)
                .with_api_base(config.gemini_api_base.clone())
                .with_timeout(config.request_timeout.as_secs().max(1));
            let provider = GeminiProvider::with_config(gemini)?;
            let narrator = NarrativeGenerator::from_config(Arc::new(provider), config);
            session = session.with_narrator(narrator);
        }
        None if require_narrator => {
            config.require_gemini_key()?;
        }
        None => {}
    }

    Ok(session)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing_with(LogFormat::Pretty, "warn,judge_stock=info");

    let cli = Cli::parse();

    let mut config = StockConfig::default().with_env_api_keys();
    if let Some(code) = &cli.lang {
        config.response_language = Language::from_code(code);
    }
    let language = config.response_language.clone();

    match cli.command {
        Commands::Search { query, json } => {
            let session = build_session(&config, false)?;
            let companies = session.search(&query).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&companies)?);
            } else if companies.is_empty() {
                println!("No matching companies.");
            } else {
                println!("{}", render::companies_table(&companies));
            }
        }
        Commands::Evaluate {
            symbol,
            narrative,
            json,
        } => {
            let session = build_session(&config, narrative)?;
            let company = session.select_symbol(&symbol).await?;
            info!(symbol = %company.symbol, "Evaluating");

            let Outcome::Current(result) = session.evaluate().await? else {
                bail!("Evaluation was superseded");
            };
            let narrative = if narrative {
                session.generate_narrative().await?.into_current()
            } else {
                None
            };

            if json {
                let body = serde_json::json!({
                    "result": result,
                    "narrative": narrative,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{}", render::evaluation_table(&result, &language));
                println!("{}", render::verdict_line(&result));
                if let Some(narrative) = &narrative {
                    println!("\n{}", render::narrative_text(narrative, &language));
                }
            }
        }
        Commands::Repl => {
            let session = build_session(&config, false)?;
            repl::Repl::new(session, language).run().await?;
        }
    }

    Ok(())
}
