mod command;
mod helper;
mod render;
mod repl;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use parley_application::{AdvisoryService, SessionFactory};
use parley_core::agent::ConversationAgent;
use parley_core::config::ParleyConfig;
use parley_interaction::{GeminiApiAgent, GeminiConversationAgent};

use command::Command;
use helper::CliHelper;
use repl::{Flow, Repl};

/// Practise difficult conversations against AI personas.
#[derive(Parser, Debug)]
#[command(name = "parley", version, about)]
struct Args {
    /// Config file (default: ~/.config/parley/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Gemini model to use instead of the configured one
    #[arg(long)]
    model: Option<String>,

    /// Start this scenario right away
    #[arg(long)]
    scenario: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

/// Logs go to stderr so they never interleave with the conversation.
fn init_tracing(json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,parley=info"));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    // ===== Backend Initialization =====
    let config = match &args.config {
        Some(path) => ParleyConfig::load_from(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ParleyConfig::load()?,
    };
    let mut gemini = GeminiApiAgent::from_config(&config)?;
    if let Some(model) = args.model {
        gemini = gemini.with_model(model);
    }
    tracing::debug!(model = gemini.model(), "using Gemini model");

    let agent: Arc<dyn ConversationAgent> = Arc::new(GeminiConversationAgent::new(gemini));
    let factory = SessionFactory::new(Arc::clone(&agent), &config.session);
    let advisory = AdvisoryService::new(agent, config.session.request_timeout());
    let mut repl = Repl::new(factory, advisory);

    // ===== REPL Setup =====
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new(repl.scenario_ids())));
    render::banner();

    if let Some(id) = args.scenario {
        if let Err(err) = repl.start(&id).await {
            render::error(&err.to_string());
        }
    }

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                if let Flow::Exit = repl.handle(Command::parse(&line)).await {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if let Some(helper) = rl.helper_mut() {
                    helper.set_scenario_ids(repl.scenario_ids());
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}
