pub mod commands;

use std::io::{self, BufRead, Write};
use thiserror::Error;

use crate::cli::commands::Commands;
use crate::config::{AppConfig, ConfigurationError};
use crate::llm::{LlmError, ProviderFactory};
use crate::pipeline::{PipelineTrace, ResponseOrchestrator};
use crate::prompts;
use crate::session::ChatSession;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigurationError),
    #[error("Failed to initialize LLM provider: {0}")]
    Provider(#[from] LlmError),
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub fn build_orchestrator(config: &AppConfig) -> Result<ResponseOrchestrator, LlmError> {
    let provider = ProviderFactory::create_default(config)?;
    Ok(ResponseOrchestrator::new(provider, config.pipeline.clone()))
}

pub async fn run_cli(command: Commands, config_path: String) -> Result<(), CliError> {
    match command {
        Commands::Serve => {
            unreachable!("serve is handled by main before dispatching to the CLI")
        }
        Commands::Presets => {
            print_presets();
            Ok(())
        }
        Commands::Ask { prompt, steps } => {
            let config = AppConfig::load(&config_path)?;
            let orchestrator = build_orchestrator(&config)?;

            let outcome = orchestrator.run_turn(prompt.trim()).await;
            if steps {
                if let Some(trace) = &outcome.trace {
                    print_trace(trace);
                }
            }
            println!("{}", outcome.reply);
            Ok(())
        }
        Commands::Chat => {
            let config = AppConfig::load(&config_path)?;
            let orchestrator = build_orchestrator(&config)?;
            run_repl(&orchestrator).await
        }
    }
}

fn print_presets() {
    for (i, preset) in prompts::presets().iter().enumerate() {
        println!("{:>2}. {:<18} {}", i + 1, preset.label, preset.prompt);
    }
}

fn print_trace(trace: &PipelineTrace) {
    println!("=== Step 1: Primary Response ===");
    println!("{}\n", trace.primary_output);
    println!("=== Step 2: Senior Developer Review ===");
    println!("{}\n", trace.improved_output);
    println!("=== Step 3: Assumptions Analysis ===");
    println!("Technical:\n{}", trace.assumptions.technical_block());
    println!("Security:\n{}\n", trace.assumptions.security_block());
}

async fn run_repl(orchestrator: &ResponseOrchestrator) -> Result<(), CliError> {
    let mut session = ChatSession::new();

    println!("--- Solidity Copilot Terminal Chat ---");
    println!("Session: {}", session.id());
    println!("Mode: {:?}", orchestrator.mode());
    println!("Commands: /exit, /clear, /steps, /presets, /preset <n>");
    println!("--------------------------------------");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("\nUser> ");
        io::stdout().flush()?;

        let input = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let text = input.trim();

        if text.is_empty() {
            continue;
        }
        if text == "/exit" || text == "/quit" {
            break;
        }
        if text == "/clear" {
            session.clear();
            println!("Chat history cleared.");
            continue;
        }
        if text == "/presets" {
            print_presets();
            continue;
        }
        if text == "/steps" {
            match session.last_trace() {
                Some(trace) => print_trace(trace),
                None => println!("No step details for the last turn."),
            }
            continue;
        }

        let prompt = match text.strip_prefix("/preset ") {
            Some(n) => match n.trim().parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                Some(index) if index < prompts::presets().len() => {
                    let preset = prompts::presets()[index];
                    println!("{}", preset.prompt);
                    preset.prompt.to_string()
                }
                _ => {
                    println!("Unknown preset; see /presets.");
                    continue;
                }
            },
            None => text.to_string(),
        };

        println!("Thinking...");
        let outcome = orchestrator.run_turn(&prompt).await;
        println!("\nCopilot> {}", outcome.reply);
        session.record_turn(&prompt, outcome);
    }

    Ok(())
}
