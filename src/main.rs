use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use grader_cli::{
    display_banner, handle_input_with_history, print_breakdown, print_evaluation, print_help,
    print_history, print_score, print_suggestions, GradingBackend, HistoryStore, LocalBackend,
    RemoteGrader, DEFAULT_HISTORY_FILE,
};
use grader_core::{GradingConfig, PromptGrader, SuggestionsResponse, PERFECT_PROMPT_EXAMPLE};
use grader_server::ServerConfig;

#[derive(Parser)]
#[command(name = "pgrade")]
#[command(about = "Grade AI prompts and suggest improvements", long_about = None, version)]
struct Cli {
    /// JSON grading configuration (weights, thresholds, suggestion cap)
    #[arg(long, global = true, env = "PROMPT_GRADER_CONFIG")]
    config: Option<PathBuf>,

    /// Grade against a remote Prompt Grader API instead of in process
    #[arg(long, global = true, env = "PROMPT_GRADER_API_URL")]
    server: Option<String>,

    /// Where evaluated prompts are recorded
    #[arg(long, global = true, default_value = DEFAULT_HISTORY_FILE)]
    history_file: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the score of a prompt
    Grade {
        /// Prompt text; read from stdin when omitted or `-`
        prompt: Option<String>,
        #[arg(long)]
        json: bool,
        /// Also show the per-criterion sub-scores
        #[arg(long)]
        breakdown: bool,
    },
    /// List improvement suggestions
    Suggest {
        prompt: Option<String>,
        #[arg(long)]
        json: bool,
        /// Maximum number of suggestions
        #[arg(long)]
        max: Option<usize>,
    },
    /// Score, label, suggestions and highlights; recorded in the history
    Check {
        prompt: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show or clear previously checked prompts
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        clear: bool,
    },
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = match cli.command {
        Some(Commands::Serve { .. }) => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Some(Commands::Serve { ref host, port }) => {
            let mut config = ServerConfig::from_env()?;
            if let Some(path) = &cli.config {
                config.grading = load_grading_config(path)?;
            }
            if let Some(host) = host {
                config.host = host.clone();
            }
            if let Some(port) = port {
                config.port = port;
            }
            grader_server::run(config).await
        }
        Some(Commands::History { limit, clear }) => {
            let mut store = HistoryStore::new(&cli.history_file)?;
            if clear {
                store.clear().await?;
                println!("{} History cleared", "🧹".green());
            } else {
                print_history(store.latest(limit));
            }
            Ok(())
        }
        Some(Commands::Grade {
            ref prompt,
            json,
            breakdown,
        }) => {
            let backend = build_backend(&cli)?;
            let prompt = read_prompt(prompt.as_deref())?;
            if breakdown {
                let breakdown = backend.breakdown(&prompt).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&breakdown)?);
                } else {
                    print_score(breakdown.score);
                    print_breakdown(&breakdown);
                }
            } else {
                let score = backend.grade(&prompt).await?;
                if json {
                    println!("{}", serde_json::json!({ "score": score }));
                } else {
                    print_score(score);
                }
            }
            Ok(())
        }
        Some(Commands::Suggest {
            ref prompt,
            json,
            max,
        }) => {
            let backend = build_backend(&cli)?;
            let prompt = read_prompt(prompt.as_deref())?;
            let suggestions = backend.suggest(&prompt, max).await?;
            if json {
                let response = SuggestionsResponse { suggestions };
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else if suggestions.is_empty() {
                println!("{} No suggestions", "✅".green());
            } else {
                print_suggestions(&suggestions);
            }
            Ok(())
        }
        Some(Commands::Check { ref prompt, json }) => {
            let backend = build_backend(&cli)?;
            let prompt = read_prompt(prompt.as_deref())?;
            let evaluation = backend.evaluate(&prompt).await?;

            let mut store = HistoryStore::new(&cli.history_file)?;
            store.add(&prompt, &evaluation).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&evaluation)?);
            } else {
                print_evaluation(&prompt, &evaluation);
            }
            Ok(())
        }
        None => {
            let backend = build_backend(&cli)?;
            interactive(backend.as_ref(), &cli.history_file).await
        }
    }
}

async fn interactive(backend: &dyn GradingBackend, history_file: &Path) -> Result<()> {
    display_banner(&backend.name());

    let mut store = HistoryStore::new(history_file)?;
    let mut input_history: Vec<String> = store
        .entries()
        .iter()
        .rev()
        .map(|entry| entry.prompt.clone())
        .collect();

    loop {
        let input = handle_input_with_history(&mut input_history).await?;
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "exit" | "quit" => {
                println!("{}", "👋 Goodbye!".green());
                break;
            }
            "help" => print_help(),
            "history" => print_history(store.latest(10)),
            "clear" => {
                store.clear().await?;
                println!("{} History cleared", "🧹".green());
            }
            "example" => {
                println!("{}", PERFECT_PROMPT_EXAMPLE.dimmed());
                let evaluation = backend.evaluate(PERFECT_PROMPT_EXAMPLE).await?;
                print_evaluation(PERFECT_PROMPT_EXAMPLE, &evaluation);
            }
            _ => match backend.evaluate(&input).await {
                Ok(evaluation) => {
                    print_evaluation(&input, &evaluation);
                    if let Err(e) = store.add(&input, &evaluation).await {
                        warn!(error = %e, "failed to record history");
                    }
                }
                Err(e) => println!("{} {}", "❌".red(), e),
            },
        }
    }

    Ok(())
}

fn build_backend(cli: &Cli) -> Result<Box<dyn GradingBackend>> {
    if let Some(url) = &cli.server {
        info!(url = %url, "grading against remote API");
        return Ok(Box::new(RemoteGrader::new(url)?));
    }

    let config = match &cli.config {
        Some(path) => load_grading_config(path)?,
        None => GradingConfig::default(),
    };
    Ok(Box::new(LocalBackend::new(PromptGrader::new(config)?)))
}

fn load_grading_config(path: &Path) -> Result<GradingConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read grading config {}", path.display()))?;
    GradingConfig::from_json_str(&json)
        .with_context(|| format!("invalid grading config {}", path.display()))
}

/// The prompt argument, or stdin when it is absent or `-`
fn read_prompt(arg: Option<&str>) -> Result<String> {
    match arg {
        Some(prompt) if prompt != "-" => Ok(prompt.to_string()),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read prompt from stdin")?;
            Ok(buffer.trim_end_matches(['\n', '\r']).to_string())
        }
    }
}
