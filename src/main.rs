//! Courtside — entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Parse CLI flags
//!   3. Load config
//!   4. Resolve effective log level (CLI `-v` flags > env > config)
//!   5. Init logger once
//!   6. Load the roster and build the LLM provider
//!   7. Build the assistant and session store
//!   8. Spawn Ctrl-C → shutdown signal watcher
//!   9. Run comms (web front, or console with `-i`) until shutdown
//!  10. Cancel token and exit

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use courtside::subsystems::agents::Assistant;
use courtside::subsystems::agents::roster::Roster;
use courtside::subsystems::comms::{self, Mode};
use courtside::subsystems::memory::SessionStore;
use courtside::{config, error, llm, logger};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), error::AppError> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();

    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    let force_cli_level = args.log_level.is_some();

    logger::init(effective_log_level, force_cli_level, config.log_file.as_deref())?;

    info!(
        bot_name = %config.bot_name,
        configured_log_level = %config.log_level,
        effective_log_level = %effective_log_level,
        interactive = %args.interactive,
        "config loaded"
    );

    let roster = Roster::load(&config.roster.path);
    if roster.is_empty() {
        warn!(path = %config.roster.path.display(), "roster is empty; player questions will fall back");
    }

    let provider = llm::providers::build(&config.llm, config.llm_api_key.clone())
        .map_err(|e| error::AppError::Config(e.to_string()))?;
    if config.llm_api_key.is_none() && provider.name() != "dummy" {
        warn!("LLM_API_KEY not set; llm requests will fail and degrade");
    }

    let assistant = Arc::new(Assistant::new(roster, provider));
    let sessions = Arc::new(SessionStore::new(&config.memory)?);

    print_startup_summary(&config, &assistant, args.interactive);

    // Shared shutdown token. Ctrl-C cancels it and every channel watches it.
    let shutdown = CancellationToken::new();

    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    let mode = if args.interactive { Mode::Console } else { Mode::Http };
    let comms = comms::start(&config, assistant, sessions, mode, shutdown.clone());
    let result = comms.join().await;

    // If comms exited on its own (quit / EOF), still signal everything to stop.
    shutdown.cancel();

    if args.interactive {
        println!("\nBye :) ...");
    }

    result
}

fn print_startup_summary(config: &config::Config, assistant: &Assistant, interactive: bool) {
    let roster = assistant.roster();
    let roster_line = match roster.load_error() {
        Some(err) => format!("empty ({err})"),
        None => format!("{} players from {}", roster.len(), config.roster.path.display()),
    };
    let front_line = if interactive {
        "console (type 'quit' to exit)".to_string()
    } else {
        format!("http://{}", config.comms.http.bind)
    };
    let llm_line = format!(
        "provider={} model={} temp={} max_tokens={} timeout={}s",
        config.llm.provider,
        config.llm.openai.model,
        config.llm.openai.temperature,
        config.llm.openai.max_tokens,
        config.llm.openai.timeout_seconds
    );

    println!("┌─ {} ─ pid {}", config.bot_name, std::process::id());
    println!("│ front   : {front_line}");
    println!("│ roster  : {roster_line}");
    println!("│ llm     : {llm_line}");
    println!("│ chat log: {}", config.memory.chat_log.display());
    println!("└─");
}

struct CliArgs {
    log_level: Option<&'static str>,
    interactive: bool,
    config_path: Option<String>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut interactive = false;
    let mut config_path = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: courtside [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -i, --interactive          Chat on the console instead of serving HTTP");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                std::process::exit(0);
            }
            "-i" | "--interactive" => interactive = true,
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => {}
        }
    }

    //   -v      → warn
    //   -vv     → info
    //   -vvv    → debug  (routing decisions, roster lookups)
    //   -vvvv+  → trace
    let log_level = match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    };

    CliArgs { log_level, interactive, config_path }
}
