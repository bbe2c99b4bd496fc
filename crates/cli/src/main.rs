mod config_commands;
mod console;
mod plugin_commands;

use std::path::{Path, PathBuf};

use {
    clap::{Parser, Subcommand},
    superbot_common::Message,
    superbot_config::BotConfig,
    superbot_plugins::PluginCatalog,
    tracing::{info, warn},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "superbot", about = "superbot: message-driven command bot")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file to use instead of the standard search locations.
    #[arg(long, global = true, env = "SUPERBOT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable pipe chaining regardless of the config value.
    #[arg(long, global = true, default_value_t = false)]
    pipe: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve messages from stdin (default when no subcommand is provided).
    Run {
        /// Read and write JSON message records instead of plain text.
        #[arg(long)]
        json: bool,
    },
    /// Handle a single message and exit.
    Send {
        /// Message text.
        text: String,
    },
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
    /// Plugin management.
    Plugins {
        #[command(subcommand)]
        action: plugin_commands::PluginAction,
    },
}

/// Initialise tracing. Logs go to stderr so stdout carries only replies.
fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Load the explicit config file, or discover one.
pub(crate) fn load_config(explicit: Option<&Path>) -> anyhow::Result<BotConfig> {
    match explicit {
        Some(path) => superbot_config::load_config(path),
        None => Ok(superbot_config::discover_and_load()),
    }
}

fn start_bot(cli: &Cli) -> anyhow::Result<superbot_dispatch::Bot> {
    let mut config = load_config(cli.config.as_deref())?;
    if cli.pipe {
        config.enable_pipe = true;
    }

    let (bot, report) = superbot_plugins::start(&config, &PluginCatalog::with_bundled());
    for skipped in &report.skipped {
        warn!(plugin = %skipped.name, reason = %skipped.reason, "plugin not loaded");
    }
    Ok(bot)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "superbot starting");

    match &cli.command {
        None => console::run(&start_bot(&cli)?, false).await,
        Some(Commands::Run { json }) => console::run(&start_bot(&cli)?, *json).await,
        Some(Commands::Send { text }) => {
            let bot = start_bot(&cli)?;
            let result = bot.receive(Message::new(text.as_str())).await;
            let failed = result.is_err();
            println!("{}", console::render(result, false)?);
            if failed {
                std::process::exit(1);
            }
            Ok(())
        },
        Some(Commands::Config { action }) => {
            config_commands::handle_config(*action, cli.config.as_deref())
        },
        Some(Commands::Plugins { action }) => {
            plugin_commands::handle_plugins(*action, cli.config.as_deref())
        },
    }
}
