mod app_state;
mod tui;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pitbox_models::{ConnectivityState, MessageText};
use pitbox_sdk::{ClientConfig, ConnectivityMonitor, MessageDispatcher, PitBoxClient, SessionController};
use tokio::sync::mpsc;
use tracing::info;

use crate::app_state::{AppController, ChatApp};
use crate::tui::EventHandler;

#[derive(Parser, Debug)]
#[command(name = "pitbox")]
#[command(about = "Pit Box AI terminal client")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Backend base URL (defaults to $PITBOX_API_URL or http://localhost:8765)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Upper bound on the startup health probe, in seconds
    #[arg(long, global = true)]
    pub health_timeout_secs: Option<u64>,

    /// Write logs to this file (the chat screen owns the terminal)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat screen (default)
    Chat,
    /// Send one message and print the reply
    Ask {
        /// The question for the pit wall
        message: MessageText,
    },
    /// Probe the backend once and report its status
    Health,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &self.api_url {
            config = ClientConfig::new(url.as_str()).with_health_timeout(config.health_timeout);
        }
        if let Some(secs) = self.health_timeout_secs {
            config = config.with_health_timeout(Duration::from_secs(secs));
        }
        config
    }
}

fn init_logging(log_file: Option<&PathBuf>, interactive: bool) -> anyhow::Result<()> {
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        // Logging to the terminal would corrupt the chat screen.
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let command = cli.command.as_ref().unwrap_or(&Commands::Chat);
    init_logging(cli.log_file.as_ref(), matches!(command, Commands::Chat))?;

    let client = PitBoxClient::new(&cli.client_config())?;

    match command {
        Commands::Chat => run_chat(client).await,
        Commands::Ask { message } => run_ask(client, message).await,
        Commands::Health => run_health(client).await,
    }
}

async fn run_chat(client: PitBoxClient) -> anyhow::Result<ExitCode> {
    info!(backend = %client.base_url(), "chat screen starting");
    let monitor = Arc::new(ConnectivityMonitor::new(client.clone()));
    let session = SessionController::new(MessageDispatcher::new(client));

    let mut events = EventHandler::new(250);
    events.follow_session(session.subscribe());
    events.follow_connectivity(monitor.subscribe());

    let (intent_tx, intent_rx) = mpsc::unbounded_channel();
    let mut app = ChatApp::new(session.snapshot(), intent_tx);
    tokio::spawn(session.run(intent_rx));

    let probe = Arc::clone(&monitor);
    tokio::spawn(async move {
        probe.check().await;
    });

    let mut terminal = tui::init()?;
    let outcome = async {
        while !app.should_quit() {
            terminal.draw(|f| app.render(f))?;
            match events.next_async().await {
                Some(action) => app.update(action),
                None => break,
            }
        }
        anyhow::Ok(())
    }
    .await;
    tui::restore()?;
    outcome?;

    info!("chat screen closed");

    Ok(ExitCode::SUCCESS)
}

async fn run_ask(client: PitBoxClient, message: &MessageText) -> anyhow::Result<ExitCode> {
    let mut session = SessionController::new(MessageDispatcher::new(client));
    session.start();

    let reply = session.send(message.as_str()).await?;
    if reply.failed {
        eprintln!("{}", reply.content);
        return Ok(ExitCode::FAILURE);
    }
    println!("{}", reply.content);
    Ok(ExitCode::SUCCESS)
}

async fn run_health(client: PitBoxClient) -> anyhow::Result<ExitCode> {
    let base_url = client.base_url().to_string();
    let state = ConnectivityMonitor::new(client).check().await;
    println!("{base_url}: {state}");

    Ok(match state {
        ConnectivityState::Online => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_chat() {
        let cli = Cli::try_parse_from(["pitbox"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn ask_rejects_blank_message() {
        assert!(Cli::try_parse_from(["pitbox", "ask", "   "]).is_err());
        let cli = Cli::try_parse_from(["pitbox", "ask", "who is leading?"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Ask { ref message }) if message.as_str() == "who is leading?"
        ));
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "pitbox",
            "--api-url",
            "http://pitwall:9000/",
            "--health-timeout-secs",
            "2",
            "health",
        ])
        .unwrap();
        let config = cli.client_config();
        assert_eq!(config.base_url, "http://pitwall:9000");
        assert_eq!(config.health_timeout, Duration::from_secs(2));
    }
}
