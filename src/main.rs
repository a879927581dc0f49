//! `netops` — terminal client for the network operations console API.
//!
//! Uses the same session layer as the browser build: the token is kept in a
//! session file (the native counterpart of `localStorage`), attached to every
//! call, and dropped when the server answers `401`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use netops_session::net::HttpTransport;
use netops_session::{
    ApiRequest, ClientError, ConsoleView, Credentials, FileStore, GuardDecision, HistoryNavigator, Navigator, Notice,
    NoticeLevel, Notifier, RouteTable, SessionConfig, SessionConsole, StoreError,
};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid query pair `{0}`; expected key=value")]
    InvalidQuery(String),
}

#[derive(Parser, Debug)]
#[command(name = "netops", about = "Network operations console API client")]
struct Cli {
    #[arg(long, env = "NETOPS_API_BASE_URL", default_value = "http://127.0.0.1/api")]
    base_url: String,

    #[arg(long, env = "NETOPS_SESSION_FILE", default_value = ".netops-session.json")]
    session_file: PathBuf,

    /// View the command runs from; becomes the return destination when the
    /// session turns out to be expired.
    #[arg(long, env = "NETOPS_VIEW", default_value = "/device")]
    view: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "NETOPS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Drop the stored session.
    Logout,
    /// Show who the stored session belongs to.
    Whoami,
    /// GET an API path.
    Get {
        path: String,
        #[arg(long = "query", value_parser = parse_pair)]
        query: Vec<(String, String)>,
    },
    /// POST a JSON body to an API path.
    Post {
        path: String,
        #[arg(long)]
        data: String,
    },
    /// Check whether a console view would open with the stored session.
    Open { path: String },
}

/// Prints notices to stderr so they do not mix with JSON output.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notice: Notice) {
        let label = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        eprintln!("{label}: {}", notice.message);
    }
}

type Console = SessionConsole<HttpTransport, FileStore, HistoryNavigator, StderrNotifier>;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("warning: ignoring unreadable .env file: {e}");
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SessionConfig::from_env().with_api_base_url(cli.base_url.clone());
    let console: Console = SessionConsole::new(
        config.clone(),
        HttpTransport::new(&config),
        FileStore::open(&cli.session_file),
        RouteTable::<ConsoleView>::standard(&config),
        HistoryNavigator::starting_at(cli.view.clone()),
        StderrNotifier,
    );

    let result = run(&console, cli.command).await;
    report_location(&console, &cli.view);
    result
}

async fn run(console: &Console, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { username, password } => {
            let session = console.login(&Credentials::new(username, password)).await?;
            println!(
                "signed in as {} ({})",
                session.username().unwrap_or("-"),
                session.role().unwrap_or("-")
            );
            Ok(())
        }
        Command::Logout => {
            console.sign_out()?;
            println!("signed out");
            Ok(())
        }
        Command::Whoami => {
            let session = console.session();
            if session.is_authenticated() {
                println!(
                    "{} ({})",
                    session.username().unwrap_or("unknown user"),
                    session.role().unwrap_or("no role")
                );
            } else {
                println!("not signed in");
            }
            Ok(())
        }
        Command::Get { path, query } => {
            let request = query.into_iter().fold(ApiRequest::get(path), |req, (k, v)| req.query(k, v));
            let response = console.request(request).await?;
            print_body(&response.body)
        }
        Command::Post { path, data } => {
            let body = serde_json::from_str::<Value>(&data)?;
            let response = console.request(ApiRequest::post(path).json(&body)?).await?;
            print_body(&response.body)
        }
        Command::Open { path } => {
            match console.navigate(&path) {
                GuardDecision::Allow { path } => println!("allowed: {path}"),
                GuardDecision::Deny(redirect) => println!("denied: sign in first ({})", redirect.href()),
            }
            Ok(())
        }
    }
}

/// Tell the user when a command moved them to another view.
fn report_location(console: &Console, started_at: &str) {
    if let Some(current) = console.navigator().current_path() {
        if current != started_at && console.navigator().history().len() > 1 {
            eprintln!("now at {current}");
        }
    }
}

fn print_body(body: &str) -> Result<(), CliError> {
    if body.trim().is_empty() {
        return Ok(());
    }
    match serde_json::from_str::<Value>(body) {
        Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Err(_) => println!("{body}"),
    }
    Ok(())
}

fn parse_pair(raw: &str) -> Result<(String, String), CliError> {
    raw.split_once('=')
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .ok_or_else(|| CliError::InvalidQuery(raw.to_owned()))
}
