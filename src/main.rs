
use clap::{Parser, Subcommand};
use serde_json::Value;

use sindic_ui::app::SindicUi;
use sindic_ui::config::{ConfigError, UiConfig, normalize_base_url};
use sindic_ui::dom::{Document, DomError, Element};
use sindic_ui::net::{LogoutOutcome, RequestError};
use sindic_ui::notify::TOAST_CONTAINER_ID;
use sindic_ui::util::{FormatError, format_currency, format_date};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("page setup failed: {0}")]
    Page(#[from] DomError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "sindic-ui", about = "Drive the syndic front-end behaviors from a terminal")]
struct Cli {
    /// API base URL; defaults to the configured one.
    #[arg(long, env = "SINDIC_API_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// GET a JSON endpoint.
    Get { path: String },
    /// POST a JSON body to an endpoint.
    Post {
        path: String,
        #[arg(long, default_value = "{}")]
        body: String,
    },
    /// End the session.
    Logout,
    /// Format an amount in dirhams.
    Currency { amount: f64 },
    /// Format a date in long French form.
    Date { date: String },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = UiConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.api_base_url = normalize_base_url(&base_url)?;
    }

    match cli.command {
        Command::Get { path } => {
            let ui = headless_ui(config)?;
            let result = ui.client().get(&path).await;
            report(&ui, result)
        }
        Command::Post { path, body } => {
            let body: Value = serde_json::from_str(&body)?;
            let ui = headless_ui(config)?;
            let result = ui.client().post(&path, body).await;
            report(&ui, result)
        }
        Command::Logout => {
            let ui = headless_ui(config)?;
            let outcome = ui.logout().await;
            println!("{}", logout_label(outcome));
            print_page(&ui);
            Ok(())
        }
        Command::Currency { amount } => {
            println!("{}", format_currency(amount));
            Ok(())
        }
        Command::Date { date } => {
            println!("{}", format_date(&date)?);
            Ok(())
        }
    }
}

/// A bare page with only the toast container, so failures stay visible.
fn headless_ui(config: UiConfig) -> Result<SindicUi, CliError> {
    let document = Document::new();
    document.append(None, Element::new(TOAST_CONTAINER_ID, "div"))?;
    Ok(SindicUi::new(document, config)?)
}

fn report(ui: &SindicUi, result: Result<Value, RequestError>) -> Result<(), CliError> {
    let outcome = match result {
        Ok(json) => {
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(())
        }
        Err(e) => Err(e.into()),
    };
    print_page(ui);
    outcome
}

fn print_page(ui: &SindicUi) {
    for toast in ui.notifications().live() {
        eprintln!("[{}] {}", toast.severity(), toast.message());
    }
    eprintln!("location: {}", ui.document().location());
}

fn logout_label(outcome: LogoutOutcome) -> &'static str {
    match outcome {
        LogoutOutcome::SignedOut => "signed out",
        LogoutOutcome::FailedOpen => "logout request failed; signed out locally",
        LogoutOutcome::Refused => "logout refused",
    }
}
