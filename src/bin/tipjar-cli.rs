use clap::{Parser, Subcommand};
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use url::Url;

use tipjar::alerts::{AlertFrame, AlertKind, AlertRequest};
use tipjar::api::{BackendClient, CheckoutRequest};
use tipjar::config::{BackendConfig, PaymentConfig};
use tipjar::payments::{PaymentConfirmationPoller, PaymentState};

#[derive(Parser)]
#[command(name = "tipjar-cli")]
#[command(about = "Operator CLI for the tip jar overlay", long_about = None)]
struct Cli {
    /// Overlay server URL.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Admin API key of the overlay server.
    #[arg(short, long, default_value = "CHANGE_ME_IN_PRODUCTION")]
    key: String,

    /// REST backend URL.
    #[arg(short, long, default_value = "http://localhost:8001")]
    backend: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wait for a checkout session to be paid
    Confirm {
        session_id: Option<String>,
        #[arg(long, default_value_t = 5)]
        max_attempts: u32,
        #[arg(long, default_value_t = 2000)]
        interval_ms: u64,
    },
    /// Trigger the default test alert on the overlay
    TestAlert,
    /// Trigger a custom alert on the overlay
    Alert {
        #[arg(long, default_value = "TestUser")]
        name: String,
        #[arg(long, default_value_t = 25.0)]
        amount: f64,
        #[arg(long)]
        message: Option<String>,
    },
    /// Print overlay frames as they change
    Watch,
    /// Show overlay status
    Status,
    /// Show the creator profile from the backend
    Creator,
    /// Start a checkout and print the payment URL
    Tip {
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        message: Option<String>,
        #[arg(long, default_value = "http://localhost:3000")]
        origin: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let backend_config = BackendConfig {
        base_url: cli.backend.clone(),
        ..Default::default()
    };

    match cli.command {
        Commands::Confirm {
            session_id,
            max_attempts,
            interval_ms,
        } => {
            let backend = BackendClient::new(&backend_config)?;
            let poller = PaymentConfirmationPoller::new(
                backend,
                PaymentConfig {
                    max_attempts,
                    poll_interval_ms: interval_ms,
                },
            );
            println!("{}", PaymentState::Checking.view().title);

            let outcome = poller.run(session_id.as_deref()).await;
            let view = outcome.view();
            println!("{}\n{}", view.title, view.message);
            if !matches!(outcome, PaymentState::Success { .. }) {
                std::process::exit(1);
            }
        }
        Commands::TestAlert => {
            let res = client
                .post(format!("{}/admin/alerts/test", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Alert {
            name,
            amount,
            message,
        } => {
            let request = AlertRequest {
                kind: AlertKind::Tip,
                username: Some(name),
                amount: Some(amount),
                message,
            };
            let res = client
                .post(format!("{}/admin/alerts", cli.url))
                .headers(headers)
                .json(&request)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Watch => {
            let mut url = Url::parse(&cli.url)?;
            let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
            url.set_scheme(scheme)
                .map_err(|_| format!("cannot derive websocket URL from {}", cli.url))?;
            url.set_path("/overlay/ws");

            let (mut stream, _) = connect_async(url.as_str()).await?;
            while let Some(message) = stream.next().await {
                match message? {
                    Message::Text(text) => {
                        let frame: AlertFrame = serde_json::from_str(text.as_str())?;
                        println!("[{}] {:?}: {}", frame.seq, frame.phase, frame.message);
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
        Commands::Status => {
            let res = client
                .get(format!("{}/admin/status", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Creator => {
            let backend = BackendClient::new(&backend_config)?;
            let profile = backend.creator().await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Commands::Tip {
            amount,
            name,
            message,
            origin,
        } => {
            let backend = BackendClient::new(&backend_config)?;
            let session = backend
                .create_checkout_session(&CheckoutRequest {
                    amount,
                    message,
                    tipper_name: name,
                    origin_url: origin,
                })
                .await?;
            println!("{}", session.url);
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: overlay returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
