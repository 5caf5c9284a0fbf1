/*
[INPUT]:  CLI arguments, optional YAML configuration file, stdin, OS shutdown signals
[OUTPUT]: Rendered ticker session on stdout, diagnostics on stderr
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stock_ticker_cli::{TerminalSink, TickerConfig, spawn_input_reader};
use stock_ticker_client::{TickerClient, TickerSession};

const CLOSE_GRACE: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(name = "stock-ticker", version, about = "Stock ticker WebSocket demo client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "endpoint", value_name = "URL")]
    endpoint: Option<String>,
    /// Initial subscription; repeat for several symbols
    #[arg(long = "symbol", value_name = "SYMBOL")]
    symbols: Vec<String>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    log_level: String,
    #[arg(long = "timestamps")]
    timestamps: bool,
    #[arg(long = "no-color")]
    no_color: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;
    if args.no_color {
        console::set_colors_enabled(false);
    }

    let mut config = match &args.config_path {
        Some(path) => TickerConfig::from_file(path).context("load config")?,
        None => TickerConfig::default(),
    };
    config.apply_overrides(args.endpoint, args.symbols, args.timestamps);

    let client_config = config.client_config();
    let client = TickerClient::new(&client_config).context("invalid client configuration")?;
    info!(
        endpoint = client.endpoint(),
        symbols = ?config.symbols,
        "starting stock-ticker"
    );

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    let events = client.start().await.context("start ticker client")?;
    let (requests_tx, requests_rx) = mpsc::unbounded_channel();
    spawn_input_reader(BufReader::new(std::io::stdin()), requests_tx, shutdown.clone())
        .context("spawn stdin reader")?;

    let session = TickerSession::new(
        client.clone(),
        client_config.subscriptions,
        TerminalSink::stdout(config.timestamps),
    );
    let mut session = tokio::spawn(session.run_with_requests(events, requests_rx));

    tokio::select! {
        result = &mut session => {
            let sink = result.context("session task failed")?;
            info!(lines = sink.written(), "session finished");
            return Ok(());
        }
        _ = shutdown.cancelled() => {
            info!("shutdown requested");
        }
    }

    if let Err(err) = client.close().await {
        warn!(error = %err, "close request failed");
    }
    match tokio::time::timeout(CLOSE_GRACE, &mut session).await {
        Ok(result) => {
            let sink = result.context("session task failed")?;
            info!(lines = sink.written(), "session finished");
        }
        Err(_) => {
            warn!(
                grace_secs = CLOSE_GRACE.as_secs(),
                "close handshake did not finish; exiting"
            );
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
