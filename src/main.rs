mod cli;
mod config;
mod error;
mod poller;
mod practicum;
mod status;
mod telegram;
mod tracker;
mod validator;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};
use config::BotConfig;
use poller::{Poller, now_unix_timestamp};
use practicum::PracticumClient;
use telegram::TelegramNotifier;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = BotConfig::load(cli.config.as_deref())?;

    if let Command::Check = cli.command {
        println!("{}", config.describe());
    }

    // Refuse to start without all three credentials.
    if let Err(err) = config.check_credentials() {
        error!("{err}");
        return Err(err.into());
    }

    match cli.command {
        Command::Check => {
            println!("Credentials OK");
        }
        Command::Once { from_date } => {
            let mut poller = build_poller(&config, from_date)?;
            let outcome = poller.tick().await;
            info!(
                ?outcome,
                cursor = poller.cursor(),
                last_status = ?poller.tracker().last_status(),
                "single poll finished"
            );
        }
        Command::Run {
            interval,
            from_date,
            iterations,
        } => {
            if let Some(secs) = interval {
                config.retry_time_secs = secs;
            }
            let mut poller = build_poller(&config, from_date)?;
            poller.run(iterations).await;
        }
    }

    Ok(())
}

fn build_poller(
    config: &BotConfig,
    from_date: Option<i64>,
) -> Result<Poller<PracticumClient, TelegramNotifier>> {
    let source = PracticumClient::with_endpoint(
        config.practicum_token.clone(),
        config.endpoint.clone(),
        config.request_timeout(),
    )?;
    let notifier = TelegramNotifier::with_base_url(
        config.telegram_token.clone(),
        config.telegram_chat_id.clone(),
        config.telegram_api_url.clone(),
        config.request_timeout(),
    )?;
    let cursor = from_date.unwrap_or_else(now_unix_timestamp);
    Ok(Poller::new(source, notifier, cursor, config.interval()))
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "homework_watch=debug"
    } else {
        "homework_watch=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
