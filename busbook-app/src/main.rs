use anyhow::Context;
use busbook_app::{AppError, Console};
use busbook_core::TextPaymentCode;
use busbook_store::{Config, ReceiptStore};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "busbook=info,busbook_app=info,busbook_order=info,busbook_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::load().context("Failed to load config")?;
    let mut session = config.open_session().context("Invalid booking configuration")?;
    tracing::info!(session = %session.id(), "Bus ticket booking started");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(
        stdin.lock(),
        stdout.lock(),
        TextPaymentCode,
        ReceiptStore::from_config(&config.receipt),
    )
    .with_currency_symbol(&config.receipt.currency_symbol);

    match console.run(&mut session) {
        Ok(paths) => {
            tracing::info!(files = paths.len(), "Booking finished");
            Ok(())
        }
        Err(AppError::InputClosed) => {
            tracing::info!(stage = %session.stage(), "Booking abandoned");
            Ok(())
        }
        Err(e) => Err(e).context("Booking failed"),
    }
}
