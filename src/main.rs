#![windows_subsystem = "windows"]
use std::io::{self, BufReader};
use std::sync::Arc;

use hangul_name::protocol::Session;
use hangul_name::runtime;
use hangul_name::services::history::{FileStore, HistoryStore};
use hangul_name::{Config, GeminiClient, StateMachine};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // stdout carries protocol lines, so logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hangul_name=info".into()),
        )
        .init();

    let config = Config::load()?;

    info!(
        model = %config.gemini.model,
        data_dir = %config.history.data_dir.display(),
        "starting hangul-name core"
    );

    let translator = Arc::new(GeminiClient::new(&config.gemini)?);
    let store = HistoryStore::new(FileStore::new(&config.history.data_dir));
    let mut session = Session::new(StateMachine::new(store));

    runtime::run(
        &mut session,
        translator,
        BufReader::new(io::stdin()),
        io::stdout().lock(),
    )?;

    info!("input closed, shutting down");
    Ok(())
}
