use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use wordwise_types::AppResponse;

mod cli;
mod clock;
mod controller;
mod events;
mod export;
mod locks;
mod profile;
mod session;
mod state;

#[cfg(test)]
mod tests;

use self::cli::Cli;
use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = profile::load_config(cli.profile.as_deref())?;

    init_tracing(&config.log_filter, cli.log_json);

    let export_path = cli.command.export_path();
    let events = cli.command.into_events(&config.translator.to_lang);

    let state = Arc::new(AppState::from_config(config, cli.memory).await?);
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    let responses = controller.dispatch(events).await;

    controller.shutdown();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task exited with error: {e}"),
            Err(e) => tracing::error!("task panicked: {e}"),
        }
    }

    let mut failed = false;
    for response in responses? {
        if let (Some(path), AppResponse::Export(csv)) = (&export_path, &response) {
            std::fs::write(path, csv)?;
            tracing::info!("Exported vocabulary to {}", path.display());
            continue;
        }

        failed |= matches!(response, AppResponse::Error(_));
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    if failed {
        std::process::exit(1);
    }

    Ok(())
}

/// `RUST_LOG` wins over the configured filter; output goes to stderr
fn init_tracing(fallback: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();
}
