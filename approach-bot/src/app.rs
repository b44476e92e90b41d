use actix_web::{App, HttpServer};
use anyhow::Context;
use approach_catalog::{CatalogClient, ImportLoader, ImportReport, MenuResolver, SqliteCatalogStore};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::{BotConfig, CatalogConfig};
use crate::facade::{BotFacade, PollingOptions};
use crate::handlers;
use crate::telegram::TelegramClient;

/// Open the configured store and wrap it in a client with the configured timeout
pub fn open_catalog(config: &CatalogConfig) -> anyhow::Result<CatalogClient> {
    let store = SqliteCatalogStore::open(&config.database_url)
        .context("Failed to open catalog database")?;
    Ok(CatalogClient::new(Arc::new(store)).with_timeout(config.timeout()))
}

/// Load a CSV file into the catalog
pub async fn import_catalog(config: &BotConfig, path: &Path) -> anyhow::Result<ImportReport> {
    config.validate_for_import()?;
    let catalog = open_catalog(&config.catalog)?;
    run_import(&catalog, path).await
}

async fn run_import(catalog: &CatalogClient, path: &Path) -> anyhow::Result<ImportReport> {
    let report = ImportLoader::new(catalog.clone())
        .import_csv(path)
        .await
        .with_context(|| format!("Failed to import {}", path.display()))?;

    for issue in &report.failed {
        error!(line = issue.line, reason = %issue.reason, "Row was not stored");
    }
    if !report.is_clean() {
        warn!(
            malformed = report.malformed.len(),
            failed = report.failed.len(),
            "Import finished with skipped rows"
        );
    }

    Ok(report)
}

/// Run the bot: optional import, liveness server and update polling until ctrl-c
pub async fn serve(config: BotConfig, import: Option<&Path>) -> anyhow::Result<()> {
    config.validate_for_serving()?;

    let catalog = open_catalog(&config.catalog)?;
    if let Some(path) = import {
        run_import(&catalog, path).await?;
    }

    let transport = TelegramClient::new(&config.telegram.token, config.telegram.request_timeout())?
        .with_base_url(&config.telegram.api_base);
    let facade = BotFacade::new(MenuResolver::new(catalog), Arc::new(transport));
    let options = PollingOptions {
        poll_interval: config.telegram.poll_interval(),
        long_poll_timeout_secs: config.telegram.long_poll_timeout_secs,
    };

    if !config.server.enabled {
        facade.run_polling(options, shutdown_signal()).await;
        return Ok(());
    }

    info!(
        "Starting liveness server on {}:{}",
        config.server.host, config.server.port
    );
    let server = HttpServer::new(|| App::new().configure(handlers::configure))
        .bind((config.server.host.as_str(), config.server.port))
        .with_context(|| {
            format!(
                "Failed to bind liveness server to {}:{}",
                config.server.host, config.server.port
            )
        })?
        .disable_signals()
        .run();
    let server_handle = server.handle();
    let server_task = actix_web::rt::spawn(server);

    facade.run_polling(options, shutdown_signal()).await;

    server_handle.stop(true).await;
    server_task
        .await
        .context("Liveness server task panicked")?
        .context("Liveness server failed")?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await
        }
    }
}
