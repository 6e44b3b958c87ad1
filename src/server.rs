//! MCP server initialization for stdio and streamable HTTP transports.
//!
//! Provides [`serve_stdio`] and [`serve_http`] entry points that wire up the
//! journal roots, embedding provider, and MCP tool handler into a running server.

use crate::tools::JournalTools;
use anyhow::Result;
use private_journal::config::JournalConfig;
use private_journal::embedding;
use private_journal::journal::Journal;
use private_journal::paths::{JournalEnv, JournalPaths};
use rmcp::ServiceExt;
use std::sync::Arc;

/// Shared setup: resolve roots, load the embedding model, and start the
/// background reconciliation scan.
pub(crate) async fn open_journal(config: &JournalConfig) -> Result<Journal> {
    let project_dir = config.resolved_project_dir()?;
    let paths = JournalPaths::new(JournalEnv::from_env(), &project_dir);

    let embedder = embedding::create_provider(&config.embedding)?;
    tracing::info!("embedding provider ready");

    let journal = Journal::new(paths, embedder);
    tracing::info!(
        project = %journal.paths().project_root().display(),
        user = %journal.paths().user_root().await.display(),
        synced_vault = journal.paths().user_embeddings_in_cache(),
        "journal roots resolved"
    );
    Ok(journal)
}

fn spawn_reconciliation(journal: &Journal) {
    let journal = journal.clone();
    tokio::spawn(async move {
        let regenerated = journal.regenerate_missing().await;
        tracing::info!(regenerated, "startup reconciliation finished");
    });
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: JournalConfig) -> Result<()> {
    tracing::info!("starting private-journal MCP server on stdio");

    let journal = open_journal(&config).await?;
    spawn_reconciliation(&journal);

    let tools = JournalTools::new(journal, Arc::new(config));
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running — waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}

/// Start the MCP server over Streamable HTTP transport.
pub async fn serve_http(config: JournalConfig) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(addr = %bind_addr, "starting private-journal MCP server on HTTP");

    let journal = open_journal(&config).await?;
    spawn_reconciliation(&journal);
    let config = Arc::new(config);

    let service = rmcp::transport::streamable_http_server::StreamableHttpService::new(
        move || Ok(JournalTools::new(journal.clone(), config.clone())),
        rmcp::transport::streamable_http_server::session::local::LocalSessionManager::default()
            .into(),
        Default::default(),
    );

    let router = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "MCP server listening at http://{bind_addr}/mcp");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
            }
            tracing::info!("shutting down HTTP server");
        })
        .await?;

    Ok(())
}
