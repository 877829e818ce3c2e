//! Ticket Service - Main entry point

use anyhow::Result;
use std::sync::Arc;
use ticket_service::cache::{spawn_init, spawn_sweeper};
use ticket_service::{
    AppState, Authorizer, BearerTokenAuthorizer, Config, InMemoryTicketRepository, TicketCache,
    TicketRepository, TicketService, TicketServiceImpl,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let repo = Arc::new(InMemoryTicketRepository::new()) as Arc<dyn TicketRepository>;

    // Lives for the process lifetime. Requests that arrive before
    // population finishes see misses and read from the repository.
    let cache = Arc::new(TicketCache::new(config.cache_ttl()));
    spawn_init(cache.clone(), repo.clone());
    spawn_sweeper(cache.clone(), config.cache_sweep_interval());

    info!(
        "Cache TTL: {} seconds, sweep every {} seconds",
        config.cache_ttl_secs, config.cache_sweep_interval_secs
    );

    let tickets = Arc::new(TicketServiceImpl::new(repo, cache)) as Arc<dyn TicketService>;
    let authorizer =
        Arc::new(BearerTokenAuthorizer::new(config.api_token.clone())) as Arc<dyn Authorizer>;

    ticket_service::server::run_server(config.bind_addr, AppState::new(tickets, authorizer))
        .await?;

    info!("Ticket service shutdown complete");
    Ok(())
}
