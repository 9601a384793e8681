//! # AuthDNS Backend
//!
//! Authoritative DNS record backend: answers front-end record lookups from
//! an in-memory cache kept consistent with the SQL source of truth by a
//! pub/sub invalidation feed.

mod bootstrap;

use authdns_application::ports::{RecordRepository, SnapshotStore};
use authdns_application::{BootstrapLoader, InvalidationProcessor, QueryResolver, RecordCache};
use authdns_infrastructure::channel::TcpInvalidationChannel;
use authdns_infrastructure::repositories::SqliteRecordRepository;
use authdns_infrastructure::rpc::{serve, DnsPacketHandler};
use authdns_infrastructure::snapshot::JsonSnapshotStore;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "authdns")]
#[command(version)]
#[command(about = "Authoritative DNS record backend")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Override the configured listen address
    #[arg(short = 'l', long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.listen.as_deref())?;
    bootstrap::init_logging(&config);

    info!(listen = %config.server.listen, "AuthDNS backend starting");

    // A reachable database is a hard startup requirement; degraded mode only
    // covers read failures after the pool exists.
    let pool = bootstrap::init_database(&config.database.path).await?;

    let repository: Arc<dyn RecordRepository> = Arc::new(SqliteRecordRepository::new(pool));
    let snapshot: Arc<dyn SnapshotStore> =
        Arc::new(JsonSnapshotStore::new(config.snapshot.path.clone()));
    let cache = Arc::new(RecordCache::new());

    let pod_name = std::env::var("POD_NAME").ok();
    let is_primary = config.is_primary(pod_name.as_deref());
    info!(
        is_primary,
        pod = pod_name.as_deref().unwrap_or("unset"),
        "Node role resolved"
    );

    let report = BootstrapLoader::new(
        Arc::clone(&repository),
        snapshot,
        Arc::clone(&cache),
        is_primary,
    )
    .run()
    .await;
    info!(
        source = ?report.source,
        loaded = report.loaded,
        skipped = report.skipped,
        "Bootstrap complete, serving"
    );

    spawn_invalidation_loop(&config, Arc::clone(&cache), Arc::clone(&repository));

    let handler = Arc::new(DnsPacketHandler::new(QueryResolver::new(cache)));
    let listener = TcpListener::bind(&config.server.listen).await?;
    info!(listen = %config.server.listen, "Record lookup listener bound");

    tokio::select! {
        result = serve(listener, handler) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    Ok(())
}

/// Feed consumer with reconnect. After any drop the cache may have missed
/// messages, so the next successful connect resynchronizes from the database
/// before consuming.
fn spawn_invalidation_loop(
    config: &authdns_domain::Config,
    cache: Arc<RecordCache>,
    repository: Arc<dyn RecordRepository>,
) {
    let processor = InvalidationProcessor::new(cache, repository);
    let feed_addr = config.invalidation.feed_addr.clone();
    let channel_name = config.invalidation.channel.clone();
    let reconnect = Duration::from_secs(config.invalidation.reconnect_secs);

    tokio::spawn(async move {
        let mut resync_needed = false;
        loop {
            match TcpInvalidationChannel::connect(&feed_addr, &channel_name).await {
                Ok(mut channel) => {
                    info!(addr = %feed_addr, channel = %channel_name, "Invalidation feed connected");
                    if resync_needed {
                        processor.resync().await;
                    }
                    processor.run(&mut channel).await;
                    resync_needed = true;
                    warn!(addr = %feed_addr, "Invalidation feed disconnected, will reconnect");
                }
                Err(reason) => {
                    resync_needed = true;
                    warn!(addr = %feed_addr, %reason, "Invalidation feed unavailable, retrying");
                }
            }
            tokio::time::sleep(reconnect).await;
        }
    });
}
