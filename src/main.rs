use std::env;
use std::time::Instant;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;

use blockstore::config::Categories;
use blockstore::config::PostgresConfig;
use blockstore::config::SlotPolicy;
use blockstore::config::StoreConfig;
use blockstore::parsing;
use blockstore::source::BlockUpdate;
use blockstore::store::Store;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reads store settings from environment variables, defaults for unset ones.
fn store_config() -> Result<StoreConfig, String> {
    let mut config = StoreConfig::default();
    if let Ok(s) = env::var("BLOCKSTORE_CATEGORIES") {
        config.categories = s.parse::<Categories>().map_err(|e| e.to_string())?;
        tracing::debug!("found BLOCKSTORE_CATEGORIES environment variable");
    }
    if let Ok(s) = env::var("BLOCKSTORE_SLOT_POLICY") {
        config.slot_policy = s.parse::<SlotPolicy>().map_err(|e| e.to_string())?;
        tracing::debug!("found BLOCKSTORE_SLOT_POLICY environment variable");
    }
    Ok(config)
}

/// Decomposes and persists a single JSON encoded block update.
async fn process(store: &mut Store, line: &str) -> Result<(), String> {
    let t0 = Instant::now();
    let update: BlockUpdate = serde_json::from_str(line).map_err(|e| e.to_string())?;
    let aggregate = parsing::decompose(&update).map_err(|e| e.to_string())?;
    let t1 = Instant::now();
    store
        .persist(&aggregate)
        .await
        .map_err(|e| format!("slot {}: {e}", update.slot))?;
    tracing::info!(
        "stored slot {} - {} txs, {} rows (decompose: {}ms, persist: {}ms)",
        aggregate.slot(),
        aggregate.transactions.len(),
        aggregate.row_count(),
        (t1 - t0).as_millis(),
        t1.elapsed().as_millis()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), String> {
    // Configure tracing subscriber
    let filter = env::var("BLOCKSTORE_LOG").unwrap_or(String::from("blockstore=info"));
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_max_level(tracing::Level::INFO)
        .with_env_filter(filter)
        .finish();

    let _guard = tracing::subscriber::set_global_default(subscriber);

    tracing::info!("starting blockstore v{VERSION}");
    if cfg!(feature = "test-utilities") {
        tracing::warn!("build includes test-utilities, use cargo's `--no-default-features` flag");
    } else {
        tracing::debug!("compiled without test-utilities");
    }

    // Env variables
    let pg_uri = env::var("BLOCKSTORE_POSTGRES_URI")
        .map_err(|_| String::from("BLOCKSTORE_POSTGRES_URI is not set"))?;
    tracing::debug!("found BLOCKSTORE_POSTGRES_URI environment variable");
    let config = store_config()?;

    let pgconf = PostgresConfig::new(&pg_uri);
    let mut store = Store::new(pgconf, config)
        .await
        .map_err(|e| e.to_string())?;
    match store.last_slot().await.map_err(|e| e.to_string())? {
        Some(slot) => tracing::info!("last stored slot: {slot}"),
        None => tracing::info!("empty store"),
    }

    // Newline delimited block updates
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.map_err(|e| e.to_string())? {
                    Some(line) if line.trim().is_empty() => continue,
                    Some(line) => {
                        if let Err(e) = process(&mut store, &line).await {
                            tracing::error!("skipping block update: {e}");
                        }
                    }
                    None => {
                        tracing::info!("end of input");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("exiting");
                break;
            }
        }
    }
    Ok(())
}
