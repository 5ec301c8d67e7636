mod common;
mod db_utils;

use pretty_assertions::assert_eq;

use blockstore::config::SlotPolicy;
use blockstore::config::StoreConfig;
use blockstore::parsing::decompose;
use blockstore::source::BlockUpdate;
use blockstore::store::Store;
use blockstore::store::StoreError;
use blockstore::types::Aggregate;
use common::blocks::BLOCK_100;
use db_utils::TestDB;

pub fn set_tracing_subscriber(set: bool) -> Option<tracing::dispatcher::DefaultGuard> {
    if !set {
        return None;
    }
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_max_level(tracing::Level::INFO)
        .with_env_filter("blockstore=trace")
        .finish();
    Some(tracing::subscriber::set_default(subscriber))
}

fn aggregate_100() -> Aggregate {
    let block: BlockUpdate = serde_json::from_str(BLOCK_100).unwrap();
    decompose(&block).unwrap()
}

#[tokio::test]
#[ignore = "needs test postgres on localhost:5433"]
async fn test_persist_block() {
    let _guard = set_tracing_subscriber(false);
    let test_db = TestDB::new("blockstore_persist").await;
    let mut store = Store::new(test_db.pgconf.clone(), StoreConfig::default())
        .await
        .unwrap();
    assert_eq!(store.last_slot().await.unwrap(), None);

    let agg = aggregate_100();
    store.persist(&agg).await.unwrap();

    assert_eq!(store.last_slot().await.unwrap(), Some(100));
    assert!(store.contains_slot(100).await.unwrap());
    assert!(!store.contains_slot(101).await.unwrap());
    assert_eq!(store.get_block(100).await.unwrap(), Some(agg.block.clone()));

    assert_eq!(test_db.count("solana.transactions", 100).await, 1);
    assert_eq!(test_db.count("solana.transaction_signatures", 100).await, 1);
    assert_eq!(test_db.count("solana.transaction_instructions", 100).await, 1);
    assert_eq!(test_db.count("solana.transaction_inner_instructions", 100).await, 1);
    assert_eq!(test_db.count("solana.transaction_accounts", 100).await, 4);
    assert_eq!(test_db.count("solana.transaction_logs", 100).await, 2);
    assert_eq!(test_db.count("solana.transaction_token_balances", 100).await, 2);
    assert_eq!(test_db.count("solana.block_rewards", 100).await, 1);

    // Token amounts keep their full precision
    let row = test_db
        .client
        .query_one(
            "select pre_amount::text, post_amount::text
            from solana.transaction_token_balances
            where slot = 100 and account_index = 2;",
            &[],
        )
        .await
        .unwrap();
    assert_eq!(row.get::<usize, String>(0), "1500000");
    assert_eq!(row.get::<usize, String>(1), "1000000");
}

#[tokio::test]
#[ignore = "needs test postgres on localhost:5433"]
async fn test_duplicate_slot_leaves_stored_rows() {
    let _guard = set_tracing_subscriber(false);
    let test_db = TestDB::new("blockstore_duplicate").await;
    let mut store = Store::new(test_db.pgconf.clone(), StoreConfig::default())
        .await
        .unwrap();

    let agg = aggregate_100();
    store.persist(&agg).await.unwrap();
    let res = store.persist(&agg).await;

    assert!(matches!(res, Err(StoreError::DuplicateSlot(100))));
    assert_eq!(test_db.count("solana.transaction_accounts", 100).await, 4);

    // Store remains usable
    let next = decompose(&BlockUpdate::dummy().slot(101)).unwrap();
    store.persist(&next).await.unwrap();
    assert_eq!(store.last_slot().await.unwrap(), Some(101));
}

#[tokio::test]
#[ignore = "needs test postgres on localhost:5433"]
async fn test_replace_slot() {
    let _guard = set_tracing_subscriber(false);
    let test_db = TestDB::new("blockstore_replace").await;
    let config = StoreConfig {
        slot_policy: SlotPolicy::Replace,
        ..StoreConfig::default()
    };
    let mut store = Store::new(test_db.pgconf.clone(), config).await.unwrap();

    let agg = aggregate_100();
    store.persist(&agg).await.unwrap();

    let mut fewer = aggregate_100();
    fewer.logs.truncate(1);
    store.persist(&fewer).await.unwrap();

    assert_eq!(test_db.count("solana.blocks", 100).await, 1);
    assert_eq!(test_db.count("solana.transaction_logs", 100).await, 1);
    assert_eq!(test_db.count("solana.transaction_accounts", 100).await, 4);
}

#[tokio::test]
#[ignore = "needs test postgres on localhost:5433"]
async fn test_failed_insert_is_rolled_back() {
    let _guard = set_tracing_subscriber(false);
    let test_db = TestDB::new("blockstore_rollback").await;
    let mut store = Store::new(test_db.pgconf.clone(), StoreConfig::default())
        .await
        .unwrap();

    // Duplicate log key fails the logs batch, after earlier batches went through
    let mut agg = aggregate_100();
    let dup = agg.logs[0].clone();
    agg.logs.push(dup);
    let res = store.persist(&agg).await;

    assert!(matches!(res, Err(StoreError::Postgres(_))));
    assert!(!store.contains_slot(100).await.unwrap());
    assert_eq!(test_db.count("solana.transactions", 100).await, 0);
    assert_eq!(test_db.count("solana.transaction_accounts", 100).await, 0);
}
