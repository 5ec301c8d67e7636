mod accounts;
mod blocks;
mod inner_instructions;
mod instructions;
mod logs;
mod rewards;
mod signatures;
pub mod sql;
mod token_balances;
mod transactions;

use async_trait::async_trait;
use thiserror::Error;
use tokio_postgres::types::ToSql;
use tokio_postgres::Client;
use tokio_postgres::NoTls;

use crate::config::PostgresConfig;
use crate::config::SlotPolicy;
use crate::config::StoreConfig;
use crate::constants::SCHEMA_NAME;
use crate::types::AccountRecord;
use crate::types::Aggregate;
use crate::types::BlockRecord;
use crate::types::InnerInstructionRecord;
use crate::types::InstructionRecord;
use crate::types::LogRecord;
use crate::types::RewardRecord;
use crate::types::SignatureRecord;
use crate::types::Slot;
use crate::types::TokenBalanceRecord;
use crate::types::TransactionRecord;
use crate::utils::Schema;
use sql::Record;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Postgres(#[from] tokio_postgres::Error),
    #[error("Slot {0} is already stored")]
    DuplicateSlot(Slot),
    #[error("Unsupported schema revision {major}.{minor}")]
    SchemaRevision { major: i32, minor: i32 },
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Tables in insertion order. Slot deletion walks them backwards.
const TABLES: [&str; 9] = [
    BlockRecord::TABLE,
    TransactionRecord::TABLE,
    SignatureRecord::TABLE,
    InstructionRecord::TABLE,
    InnerInstructionRecord::TABLE,
    AccountRecord::TABLE,
    LogRecord::TABLE,
    TokenBalanceRecord::TABLE,
    RewardRecord::TABLE,
];

/// Transactional statement execution.
///
/// Statements issued between `begin` and `commit` are applied all
/// together or not at all.
#[async_trait]
pub trait Session: Send {
    async fn begin(&mut self) -> Result<(), StoreError>;

    /// Runs a statement, returning the number of affected rows.
    async fn execute(
        &mut self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, StoreError>;

    /// Runs a query returning a single boolean.
    async fn exists(
        &mut self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<bool, StoreError>;

    async fn commit(&mut self) -> Result<(), StoreError>;

    async fn rollback(&mut self) -> Result<(), StoreError>;
}

#[async_trait]
impl Session for Client {
    async fn begin(&mut self) -> Result<(), StoreError> {
        self.batch_execute("begin;").await?;
        Ok(())
    }

    async fn execute(
        &mut self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, StoreError> {
        Ok(Client::execute(self, sql, params).await?)
    }

    async fn exists(
        &mut self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<bool, StoreError> {
        Ok(self.query_one(sql, params).await?.try_get(0)?)
    }

    async fn commit(&mut self) -> Result<(), StoreError> {
        self.batch_execute("commit;").await?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), StoreError> {
        self.batch_execute("rollback;").await?;
        Ok(())
    }
}

/// Writes all rows of `aggregate` in a single transaction.
///
/// Any failure rolls the transaction back and is returned unchanged.
///
/// * `session` - session with no transaction in progress
/// * `aggregate` - rows of a single block
/// * `config` - enabled categories and slot policy
pub async fn persist<S: Session + ?Sized>(
    session: &mut S,
    aggregate: &Aggregate,
    config: &StoreConfig,
) -> Result<(), StoreError> {
    let slot = aggregate.slot();
    tracing::debug!("persisting slot {slot}");
    session.begin().await?;
    let res = match write(session, aggregate, config).await {
        Ok(()) => session.commit().await,
        Err(e) => Err(e),
    };
    if let Err(e) = res {
        tracing::warn!("rolling back slot {slot}: {e}");
        if let Err(rb) = session.rollback().await {
            tracing::error!("rollback of slot {slot} failed: {rb}");
        }
        return Err(e);
    }
    Ok(())
}

async fn write<S: Session + ?Sized>(
    session: &mut S,
    aggregate: &Aggregate,
    config: &StoreConfig,
) -> Result<(), StoreError> {
    let slot = aggregate.slot();
    match config.slot_policy {
        SlotPolicy::Reject => {
            if session.exists(blocks::EXISTS, &[&slot]).await? {
                return Err(StoreError::DuplicateSlot(slot));
            }
        }
        SlotPolicy::Replace => delete_slot(session, slot).await?,
    }

    // Key spine, always written
    insert_batch(session, std::slice::from_ref(&aggregate.block)).await?;
    insert_batch(session, &aggregate.transactions).await?;

    let categories = &config.categories;
    if categories.signatures {
        insert_batch(session, &aggregate.signatures).await?;
    }
    if categories.instructions {
        insert_batch(session, &aggregate.instructions).await?;
    }
    if categories.inner_instructions {
        insert_batch(session, &aggregate.inner_instructions).await?;
    }
    if categories.accounts {
        insert_batch(session, &aggregate.accounts).await?;
    }
    if categories.logs {
        insert_batch(session, &aggregate.logs).await?;
    }
    if categories.token_balances {
        insert_batch(session, &aggregate.token_balances).await?;
    }
    if categories.rewards {
        insert_batch(session, &aggregate.rewards).await?;
    }
    Ok(())
}

/// Inserts `rows` using as few statements as the bind parameter cap allows.
async fn insert_batch<S, R>(session: &mut S, rows: &[R]) -> Result<(), StoreError>
where
    S: Session + ?Sized,
    R: Record + Sync,
{
    if rows.is_empty() {
        return Ok(());
    }
    for chunk in rows.chunks(sql::rows_per_statement(R::COLUMNS.len())) {
        let stmt = sql::build_insert(R::TABLE, R::COLUMNS, chunk.len());
        let params = sql::flatten(chunk);
        session.execute(&stmt, &params).await?;
    }
    tracing::trace!("inserted {} rows into {}", rows.len(), R::TABLE);
    Ok(())
}

/// Removes every row of `slot`, children first.
async fn delete_slot<S: Session + ?Sized>(session: &mut S, slot: Slot) -> Result<(), StoreError> {
    let mut deleted = 0;
    for table in TABLES.iter().rev() {
        deleted += session.execute(&sql::build_delete(table), &[&slot]).await?;
    }
    if deleted > 0 {
        tracing::info!("replacing slot {slot} ({deleted} rows deleted)");
    }
    Ok(())
}

/// Connected PostgreSQL store.
pub struct Store {
    client: Client,
    config: StoreConfig,
}

impl Store {
    pub async fn new(pgconf: PostgresConfig, config: StoreConfig) -> Result<Self, StoreError> {
        tracing::debug!("initializing new store");
        let (mut client, connection) =
            tokio_postgres::connect(&pgconf.connection_uri, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("connection error: {}", e);
            }
        });

        let schema = Schema::new(SCHEMA_NAME, include_str!("store/schema.sql"));
        schema.init(&mut client).await?;

        tracing::debug!(
            "enabled categories: {:?}, slot policy: {:?}",
            config.categories.enabled(),
            config.slot_policy
        );
        Ok(Self { client, config })
    }

    /// Persist `aggregate` atomically.
    pub async fn persist(&mut self, aggregate: &Aggregate) -> Result<(), StoreError> {
        persist(&mut self.client, aggregate, &self.config).await
    }

    /// Highest stored slot, if any.
    pub async fn last_slot(&self) -> Result<Option<Slot>, StoreError> {
        Ok(blocks::last_slot(&self.client).await?)
    }

    pub async fn contains_slot(&self, slot: Slot) -> Result<bool, StoreError> {
        Ok(self.client.query_one(blocks::EXISTS, &[&slot]).await?.try_get(0)?)
    }

    pub async fn get_block(&self, slot: Slot) -> Result<Option<BlockRecord>, StoreError> {
        Ok(blocks::get(&self.client, slot).await?)
    }
}
