use async_trait::async_trait;
use tokio_postgres::types::ToSql;

use blockstore::store::Session;
use blockstore::store::StoreError;

/// In-memory session keeping track of statements.
///
/// Statements become visible in `committed` only on commit.
#[derive(Debug, Default)]
pub struct RecordingSession {
    pub committed: Vec<String>,
    pending: Vec<String>,
    /// Number of bind values of each executed statement
    pub param_counts: Vec<usize>,
    pub in_transaction: bool,
    pub commits: usize,
    pub rollbacks: usize,
    /// Inserts into this table fail
    pub fail_on: Option<&'static str>,
    /// Answer to existence checks
    pub slot_exists: bool,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(table: &'static str) -> Self {
        Self {
            fail_on: Some(table),
            ..Self::default()
        }
    }

    pub fn with_existing_slot() -> Self {
        Self {
            slot_exists: true,
            ..Self::default()
        }
    }

    /// Target tables of committed inserts, in execution order.
    pub fn inserted_tables(&self) -> Vec<String> {
        self.committed
            .iter()
            .filter_map(|sql| sql.strip_prefix("insert into "))
            .filter_map(|rest| rest.split_whitespace().next())
            .map(|table| table.to_owned())
            .collect()
    }

    /// Target tables of committed deletes, in execution order.
    pub fn deleted_tables(&self) -> Vec<String> {
        self.committed
            .iter()
            .filter_map(|sql| sql.strip_prefix("delete from "))
            .filter_map(|rest| rest.split_whitespace().next())
            .map(|table| table.to_owned())
            .collect()
    }
}

#[async_trait]
impl Session for RecordingSession {
    async fn begin(&mut self) -> Result<(), StoreError> {
        if self.in_transaction {
            return Err(StoreError::Backend("transaction already in progress".into()));
        }
        self.in_transaction = true;
        Ok(())
    }

    async fn execute(
        &mut self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, StoreError> {
        if !self.in_transaction {
            return Err(StoreError::Backend("no transaction in progress".into()));
        }
        if let Some(table) = self.fail_on {
            if sql.starts_with(&format!("insert into {table} ")) {
                return Err(StoreError::Backend(format!("insert into {table} failed")));
            }
        }
        self.pending.push(sql.to_owned());
        self.param_counts.push(params.len());
        Ok(0)
    }

    async fn exists(
        &mut self,
        _sql: &str,
        _params: &[&(dyn ToSql + Sync)],
    ) -> Result<bool, StoreError> {
        if !self.in_transaction {
            return Err(StoreError::Backend("no transaction in progress".into()));
        }
        Ok(self.slot_exists)
    }

    async fn commit(&mut self) -> Result<(), StoreError> {
        self.committed.append(&mut self.pending);
        self.in_transaction = false;
        self.commits += 1;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), StoreError> {
        self.pending.clear();
        self.in_transaction = false;
        self.rollbacks += 1;
        Ok(())
    }
}
