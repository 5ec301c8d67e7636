use postgres_from_row::FromRow;
use tokio_postgres::types::ToSql;
use tokio_postgres::Client;

use super::sql::Record;
use crate::types::BlockRecord;
use crate::types::Slot;

impl Record for BlockRecord {
    const TABLE: &'static str = "solana.blocks";
    const COLUMNS: &'static [&'static str] = &[
        "slot",
        "parent_slot",
        "block_height",
        "blockhash",
        "previous_blockhash",
        "block_time",
        "transaction_count",
        "successful",
    ];

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.slot,
            &self.parent_slot,
            &self.block_height,
            &self.blockhash,
            &self.previous_blockhash,
            &self.block_time,
            &self.transaction_count,
            &self.successful,
        ]
    }
}

/// Checks for a block row at slot `$1`.
pub(super) const EXISTS: &str = "select exists(select 1 from solana.blocks where slot = $1);";

/// Returns highest stored slot, if any.
pub(super) async fn last_slot(client: &Client) -> Result<Option<Slot>, tokio_postgres::Error> {
    tracing::debug!("reading last slot");
    let qry = "select max(slot) from solana.blocks;";
    Ok(client.query_one(qry, &[]).await?.get(0))
}

pub(super) async fn get(
    client: &Client,
    slot: Slot,
) -> Result<Option<BlockRecord>, tokio_postgres::Error> {
    let qry = "
        select slot
            , parent_slot
            , block_height
            , blockhash
            , previous_blockhash
            , block_time
            , transaction_count
            , successful
        from solana.blocks
        where slot = $1;";
    client
        .query_opt(qry, &[&slot])
        .await?
        .map(|row| BlockRecord::try_from_row(&row))
        .transpose()
}
