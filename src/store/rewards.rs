use tokio_postgres::types::ToSql;

use super::sql::Record;
use crate::types::RewardRecord;

impl Record for RewardRecord {
    const TABLE: &'static str = "solana.block_rewards";
    const COLUMNS: &'static [&'static str] = &[
        "slot",
        "reward_index",
        "pubkey",
        "lamports",
        "post_balance",
        "reward_type",
        "commission",
    ];

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.slot,
            &self.reward_index,
            &self.pubkey,
            &self.lamports,
            &self.post_balance,
            &self.reward_type,
            &self.commission,
        ]
    }
}
