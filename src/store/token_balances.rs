use tokio_postgres::types::ToSql;

use super::sql::Record;
use crate::types::TokenBalanceRecord;

impl Record for TokenBalanceRecord {
    const TABLE: &'static str = "solana.transaction_token_balances";
    const COLUMNS: &'static [&'static str] = &[
        "slot",
        "transaction_index",
        "account_index",
        "mint",
        "owner",
        "decimals",
        "pre_amount",
        "pre_ui_amount",
        "post_amount",
        "post_ui_amount",
    ];

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.slot,
            &self.transaction_index,
            &self.account_index,
            &self.mint,
            &self.owner,
            &self.decimals,
            &self.pre_amount,
            &self.pre_ui_amount,
            &self.post_amount,
            &self.post_ui_amount,
        ]
    }
}
