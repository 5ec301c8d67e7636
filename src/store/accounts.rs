use tokio_postgres::types::ToSql;

use super::sql::Record;
use crate::types::AccountRecord;

impl Record for AccountRecord {
    const TABLE: &'static str = "solana.transaction_accounts";
    const COLUMNS: &'static [&'static str] = &[
        "slot",
        "transaction_index",
        "account_index",
        "address",
        "is_signer",
        "is_writable",
        "pre_balance",
        "post_balance",
        "balance_change",
    ];

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.slot,
            &self.transaction_index,
            &self.account_index,
            &self.address,
            &self.is_signer,
            &self.is_writable,
            &self.pre_balance,
            &self.post_balance,
            &self.balance_change,
        ]
    }
}
