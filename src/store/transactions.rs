use tokio_postgres::types::ToSql;

use super::sql::Record;
use crate::types::TransactionRecord;

impl Record for TransactionRecord {
    const TABLE: &'static str = "solana.transactions";
    const COLUMNS: &'static [&'static str] = &[
        "slot",
        "transaction_index",
        "signature",
        "fee",
        "compute_units_consumed",
        "err",
        "successful",
        "version",
        "recent_blockhash",
        "num_required_signatures",
        "num_readonly_signed_accounts",
        "num_readonly_unsigned_accounts",
    ];

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.slot,
            &self.transaction_index,
            &self.signature,
            &self.fee,
            &self.compute_units_consumed,
            &self.err,
            &self.successful,
            &self.version,
            &self.recent_blockhash,
            &self.num_required_signatures,
            &self.num_readonly_signed_accounts,
            &self.num_readonly_unsigned_accounts,
        ]
    }
}
