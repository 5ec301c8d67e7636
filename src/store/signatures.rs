use tokio_postgres::types::ToSql;

use super::sql::Record;
use crate::types::SignatureRecord;

impl Record for SignatureRecord {
    const TABLE: &'static str = "solana.transaction_signatures";
    const COLUMNS: &'static [&'static str] =
        &["slot", "transaction_index", "signature_index", "signature"];

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.slot,
            &self.transaction_index,
            &self.signature_index,
            &self.signature,
        ]
    }
}
