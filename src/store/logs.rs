use tokio_postgres::types::ToSql;

use super::sql::Record;
use crate::types::LogRecord;

impl Record for LogRecord {
    const TABLE: &'static str = "solana.transaction_logs";
    const COLUMNS: &'static [&'static str] =
        &["slot", "transaction_index", "log_index", "log", "program_id"];

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.slot,
            &self.transaction_index,
            &self.log_index,
            &self.log,
            &self.program_id,
        ]
    }
}
