use tokio_postgres::types::ToSql;

use super::sql::Record;
use crate::types::InstructionRecord;

impl Record for InstructionRecord {
    const TABLE: &'static str = "solana.transaction_instructions";
    const COLUMNS: &'static [&'static str] = &[
        "slot",
        "transaction_index",
        "instruction_index",
        "program_id",
        "program_id_index",
        "data",
    ];

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.slot,
            &self.transaction_index,
            &self.instruction_index,
            &self.program_id,
            &self.program_id_index,
            &self.data,
        ]
    }
}
