use tokio_postgres::types::ToSql;

use super::sql::Record;
use crate::types::InnerInstructionRecord;

impl Record for InnerInstructionRecord {
    const TABLE: &'static str = "solana.transaction_inner_instructions";
    const COLUMNS: &'static [&'static str] = &[
        "slot",
        "transaction_index",
        "instruction_index",
        "inner_instruction_index",
        "program_id",
        "program_id_index",
        "stack_height",
        "data",
    ];

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.slot,
            &self.transaction_index,
            &self.instruction_index,
            &self.inner_instruction_index,
            &self.program_id,
            &self.program_id_index,
            &self.stack_height,
            &self.data,
        ]
    }
}
