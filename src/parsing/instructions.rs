use crate::source::CompiledInstruction;
use crate::source::InnerInstructions;
use crate::types::Address;
use crate::types::InnerInstructionRecord;
use crate::types::InstructionRecord;
use crate::types::Slot;
use crate::types::TxIndex;

/// Address of the invoked program, empty if `index` is out of range.
pub(super) fn program_id(account_keys: &[Address], index: u32) -> Address {
    match account_keys.get(index as usize) {
        Some(address) => address.clone(),
        None => {
            tracing::debug!(
                "program id index {index} out of range for {} account keys",
                account_keys.len()
            );
            String::new()
        }
    }
}

pub(super) fn extract(
    slot: Slot,
    tx_index: TxIndex,
    account_keys: &[Address],
    instructions: &[CompiledInstruction],
) -> Vec<InstructionRecord> {
    instructions
        .iter()
        .enumerate()
        .map(|(i, ix)| InstructionRecord {
            slot,
            transaction_index: tx_index,
            instruction_index: i as i32,
            program_id: program_id(account_keys, ix.program_id_index),
            program_id_index: ix.program_id_index as i32,
            data: ix.data.clone(),
        })
        .collect()
}

/// Flattens inner instruction groups.
///
/// Each group carries the index of the top-level instruction that invoked
/// it. Inner indices restart at zero within each group.
pub(super) fn extract_inner(
    slot: Slot,
    tx_index: TxIndex,
    account_keys: &[Address],
    groups: &[InnerInstructions],
) -> Vec<InnerInstructionRecord> {
    groups
        .iter()
        .flat_map(|group| {
            group
                .instructions
                .iter()
                .enumerate()
                .map(move |(j, ix)| InnerInstructionRecord {
                    slot,
                    transaction_index: tx_index,
                    instruction_index: group.index as i32,
                    inner_instruction_index: j as i32,
                    program_id: program_id(account_keys, ix.program_id_index),
                    program_id_index: ix.program_id_index as i32,
                    stack_height: ix.stack_height.map(|h| h as i32),
                    data: ix.data.clone(),
                })
        })
        .collect()
}
