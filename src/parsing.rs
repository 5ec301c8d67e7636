use thiserror::Error;
use time::OffsetDateTime;

use crate::codec;
use crate::constants::LEGACY_VERSION;
use crate::constants::V0_VERSION;
use crate::source::BlockUpdate;
use crate::source::Message;
use crate::source::TransactionInfo;
use crate::source::TransactionStatusMeta;
use crate::types::Address;
use crate::types::Aggregate;
use crate::types::BlockRecord;
use crate::types::LogRecord;
use crate::types::SignatureRecord;
use crate::types::Slot;
use crate::types::TransactionRecord;
use crate::types::TxIndex;

mod accounts;
mod instructions;
mod rewards;
mod token_balances;

use accounts::Partition;

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("Malformed block update: {0}")]
    MalformedInput(String),
}

/// Returns true for consensus vote transactions.
pub fn is_vote(tx: &TransactionInfo) -> bool {
    tx.is_vote
}

/// Decompose a block update into per-entity row collections.
///
/// Vote transactions are dropped before index assignment, so transaction
/// indices are contiguous over the remaining ones. Fails only if a
/// transaction's account ranges cannot be derived.
pub fn decompose(block: &BlockUpdate) -> Result<Aggregate, ParseError> {
    let slot = to_i64(block.slot);
    let mut aggregate = Aggregate::new(BlockRecord {
        slot,
        parent_slot: to_i64(block.parent_slot),
        block_height: block
            .block_height
            .as_ref()
            .map_or(0, |h| to_i64(h.block_height)),
        blockhash: block.blockhash.clone(),
        previous_blockhash: block.parent_blockhash.clone(),
        block_time: block_time(block),
        transaction_count: 0,
        successful: true,
    });

    if let Some(rewards) = &block.rewards {
        aggregate.rewards = rewards::extract(slot, &rewards.rewards);
    }

    for (i, tx) in block.transactions.iter().filter(|tx| !is_vote(tx)).enumerate() {
        extract_transaction(&mut aggregate, slot, i as TxIndex, tx)?;
    }

    aggregate.block.transaction_count = aggregate.transactions.len() as i32;
    tracing::trace!(
        "decomposed slot {slot}: {} of {} transactions ({} executed), {} rows",
        aggregate.transactions.len(),
        block.transactions.len(),
        block.executed_transaction_count,
        aggregate.row_count()
    );
    Ok(aggregate)
}

/// Chain integer as a `bigint`, clamped to `i64::MAX`.
pub(crate) fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or_else(|_| {
        tracing::warn!("clamping out of range value {value}");
        i64::MAX
    })
}

/// Block time, or unix epoch when absent or out of range.
fn block_time(block: &BlockUpdate) -> OffsetDateTime {
    let timestamp = block.block_time.as_ref().map_or(0, |t| t.timestamp);
    OffsetDateTime::from_unix_timestamp(timestamp).unwrap_or_else(|_| {
        tracing::warn!("block time {timestamp} out of range for slot {}", block.slot);
        OffsetDateTime::UNIX_EPOCH
    })
}

/// Append rows of a single non-vote transaction.
fn extract_transaction(
    aggregate: &mut Aggregate,
    slot: Slot,
    tx_index: TxIndex,
    tx: &TransactionInfo,
) -> Result<(), ParseError> {
    let message: Option<&Message> = tx.transaction.as_ref().and_then(|t| t.message.as_ref());
    let signatures: &[Vec<u8>] = tx
        .transaction
        .as_ref()
        .map(|t| t.signatures.as_slice())
        .unwrap_or_default();

    let account_keys: Vec<Address> = message.map_or(vec![], |m| {
        m.account_keys.iter().map(|k| codec::encode(k)).collect()
    });

    // Account ranges need a header as soon as there are accounts
    let partition = match message.and_then(|m| m.header.as_ref()) {
        Some(header) => Some(Partition::new(header, account_keys.len())),
        None if !account_keys.is_empty() => {
            return Err(ParseError::MalformedInput(format!(
                "transaction {tx_index} of slot {slot} has {} account keys but no message header",
                account_keys.len()
            )))
        }
        None => None,
    };

    aggregate.transactions.push(transaction_record(
        slot,
        tx_index,
        signatures,
        message,
        tx.meta.as_ref(),
    ));

    aggregate
        .signatures
        .extend(signatures.iter().enumerate().map(|(j, sig)| SignatureRecord {
            slot,
            transaction_index: tx_index,
            signature_index: j as i32,
            signature: codec::encode(sig),
        }));

    let top_level = message.map_or(vec![], |m| {
        instructions::extract(slot, tx_index, &account_keys, &m.instructions)
    });
    // Best effort log attribution, all logs go to the first program invoked
    let first_program_id: Address = top_level
        .first()
        .map_or(String::new(), |ix| ix.program_id.clone());
    aggregate.instructions.extend(top_level);

    let Some(meta) = tx.meta.as_ref() else {
        tracing::debug!("transaction {tx_index} of slot {slot} has no meta");
        return Ok(());
    };

    aggregate.inner_instructions.extend(instructions::extract_inner(
        slot,
        tx_index,
        &account_keys,
        &meta.inner_instructions,
    ));

    if let Some(partition) = &partition {
        aggregate.accounts.extend(accounts::extract(
            slot,
            tx_index,
            &account_keys,
            partition,
            meta,
        ));
    }

    aggregate.logs.extend(
        meta.log_messages
            .iter()
            .enumerate()
            .map(|(j, log)| LogRecord {
                slot,
                transaction_index: tx_index,
                log_index: j as i32,
                log: log.clone(),
                program_id: first_program_id.clone(),
            }),
    );

    aggregate.token_balances.extend(token_balances::reconcile(
        slot,
        tx_index,
        &meta.pre_token_balances,
        &meta.post_token_balances,
    ));

    Ok(())
}

fn transaction_record(
    slot: Slot,
    tx_index: TxIndex,
    signatures: &[Vec<u8>],
    message: Option<&Message>,
    meta: Option<&TransactionStatusMeta>,
) -> TransactionRecord {
    let header = message.and_then(|m| m.header).unwrap_or_default();
    let err = meta
        .and_then(|m| m.err.as_ref())
        .map(|e| serde_json::json!({ "data": String::from_utf8_lossy(&e.err) }));
    TransactionRecord {
        slot,
        transaction_index: tx_index,
        signature: signatures
            .first()
            .map_or(String::new(), |s| codec::encode(s)),
        fee: meta.map_or(0, |m| to_i64(m.fee)),
        compute_units_consumed: meta
            .and_then(|m| m.compute_units_consumed)
            .map(to_i64),
        // Without meta, the outcome is unknown
        successful: meta.is_some() && err.is_none(),
        err,
        version: match message {
            Some(m) if m.versioned => V0_VERSION.to_owned(),
            Some(_) => LEGACY_VERSION.to_owned(),
            None => String::new(),
        },
        recent_blockhash: message.map_or(String::new(), |m| codec::encode(&m.recent_blockhash)),
        num_required_signatures: header.num_required_signatures as i32,
        num_readonly_signed_accounts: header.num_readonly_signed_accounts as i32,
        num_readonly_unsigned_accounts: header.num_readonly_unsigned_accounts as i32,
    }
}
