use crate::source::MessageHeader;
use crate::source::TransactionStatusMeta;
use crate::types::AccountRecord;
use crate::types::Address;
use crate::types::Lamports;
use crate::types::Slot;
use crate::types::TxIndex;

use super::to_i64;

/// Signer and writable ranges of a message's account keys.
///
/// Keys are ordered as: writable signers, readonly signers, writable
/// non-signers, readonly non-signers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Partition {
    total: usize,
    required_signatures: usize,
    readonly_signed: usize,
    readonly_unsigned: usize,
}

impl Partition {
    /// Derives ranges from header counts.
    ///
    /// Counts exceeding the number of keys are tolerated and yield empty or
    /// saturated ranges.
    pub fn new(header: &MessageHeader, total: usize) -> Self {
        let required_signatures = header.num_required_signatures as usize;
        let readonly_signed = header.num_readonly_signed_accounts as usize;
        let readonly_unsigned = header.num_readonly_unsigned_accounts as usize;
        if required_signatures > total
            || readonly_signed > required_signatures
            || readonly_unsigned > total.saturating_sub(required_signatures)
        {
            tracing::warn!(
                "inconsistent message header ({required_signatures}, {readonly_signed}, {readonly_unsigned}) for {total} accounts"
            );
        }
        Self {
            total,
            required_signatures,
            readonly_signed,
            readonly_unsigned,
        }
    }

    pub fn is_signer(&self, index: usize) -> bool {
        index < self.required_signatures
    }

    pub fn is_writable(&self, index: usize) -> bool {
        if self.is_signer(index) {
            index < self.required_signatures.saturating_sub(self.readonly_signed)
        } else {
            index < self.total.saturating_sub(self.readonly_unsigned)
        }
    }
}

/// Signed lamport difference, only for accounts funded before the transaction.
///
/// Left unset when the difference does not fit a `bigint`.
pub(super) fn balance_change(pre: Option<u64>, post: Option<u64>) -> Option<Lamports> {
    match (pre, post) {
        (Some(pre), Some(post)) if pre > 0 => {
            let change = i64::try_from(i128::from(post) - i128::from(pre)).ok();
            if change.is_none() {
                tracing::warn!("balance change from {pre} to {post} out of range");
            }
            change
        }
        _ => None,
    }
}

/// One record per account key, in key order.
pub(super) fn extract(
    slot: Slot,
    tx_index: TxIndex,
    account_keys: &[Address],
    partition: &Partition,
    meta: &TransactionStatusMeta,
) -> Vec<AccountRecord> {
    account_keys
        .iter()
        .enumerate()
        .map(|(i, address)| {
            let pre = meta.pre_balances.get(i).copied();
            let post = meta.post_balances.get(i).copied();
            AccountRecord {
                slot,
                transaction_index: tx_index,
                account_index: i as i32,
                address: address.clone(),
                is_signer: partition.is_signer(i),
                is_writable: partition.is_writable(i),
                pre_balance: to_i64(pre.unwrap_or(0)),
                post_balance: to_i64(post.unwrap_or(0)),
                balance_change: balance_change(pre, post),
            }
        })
        .collect()
}
