use itertools::EitherOrBoth;
use itertools::Itertools;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::source::TokenBalance;
use crate::types::Slot;
use crate::types::TokenBalanceRecord;
use crate::types::TxIndex;

/// Merges pre and post token balances into one record per account index.
///
/// Output is sorted by account index. Missing sides are left at zero.
pub(super) fn reconcile(
    slot: Slot,
    tx_index: TxIndex,
    pre: &[TokenBalance],
    post: &[TokenBalance],
) -> Vec<TokenBalanceRecord> {
    let pre: BTreeMap<u32, &TokenBalance> = pre.iter().map(|tb| (tb.account_index, tb)).collect();
    let post: BTreeMap<u32, &TokenBalance> =
        post.iter().map(|tb| (tb.account_index, tb)).collect();

    pre.into_iter()
        .merge_join_by(post, |(a, _), (b, _)| a.cmp(b))
        .map(|eob| match eob {
            EitherOrBoth::Both((index, pre), (_, post)) => {
                let mut record = side(slot, tx_index, index, pre);
                (record.pre_amount, record.pre_ui_amount) = amounts(pre);
                (record.post_amount, record.post_ui_amount) = amounts(post);
                record
            }
            EitherOrBoth::Left((index, pre)) => {
                let mut record = side(slot, tx_index, index, pre);
                (record.pre_amount, record.pre_ui_amount) = amounts(pre);
                record
            }
            EitherOrBoth::Right((index, post)) => {
                let mut record = side(slot, tx_index, index, post);
                (record.post_amount, record.post_ui_amount) = amounts(post);
                record
            }
        })
        .collect()
}

/// Record with identity fields of `tb` and zero amounts.
fn side(slot: Slot, tx_index: TxIndex, index: u32, tb: &TokenBalance) -> TokenBalanceRecord {
    TokenBalanceRecord {
        slot,
        transaction_index: tx_index,
        account_index: index as i32,
        mint: tb.mint.clone(),
        owner: tb.owner.clone(),
        decimals: tb.ui_token_amount.as_ref().map_or(0, |a| a.decimals as i32),
        pre_amount: Decimal::ZERO,
        pre_ui_amount: 0.0,
        post_amount: Decimal::ZERO,
        post_ui_amount: 0.0,
    }
}

/// Raw and ui amounts of a balance.
fn amounts(tb: &TokenBalance) -> (Decimal, f64) {
    match &tb.ui_token_amount {
        Some(a) => (parse_amount(&a.amount), a.ui_amount),
        None => (Decimal::ZERO, 0.0),
    }
}

/// Parses a raw token amount, zero if not a decimal number.
pub(super) fn parse_amount(text: &str) -> Decimal {
    if text.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(text).unwrap_or_else(|e| {
        tracing::warn!("ignoring unparsable token amount `{text}`: {e}");
        Decimal::ZERO
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1000"), Decimal::from(1000));
        assert_eq!(parse_amount("18446744073709551615"), Decimal::from(u64::MAX));
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("12ab"), Decimal::ZERO);
    }

    #[test]
    fn test_union_sorted_without_duplicates() {
        let pre = vec![
            TokenBalance::dummy(5, "mintA", 10, 0),
            TokenBalance::dummy(1, "mintB", 20, 0),
        ];
        let post = vec![
            TokenBalance::dummy(3, "mintC", 30, 0),
            TokenBalance::dummy(5, "mintA", 15, 0),
        ];
        let records = reconcile(1, 0, &pre, &post);
        let indices: Vec<i32> = records.iter().map(|r| r.account_index).collect();
        assert_eq!(indices, vec![1, 3, 5]);
    }

    #[test]
    fn test_both_sides() {
        let pre = vec![TokenBalance::dummy(2, "mint", 1_500, 2)];
        let post = vec![TokenBalance::dummy(2, "mint", 500, 2)];
        let records = reconcile(7, 3, &pre, &post);
        assert_eq!(
            records,
            vec![TokenBalanceRecord {
                slot: 7,
                transaction_index: 3,
                account_index: 2,
                mint: "mint".into(),
                owner: "owner".into(),
                decimals: 2,
                pre_amount: Decimal::from(1500),
                pre_ui_amount: 15.0,
                post_amount: Decimal::from(500),
                post_ui_amount: 5.0,
            }]
        );
    }

    #[test]
    fn test_one_sided() {
        let pre = vec![TokenBalance::dummy(1, "gone", 100, 0)];
        let post = vec![TokenBalance::dummy(4, "new", 42, 0)];
        let records = reconcile(1, 0, &pre, &post);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].mint, "gone");
        assert_eq!(records[0].pre_amount, Decimal::from(100));
        assert_eq!(records[0].post_amount, Decimal::ZERO);
        assert_eq!(records[0].post_ui_amount, 0.0);

        // Post-only balances are kept
        assert_eq!(records[1].mint, "new");
        assert_eq!(records[1].pre_amount, Decimal::ZERO);
        assert_eq!(records[1].post_amount, Decimal::from(42));
    }

    #[test]
    fn test_identity_from_pre() {
        let pre = vec![TokenBalance::dummy(0, "pre-mint", 1, 0)];
        let mut post_balance = TokenBalance::dummy(0, "post-mint", 2, 0);
        post_balance.owner = "someone".into();
        let records = reconcile(1, 0, &pre, &[post_balance]);
        assert_eq!(records[0].mint, "pre-mint");
        assert_eq!(records[0].owner, "owner");
    }

    #[test]
    fn test_empty() {
        assert!(reconcile(1, 0, &[], &[]).is_empty());
    }
}
