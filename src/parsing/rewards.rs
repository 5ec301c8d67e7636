use crate::source::Reward;
use crate::types::RewardRecord;
use crate::types::Slot;

use super::to_i64;

fn reward_type_name(reward_type: i32) -> &'static str {
    match reward_type {
        1 => "fee",
        2 => "rent",
        3 => "staking",
        4 => "voting",
        _ => "unspecified",
    }
}

/// Commission percentage, if any.
fn commission(text: &str) -> Option<i16> {
    match text.trim() {
        "" => None,
        t => t.parse::<i16>().ok(),
    }
}

pub(super) fn extract(slot: Slot, rewards: &[Reward]) -> Vec<RewardRecord> {
    rewards
        .iter()
        .enumerate()
        .map(|(i, r)| RewardRecord {
            slot,
            reward_index: i as i32,
            pubkey: r.pubkey.clone(),
            lamports: r.lamports,
            post_balance: to_i64(r.post_balance),
            reward_type: reward_type_name(r.reward_type).to_owned(),
            commission: commission(&r.commission),
        })
        .collect()
}
