//! Block update message as delivered by the streaming source.
//!
//! Mirrors the geyser `SubscribeUpdateBlock` layout. Byte fields (keys,
//! signatures, hashes, instruction data) are raw bytes, rendered to text
//! during decomposition.
use serde::Deserialize;

pub type Bytes = Vec<u8>;

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(any(test, feature = "test-utilities"), derive(Clone))]
pub struct BlockUpdate {
    pub slot: u64,
    pub blockhash: String,
    #[serde(default)]
    pub rewards: Option<Rewards>,
    #[serde(default)]
    pub block_time: Option<UnixTimestamp>,
    #[serde(default)]
    pub block_height: Option<BlockHeight>,
    pub parent_slot: u64,
    pub parent_blockhash: String,
    #[serde(default)]
    pub executed_transaction_count: u64,
    #[serde(default)]
    pub transactions: Vec<TransactionInfo>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(any(test, feature = "test-utilities"), derive(Clone))]
pub struct UnixTimestamp {
    pub timestamp: i64,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(any(test, feature = "test-utilities"), derive(Clone))]
pub struct BlockHeight {
    pub block_height: u64,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(any(test, feature = "test-utilities"), derive(Clone))]
pub struct Rewards {
    #[serde(default)]
    pub rewards: Vec<Reward>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(any(test, feature = "test-utilities"), derive(Clone))]
pub struct Reward {
    pub pubkey: String,
    pub lamports: i64,
    pub post_balance: u64,
    /// 0: unspecified, 1: fee, 2: rent, 3: staking, 4: voting
    #[serde(default)]
    pub reward_type: i32,
    /// Percentage as text, empty when not applicable
    #[serde(default)]
    pub commission: String,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(any(test, feature = "test-utilities"), derive(Clone))]
pub struct TransactionInfo {
    #[serde(default)]
    pub is_vote: bool,
    #[serde(default)]
    pub transaction: Option<Transaction>,
    #[serde(default)]
    pub meta: Option<TransactionStatusMeta>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(any(test, feature = "test-utilities"), derive(Clone))]
pub struct Transaction {
    #[serde(default)]
    pub signatures: Vec<Bytes>,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(any(test, feature = "test-utilities"), derive(Clone))]
pub struct Message {
    #[serde(default)]
    pub header: Option<MessageHeader>,
    #[serde(default)]
    pub account_keys: Vec<Bytes>,
    #[serde(default)]
    pub recent_blockhash: Bytes,
    #[serde(default)]
    pub instructions: Vec<CompiledInstruction>,
    #[serde(default)]
    pub versioned: bool,
}

#[derive(Deserialize, Debug, Default, Clone, Copy)]
pub struct MessageHeader {
    pub num_required_signatures: u32,
    pub num_readonly_signed_accounts: u32,
    pub num_readonly_unsigned_accounts: u32,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(any(test, feature = "test-utilities"), derive(Clone))]
pub struct CompiledInstruction {
    pub program_id_index: u32,
    #[serde(default)]
    pub accounts: Bytes,
    #[serde(default)]
    pub data: Bytes,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(any(test, feature = "test-utilities"), derive(Clone))]
pub struct TransactionStatusMeta {
    #[serde(default)]
    pub err: Option<TransactionError>,
    #[serde(default)]
    pub fee: u64,
    #[serde(default)]
    pub pre_balances: Vec<u64>,
    #[serde(default)]
    pub post_balances: Vec<u64>,
    #[serde(default)]
    pub inner_instructions: Vec<InnerInstructions>,
    #[serde(default)]
    pub log_messages: Vec<String>,
    #[serde(default)]
    pub pre_token_balances: Vec<TokenBalance>,
    #[serde(default)]
    pub post_token_balances: Vec<TokenBalance>,
    #[serde(default)]
    pub compute_units_consumed: Option<u64>,
}

/// Serialized transaction error.
#[derive(Deserialize, Debug, Default)]
#[cfg_attr(any(test, feature = "test-utilities"), derive(Clone))]
pub struct TransactionError {
    #[serde(default)]
    pub err: Bytes,
}

/// Inner instructions invoked by top-level instruction `index`.
#[derive(Deserialize, Debug, Default)]
#[cfg_attr(any(test, feature = "test-utilities"), derive(Clone))]
pub struct InnerInstructions {
    pub index: u32,
    #[serde(default)]
    pub instructions: Vec<InnerInstruction>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(any(test, feature = "test-utilities"), derive(Clone))]
pub struct InnerInstruction {
    pub program_id_index: u32,
    #[serde(default)]
    pub accounts: Bytes,
    #[serde(default)]
    pub data: Bytes,
    #[serde(default)]
    pub stack_height: Option<u32>,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(any(test, feature = "test-utilities"), derive(Clone))]
pub struct TokenBalance {
    pub account_index: u32,
    #[serde(default)]
    pub mint: String,
    #[serde(default)]
    pub ui_token_amount: Option<UiTokenAmount>,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub program_id: String,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(any(test, feature = "test-utilities"), derive(Clone))]
pub struct UiTokenAmount {
    #[serde(default)]
    pub ui_amount: f64,
    #[serde(default)]
    pub decimals: u32,
    /// Raw amount as decimal text
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub ui_amount_string: String,
}

/// Dummy messages for tests.
#[cfg(any(test, feature = "test-utilities"))]
pub mod testutils {
    use super::*;

    /// Random 32 byte key or hash.
    pub fn random_key() -> Bytes {
        rand::random::<[u8; 32]>().to_vec()
    }

    /// Random 64 byte signature.
    pub fn random_signature() -> Bytes {
        (0..64).map(|_| rand::random::<u8>()).collect()
    }

    /// Random base-58 block hash.
    pub fn random_blockhash() -> String {
        crate::codec::encode(&random_key())
    }

    impl BlockUpdate {
        /// Block at slot 1 without any transactions.
        pub fn dummy() -> Self {
            Self {
                slot: 1,
                blockhash: random_blockhash(),
                rewards: None,
                block_time: Some(UnixTimestamp {
                    timestamp: 1_700_000_000,
                }),
                block_height: Some(BlockHeight { block_height: 1 }),
                parent_slot: 0,
                parent_blockhash: random_blockhash(),
                executed_transaction_count: 0,
                transactions: vec![],
            }
        }

        /// Returns block moved to given `slot`, parent being the previous slot.
        pub fn slot(mut self, slot: u64) -> Self {
            self.slot = slot;
            self.parent_slot = slot.saturating_sub(1);
            self
        }

        pub fn block_time(mut self, block_time: Option<i64>) -> Self {
            self.block_time = block_time.map(|timestamp| UnixTimestamp { timestamp });
            self
        }

        pub fn block_height(mut self, block_height: Option<u64>) -> Self {
            self.block_height = block_height.map(|block_height| BlockHeight { block_height });
            self
        }

        pub fn transaction(mut self, tx: TransactionInfo) -> Self {
            self.transactions.push(tx);
            self.executed_transaction_count = self.transactions.len() as u64;
            self
        }

        pub fn reward(mut self, reward: Reward) -> Self {
            self.rewards
                .get_or_insert_with(Rewards::default)
                .rewards
                .push(reward);
            self
        }
    }

    impl Reward {
        pub fn dummy(lamports: i64) -> Self {
            Self {
                pubkey: random_blockhash(),
                lamports,
                post_balance: 1_000_000_000,
                reward_type: 1,
                commission: String::new(),
            }
        }
    }

    impl TransactionInfo {
        /// Successful transaction with a fee payer invoking a single program.
        ///
        /// Accounts: 0 fee payer (signer, writable), 1 program (readonly).
        pub fn dummy() -> Self {
            Self {
                is_vote: false,
                transaction: Some(Transaction {
                    signatures: vec![random_signature()],
                    message: Some(Message {
                        header: Some(MessageHeader {
                            num_required_signatures: 1,
                            num_readonly_signed_accounts: 0,
                            num_readonly_unsigned_accounts: 1,
                        }),
                        account_keys: vec![random_key(), random_key()],
                        recent_blockhash: random_key(),
                        instructions: vec![CompiledInstruction {
                            program_id_index: 1,
                            accounts: vec![0],
                            data: vec![2, 0, 0, 0],
                        }],
                        versioned: false,
                    }),
                }),
                meta: Some(TransactionStatusMeta {
                    err: None,
                    fee: 5000,
                    pre_balances: vec![1_000_000, 1],
                    post_balances: vec![995_000, 1],
                    inner_instructions: vec![],
                    log_messages: vec![
                        "Program invoke [1]".to_owned(),
                        "Program success".to_owned(),
                    ],
                    pre_token_balances: vec![],
                    post_token_balances: vec![],
                    compute_units_consumed: Some(150),
                }),
            }
        }

        /// Returns transaction flagged as a vote.
        pub fn vote(mut self) -> Self {
            self.is_vote = true;
            self
        }

        fn message_mut(&mut self) -> &mut Message {
            self.transaction
                .get_or_insert_with(Transaction::default)
                .message
                .get_or_insert_with(Message::default)
        }

        fn meta_mut(&mut self) -> &mut TransactionStatusMeta {
            self.meta.get_or_insert_with(TransactionStatusMeta::default)
        }

        /// Replaces message header and account keys with `n_accounts` random keys.
        pub fn accounts(
            mut self,
            n_accounts: usize,
            required_signatures: u32,
            readonly_signed: u32,
            readonly_unsigned: u32,
        ) -> Self {
            let message = self.message_mut();
            message.header = Some(MessageHeader {
                num_required_signatures: required_signatures,
                num_readonly_signed_accounts: readonly_signed,
                num_readonly_unsigned_accounts: readonly_unsigned,
            });
            message.account_keys = (0..n_accounts).map(|_| random_key()).collect();
            self
        }

        /// Drops the message header, keeping account keys.
        pub fn without_header(mut self) -> Self {
            self.message_mut().header = None;
            self
        }

        pub fn balances(mut self, pre: Vec<u64>, post: Vec<u64>) -> Self {
            let meta = self.meta_mut();
            meta.pre_balances = pre;
            meta.post_balances = post;
            self
        }

        pub fn instructions(mut self, instructions: Vec<CompiledInstruction>) -> Self {
            self.message_mut().instructions = instructions;
            self
        }

        pub fn inner_instructions(mut self, inner: Vec<InnerInstructions>) -> Self {
            self.meta_mut().inner_instructions = inner;
            self
        }

        pub fn token_balances(mut self, pre: Vec<TokenBalance>, post: Vec<TokenBalance>) -> Self {
            let meta = self.meta_mut();
            meta.pre_token_balances = pre;
            meta.post_token_balances = post;
            self
        }

        pub fn logs(mut self, logs: &[&str]) -> Self {
            self.meta_mut().log_messages = logs.iter().map(|s| s.to_string()).collect();
            self
        }

        /// Returns transaction failed with given serialized error.
        pub fn failed(mut self, err: &[u8]) -> Self {
            self.meta_mut().err = Some(TransactionError { err: err.to_vec() });
            self
        }

        pub fn versioned(mut self) -> Self {
            self.message_mut().versioned = true;
            self
        }

        /// Adds `n` extra random signatures.
        pub fn extra_signatures(mut self, n: usize) -> Self {
            let tx = self.transaction.get_or_insert_with(Transaction::default);
            tx.signatures.extend((0..n).map(|_| random_signature()));
            self
        }

        /// Returns the account key at `index`, if any.
        pub fn account_key(&self, index: usize) -> Option<&Bytes> {
            self.transaction
                .as_ref()
                .and_then(|t| t.message.as_ref())
                .and_then(|m| m.account_keys.get(index))
        }
    }

    impl CompiledInstruction {
        pub fn new(program_id_index: u32, data: &[u8]) -> Self {
            Self {
                program_id_index,
                accounts: vec![],
                data: data.to_vec(),
            }
        }
    }

    impl InnerInstruction {
        pub fn new(program_id_index: u32, data: &[u8], stack_height: u32) -> Self {
            Self {
                program_id_index,
                accounts: vec![],
                data: data.to_vec(),
                stack_height: Some(stack_height),
            }
        }
    }

    impl TokenBalance {
        /// Token balance of `amount` raw units for account at `account_index`.
        pub fn dummy(account_index: u32, mint: &str, amount: u64, decimals: u32) -> Self {
            let ui_amount = amount as f64 / 10f64.powi(decimals as i32);
            Self {
                account_index,
                mint: mint.to_owned(),
                ui_token_amount: Some(UiTokenAmount {
                    ui_amount,
                    decimals,
                    amount: amount.to_string(),
                    ui_amount_string: ui_amount.to_string(),
                }),
                owner: "owner".to_owned(),
                program_id: "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA".to_owned(),
            }
        }
    }
}
