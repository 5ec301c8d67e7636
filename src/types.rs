use postgres_from_row::FromRow;
use rust_decimal::Decimal;
use time::OffsetDateTime;

/// Block sequence number
pub type Slot = i64;
/// Position of a non-vote transaction within its block
pub type TxIndex = i32;
pub type Lamports = i64;
/// Base-58 encoded public key
pub type Address = String;

/// All rows derived from a single block update.
///
/// Per-transaction collections only reference transaction indices present
/// in `transactions`.
#[derive(Debug)]
pub struct Aggregate {
    pub block: BlockRecord,
    pub rewards: Vec<RewardRecord>,
    pub transactions: Vec<TransactionRecord>,
    pub signatures: Vec<SignatureRecord>,
    pub instructions: Vec<InstructionRecord>,
    pub inner_instructions: Vec<InnerInstructionRecord>,
    pub accounts: Vec<AccountRecord>,
    pub logs: Vec<LogRecord>,
    pub token_balances: Vec<TokenBalanceRecord>,
}

impl Aggregate {
    pub fn new(block: BlockRecord) -> Self {
        Self {
            block,
            rewards: vec![],
            transactions: vec![],
            signatures: vec![],
            instructions: vec![],
            inner_instructions: vec![],
            accounts: vec![],
            logs: vec![],
            token_balances: vec![],
        }
    }

    pub fn slot(&self) -> Slot {
        self.block.slot
    }

    /// Total number of rows, block included.
    pub fn row_count(&self) -> usize {
        1 + self.rewards.len()
            + self.transactions.len()
            + self.signatures.len()
            + self.instructions.len()
            + self.inner_instructions.len()
            + self.accounts.len()
            + self.logs.len()
            + self.token_balances.len()
    }
}

/// A record from the `solana.blocks` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct BlockRecord {
    pub slot: Slot,
    pub parent_slot: Slot,
    pub block_height: i64,
    pub blockhash: String,
    pub previous_blockhash: String,
    pub block_time: OffsetDateTime,
    pub transaction_count: i32,
    /// Block was received and parsed, regardless of transaction outcomes.
    pub successful: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RewardRecord {
    pub slot: Slot,
    pub reward_index: i32,
    pub pubkey: Address,
    pub lamports: Lamports,
    pub post_balance: Lamports,
    pub reward_type: String,
    pub commission: Option<i16>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub slot: Slot,
    pub transaction_index: TxIndex,
    /// First signature, identifying the transaction
    pub signature: String,
    pub fee: Lamports,
    pub compute_units_consumed: Option<i64>,
    pub err: Option<serde_json::Value>,
    pub successful: bool,
    pub version: String,
    pub recent_blockhash: String,
    pub num_required_signatures: i32,
    pub num_readonly_signed_accounts: i32,
    pub num_readonly_unsigned_accounts: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignatureRecord {
    pub slot: Slot,
    pub transaction_index: TxIndex,
    pub signature_index: i32,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstructionRecord {
    pub slot: Slot,
    pub transaction_index: TxIndex,
    pub instruction_index: i32,
    /// Empty when the program id index points past the account keys
    pub program_id: Address,
    pub program_id_index: i32,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InnerInstructionRecord {
    pub slot: Slot,
    pub transaction_index: TxIndex,
    /// Index of the top-level instruction
    pub instruction_index: i32,
    pub inner_instruction_index: i32,
    pub program_id: Address,
    pub program_id_index: i32,
    pub stack_height: Option<i32>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    pub slot: Slot,
    pub transaction_index: TxIndex,
    pub account_index: i32,
    pub address: Address,
    pub is_signer: bool,
    pub is_writable: bool,
    pub pre_balance: Lamports,
    pub post_balance: Lamports,
    /// Only set for accounts with a positive pre-balance
    pub balance_change: Option<Lamports>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub slot: Slot,
    pub transaction_index: TxIndex,
    pub log_index: i32,
    pub log: String,
    /// Program of the transaction's first instruction
    pub program_id: Address,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenBalanceRecord {
    pub slot: Slot,
    pub transaction_index: TxIndex,
    pub account_index: i32,
    pub mint: Address,
    pub owner: Address,
    pub decimals: i32,
    pub pre_amount: Decimal,
    pub pre_ui_amount: f64,
    pub post_amount: Decimal,
    pub post_ui_amount: f64,
}
