// Block at slot 100 with a vote transaction followed by a token transfer.
//
// Transfer accounts: 0 fee payer (signer, writable), 1 co-signer (signer,
// readonly), 2 token account (writable), 3 program (readonly).
pub const BLOCK_100: &str = r#"
{
  "slot": 100,
  "blockhash": "9mCFo6kkqmFDTJ6bSaVFbHamLbfsGZiGwLzcdjhTbG5W",
  "parent_slot": 99,
  "parent_blockhash": "4sGjMW1sUnHzSxGspuhpqLDx6wiyjNtZAMdL4VZHirAn",
  "block_time": { "timestamp": 1700000100 },
  "block_height": { "block_height": 90 },
  "executed_transaction_count": 2,
  "rewards": {
    "rewards": [
      {
        "pubkey": "Vote111111111111111111111111111111111111111",
        "lamports": 2500,
        "post_balance": 1000002500,
        "reward_type": 1,
        "commission": ""
      }
    ]
  },
  "transactions": [
    {
      "signature": [1, 1, 1],
      "is_vote": true,
      "transaction": {
        "signatures": [[1, 1, 1]],
        "message": {
          "header": {
            "num_required_signatures": 1,
            "num_readonly_signed_accounts": 0,
            "num_readonly_unsigned_accounts": 1
          },
          "account_keys": [[7], [8]],
          "recent_blockhash": [9, 9],
          "instructions": [{ "program_id_index": 1, "accounts": [0], "data": [2] }],
          "versioned": false
        }
      },
      "meta": {
        "err": null,
        "fee": 5000,
        "pre_balances": [100000, 1],
        "post_balances": [95000, 1],
        "log_messages": ["Program Vote111111111111111111111111111111111111111 invoke [1]"]
      },
      "index": 0
    },
    {
      "signature": [2, 2, 2],
      "is_vote": false,
      "transaction": {
        "signatures": [[2, 2, 2]],
        "message": {
          "header": {
            "num_required_signatures": 2,
            "num_readonly_signed_accounts": 1,
            "num_readonly_unsigned_accounts": 1
          },
          "account_keys": [[1], [2], [3], [4]],
          "recent_blockhash": [9, 9],
          "instructions": [{ "program_id_index": 3, "accounts": [0, 2], "data": [3, 0, 0, 0] }],
          "versioned": true
        }
      },
      "meta": {
        "err": null,
        "fee": 10000,
        "pre_balances": [5000000, 2000, 0, 1],
        "post_balances": [4990000, 2000, 500, 1],
        "inner_instructions": [
          {
            "index": 0,
            "instructions": [
              { "program_id_index": 3, "accounts": [2], "data": [1], "stack_height": 2 }
            ]
          }
        ],
        "log_messages": [
          "Program 5 invoke [1]",
          "Program 5 success"
        ],
        "pre_token_balances": [
          {
            "account_index": 2,
            "mint": "MintA",
            "ui_token_amount": {
              "ui_amount": 1.5,
              "decimals": 6,
              "amount": "1500000",
              "ui_amount_string": "1.5"
            },
            "owner": "OwnerA",
            "program_id": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
          }
        ],
        "post_token_balances": [
          {
            "account_index": 2,
            "mint": "MintA",
            "ui_token_amount": {
              "ui_amount": 1.0,
              "decimals": 6,
              "amount": "1000000",
              "ui_amount_string": "1"
            },
            "owner": "OwnerA",
            "program_id": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
          },
          {
            "account_index": 1,
            "mint": "MintA",
            "ui_token_amount": {
              "ui_amount": 0.5,
              "decimals": 6,
              "amount": "500000",
              "ui_amount_string": "0.5"
            },
            "owner": "OwnerB",
            "program_id": "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
          }
        ],
        "compute_units_consumed": 2000
      },
      "index": 1
    }
  ]
}
"#;

// Transaction carrying account keys without a message header.
pub const BLOCK_WITHOUT_HEADER: &str = r#"
{
  "slot": 101,
  "blockhash": "9mCFo6kkqmFDTJ6bSaVFbHamLbfsGZiGwLzcdjhTbG5W",
  "parent_slot": 100,
  "parent_blockhash": "9mCFo6kkqmFDTJ6bSaVFbHamLbfsGZiGwLzcdjhTbG5W",
  "transactions": [
    {
      "is_vote": false,
      "transaction": {
        "signatures": [[5]],
        "message": {
          "account_keys": [[1], [2]],
          "instructions": [{ "program_id_index": 1 }]
        }
      },
      "meta": { "fee": 5000 }
    }
  ]
}
"#;
