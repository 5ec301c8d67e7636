use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Unknown entity category: {0}")]
    UnknownCategory(String),
    #[error("Unknown slot policy: {0} (expected `reject` or `replace`)")]
    UnknownSlotPolicy(String),
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Postgresql connection URI postgresql://[userspec@][hostspec][/dbname][?paramspec]
    pub connection_uri: String,
}

impl PostgresConfig {
    pub fn new(uri: &str) -> Self {
        Self {
            connection_uri: uri.to_owned(),
        }
    }
}

/// Entity categories reaching storage.
///
/// Blocks and transactions are always persisted, since every other
/// category is keyed on them.
#[derive(Debug, Clone, PartialEq)]
pub struct Categories {
    pub signatures: bool,
    pub instructions: bool,
    pub inner_instructions: bool,
    pub accounts: bool,
    pub logs: bool,
    pub token_balances: bool,
    pub rewards: bool,
}

impl Categories {
    /// Every optional category enabled.
    pub fn all() -> Self {
        Self {
            signatures: true,
            instructions: true,
            inner_instructions: true,
            accounts: true,
            logs: true,
            token_balances: true,
            rewards: true,
        }
    }

    /// Blocks and transactions only.
    pub fn none() -> Self {
        Self {
            signatures: false,
            instructions: false,
            inner_instructions: false,
            accounts: false,
            logs: false,
            token_balances: false,
            rewards: false,
        }
    }

    fn flag_mut(&mut self, name: &str) -> Option<&mut bool> {
        match name {
            "signatures" => Some(&mut self.signatures),
            "instructions" => Some(&mut self.instructions),
            "inner_instructions" => Some(&mut self.inner_instructions),
            "accounts" => Some(&mut self.accounts),
            "logs" => Some(&mut self.logs),
            "token_balances" => Some(&mut self.token_balances),
            "rewards" => Some(&mut self.rewards),
            _ => None,
        }
    }

    fn flags(&self) -> [(&'static str, bool); 7] {
        [
            ("signatures", self.signatures),
            ("instructions", self.instructions),
            ("inner_instructions", self.inner_instructions),
            ("accounts", self.accounts),
            ("logs", self.logs),
            ("token_balances", self.token_balances),
            ("rewards", self.rewards),
        ]
    }

    /// Names of enabled categories, in persistence order.
    pub fn enabled(&self) -> Vec<&'static str> {
        self.flags()
            .into_iter()
            .filter(|(_, on)| *on)
            .map(|(name, _)| name)
            .collect()
    }
}

impl Default for Categories {
    fn default() -> Self {
        Self::all()
    }
}

impl FromStr for Categories {
    type Err = ConfigError;

    /// Parses a comma separated list of category names.
    ///
    /// `all` and `none` are accepted as shorthands.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => return Ok(Self::all()),
            "none" | "" => return Ok(Self::none()),
            _ => (),
        }
        let mut categories = Self::none();
        for name in s.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            match categories.flag_mut(name) {
                Some(flag) => *flag = true,
                None => return Err(ConfigError::UnknownCategory(name.to_owned())),
            }
        }
        Ok(categories)
    }
}

/// What to do when a block's slot is already in storage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SlotPolicy {
    /// Fail with a duplicate slot error, leaving stored rows untouched.
    #[default]
    Reject,
    /// Delete all stored rows of the slot and insert the new ones.
    Replace,
}

impl FromStr for SlotPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "replace" => Ok(Self::Replace),
            other => Err(ConfigError::UnknownSlotPolicy(other.to_owned())),
        }
    }
}

/// Settings of the persistence coordinator.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub categories: Categories,
    pub slot_policy: SlotPolicy,
}
