/// Name of the postgres schema holding all tables.
pub const SCHEMA_NAME: &str = "solana";

/// Max number of bind parameters postgres accepts in a single statement.
pub const MAX_BIND_PARAMS: usize = 65_535;

/// Transaction version reported for legacy (unversioned) messages.
pub const LEGACY_VERSION: &str = "legacy";

/// Transaction version reported for v0 messages.
pub const V0_VERSION: &str = "0";
