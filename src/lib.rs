//! Decomposes Solana block updates into relational row batches and persists
//! them to PostgreSQL, one database transaction per block.
//!
//! - [`source`]: block update message as delivered by the streaming source.
//! - [`parsing`]: turns a block update into an [`types::Aggregate`].
//! - [`store`]: writes an aggregate atomically.
pub mod codec;
pub mod config;
pub mod constants;
pub mod parsing;
pub mod source;
pub mod store;
pub mod types;
pub mod utils;
