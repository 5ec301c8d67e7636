#![allow(dead_code)] // not used by all tests
pub mod blocks;
pub mod session;
