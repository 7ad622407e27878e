//! Command implementations for the league history CLI

pub mod bracket;
pub mod common;
pub mod fetch;
pub mod records;
pub mod transactions;

pub use common::CommandContext;
