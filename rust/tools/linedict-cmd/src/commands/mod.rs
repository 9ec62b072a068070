//! Command implementations for linedict-cmd

pub mod encode;
pub mod inspect;
pub mod query;
pub mod search;
