//! Shared domain types, configuration and bookkeeping

pub mod config;
pub mod credits;
pub mod keys;
pub mod models;
pub mod options;
