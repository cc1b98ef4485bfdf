//! Core business logic for Expensio.
//!
//! This crate contains pure business logic with ZERO I/O or logging.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `split` - Equal splits, balances, and net positions
//! - `currency` - Allocation, exchange rates, and conversion
//! - `suggestion` - Fair-split proposals for the next expense
//! - `fraud` - Pluggable expense scoring
//! - `budget` - Expense plans and variance

pub mod budget;
pub mod currency;
pub mod fraud;
pub mod split;
pub mod suggestion;
