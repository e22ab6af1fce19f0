//! The wallet: balance, transaction ledger, and the payments page.
//!
//! This module contains everything related to the wallet:
//! - The [Cents] money type and the [Wallet] store with its `apply` entry
//!   point
//! - The validation gate that guards every mutation
//! - View handlers for the payments page and the four mutation endpoints

mod core;
mod money;
mod mutation_endpoints;
mod payments_page;
mod validate;

pub use core::{
    Transaction, TransactionKind, TransactionStatus, Wallet, WalletSnapshot, WalletStats,
};
pub use money::Cents;
pub use mutation_endpoints::{
    deposit_endpoint, funding_endpoint, transfer_endpoint, withdraw_endpoint,
};
pub use payments_page::get_payments_page;
pub use validate::{Recipient, parse_amount, validate_sufficient_funds};
