// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! # Retail Bank
//!
//! This library models a minimal retail bank: customers identified by tax id,
//! checking accounts with a per-withdrawal ceiling and a withdrawal cap, and
//! deposits/withdrawals recorded in a per-account statement.
//!
//! ## Core Components
//!
//! - [`Bank`]: Owned directory of customers and accounts; entry point for every operation
//! - [`Customer`]: Identity, contact data and the accounts opened in the customer's name
//! - [`Account`]: Balance, history and the [`WithdrawalPolicy`] deciding extra refusals
//! - [`Transaction`]: A deposit or withdrawal, applied and recorded in one step
//! - [`BankError`]: Refusals reported by the bank
//!
//! ## Example
//!
//! ```
//! use retail_bank::{Bank, BankError, TransactionKind};
//! use rust_decimal_macros::dec;
//!
//! let mut bank = Bank::new();
//! bank.register_customer("Ana Souza", "01/02/1990", "111.222.333-44", "Rua A, 10 - Centro - Recife/PE")
//!     .unwrap();
//! bank.open_checking_account("11122233344").unwrap();
//!
//! bank.apply_transaction("11122233344", TransactionKind::Deposit, dec!(1000.00)).unwrap();
//!
//! // Checking accounts refuse withdrawals above 500.00.
//! let refused = bank.apply_transaction("11122233344", TransactionKind::Withdrawal, dec!(500.01));
//! assert_eq!(refused, Err(BankError::LimitExceeded));
//!
//! let statement = bank.statement("11122233344").unwrap();
//! assert_eq!(statement.balance, dec!(1000.00));
//! assert_eq!(statement.entries.len(), 1);
//! ```
//!
//! ## Thread Safety
//!
//! The bank itself is meant to be driven from a single thread. Each account
//! guards its balance and history with its own mutex, so a transaction's
//! check, balance update and history entry are never observed half-done.

pub mod account;
mod bank;
mod base;
mod config;
mod customer;
pub mod error;
mod history;
mod transaction;

pub use account::{Account, WithdrawalPolicy};
pub use bank::{AccountSummary, Bank, Statement};
pub use base::{AccountNumber, BRANCH_ID, TaxId};
pub use config::BankConfig;
pub use customer::{Address, Customer, CustomerSummary};
pub use error::BankError;
pub use history::{History, HistoryEntry};
pub use transaction::{Receipt, Transaction, TransactionKind};
