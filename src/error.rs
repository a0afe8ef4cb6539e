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

//! Error types for bank operations.

use thiserror::Error;

/// Refusals reported by the bank.
///
/// None of these are fatal: each is detected where the violated rule lives
/// and leaves balances, histories and directories untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    /// Amount is zero or negative
    #[error("invalid amount (must be positive)")]
    InvalidAmount,

    /// Deposit would push the balance past the largest representable amount
    #[error("amount would overflow the balance")]
    BalanceOverflow,

    /// Withdrawal would exceed the balance
    #[error("insufficient funds")]
    InsufficientFunds,

    /// Withdrawal exceeds the per-withdrawal ceiling
    #[error("withdrawal exceeds the per-withdrawal limit")]
    LimitExceeded,

    /// Account already reached its maximum number of withdrawals
    #[error("maximum number of withdrawals exceeded")]
    WithdrawalCountExceeded,

    /// Another customer is registered with the same tax id
    #[error("a customer with this tax id already exists")]
    DuplicateTaxId,

    /// Tax id has no digits
    #[error("invalid tax id")]
    InvalidTaxId,

    /// No customer matches the tax id
    #[error("customer not found")]
    CustomerNotFound,

    /// Customer has no (matching) account
    #[error("customer has no account")]
    NoAccount,
}
