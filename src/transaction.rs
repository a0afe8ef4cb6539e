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

//! Money movements.
//!
//! A [`Transaction`] is built by the caller, applied to an account once via
//! [`Transaction::register`], and then dropped. Its only lasting trace is the
//! history entry written when the account accepts it.

use crate::account::Account;
use crate::base::AccountNumber;
use crate::error::BankError;
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => f.write_str("Deposit"),
            Self::Withdrawal => f.write_str("Withdrawal"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Transaction {
    Deposit { amount: Decimal },
    Withdrawal { amount: Decimal },
}

/// Confirmation of an applied transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub account: AccountNumber,
    pub kind: TransactionKind,
    pub amount: Decimal,
    /// Balance right after the transaction.
    pub balance: Decimal,
    pub timestamp: DateTime<Local>,
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount: Decimal) -> Self {
        match kind {
            TransactionKind::Deposit => Self::Deposit { amount },
            TransactionKind::Withdrawal => Self::Withdrawal { amount },
        }
    }

    pub fn kind(&self) -> TransactionKind {
        match self {
            Self::Deposit { .. } => TransactionKind::Deposit,
            Self::Withdrawal { .. } => TransactionKind::Withdrawal,
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Self::Deposit { amount } | Self::Withdrawal { amount } => *amount,
        }
    }

    /// Applies the transaction to `account` and records it in the account's history.
    ///
    /// The balance change and the history entry happen under a single lock
    /// acquisition: either both are observed or neither is.
    ///
    /// # Errors
    ///
    /// - [`BankError::InvalidAmount`] - Amount is zero or negative.
    /// - [`BankError::BalanceOverflow`] - Deposit would overflow the balance.
    /// - [`BankError::InsufficientFunds`] - Withdrawal exceeds the balance.
    /// - [`BankError::LimitExceeded`] / [`BankError::WithdrawalCountExceeded`] -
    ///   Refused by the account's [`WithdrawalPolicy`](crate::WithdrawalPolicy).
    ///
    /// No history entry is written when the transaction is refused.
    pub fn register(&self, account: &Account) -> Result<Receipt, BankError> {
        let mut data = account.lock();

        let outcome = match self {
            Self::Deposit { amount } => data.deposit(*amount),
            Self::Withdrawal { amount } => data.withdraw(*amount),
        };
        if let Err(error) = outcome {
            tracing::warn!(
                account = %data.number,
                kind = %self.kind(),
                amount = %self.amount(),
                %error,
                "transaction refused"
            );
            return Err(error);
        }

        let timestamp = Local::now();
        data.record(self.kind(), self.amount(), timestamp);
        tracing::info!(
            account = %data.number,
            kind = %self.kind(),
            amount = %self.amount(),
            balance = %data.balance,
            "transaction applied"
        );

        Ok(Receipt {
            account: data.number,
            kind: self.kind(),
            amount: self.amount(),
            balance: data.balance,
            timestamp,
        })
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {:.2}", self.kind(), self.amount())
    }
}
