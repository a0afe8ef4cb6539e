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

//! Account management.
//!
//! Every account shares the same deposit and withdrawal rules; what varies is
//! its [`WithdrawalPolicy`]. A checking account is simply an account opened
//! with [`WithdrawalPolicy::Limited`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use retail_bank::{Account, AccountNumber, TaxId, Transaction};
//!
//! let owner = TaxId::parse("111.222.333-44").unwrap();
//! let account = Account::checking(AccountNumber(1), owner, "Ana Souza", dec!(500.00), 3);
//! Transaction::Deposit { amount: dec!(100.00) }.register(&account).unwrap();
//! assert_eq!(account.balance(), dec!(100.00));
//! ```

use crate::base::{AccountNumber, BRANCH_ID, TaxId};
use crate::error::BankError;
use crate::history::History;
use crate::transaction::TransactionKind;
use chrono::{DateTime, Local};
use parking_lot::{Mutex, MutexGuard};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

/// Extra refusal conditions layered on top of the balance rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WithdrawalPolicy {
    /// Only the balance rule applies.
    Unrestricted,
    /// Checking account: per-withdrawal ceiling and a cap on the number of
    /// withdrawals. The cap counts every withdrawal since the account was
    /// opened; it never resets.
    Limited {
        per_withdrawal_limit: Decimal,
        max_withdrawals: u32,
    },
}

impl WithdrawalPolicy {
    /// Checks run in order: ceiling first, then count.
    fn check(&self, amount: Decimal, withdrawals_so_far: usize) -> Result<(), BankError> {
        match *self {
            Self::Unrestricted => Ok(()),
            Self::Limited {
                per_withdrawal_limit,
                max_withdrawals,
            } => {
                if amount > per_withdrawal_limit {
                    return Err(BankError::LimitExceeded);
                }
                if withdrawals_so_far >= max_withdrawals as usize {
                    return Err(BankError::WithdrawalCountExceeded);
                }
                Ok(())
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unrestricted => "standard",
            Self::Limited { .. } => "checking",
        }
    }
}

#[derive(Debug)]
pub(crate) struct AccountData {
    pub(crate) number: AccountNumber,
    pub(crate) owner: TaxId,
    pub(crate) owner_name: String,
    pub(crate) balance: Decimal,
    pub(crate) policy: WithdrawalPolicy,
    history: History,
}

impl AccountData {
    fn new(
        number: AccountNumber,
        owner: TaxId,
        owner_name: String,
        policy: WithdrawalPolicy,
    ) -> Self {
        Self {
            number,
            owner,
            owner_name,
            balance: Decimal::ZERO,
            policy,
            history: History::new(),
        }
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.balance >= Decimal::ZERO,
            "Invariant violated: balance went negative: {}",
            self.balance
        );
    }

    /// Increases balance. Does not touch history.
    pub(crate) fn deposit(&mut self, amount: Decimal) -> Result<(), BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount);
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BankError::BalanceOverflow)?;
        self.assert_invariants();
        Ok(())
    }

    /// Decreases balance. Does not touch history.
    pub(crate) fn withdraw(&mut self, amount: Decimal) -> Result<(), BankError> {
        self.policy
            .check(amount, self.history.count(TransactionKind::Withdrawal))?;
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount);
        }
        if amount > self.balance {
            return Err(BankError::InsufficientFunds);
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(BankError::InsufficientFunds)?;
        self.assert_invariants();
        Ok(())
    }

    pub(crate) fn history(&self) -> &History {
        &self.history
    }

    pub(crate) fn record(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
        timestamp: DateTime<Local>,
    ) {
        self.history.record(kind, amount, timestamp);
        debug_assert_eq!(
            self.balance,
            self.history.net(),
            "Invariant violated: balance diverged from history"
        );
    }
}

/// Bank account.
///
/// Balance and history are only changed through
/// [`Transaction::register`](crate::Transaction::register), which keeps
/// `balance == deposits - withdrawals` over the recorded history.
///
/// Accounts built with [`Account::new`] or [`Account::checking`] are detached:
/// no [`Bank`](crate::Bank) lists them and their number is not reserved.
/// Use [`Bank::open_account`](crate::Bank::open_account) to get a numbered
/// account in the directory.
#[derive(Debug)]
pub struct Account {
    inner: Mutex<AccountData>,
}

impl Account {
    const DECIMAL_PRECISION: u32 = 2;

    /// Builds a detached account. `number` is taken as given and may collide
    /// with numbers handed out by a [`Bank`](crate::Bank).
    pub fn new(
        number: AccountNumber,
        owner: TaxId,
        owner_name: impl Into<String>,
        policy: WithdrawalPolicy,
    ) -> Self {
        Self {
            inner: Mutex::new(AccountData::new(number, owner, owner_name.into(), policy)),
        }
    }

    /// Opens a checking account with the given ceiling and withdrawal cap.
    pub fn checking(
        number: AccountNumber,
        owner: TaxId,
        owner_name: impl Into<String>,
        per_withdrawal_limit: Decimal,
        max_withdrawals: u32,
    ) -> Self {
        Self::new(
            number,
            owner,
            owner_name,
            WithdrawalPolicy::Limited {
                per_withdrawal_limit,
                max_withdrawals,
            },
        )
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, AccountData> {
        self.inner.lock()
    }

    pub fn number(&self) -> AccountNumber {
        self.inner.lock().number
    }

    pub fn branch(&self) -> &'static str {
        BRANCH_ID
    }

    /// Tax id of the owning customer.
    pub fn owner(&self) -> TaxId {
        self.inner.lock().owner.clone()
    }

    pub fn owner_name(&self) -> String {
        self.inner.lock().owner_name.clone()
    }

    pub fn balance(&self) -> Decimal {
        self.inner.lock().balance
    }

    pub fn policy(&self) -> WithdrawalPolicy {
        self.inner.lock().policy
    }

    /// Snapshot of the history.
    pub fn history(&self) -> History {
        self.inner.lock().history.clone()
    }

    pub fn withdrawal_count(&self) -> usize {
        self.inner.lock().history.count(TransactionKind::Withdrawal)
    }
}

impl Serialize for Account {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let data = self.inner.lock();
        let mut state = serializer.serialize_struct("Account", 5)?;
        state.serialize_field("number", &data.number)?;
        state.serialize_field("branch", BRANCH_ID)?;
        state.serialize_field("owner", &data.owner)?;
        state.serialize_field("holder", &data.owner_name)?;
        state.serialize_field(
            "balance",
            &data.balance.round_dp(Account::DECIMAL_PRECISION),
        )?;
        state.end()
    }
}
