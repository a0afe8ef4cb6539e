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

//! Customer and account directory.
//!
//! The [`Bank`] owns every customer and every account for the lifetime of the
//! process. All operations the console offers go through it:
//!
//! - **Registration**: adds a customer keyed by normalized tax id.
//! - **Account opening**: creates a numbered account for an existing customer.
//! - **Transactions**: deposits and withdrawals on a customer's account.
//! - **Statements and listings**: read-only views of the directory.
//!
//! # Example
//!
//! ```
//! use retail_bank::{Bank, TransactionKind};
//! use rust_decimal_macros::dec;
//!
//! let mut bank = Bank::new();
//! bank.register_customer("Ana Souza", "01/02/1990", "111.222.333-44", "Rua A, 10 - Centro - Recife/PE")
//!     .unwrap();
//! bank.open_checking_account("11122233344").unwrap();
//!
//! let receipt = bank
//!     .apply_transaction("11122233344", TransactionKind::Deposit, dec!(100.00))
//!     .unwrap();
//! assert_eq!(receipt.balance, dec!(100.00));
//! ```

use crate::account::{Account, WithdrawalPolicy};
use crate::base::{AccountNumber, BRANCH_ID, TaxId};
use crate::config::BankConfig;
use crate::customer::{Customer, CustomerSummary};
use crate::error::BankError;
use crate::history::HistoryEntry;
use crate::transaction::{Receipt, Transaction, TransactionKind};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

/// Listing view of an [`Account`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub number: AccountNumber,
    pub branch: &'static str,
    pub owner: TaxId,
    pub holder: String,
    pub kind: &'static str,
    pub balance: Decimal,
    pub withdrawals: usize,
}

impl AccountSummary {
    fn of(account: &Account) -> Self {
        // One lock acquisition, so balance and withdrawal count agree.
        let data = account.lock();
        Self {
            number: data.number,
            branch: BRANCH_ID,
            owner: data.owner.clone(),
            holder: data.owner_name.clone(),
            kind: data.policy.label(),
            balance: data.balance,
            withdrawals: data.history().count(TransactionKind::Withdrawal),
        }
    }
}

/// Chronological history of an account plus its current balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    pub account: AccountNumber,
    pub branch: &'static str,
    pub entries: Vec<HistoryEntry>,
    pub balance: Decimal,
}

impl Statement {
    fn of(account: &Account) -> Self {
        // Entries and balance come from the same lock acquisition.
        let data = account.lock();
        Self {
            account: data.number,
            branch: BRANCH_ID,
            entries: data.history().entries().to_vec(),
            balance: data.balance,
        }
    }
}

/// In-memory bank: customers, accounts and account numbering.
///
/// # Invariants
///
/// - Tax ids are unique across customers.
/// - Account numbers are `1..=n` in opening order and never reused.
/// - Every account appears both here and in its owner's account list.
#[derive(Debug, Default)]
pub struct Bank {
    config: BankConfig,
    /// Customers in registration order.
    customers: Vec<Customer>,
    /// Accounts in opening order; position `i` holds number `i + 1`.
    accounts: Vec<Arc<Account>>,
}

impl Bank {
    /// Creates an empty bank with the default checking-account rules.
    pub fn new() -> Self {
        Self::with_config(BankConfig::default())
    }

    pub fn with_config(config: BankConfig) -> Self {
        Bank {
            config,
            customers: Vec::new(),
            accounts: Vec::new(),
        }
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// Registers a new customer.
    ///
    /// # Errors
    ///
    /// - [`BankError::InvalidTaxId`] - `tax_id` has no digits.
    /// - [`BankError::DuplicateTaxId`] - A customer with the same digits exists.
    pub fn register_customer(
        &mut self,
        full_name: impl Into<String>,
        birth_date: impl Into<String>,
        tax_id: &str,
        address: impl Into<String>,
    ) -> Result<&Customer, BankError> {
        let tax_id = TaxId::parse(tax_id)?;
        if self.position(&tax_id).is_some() {
            tracing::warn!(%tax_id, "duplicate tax id");
            return Err(BankError::DuplicateTaxId);
        }

        let customer = Customer::new(full_name, birth_date, tax_id, address);
        tracing::info!(
            tax_id = %customer.tax_id(),
            name = customer.full_name(),
            "customer registered"
        );
        self.customers.push(customer);
        Ok(&self.customers[self.customers.len() - 1])
    }

    /// Looks up a customer by tax id, ignoring punctuation.
    pub fn find_customer(&self, tax_id: &str) -> Option<&Customer> {
        let tax_id = TaxId::parse(tax_id).ok()?;
        let found = self.position(&tax_id).map(|index| &self.customers[index]);
        tracing::debug!(%tax_id, found = found.is_some(), "customer lookup");
        found
    }

    fn position(&self, tax_id: &TaxId) -> Option<usize> {
        self.customers
            .iter()
            .position(|customer| customer.tax_id() == tax_id)
    }

    /// Number the next opened account will get.
    pub fn next_account_number(&self) -> AccountNumber {
        AccountNumber(self.accounts.len() as u32 + 1)
    }

    /// Opens an account with the given policy for an existing customer.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::CustomerNotFound`] if no customer matches; the
    /// directory and numbering are left unchanged.
    pub fn open_account(
        &mut self,
        tax_id: &str,
        policy: WithdrawalPolicy,
    ) -> Result<Arc<Account>, BankError> {
        let index = TaxId::parse(tax_id)
            .ok()
            .and_then(|tax_id| self.position(&tax_id))
            .ok_or(BankError::CustomerNotFound)?;

        let number = self.next_account_number();
        let customer = &mut self.customers[index];
        let account = Arc::new(Account::new(
            number,
            customer.tax_id().clone(),
            customer.full_name(),
            policy,
        ));
        customer.add_account(Arc::clone(&account));
        self.accounts.push(Arc::clone(&account));

        tracing::info!(
            account = %number,
            owner = %account.owner(),
            kind = policy.label(),
            "account opened"
        );
        Ok(account)
    }

    /// Opens a checking account with the configured limit and withdrawal cap.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::CustomerNotFound`] if no customer matches.
    pub fn open_checking_account(&mut self, tax_id: &str) -> Result<Arc<Account>, BankError> {
        let policy = self.config.checking_policy();
        self.open_account(tax_id, policy)
    }

    /// Opens a checking account with explicit limit and withdrawal cap.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::CustomerNotFound`] if no customer matches.
    pub fn open_checking_account_with(
        &mut self,
        tax_id: &str,
        per_withdrawal_limit: Decimal,
        max_withdrawals: u32,
    ) -> Result<Arc<Account>, BankError> {
        self.open_account(
            tax_id,
            WithdrawalPolicy::Limited {
                per_withdrawal_limit,
                max_withdrawals,
            },
        )
    }

    /// Deposits into or withdraws from the customer's primary account.
    ///
    /// # Errors
    ///
    /// - [`BankError::CustomerNotFound`] - No customer matches `tax_id`.
    /// - [`BankError::NoAccount`] - The customer has not opened an account.
    /// - Any refusal from [`Transaction::register`].
    pub fn apply_transaction(
        &self,
        tax_id: &str,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<Receipt, BankError> {
        let customer = self.customer(tax_id)?;
        let account = customer.primary_account().ok_or(BankError::NoAccount)?;
        customer.perform_transaction(account, &Transaction::new(kind, amount))
    }

    /// Like [`Bank::apply_transaction`], on a specific account of the customer.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::NoAccount`] if the customer does not own `number`.
    pub fn apply_transaction_to(
        &self,
        tax_id: &str,
        number: AccountNumber,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<Receipt, BankError> {
        let customer = self.customer(tax_id)?;
        let account = customer.account(number).ok_or(BankError::NoAccount)?;
        customer.perform_transaction(account, &Transaction::new(kind, amount))
    }

    /// Statement of the customer's primary account.
    ///
    /// # Errors
    ///
    /// - [`BankError::CustomerNotFound`] - No customer matches `tax_id`.
    /// - [`BankError::NoAccount`] - The customer has not opened an account.
    pub fn statement(&self, tax_id: &str) -> Result<Statement, BankError> {
        let customer = self.customer(tax_id)?;
        let account = customer.primary_account().ok_or(BankError::NoAccount)?;
        Ok(Statement::of(account))
    }

    /// Statement of a specific account of the customer.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::NoAccount`] if the customer does not own `number`.
    pub fn statement_for(
        &self,
        tax_id: &str,
        number: AccountNumber,
    ) -> Result<Statement, BankError> {
        let customer = self.customer(tax_id)?;
        let account = customer.account(number).ok_or(BankError::NoAccount)?;
        Ok(Statement::of(account))
    }

    fn customer(&self, tax_id: &str) -> Result<&Customer, BankError> {
        self.find_customer(tax_id).ok_or(BankError::CustomerNotFound)
    }

    /// Customers in registration order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Accounts in opening order.
    pub fn accounts(&self) -> &[Arc<Account>] {
        &self.accounts
    }

    pub fn list_customers(&self) -> Vec<CustomerSummary> {
        self.customers.iter().map(Customer::summary).collect()
    }

    pub fn list_accounts(&self) -> Vec<AccountSummary> {
        self.accounts
            .iter()
            .map(|account| AccountSummary::of(account))
            .collect()
    }
}
