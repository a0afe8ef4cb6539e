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

//! Customers and their contact data.

use crate::account::Account;
use crate::base::{AccountNumber, TaxId};
use crate::error::BankError;
use crate::transaction::{Receipt, Transaction};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Structured postal address, composed into a single line at registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub number: String,
    pub district: String,
    pub city: String,
    pub state: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} - {} - {}/{}",
            self.street.trim(),
            self.number.trim(),
            self.district.trim(),
            self.city.trim(),
            self.state.trim().to_uppercase()
        )
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

/// An individual customer.
///
/// Owns the list of accounts opened in their name. Accounts are shared with
/// the bank's account directory, hence the [`Arc`].
#[derive(Debug)]
pub struct Customer {
    full_name: String,
    birth_date: String,
    tax_id: TaxId,
    address: String,
    accounts: Vec<Arc<Account>>,
}

/// Listing view of a [`Customer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSummary {
    pub full_name: String,
    pub birth_date: String,
    pub tax_id: TaxId,
    pub address: String,
    pub accounts: usize,
}

impl Customer {
    pub fn new(
        full_name: impl Into<String>,
        birth_date: impl Into<String>,
        tax_id: TaxId,
        address: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            birth_date: birth_date.into(),
            tax_id,
            address: address.into(),
            accounts: Vec::new(),
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    pub fn tax_id(&self) -> &TaxId {
        &self.tax_id
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Accounts in the order they were opened.
    pub fn accounts(&self) -> &[Arc<Account>] {
        &self.accounts
    }

    /// First account opened, the one the console operates on.
    pub fn primary_account(&self) -> Option<&Arc<Account>> {
        self.accounts.first()
    }

    pub fn account(&self, number: AccountNumber) -> Option<&Arc<Account>> {
        self.accounts.iter().find(|account| account.number() == number)
    }

    /// Must be called once, when the account is opened.
    pub fn add_account(&mut self, account: Arc<Account>) {
        self.accounts.push(account);
    }

    /// Applies `transaction` to one of this customer's accounts.
    ///
    /// # Errors
    ///
    /// Propagates the refusal from [`Transaction::register`].
    pub fn perform_transaction(
        &self,
        account: &Account,
        transaction: &Transaction,
    ) -> Result<Receipt, BankError> {
        transaction.register(account)
    }

    pub fn summary(&self) -> CustomerSummary {
        CustomerSummary {
            full_name: self.full_name.clone(),
            birth_date: self.birth_date.clone(),
            tax_id: self.tax_id.clone(),
            address: self.address.clone(),
            accounts: self.accounts.len(),
        }
    }
}
