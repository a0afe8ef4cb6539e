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

//! Per-account transaction history.
//!
//! The history is an append-only log: entries are pushed in the order the
//! transactions were applied and are never edited or removed.

use crate::transaction::TransactionKind;
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::Serialize;

/// A completed transaction as recorded on an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
        timestamp: DateTime<Local>,
    ) {
        self.entries.push(HistoryEntry {
            kind,
            amount,
            timestamp,
        });
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries of the given kind.
    pub fn count(&self, kind: TransactionKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }

    /// Sum of deposits minus sum of withdrawals.
    pub fn net(&self) -> Decimal {
        self.entries
            .iter()
            .map(|entry| match entry.kind {
                TransactionKind::Deposit => entry.amount,
                TransactionKind::Withdrawal => -entry.amount,
            })
            .sum()
    }
}
