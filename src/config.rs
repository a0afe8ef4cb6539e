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

//! Bank configuration.

use crate::account::WithdrawalPolicy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Defaults applied when opening checking accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankConfig {
    pub per_withdrawal_limit: Decimal,
    pub max_withdrawals: u32,
}

impl BankConfig {
    pub const DEFAULT_WITHDRAWAL_LIMIT: Decimal = dec!(500.00);
    pub const DEFAULT_MAX_WITHDRAWALS: u32 = 3;

    pub fn checking_policy(&self) -> WithdrawalPolicy {
        WithdrawalPolicy::Limited {
            per_withdrawal_limit: self.per_withdrawal_limit,
            max_withdrawals: self.max_withdrawals,
        }
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            per_withdrawal_limit: Self::DEFAULT_WITHDRAWAL_LIMIT,
            max_withdrawals: Self::DEFAULT_MAX_WITHDRAWALS,
        }
    }
}
