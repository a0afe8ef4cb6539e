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

//! Concurrent access to a shared account.
//!
//! The bank is driven from one thread, but each account carries its own
//! lock. These tests hammer a single account from several threads and check
//! that the balance, history and checking-account caps stay consistent.

use retail_bank::{
    Account, AccountNumber, Bank, BankError, TaxId, Transaction, TransactionKind,
    WithdrawalPolicy,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;

fn shared_checking(limit: Decimal, max_withdrawals: u32) -> Arc<Account> {
    Arc::new(Account::checking(
        AccountNumber(1),
        TaxId::parse("11122233344").unwrap(),
        "Ana Souza",
        limit,
        max_withdrawals,
    ))
}

#[test]
fn concurrent_deposits_are_all_recorded() {
    let account = shared_checking(dec!(500), 3);

    thread::scope(|scope| {
        for _ in 0..THREADS {
            let account = Arc::clone(&account);
            scope.spawn(move || {
                for _ in 0..100 {
                    Transaction::Deposit { amount: dec!(1.25) }
                        .register(&account)
                        .unwrap();
                }
            });
        }
    });

    assert_eq!(account.balance(), dec!(1000.00));
    assert_eq!(account.history().len(), THREADS * 100);
    assert_eq!(account.balance(), account.history().net());
}

#[test]
fn withdrawal_cap_holds_under_contention() {
    let account = shared_checking(dec!(500), 3);
    Transaction::Deposit { amount: dec!(10000) }
        .register(&account)
        .unwrap();

    let accepted: usize = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let account = Arc::clone(&account);
                scope.spawn(move || {
                    (0..10)
                        .filter(|_| {
                            Transaction::Withdrawal { amount: dec!(10) }
                                .register(&account)
                                .is_ok()
                        })
                        .count()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });

    assert_eq!(accepted, 3);
    assert_eq!(account.withdrawal_count(), 3);
    assert_eq!(account.balance(), dec!(9970));
}

#[test]
fn balance_never_overdrawn_under_contention() {
    let account = shared_checking(dec!(500), u32::MAX);
    Transaction::Deposit { amount: dec!(100) }
        .register(&account)
        .unwrap();

    let results: Vec<Result<(), BankError>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let account = Arc::clone(&account);
                scope.spawn(move || {
                    Transaction::Withdrawal { amount: dec!(30) }
                        .register(&account)
                        .map(|_| ())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let accepted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 3);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| *e == BankError::InsufficientFunds)
    );
    assert_eq!(account.balance(), dec!(10));
    assert_eq!(account.history().count(TransactionKind::Withdrawal), 3);
}

#[test]
fn account_listing_is_a_consistent_snapshot() {
    let mut bank = Bank::new();
    bank.register_customer("Ana Souza", "01/02/1990", "11122233344", "Rua A")
        .unwrap();
    let account = bank
        .open_account("11122233344", WithdrawalPolicy::Unrestricted)
        .unwrap();
    Transaction::Deposit { amount: dec!(1000) }
        .register(&account)
        .unwrap();

    thread::scope(|scope| {
        for _ in 0..THREADS {
            let account = Arc::clone(&account);
            scope.spawn(move || {
                for _ in 0..10 {
                    let _ = Transaction::Withdrawal { amount: dec!(10) }.register(&account);
                }
            });
        }
        scope.spawn(|| {
            for _ in 0..200 {
                for summary in bank.list_accounts() {
                    let withdrawn = Decimal::from(summary.withdrawals) * dec!(10);
                    assert_eq!(summary.balance, dec!(1000) - withdrawn);
                }
            }
        });
    });

    assert_eq!(account.balance(), dec!(200));
}
