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

//! Benchmarks for the bank.
//!
//! Run with: cargo bench
//!
//! Benchmarks include:
//! - Deposits and withdrawals through the bank directory
//! - Customer lookup as the directory grows
//! - Statement snapshots of long histories

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use retail_bank::{Bank, BankConfig, TransactionKind};
use rust_decimal::Decimal;

// =============================================================================
// Helper Functions
// =============================================================================

fn tax_id(n: usize) -> String {
    format!("{:011}", n)
}

fn bank_with_customers(count: usize, config: BankConfig) -> Bank {
    let mut bank = Bank::with_config(config);
    for n in 0..count {
        bank.register_customer("Customer", "01/01/1990", &tax_id(n), "Rua A")
            .unwrap();
        bank.open_checking_account(&tax_id(n)).unwrap();
    }
    bank
}

fn unlimited() -> BankConfig {
    BankConfig {
        per_withdrawal_limit: Decimal::MAX,
        max_withdrawals: u32::MAX,
    }
}

// =============================================================================
// Transaction Benchmarks
// =============================================================================

fn bench_deposit(c: &mut Criterion) {
    let bank = bank_with_customers(1, BankConfig::default());
    let id = tax_id(0);
    let amount = Decimal::new(1000, 2);

    c.bench_function("deposit", |b| {
        b.iter(|| {
            bank.apply_transaction(black_box(&id), TransactionKind::Deposit, black_box(amount))
                .unwrap()
        })
    });
}

fn bench_deposit_withdraw_cycle(c: &mut Criterion) {
    let bank = bank_with_customers(1, unlimited());
    let id = tax_id(0);
    let amount = Decimal::new(1000, 2);

    c.bench_function("deposit_withdraw_cycle", |b| {
        b.iter(|| {
            bank.apply_transaction(&id, TransactionKind::Deposit, amount)
                .unwrap();
            bank.apply_transaction(&id, TransactionKind::Withdrawal, amount)
                .unwrap()
        })
    });
}

fn bench_refused_withdrawal(c: &mut Criterion) {
    let bank = bank_with_customers(1, BankConfig::default());
    let id = tax_id(0);
    let amount = Decimal::new(50001, 2);

    c.bench_function("refused_withdrawal", |b| {
        b.iter(|| {
            let _ = bank.apply_transaction(&id, TransactionKind::Withdrawal, black_box(amount));
        })
    });
}

// =============================================================================
// Directory Benchmarks
// =============================================================================

fn bench_lookup_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup_scaling");

    for customers in [10, 100, 1_000] {
        let bank = bank_with_customers(customers, BankConfig::default());
        let last = tax_id(customers - 1);
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(customers), &last, |b, id| {
            b.iter(|| bank.find_customer(black_box(id)).is_some())
        });
    }

    group.finish();
}

fn bench_statement(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement");

    for entries in [10, 1_000] {
        let bank = bank_with_customers(1, unlimited());
        let id = tax_id(0);
        for _ in 0..entries {
            bank.apply_transaction(&id, TransactionKind::Deposit, Decimal::ONE)
                .unwrap();
        }
        group.bench_with_input(BenchmarkId::from_parameter(entries), &id, |b, id| {
            b.iter(|| bank.statement(black_box(id)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    transactions,
    bench_deposit,
    bench_deposit_withdraw_cycle,
    bench_refused_withdrawal,
);

criterion_group!(directory, bench_lookup_scaling, bench_statement,);

criterion_main!(transactions, directory);
