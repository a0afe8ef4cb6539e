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

use clap::Parser;
use csv::Writer;
use retail_bank::{Address, Bank, BankConfig, BankError, Statement, TaxId, TransactionKind};
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::process;
use std::str::FromStr;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Retail Bank - Interactive console
///
/// Registers customers, opens checking accounts and records deposits and
/// withdrawals. All state lives in memory and is lost on exit.
#[derive(Parser, Debug)]
#[command(name = "retail-bank")]
#[command(about = "An interactive console for a minimal retail bank", long_about = None)]
struct Args {
    /// Per-withdrawal limit for new checking accounts
    #[arg(long, default_value_t = BankConfig::DEFAULT_WITHDRAWAL_LIMIT)]
    limit: Decimal,

    /// Maximum number of withdrawals for new checking accounts
    #[arg(long, default_value_t = BankConfig::DEFAULT_MAX_WITHDRAWALS)]
    max_withdrawals: u32,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let mut bank = Bank::with_config(BankConfig {
        per_withdrawal_limit: args.limit,
        max_withdrawals: args.max_withdrawals,
    });
    tracing::info!(limit = %args.limit, max_withdrawals = args.max_withdrawals, "bank ready");

    let stdin = io::stdin();
    if let Err(e) = run(&mut bank, stdin.lock(), io::stdout()) {
        eprintln!("Console error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so they never interleave with the menu.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

const MENU: &str = "
[1] Deposit
[2] Withdraw
[3] Statement
[4] Register customer
[5] Open checking account
[6] List customers
[7] List accounts
[8] Export accounts (CSV)
[0] Exit
--> ";

struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Prints `label` and reads one trimmed line. `None` on end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Runs the menu loop until the user exits or input ends.
///
/// # Errors
///
/// Returns an I/O error if reading input or writing output fails. Bank
/// refusals are printed and never end the loop.
pub fn run<R: BufRead, W: Write>(bank: &mut Bank, input: R, output: W) -> io::Result<()> {
    let mut console = Console { input, output };

    loop {
        let Some(option) = console.prompt(MENU)? else {
            break;
        };

        let keep_going = match option.as_str() {
            "1" => transact(bank, &mut console, TransactionKind::Deposit)?,
            "2" => transact(bank, &mut console, TransactionKind::Withdrawal)?,
            "3" => show_statement(bank, &mut console)?,
            "4" => register_customer(bank, &mut console)?,
            "5" => open_account(bank, &mut console)?,
            "6" => {
                list_customers(bank, &mut console.output)?;
                true
            }
            "7" => {
                list_accounts(bank, &mut console.output)?;
                true
            }
            "8" => {
                if let Err(e) = write_accounts(bank, &mut console.output) {
                    writeln!(console.output, "Export failed: {}", e)?;
                }
                true
            }
            "0" => {
                writeln!(console.output, "\nThank you for banking with us. Goodbye!")?;
                break;
            }
            _ => {
                writeln!(console.output, "Invalid option, please choose again.")?;
                true
            }
        };
        if !keep_going {
            break;
        }
    }

    console.output.flush()
}

/// Accepts both `10.50` and `10,50`.
fn parse_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(&raw.trim().replace(',', ".")).ok()
}

fn transact<R: BufRead, W: Write>(
    bank: &Bank,
    console: &mut Console<R, W>,
    kind: TransactionKind,
) -> io::Result<bool> {
    let Some(tax_id) = console.prompt("Customer tax id: ")? else {
        return Ok(false);
    };
    if bank.find_customer(&tax_id).is_none() {
        writeln!(console.output, "Customer not found!")?;
        return Ok(true);
    }

    let label = match kind {
        TransactionKind::Deposit => "Amount to deposit: ",
        TransactionKind::Withdrawal => "Amount to withdraw: ",
    };
    let Some(raw) = console.prompt(label)? else {
        return Ok(false);
    };
    let Some(amount) = parse_amount(&raw) else {
        writeln!(console.output, "Invalid amount.")?;
        return Ok(true);
    };

    match bank.apply_transaction(&tax_id, kind, amount) {
        Ok(receipt) => writeln!(
            console.output,
            "{} of R$ {:.2} completed. Balance: R$ {:.2}",
            receipt.kind, receipt.amount, receipt.balance
        )?,
        Err(e) => writeln!(console.output, "Operation refused: {}", e)?,
    }
    Ok(true)
}

fn show_statement<R: BufRead, W: Write>(
    bank: &Bank,
    console: &mut Console<R, W>,
) -> io::Result<bool> {
    let Some(tax_id) = console.prompt("Customer tax id: ")? else {
        return Ok(false);
    };
    match bank.statement(&tax_id) {
        Ok(statement) => write_statement(&statement, &mut console.output)?,
        Err(e) => writeln!(console.output, "Operation refused: {}", e)?,
    }
    Ok(true)
}

fn write_statement<W: Write>(statement: &Statement, output: &mut W) -> io::Result<()> {
    writeln!(output, "\n================ STATEMENT ================")?;
    writeln!(output, "Branch: {}  Account: {}\n", statement.branch, statement.account)?;
    if statement.entries.is_empty() {
        writeln!(output, "No transactions recorded.")?;
    }
    for entry in &statement.entries {
        writeln!(
            output,
            "{} - {}: R$ {:.2}",
            entry.timestamp.format("%d/%m/%Y %H:%M:%S"),
            entry.kind,
            entry.amount
        )?;
    }
    writeln!(output, "\nBalance: R$ {:.2}", statement.balance)?;
    writeln!(output, "===========================================")
}

fn register_customer<R: BufRead, W: Write>(
    bank: &mut Bank,
    console: &mut Console<R, W>,
) -> io::Result<bool> {
    writeln!(console.output, "\n=== Register customer ===")?;

    macro_rules! ask {
        ($label:expr) => {
            match console.prompt($label)? {
                Some(answer) => answer,
                None => return Ok(false),
            }
        };
    }

    let name = ask!("Full name: ");
    let birth_date = ask!("Birth date (DD/MM/YYYY): ");
    let tax_id = ask!("Tax id (with or without punctuation): ");

    // Refuse before asking for the address.
    let refusal = match TaxId::parse(&tax_id) {
        Err(e) => Some(e),
        Ok(_) if bank.find_customer(&tax_id).is_some() => Some(BankError::DuplicateTaxId),
        Ok(_) => None,
    };
    if let Some(e) = refusal {
        writeln!(console.output, "Operation refused: {}", e)?;
        return Ok(true);
    }

    let street = ask!("Street: ");
    let number = ask!("Number: ");
    let district = ask!("District: ");
    let city = ask!("City: ");
    let state = ask!("State (abbreviation): ");

    let address = Address {
        street,
        number,
        district,
        city,
        state,
    };
    match bank.register_customer(name, birth_date, &tax_id, address) {
        Ok(_) => writeln!(console.output, "Customer registered!")?,
        Err(e) => writeln!(console.output, "Operation refused: {}", e)?,
    }
    Ok(true)
}

fn open_account<R: BufRead, W: Write>(
    bank: &mut Bank,
    console: &mut Console<R, W>,
) -> io::Result<bool> {
    let Some(tax_id) = console.prompt("Account holder tax id: ")? else {
        return Ok(false);
    };
    match bank.open_checking_account(&tax_id) {
        Ok(account) => writeln!(
            console.output,
            "Account opened! Branch: {}, Account: {}, Holder: {}",
            account.branch(),
            account.number(),
            account.owner_name()
        )?,
        Err(e) => writeln!(console.output, "Operation refused: {}", e)?,
    }
    Ok(true)
}

fn list_customers<W: Write>(bank: &Bank, output: &mut W) -> io::Result<()> {
    let customers = bank.list_customers();
    if customers.is_empty() {
        return writeln!(output, "\nNo customers registered yet.");
    }
    writeln!(output, "\n=== Customers ===")?;
    for (i, customer) in customers.iter().enumerate() {
        writeln!(output, "[{}] Name: {}", i + 1, customer.full_name)?;
        writeln!(output, "    Tax id: {}", customer.tax_id)?;
        writeln!(output, "    Birth date: {}", customer.birth_date)?;
        writeln!(output, "    Address: {}", customer.address)?;
        writeln!(output, "{}", "-".repeat(40))?;
    }
    Ok(())
}

fn list_accounts<W: Write>(bank: &Bank, output: &mut W) -> io::Result<()> {
    let accounts = bank.list_accounts();
    if accounts.is_empty() {
        return writeln!(output, "\nNo accounts opened yet.");
    }
    writeln!(output, "\n=== Accounts ===")?;
    for (i, account) in accounts.iter().enumerate() {
        writeln!(output, "[{}]", i + 1)?;
        writeln!(output, "Branch:  {}", account.branch)?;
        writeln!(output, "Account: {}", account.number)?;
        writeln!(output, "Holder:  {}", account.holder)?;
        writeln!(output, "{}", "-".repeat(40))?;
    }
    Ok(())
}

/// Write account summaries to a CSV writer.
///
/// # CSV Format
///
/// Columns: `number, branch, owner, holder, kind, balance, withdrawals`
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_accounts<W: Write>(bank: &Bank, writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    for account in bank.list_accounts() {
        wtr.serialize(&account)?;
    }

    wtr.flush()?;
    Ok(())
}
