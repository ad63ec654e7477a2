use docopt::Docopt;
use encoding_rs::Encoding;
use serde::Deserialize;
use std::fs::File;

use libabo::{CurrencyOverlay, CurrencyTable, Parser, Statement};

const USAGE: &str = "
ABO Statement Decoder

Usage:
  abo statement <file> [--currency] [--currency-table=<json>] [--encoding=<label>]
  abo overview <file> [--currency] [--currency-table=<json>] [--encoding=<label>]
  abo (-h | --help)
  abo --version

Options:
  -h --help                         Show this screen.
  --version                         Show version.
  --currency                        Decode transaction currencies with the built-in ISO 4217 table.
  --currency-table=<json>           Decode transaction currencies with a JSON table of
                                    5-digit codes, e.g. {\"00203\": \"CZK\"}.
  --encoding=<label>                Character encoding of the input [default: windows-1250].
";

#[derive(Debug, Deserialize)]
struct Args {
    cmd_statement: bool,
    cmd_overview: bool,
    arg_file: String,
    flag_currency: bool,
    flag_currency_table: String,
    flag_encoding: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = Docopt::new(USAGE)
        .and_then(|d| {
            d.version(Some(env!("CARGO_PKG_VERSION").to_string()))
                .deserialize()
        })
        .unwrap_or_else(|e| e.exit());

    let parser = build_parser(&args)?;
    let statement = parser.parse(File::open(&args.arg_file)?)?;

    if args.cmd_statement {
        show_statement(&statement)?;
    }

    if args.cmd_overview {
        show_overview(&statement);
    }

    Ok(())
}

fn build_parser(args: &Args) -> Result<Parser, Box<dyn std::error::Error>> {
    let table = if !args.flag_currency_table.is_empty() {
        let table_file = File::open(&args.flag_currency_table)?;
        Some(CurrencyTable::from_json(table_file)?)
    } else if args.flag_currency {
        Some(CurrencyTable::iso4217())
    } else {
        None
    };

    let encoding = Encoding::for_label(args.flag_encoding.as_bytes())
        .ok_or_else(|| format!("unknown encoding {:?}", args.flag_encoding))?;
    let parser = Parser::new().with_encoding(encoding);
    Ok(match table {
        Some(table) => {
            log::info!("decoding currencies with a table of {} codes", table.len());
            parser.with_overlay(CurrencyOverlay::new(table))
        }
        None => parser,
    })
}

fn show_statement(statement: &Statement) -> Result<(), Box<dyn std::error::Error>> {
    let j = serde_json::to_string_pretty(statement)?;
    println!("{}", j);
    Ok(())
}

fn show_overview(statement: &Statement) {
    let header = &statement.header;

    println!("\nABO Statement {} ({})\n", header.serial_number, header.account_number);
    if !header.account_name.is_empty() {
        println!("Account name:     {}", header.account_name);
    }
    println!(
        "Period:           {} - {}",
        header.opening_balance_date.format("%d.%m.%Y"),
        header.closing_date.format("%d.%m.%Y")
    );
    println!("Opening balance:  {}", header.opening_balance);
    println!("Closing balance:  {}", header.closing_balance);
    println!(
        "Debit turnover:   {} (transactions: {})",
        header.debit_turnover,
        statement.total_debits()
    );
    println!(
        "Credit turnover:  {} (transactions: {})",
        header.credit_turnover,
        statement.total_credits()
    );
    println!("Transactions:     {}\n", statement.transactions.len());

    for transaction in &statement.transactions {
        let amount = transaction
            .amount()
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}  {:>14} {:<3}  {:<24} VS {:<10} {}",
            transaction.created_at.format("%d.%m.%Y"),
            amount,
            transaction.currency.as_deref().unwrap_or(""),
            transaction.counter_account,
            transaction.variable_symbol,
            transaction.note,
        );
    }
}
