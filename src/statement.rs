use crate::transaction::Transaction;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use serde::{Deserialize, Serialize};

/// Account summary decoded from the `074` record.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Header {
    pub account_number: String,
    pub account_name: String,
    pub opening_balance_date: NaiveDateTime,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
    pub debit_turnover: Decimal,
    pub credit_turnover: Decimal,
    pub serial_number: u32,
    pub closing_date: NaiveDateTime,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Statement {
    pub header: Header,
    pub transactions: Vec<Transaction>,
}

impl Statement {
    // Sum of the debit amounts as decoded, reversals included with their sign
    pub fn total_debits(&self) -> Decimal {
        self.transactions
            .iter()
            .filter_map(|t| t.debit)
            .fold(Decimal::new(0, 2), |sum, amount| sum + amount)
    }

    pub fn total_credits(&self) -> Decimal {
        self.transactions
            .iter()
            .filter_map(|t| t.credit)
            .fold(Decimal::new(0, 2), |sum, amount| sum + amount)
    }
}
