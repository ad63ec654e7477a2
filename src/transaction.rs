use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One `075` record plus whatever `076`/`078`/`079` records followed it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Transaction {
    pub receipt_id: String,
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
    pub variable_symbol: String,
    pub constant_symbol: String,
    pub specific_symbol: String,
    pub counter_account: String,
    pub note: String,
    pub created_at: NaiveDateTime,
    pub valuation_date: Option<NaiveDateTime>,
    pub currency: Option<String>,
    pub message_start: Option<String>,
    pub message_end: Option<String>,
    pub additional_information: Option<AdditionalInformation>,
}

/// Deduction details carried by a `076` record.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AdditionalInformation {
    pub transfer_id: String,
    pub deducted_at: NaiveDateTime,
    pub counter_party_name: String,
}

impl Transaction {
    /// The signed amount regardless of which side it was posted to. Credits
    /// are positive, debits negative.
    pub fn amount(&self) -> Option<Decimal> {
        match (self.debit, self.credit) {
            (Some(debit), _) => Some(-debit),
            (None, Some(credit)) => Some(credit),
            (None, None) => None,
        }
    }
}
