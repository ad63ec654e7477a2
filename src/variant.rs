//! Bank-specific decoding layered over the base `075` layout.
//!
//! Overlays are applied in order to every freshly decoded transaction and may
//! fill in fields the base layout does not cover.

use crate::error::{FieldError, FieldErrorKind};
use crate::field::extract;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

pub trait TransactionOverlay: Send + Sync {
    fn name(&self) -> &str;

    /// Reads extra columns from the raw `075` line into `transaction`.
    fn apply(&self, line: &str, transaction: &mut Transaction) -> Result<(), FieldError>;
}

/// Maps 5-digit zero-padded numeric currency codes to ISO 4217 alpha codes.
#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq)]
#[serde(transparent)]
pub struct CurrencyTable {
    codes: BTreeMap<String, String>,
}

const ISO_4217: &[(&str, &str)] = &[
    ("00036", "AUD"),
    ("00124", "CAD"),
    ("00156", "CNY"),
    ("00203", "CZK"),
    ("00208", "DKK"),
    ("00348", "HUF"),
    ("00392", "JPY"),
    ("00578", "NOK"),
    ("00643", "RUB"),
    ("00752", "SEK"),
    ("00756", "CHF"),
    ("00826", "GBP"),
    ("00840", "USD"),
    ("00946", "RON"),
    ("00949", "TRY"),
    ("00975", "BGN"),
    ("00978", "EUR"),
    ("00980", "UAH"),
    ("00985", "PLN"),
];

impl CurrencyTable {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        CurrencyTable {
            codes: entries
                .into_iter()
                .map(|(code, alpha)| (code.into(), alpha.into()))
                .collect(),
        }
    }

    /// The currencies commonly seen on Czech and Slovak statements.
    pub fn iso4217() -> Self {
        CurrencyTable::new(ISO_4217.iter().copied())
    }

    /// Loads a table from a JSON object such as `{"00203": "CZK"}`.
    pub fn from_json<R: Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }

    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Fills `Transaction::currency` from the numeric code at columns 117..122.
/// A code missing from the table is an error, there is no fallback currency.
#[derive(Clone, Debug)]
pub struct CurrencyOverlay {
    table: CurrencyTable,
}

impl CurrencyOverlay {
    const OFFSET: usize = 117;
    const LENGTH: usize = 5;

    pub fn new(table: CurrencyTable) -> Self {
        CurrencyOverlay { table }
    }
}

impl TransactionOverlay for CurrencyOverlay {
    fn name(&self) -> &str {
        "currency"
    }

    fn apply(&self, line: &str, transaction: &mut Transaction) -> Result<(), FieldError> {
        let code = extract(line, Self::OFFSET, Self::LENGTH);
        match self.table.lookup(code) {
            Some(alpha) => {
                transaction.currency = Some(alpha.to_string());
                Ok(())
            }
            None => Err(FieldError::new(
                "currency",
                FieldErrorKind::UnknownCode(code.to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::decode_transaction;
    use crate::record::tests::transaction_line;

    #[test]
    fn resolves_known_currency() {
        let line = transaction_line("0000000000001", "000000005000", "2");
        let mut t = decode_transaction(&line).unwrap();
        CurrencyOverlay::new(CurrencyTable::iso4217())
            .apply(&line, &mut t)
            .unwrap();
        assert_eq!(t.currency.as_deref(), Some("CZK"));
    }

    #[test]
    fn unknown_currency_is_an_error() {
        let mut line = transaction_line("0000000000001", "000000005000", "2");
        line.replace_range(117..122, "99999");
        let mut t = decode_transaction(&line).unwrap();
        let err = CurrencyOverlay::new(CurrencyTable::iso4217())
            .apply(&line, &mut t)
            .unwrap_err();
        assert_eq!(err.field, "currency");
        assert_eq!(err.kind, FieldErrorKind::UnknownCode("99999".to_string()));
        assert_eq!(t.currency, None);
    }

    #[test]
    fn injected_table_replaces_builtin() {
        let line = transaction_line("0000000000001", "000000005000", "2");
        let mut t = decode_transaction(&line).unwrap();
        let table = CurrencyTable::new(vec![("00203", "XCZ")]);
        CurrencyOverlay::new(table).apply(&line, &mut t).unwrap();
        assert_eq!(t.currency.as_deref(), Some("XCZ"));
    }

    #[test]
    fn loads_table_from_json() {
        let json = r#"{"00203": "CZK", "00978": "EUR"}"#;
        let table = CurrencyTable::from_json(json.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("00978"), Some("EUR"));
        assert_eq!(table.lookup("978"), None);
    }

    #[test]
    fn builtin_codes_are_five_digits() {
        let table = CurrencyTable::iso4217();
        assert!(!table.is_empty());
        for (code, alpha) in ISO_4217 {
            assert_eq!(code.len(), 5);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert_eq!(alpha.len(), 3);
        }
    }
}
