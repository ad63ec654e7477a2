//! Column layouts of the individual ABO record types.
//!
//! Each decoder maps one line to its domain value and knows nothing about the
//! lines around it; sequencing lives in the parser.

use crate::error::FieldError;
use crate::field::{
    decode_amount, decode_date, decode_integer, decode_minor_units, decode_optional_date,
    extract, extract_rest, strip_leading_zeros, trim_trailing,
};
use crate::statement::Header;
use crate::transaction::{AdditionalInformation, Transaction};
use log::debug;
use rust_decimal::Decimal;

/// How the amount of a `075` record is posted, taken from the posting code
/// column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Posting {
    Debit,
    Credit,
    DebitReversal,
    CreditReversal,
}

impl Posting {
    pub fn from_code(code: &str) -> Option<Posting> {
        match code {
            "1" => Some(Posting::Debit),
            "2" => Some(Posting::Credit),
            "4" => Some(Posting::DebitReversal),
            "5" => Some(Posting::CreditReversal),
            _ => None,
        }
    }

    fn post(self, amount: Decimal, transaction: &mut Transaction) {
        match self {
            Posting::Debit => transaction.debit = Some(amount),
            Posting::Credit => transaction.credit = Some(amount),
            Posting::DebitReversal => transaction.debit = Some(-amount),
            Posting::CreditReversal => transaction.credit = Some(-amount),
        }
    }
}

fn account(prefix: &str, number: &str) -> String {
    format!("{}-{}", prefix, number)
}

/// Decodes a `074` record.
pub fn decode_header(line: &str) -> Result<Header, FieldError> {
    Ok(Header {
        account_number: account(extract(line, 3, 6), extract(line, 9, 10)),
        account_name: trim_trailing(extract(line, 19, 20)).to_string(),
        opening_balance_date: decode_date("opening balance date", extract(line, 39, 6))?,
        opening_balance: decode_amount(
            "opening balance",
            extract(line, 45, 14),
            14,
            extract(line, 59, 1),
        )?,
        closing_balance: decode_amount(
            "closing balance",
            extract(line, 60, 14),
            14,
            extract(line, 74, 1),
        )?,
        debit_turnover: decode_amount(
            "debit turnover",
            extract(line, 75, 14),
            14,
            extract(line, 89, 1),
        )?,
        credit_turnover: decode_amount(
            "credit turnover",
            extract(line, 90, 14),
            14,
            extract(line, 104, 1),
        )?,
        serial_number: decode_integer("serial number", extract(line, 105, 3), 3)?,
        closing_date: decode_date("closing date", extract(line, 108, 6))?,
    })
}

/// Decodes a `075` record. The posting code decides whether the amount lands
/// in `debit` or `credit` and with which sign; an unknown code leaves both
/// unset.
pub fn decode_transaction(line: &str) -> Result<Transaction, FieldError> {
    let amount = decode_minor_units("amount", extract(line, 48, 12), 12)?;
    let posting_code = extract(line, 60, 1);

    let mut transaction = Transaction {
        receipt_id: strip_leading_zeros(extract(line, 35, 13)).to_string(),
        debit: None,
        credit: None,
        variable_symbol: strip_leading_zeros(extract(line, 61, 10)).to_string(),
        constant_symbol: strip_leading_zeros(extract(line, 77, 4)).to_string(),
        specific_symbol: strip_leading_zeros(extract(line, 81, 10)).to_string(),
        counter_account: format!(
            "{}/{}",
            account(extract(line, 19, 6), extract(line, 25, 10)),
            extract(line, 73, 4)
        ),
        note: trim_trailing(extract(line, 97, 20)).to_string(),
        created_at: decode_date("creation date", extract(line, 122, 6))?,
        valuation_date: decode_optional_date("valuation date", extract(line, 91, 6))?,
        currency: None,
        message_start: None,
        message_end: None,
        additional_information: None,
    };

    match Posting::from_code(posting_code) {
        Some(posting) => posting.post(amount, &mut transaction),
        None => debug!(
            "posting code {:?} of receipt {:?} is neither debit nor credit, amount {} dropped",
            posting_code, transaction.receipt_id, amount
        ),
    }

    Ok(transaction)
}

/// Decodes a `076` record.
pub fn decode_additional_information(line: &str) -> Result<AdditionalInformation, FieldError> {
    Ok(AdditionalInformation {
        transfer_id: strip_leading_zeros(extract(line, 3, 26)).to_string(),
        deducted_at: decode_date("deduction date", extract(line, 29, 6))?,
        counter_party_name: trim_trailing(extract(line, 35, 92)).to_string(),
    })
}

/// Decodes the free text of a `078` or `079` record.
pub fn decode_message(line: &str) -> String {
    trim_trailing(extract_rest(line, 3)).to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::FieldErrorKind;
    use chrono::NaiveDate;

    pub(crate) fn header_line() -> String {
        [
            "074",
            "000019",
            "2000145399",
            "Novak Jan           ",
            "010114",
            "00000001000000",
            "+",
            "00000001150000",
            "+",
            "00000000020000",
            "+",
            "00000000170000",
            "+",
            "001",
            "310114",
            "              ",
        ]
        .concat()
    }

    pub(crate) fn transaction_line(receipt: &str, amount: &str, code: &str) -> String {
        [
            "075",
            "0000192000145399",
            "000000",
            "0123456789",
            receipt,
            amount,
            code,
            "0000001234",
            "00",
            "0203",
            "0308",
            "0000000077",
            "000000",
            "Invoice 2014/01     ",
            "00203",
            "150114",
        ]
        .concat()
    }

    fn noon(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn fixture_lines_have_format_width() {
        assert_eq!(header_line().len(), 128);
        assert_eq!(
            transaction_line("0000000012345", "000000150000", "2").len(),
            128
        );
    }

    #[test]
    fn decodes_header() {
        let header = decode_header(&header_line()).unwrap();
        assert_eq!(header.account_number, "000019-2000145399");
        assert_eq!(header.account_name, "Novak Jan");
        assert_eq!(header.opening_balance_date, noon(2014, 1, 1));
        assert_eq!(header.opening_balance, Decimal::new(1000000, 2));
        assert_eq!(header.closing_balance, Decimal::new(1150000, 2));
        assert_eq!(header.debit_turnover, Decimal::new(20000, 2));
        assert_eq!(header.credit_turnover, Decimal::new(170000, 2));
        assert_eq!(header.serial_number, 1);
        assert_eq!(header.closing_date, noon(2014, 1, 31));
    }

    #[test]
    fn header_balance_sign_is_applied() {
        let mut line = header_line();
        line.replace_range(59..60, "-");
        let header = decode_header(&line).unwrap();
        assert_eq!(header.opening_balance, Decimal::new(-1000000, 2));
        assert_eq!(header.closing_balance, Decimal::new(1150000, 2));
    }

    #[test]
    fn header_reports_failing_field() {
        let mut line = header_line();
        line.replace_range(108..114, "320114");
        let err = decode_header(&line).unwrap_err();
        assert_eq!(err.field, "closing date");
        assert_eq!(err.kind, FieldErrorKind::InvalidDate("320114".to_string()));
    }

    #[test]
    fn truncated_header_amount_is_rejected() {
        let line: String = header_line().chars().take(70).collect();
        let err = decode_header(&line).unwrap_err();
        assert_eq!(err.field, "closing balance");
        assert_eq!(
            err.kind,
            FieldErrorKind::WrongWidth {
                expected: 14,
                raw: "0000000115".to_string()
            }
        );
    }

    #[test]
    fn decodes_transaction() {
        let line = transaction_line("0000000012345", "000000150000", "2");
        let t = decode_transaction(&line).unwrap();
        assert_eq!(t.receipt_id, "12345");
        assert_eq!(t.credit, Some(Decimal::new(150000, 2)));
        assert_eq!(t.debit, None);
        assert_eq!(t.variable_symbol, "1234");
        assert_eq!(t.constant_symbol, "308");
        assert_eq!(t.specific_symbol, "77");
        assert_eq!(t.counter_account, "000000-0123456789/0203");
        assert_eq!(t.note, "Invoice 2014/01");
        assert_eq!(t.created_at, noon(2014, 1, 15));
        assert_eq!(t.valuation_date, None);
        assert_eq!(t.currency, None);
    }

    #[test]
    fn posting_code_selects_side_and_sign() {
        let fifty = Decimal::new(5000, 2);
        let cases = [
            ("1", Some(fifty), None),
            ("2", None, Some(fifty)),
            ("4", Some(-fifty), None),
            ("5", None, Some(-fifty)),
        ];
        for (code, debit, credit) in cases.iter() {
            let line = transaction_line("0000000000001", "000000005000", code);
            let t = decode_transaction(&line).unwrap();
            assert_eq!(t.debit, *debit, "debit for posting code {}", code);
            assert_eq!(t.credit, *credit, "credit for posting code {}", code);
        }
    }

    #[test]
    fn unknown_posting_code_assigns_nothing() {
        let line = transaction_line("0000000000001", "000000005000", "3");
        let t = decode_transaction(&line).unwrap();
        assert_eq!(t.debit, None);
        assert_eq!(t.credit, None);
    }

    #[test]
    fn malformed_amount_fails_even_with_unknown_posting_code() {
        let line = transaction_line("0000000000001", "00000000X000", "9");
        let err = decode_transaction(&line).unwrap_err();
        assert_eq!(err.field, "amount");
    }

    #[test]
    fn valuation_date_is_decoded_when_present() {
        let mut line = transaction_line("0000000000001", "000000005000", "1");
        line.replace_range(91..97, "140114");
        let t = decode_transaction(&line).unwrap();
        assert_eq!(t.valuation_date, Some(noon(2014, 1, 14)));
    }

    #[test]
    fn all_zero_symbols_become_empty() {
        let mut line = transaction_line("0000000000000", "000000005000", "1");
        line.replace_range(61..71, "0000000000");
        let t = decode_transaction(&line).unwrap();
        assert_eq!(t.receipt_id, "");
        assert_eq!(t.variable_symbol, "");
    }

    #[test]
    fn decodes_additional_information() {
        let line = format!(
            "076{}{}{:<92}",
            "00000000000000000000098765", "020114", "Jan Novak, Praha"
        );
        let info = decode_additional_information(&line).unwrap();
        assert_eq!(info.transfer_id, "98765");
        assert_eq!(info.deducted_at, noon(2014, 1, 2));
        assert_eq!(info.counter_party_name, "Jan Novak, Praha");
    }

    #[test]
    fn additional_information_name_may_be_short() {
        let line = "07600000000000000000000098765020114Jan";
        let info = decode_additional_information(line).unwrap();
        assert_eq!(info.counter_party_name, "Jan");
    }

    #[test]
    fn decodes_messages() {
        assert_eq!(decode_message("078First line      "), "First line");
        assert_eq!(decode_message("079"), "");
    }
}
