//! Fixed-column field access and the primitive decoders shared by every
//! record type.
//!
//! Offsets and lengths count characters, not bytes, so lines decoded from a
//! single-byte code page keep their column alignment even after non-ASCII
//! characters were widened to multi-byte UTF-8.

use crate::error::{FieldError, FieldErrorKind};
use chrono::{NaiveDate, NaiveDateTime};
use nom::bytes::complete::take_while_m_n;
use nom::character::complete::digit1;
use nom::combinator::{all_consuming, map_res};
use nom::sequence::tuple;
use nom::IResult;
use rust_decimal::Decimal;

/// Two-digit years below this value belong to the 2000s, the rest to the
/// 1900s.
pub const CENTURY_PIVOT: u32 = 70;

/// Returns the characters in `[start, start + len)`, clamped to the end of the
/// line.
pub fn extract(line: &str, start: usize, len: usize) -> &str {
    let mut bounds = line
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()));

    let begin = match bounds.nth(start) {
        Some(i) => i,
        None => return "",
    };
    let end = match len {
        0 => begin,
        _ => bounds.nth(len - 1).unwrap_or_else(|| line.len()),
    };
    &line[begin..end]
}

/// Returns everything from `start` to the end of the line.
pub fn extract_rest(line: &str, start: usize) -> &str {
    match line.char_indices().nth(start) {
        Some((i, _)) => &line[i..],
        None => "",
    }
}

/// `"0000123"` becomes `"123"`, an all-zero field becomes `""`.
pub fn strip_leading_zeros(raw: &str) -> &str {
    raw.trim_start_matches('0')
}

/// Removes the space padding on the right, internal spaces are kept.
pub fn trim_trailing(raw: &str) -> &str {
    raw.trim_end_matches(' ')
}

fn digits(input: &str) -> IResult<&str, &str> {
    all_consuming(digit1)(input)
}

fn two_digits(input: &str) -> IResult<&str, u32> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_digit()), |s: &str| {
        s.parse::<u32>()
    })(input)
}

fn ddmmyy(input: &str) -> IResult<&str, (u32, u32, u32)> {
    all_consuming(tuple((two_digits, two_digits, two_digits)))(input)
}

fn check_width(field: &'static str, raw: &str, width: usize) -> Result<(), FieldError> {
    if raw.chars().count() == width {
        Ok(())
    } else {
        Err(FieldError::new(
            field,
            FieldErrorKind::WrongWidth {
                expected: width,
                raw: raw.to_string(),
            },
        ))
    }
}

/// Parses a zero-padded unsigned integer field of exactly `width` digits.
pub fn decode_integer(field: &'static str, raw: &str, width: usize) -> Result<u32, FieldError> {
    check_width(field, raw, width)?;
    let not_numeric = || FieldError::new(field, FieldErrorKind::NotNumeric(raw.to_string()));
    let (_, digits) = digits(raw).map_err(|_| not_numeric())?;
    digits.parse::<u32>().map_err(|_| not_numeric())
}

/// Interprets a zero-padded run of exactly `width` digits as minor units with
/// two implied fraction digits.
pub fn decode_minor_units(
    field: &'static str,
    raw: &str,
    width: usize,
) -> Result<Decimal, FieldError> {
    check_width(field, raw, width)?;
    let not_numeric = || FieldError::new(field, FieldErrorKind::NotNumeric(raw.to_string()));
    let (_, digits) = digits(raw).map_err(|_| not_numeric())?;
    let minor = digits.parse::<i64>().map_err(|_| not_numeric())?;
    Ok(Decimal::new(minor, 2))
}

/// Decodes an amount whose sign sits in its own column. Only `'-'` negates.
pub fn decode_amount(
    field: &'static str,
    raw: &str,
    width: usize,
    sign: &str,
) -> Result<Decimal, FieldError> {
    let amount = decode_minor_units(field, raw, width)?;
    Ok(if sign == "-" { -amount } else { amount })
}

/// Decodes a `ddmmyy` field to noon of that day.
pub fn decode_date(field: &'static str, raw: &str) -> Result<NaiveDateTime, FieldError> {
    let invalid = || FieldError::new(field, FieldErrorKind::InvalidDate(raw.to_string()));
    let (_, (day, month, yy)) = ddmmyy(raw).map_err(|_| invalid())?;
    let year = if yy < CENTURY_PIVOT { 2000 + yy } else { 1900 + yy };

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .ok_or_else(invalid)
}

/// Like [`decode_date`], but a blank or all-zero field means "no date".
pub fn decode_optional_date(
    field: &'static str,
    raw: &str,
) -> Result<Option<NaiveDateTime>, FieldError> {
    if raw.chars().all(|c| c == '0' || c == ' ') {
        return Ok(None);
    }
    decode_date(field, raw).map(Some)
}
