use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::combinator::value;
use nom::IResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Record type announced by the first three characters of an ABO line.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineType {
    Statement,
    Transaction,
    AdditionalInformation,
    MessageStart,
    MessageEnd,
    Unrecognized,
}

impl LineType {
    /// Classifies a line (terminator already removed). Anything that is not
    /// one of the known record prefixes, short lines included, is
    /// `Unrecognized`.
    pub fn classify(line: &str) -> LineType {
        match record_type(line) {
            Ok((_, line_type)) => line_type,
            Err(_) => LineType::Unrecognized,
        }
    }

    pub fn code(&self) -> Option<&'static str> {
        match self {
            LineType::Statement => Some("074"),
            LineType::Transaction => Some("075"),
            LineType::AdditionalInformation => Some("076"),
            LineType::MessageStart => Some("078"),
            LineType::MessageEnd => Some("079"),
            LineType::Unrecognized => None,
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineType::Statement => "statement",
            LineType::Transaction => "transaction",
            LineType::AdditionalInformation => "additional information",
            LineType::MessageStart => "message start",
            LineType::MessageEnd => "message end",
            LineType::Unrecognized => "unrecognized",
        };
        f.write_str(name)
    }
}

fn record_type(input: &str) -> IResult<&str, LineType> {
    alt((
        value(LineType::Statement, tag("074")),
        value(LineType::Transaction, tag("075")),
        value(LineType::AdditionalInformation, tag("076")),
        value(LineType::MessageStart, tag("078")),
        value(LineType::MessageEnd, tag("079")),
    ))(input)
}
