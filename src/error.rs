use crate::line::LineType;
use thiserror::Error;

/// What went wrong inside a single fixed-width field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorKind {
    NotNumeric(String),
    InvalidDate(String),
    UnknownCode(String),
    WrongWidth { expected: usize, raw: String },
}

impl std::fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldErrorKind::NotNumeric(raw) => write!(f, "expected digits, found {:?}", raw),
            FieldErrorKind::InvalidDate(raw) => write!(f, "{:?} is not a ddmmyy date", raw),
            FieldErrorKind::UnknownCode(raw) => write!(f, "code {:?} is not in the table", raw),
            FieldErrorKind::WrongWidth { expected, raw } => {
                write!(f, "expected {} characters, found {:?}", expected, raw)
            }
        }
    }
}

/// A field that could not be decoded. Raised by the pure decoders, which know
/// the field but not the line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {kind}")]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: &'static str, kind: FieldErrorKind) -> Self {
        FieldError { field, kind }
    }
}

#[derive(Debug, Error)]
pub enum AboError {
    #[error("line {line}: cannot decode {field} of {record} record: {reason}")]
    Decode {
        line: usize,
        record: LineType,
        field: &'static str,
        reason: FieldErrorKind,
    },

    #[error("line {line}: {record} record appears before any transaction record")]
    Structural { line: usize, record: LineType },

    #[error("input contains no statement header record")]
    MissingHeader,

    #[error("line {line}: {field} code {code:?} of {record} record is not in the lookup table")]
    Lookup {
        line: usize,
        record: LineType,
        field: &'static str,
        code: String,
    },

    #[error("cannot read statement input: {0}")]
    Io(#[from] std::io::Error),
}

impl AboError {
    /// Attaches line context to a field failure. Unknown codes are lookup
    /// failures, everything else is a decode failure.
    pub(crate) fn at(line: usize, record: LineType, err: FieldError) -> Self {
        match err.kind {
            FieldErrorKind::UnknownCode(code) => AboError::Lookup {
                line,
                record,
                field: err.field,
                code,
            },
            reason => AboError::Decode {
                line,
                record,
                field: err.field,
                reason,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, AboError>;
