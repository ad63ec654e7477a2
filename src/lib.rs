//! Decoder for ABO, the fixed-width statement format Czech and Slovak banks
//! use to exchange account statements.
//!
//! ```
//! use libabo::Parser;
//!
//! let text = concat!(
//!     "0740000192000145399Novak Jan           010114",
//!     "00000001000000+00000001150000+00000000000000+00000000150000+001310114\n",
//!     "0750000192000145399000000012345678900000000123450000001500002000000123400020303080",
//!     "000000077000000Invoice 2014/01     00203150114\n",
//! );
//! let statement = Parser::new().parse_str(text).unwrap();
//! assert_eq!(statement.header.account_number, "000019-2000145399");
//! assert_eq!(statement.transactions[0].credit.unwrap().to_string(), "1500.00");
//! ```

pub mod error;
pub mod field;
pub mod line;
pub mod parser;
pub mod record;
pub mod statement;
pub mod transaction;
pub mod variant;

pub use error::{AboError, FieldError, FieldErrorKind, Result};
pub use line::LineType;
pub use parser::Parser;
pub use statement::{Header, Statement};
pub use transaction::{AdditionalInformation, Transaction};
pub use variant::{CurrencyOverlay, CurrencyTable, TransactionOverlay};
