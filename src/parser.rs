use crate::error::{AboError, Result};
use crate::line::LineType;
use crate::record::{
    decode_additional_information, decode_header, decode_message, decode_transaction,
};
use crate::statement::{Header, Statement};
use crate::transaction::Transaction;
use crate::variant::TransactionOverlay;

use encoding_rs::{Encoding, WINDOWS_1250};
use log::{debug, trace, warn};
use std::io::{BufRead, BufReader, Read};

/// Decodes ABO statements. Holds only configuration, so one parser can be
/// reused (and shared between threads) for any number of files.
pub struct Parser {
    encoding: &'static Encoding,
    overlays: Vec<Box<dyn TransactionOverlay>>,
}

impl Default for Parser {
    fn default() -> Self {
        Parser {
            encoding: WINDOWS_1250,
            overlays: Vec::new(),
        }
    }
}

impl Parser {
    pub fn new() -> Self {
        Parser::default()
    }

    /// Sets the character encoding `parse` reads input bytes with. Banks
    /// export ABO in windows-1250, which is the default.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Adds a bank-specific overlay, run after the base decoding of every
    /// transaction record in the order the overlays were added.
    pub fn with_overlay<O: TransactionOverlay + 'static>(mut self, overlay: O) -> Self {
        self.overlays.push(Box::new(overlay));
        self
    }

    pub fn overlays(&self) -> impl Iterator<Item = &str> {
        self.overlays.iter().map(|o| o.name())
    }

    /// Reads a whole statement from `reader`, decoding each line with the
    /// configured encoding before its columns are cut.
    pub fn parse<R: Read>(&self, reader: R) -> Result<Statement> {
        let mut assembler = Assembler::new(&self.overlays);
        for (index, bytes) in BufReader::new(reader).split(b'\n').enumerate() {
            let mut bytes = bytes?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            let (line, _, had_errors) = self.encoding.decode(&bytes);
            if had_errors {
                warn!(
                    "line {}: malformed {} sequences replaced",
                    index + 1,
                    self.encoding.name()
                );
            }
            assembler.feed(index + 1, &line)?;
        }
        assembler.finish()
    }

    pub fn parse_str(&self, text: &str) -> Result<Statement> {
        self.parse_lines(text.lines())
    }

    /// Decodes lines that already had their terminators removed.
    pub fn parse_lines<I>(&self, lines: I) -> Result<Statement>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut assembler = Assembler::new(&self.overlays);
        for (index, line) in lines.into_iter().enumerate() {
            assembler.feed(index + 1, line.as_ref())?;
        }
        assembler.finish()
    }
}

enum State {
    NoTransactionOpen,
    TransactionOpen(Transaction),
}

/// Per-file assembly state. Transactions are closed when the next `075`
/// record arrives or when the input ends.
struct Assembler<'a> {
    overlays: &'a [Box<dyn TransactionOverlay>],
    header: Option<Header>,
    transactions: Vec<Transaction>,
    state: State,
}

impl<'a> Assembler<'a> {
    fn new(overlays: &'a [Box<dyn TransactionOverlay>]) -> Self {
        Assembler {
            overlays,
            header: None,
            transactions: Vec::new(),
            state: State::NoTransactionOpen,
        }
    }

    fn feed(&mut self, number: usize, line: &str) -> Result<()> {
        let record = LineType::classify(line);
        trace!("line {}: {} record", number, record);

        match record {
            LineType::Statement => {
                let header =
                    decode_header(line).map_err(|e| AboError::at(number, record, e))?;
                if self.header.is_some() {
                    warn!("line {}: second statement header replaces the first", number);
                }
                self.header = Some(header);
            }
            LineType::Transaction => {
                let mut transaction =
                    decode_transaction(line).map_err(|e| AboError::at(number, record, e))?;
                for overlay in self.overlays {
                    overlay
                        .apply(line, &mut transaction)
                        .map_err(|e| AboError::at(number, record, e))?;
                }
                let previous =
                    std::mem::replace(&mut self.state, State::TransactionOpen(transaction));
                if let State::TransactionOpen(closed) = previous {
                    self.transactions.push(closed);
                }
            }
            LineType::AdditionalInformation => {
                let transaction = self.open_transaction(number, record)?;
                let info = decode_additional_information(line)
                    .map_err(|e| AboError::at(number, record, e))?;
                if transaction.additional_information.is_some() {
                    warn!(
                        "line {}: second additional information for receipt {:?} replaces the first",
                        number, transaction.receipt_id
                    );
                }
                transaction.additional_information = Some(info);
            }
            LineType::MessageStart => {
                self.open_transaction(number, record)?.message_start = Some(decode_message(line));
            }
            LineType::MessageEnd => {
                self.open_transaction(number, record)?.message_end = Some(decode_message(line));
            }
            LineType::Unrecognized => {
                debug!("line {}: skipping unrecognized record", number);
            }
        }

        Ok(())
    }

    fn open_transaction(&mut self, number: usize, record: LineType) -> Result<&mut Transaction> {
        match &mut self.state {
            State::TransactionOpen(transaction) => Ok(transaction),
            State::NoTransactionOpen => Err(AboError::Structural {
                line: number,
                record,
            }),
        }
    }

    fn finish(mut self) -> Result<Statement> {
        if let State::TransactionOpen(last) = self.state {
            self.transactions.push(last);
        }
        let header = self.header.ok_or(AboError::MissingHeader)?;
        debug!(
            "statement {} of account {}: {} transactions",
            header.serial_number,
            header.account_number,
            self.transactions.len()
        );
        Ok(Statement {
            header,
            transactions: self.transactions,
        })
    }
}
