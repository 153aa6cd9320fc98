use std::io;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error("Invalid {what}: must be a non-negative size")]
    InvalidArgument { what: &'static str },

    #[error("Number of columns ({columns}) does not match the number of values ({values})")]
    ColumnMismatch { columns: usize, values: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum InvoiceError {
    #[error("Item index {index} is out of range for {size} items")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("Invalid item: {reason}")]
    InvalidItem { reason: &'static str },

    #[error("Item total for '{name}' is too large")]
    AmountOverflow { name: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Empty input")]
    Empty,

    #[error("Not a number: '{input}'")]
    NotANumber { input: String },

    #[error("Not a positive value: '{input}'")]
    NotPositive { input: String },

    #[error("Value too large: '{input}'")]
    TooLarge { input: String },

    #[error("Expected \"y\" or \"n\", got '{input}'")]
    NotYesOrNo { input: String },

    #[error("Index {index} is not between 1 and {size}")]
    IndexOutOfRange { index: i64, size: usize },
}

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("IO Error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("Could not read command")]
    EndOfInput,

    #[error("Formatting Error: {source}")]
    Format {
        #[from]
        source: FormatError,
    },

    #[error("{source}")]
    Invoice {
        #[from]
        source: InvoiceError,
    },
}
