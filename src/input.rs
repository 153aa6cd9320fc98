use std::io::{BufRead, Write};
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{InputError, RegisterError};

pub const COMMAND_PROMPT: &str = "> ";
pub const CANCEL: &str = "cancel";
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

type InputResult<T> = Result<T, RegisterError>;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MessageType {
    Error,
    Info,
    Plain,
}

impl MessageType {
    fn prefix(&self) -> &'static str {
        match self {
            MessageType::Error => "ERROR: ",
            MessageType::Info => "INFO: ",
            MessageType::Plain => "",
        }
    }
}

/// Line oriented operator console.
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Read one line without its terminator. End of input is an error;
    /// bytes that are not UTF-8 are replaced rather than rejected.
    pub fn read_line(&mut self) -> InputResult<String> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Err(RegisterError::EndOfInput);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    pub fn prompt(&mut self, prompt: &str) -> InputResult<String> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;
        self.read_line()
    }

    pub fn print(&mut self, message: &str, kind: MessageType) -> InputResult<()> {
        writeln!(self.writer, "{}{}", kind.prefix(), message)?;
        Ok(())
    }

    pub fn info(&mut self, message: &str) -> InputResult<()> {
        self.print(message, MessageType::Info)
    }

    pub fn error(&mut self, message: &str) -> InputResult<()> {
        self.print(message, MessageType::Error)
    }

    pub fn plain(&mut self, message: &str) -> InputResult<()> {
        self.print(message, MessageType::Plain)
    }

    /// Prompt until `parse` accepts the answer, printing `retry` after
    /// each rejected one.
    pub fn ask<T, F>(
        &mut self,
        prompt: &str,
        parse: F,
        retry: (&str, MessageType),
    ) -> InputResult<T>
    where
        F: Fn(&str) -> Result<T, InputError>,
    {
        loop {
            let answer = self.prompt(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    log::debug!("Rejected input for '{}': {}", prompt.trim(), error);
                    self.print(retry.0, retry.1)?;
                }
            }
        }
    }

    pub fn confirm(&mut self) -> InputResult<bool> {
        self.ask(
            "Type [y/n]: ",
            yes_or_no,
            ("Please type \"y\" or \"n\"", MessageType::Info),
        )
    }
}

/// Answer to the item name prompt.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ItemName {
    Name(String),
    Cancel,
}

pub fn item_name(input: &str) -> Result<ItemName, InputError> {
    if input.is_empty() {
        Err(InputError::Empty)
    } else if input.eq_ignore_ascii_case(CANCEL) {
        Ok(ItemName::Cancel)
    } else {
        Ok(ItemName::Name(input.to_string()))
    }
}

fn number<T: FromStr>(input: &str) -> Result<T, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    // Decimal parsing accepts digit separators
    if trimmed.contains('_') {
        return Err(InputError::NotANumber {
            input: input.to_string(),
        });
    }
    trimmed.parse().map_err(|_| InputError::NotANumber {
        input: input.to_string(),
    })
}

pub fn quantity(input: &str) -> Result<u32, InputError> {
    let value: i64 = number(input)?;
    if value <= 0 {
        return Err(InputError::NotPositive {
            input: input.to_string(),
        });
    }
    u32::try_from(value).map_err(|_| InputError::TooLarge {
        input: input.to_string(),
    })
}

pub fn unit_price(input: &str) -> Result<Decimal, InputError> {
    let value: Decimal = number(input)?;
    if value <= Decimal::ZERO {
        Err(InputError::NotPositive {
            input: input.to_string(),
        })
    } else if value > MAX_UNIT_PRICE {
        Err(InputError::TooLarge {
            input: input.to_string(),
        })
    } else {
        Ok(value)
    }
}

/// Parse a 1-based item position into a 0-based index below `size`.
pub fn item_index(input: &str, size: usize) -> Result<usize, InputError> {
    let index: i64 = number(input)?;
    match usize::try_from(index) {
        Ok(i) if (1..=size).contains(&i) => Ok(i - 1),
        _ => Err(InputError::IndexOutOfRange { index, size }),
    }
}

pub fn yes_or_no(input: &str) -> Result<bool, InputError> {
    if input.eq_ignore_ascii_case("y") {
        Ok(true)
    } else if input.eq_ignore_ascii_case("n") {
        Ok(false)
    } else {
        Err(InputError::NotYesOrNo {
            input: input.to_string(),
        })
    }
}
