use super::{Menu, MenuResult};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("invalid integer '{0}'")]
    Invalid(String),
    #[error("'{0}' is out of range")]
    OutOfRange(String),
}

/// Parse an optionally signed decimal integer that fits in `i32`.
pub fn parse_integer(text: &str) -> Result<i32, InputError> {
    let text = text.trim();
    let digits = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::Invalid(text.to_string()));
    }

    text.parse::<i32>()
        .map_err(|_| InputError::OutOfRange(text.to_string()))
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Read lines until one parses as an integer.
    ///
    /// An empty line yields `default` when one is given. Returns `None` once
    /// input is exhausted.
    pub(crate) fn read_integer(&mut self, default: Option<i32>) -> MenuResult<Option<i32>> {
        loop {
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            if line.trim().is_empty() {
                if let Some(value) = default {
                    return Ok(Some(value));
                }
            }

            match parse_integer(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    warn!(input = line.trim(), "rejected integer input");
                    let text = self.theme.paint(format!("{}, please try again: ", e), self.theme.warning());
                    write!(self.output, "{}", text)?;
                }
            }
        }
    }

    /// Prompt then read an integer; end of input stops the menu.
    pub(crate) fn prompt_integer(&mut self, prompt: &str, default: Option<i32>) -> MenuResult<Option<i32>> {
        write!(self.output, "{}", prompt)?;
        let value = self.read_integer(default)?;
        if value.is_none() {
            self.running = false;
        }
        Ok(value)
    }

    pub(crate) fn pause(&mut self) -> MenuResult<()> {
        write!(self.output, "Press enter to continue...")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.running = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_signed() {
        assert_eq!(parse_integer("42"), Ok(42));
        assert_eq!(parse_integer(" -17\n"), Ok(-17));
        assert_eq!(parse_integer("+8"), Ok(8));
        assert_eq!(parse_integer("-2147483648"), Ok(i32::MIN));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_integer("12a"), Err(InputError::Invalid("12a".to_string())));
        assert_eq!(parse_integer("-"), Err(InputError::Invalid("-".to_string())));
        assert_eq!(parse_integer(""), Err(InputError::Invalid(String::new())));
        assert_eq!(parse_integer("1 2"), Err(InputError::Invalid("1 2".to_string())));
        assert_eq!(parse_integer("--3"), Err(InputError::Invalid("--3".to_string())));
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert_eq!(
            parse_integer("2147483648"),
            Err(InputError::OutOfRange("2147483648".to_string()))
        );
    }
}
