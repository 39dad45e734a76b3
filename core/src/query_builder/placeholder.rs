use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Positional parameter syntax emitted in place of a named placeholder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    /// `$1`, `$2`, ... (Postgres, and accepted by SQLite)
    #[default]
    DollarSign,
    /// `?1`, `?2`, ... (SQLite)
    NumberedQuestion,
}

impl Placeholder {
    pub fn dollar_sign() -> Self {
        Placeholder::DollarSign
    }

    pub fn numbered_question() -> Self {
        Placeholder::NumberedQuestion
    }

    /// The token for the 1-based position `index`.
    pub fn token(self, index: usize) -> Token {
        Token { style: self, index }
    }
}

impl FromStr for Placeholder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dollar_sign" | "$" => Ok(Placeholder::DollarSign),
            "numbered_question" | "?" => Ok(Placeholder::NumberedQuestion),
            _ => Err(Error::ConfigError(format!(
                "unknown placeholder style `{s}`, expected `dollar_sign` or `numbered_question`"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    style: Placeholder,
    index: usize,
}

impl Token {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            Placeholder::DollarSign => write!(f, "${}", self.index),
            Placeholder::NumberedQuestion => write!(f, "?{}", self.index),
        }
    }
}
