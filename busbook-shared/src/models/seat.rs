use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seat identifier: row letter followed by a 1-based column number (`B2`).
///
/// Ordering is row first, then column, so `A3 < B1 < B10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatId {
    row: char,
    column: u16,
}

impl SeatId {
    pub fn new(row: char, column: u16) -> Result<Self, SeatIdError> {
        if !row.is_ascii_alphabetic() {
            return Err(SeatIdError::InvalidRow(row));
        }
        if column == 0 {
            return Err(SeatIdError::InvalidColumn("0".to_string()));
        }
        Ok(Self {
            row: row.to_ascii_uppercase(),
            column,
        })
    }

    pub fn row(&self) -> char {
        self.row
    }

    pub fn column(&self) -> u16 {
        self.column
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

impl FromStr for SeatId {
    type Err = SeatIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let row = chars.next().ok_or(SeatIdError::Empty)?;
        let digits = chars.as_str();
        let column = digits
            .parse::<u16>()
            .map_err(|_| SeatIdError::InvalidColumn(digits.to_string()))?;
        Self::new(row, column)
    }
}

impl TryFrom<String> for SeatId {
    type Error = SeatIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeatId> for String {
    fn from(seat: SeatId) -> Self {
        seat.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatIdError {
    #[error("Seat identifier is empty")]
    Empty,

    #[error("Seat row must be a letter, got '{0}'")]
    InvalidRow(char),

    #[error("Seat column must be a positive number, got '{0}'")]
    InvalidColumn(String),
}
