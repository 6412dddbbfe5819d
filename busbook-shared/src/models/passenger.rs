use crate::models::SeatId;
use crate::pii::Masked;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        };
        f.write_str(label)
    }
}

impl FromStr for Gender {
    type Err = GenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "o" => Ok(Gender::Other),
            _ => Err(GenderError(s.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown gender '{0}', expected Male, Female or Other")]
pub struct GenderError(pub String);

/// Occupant of one booked seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerRecord {
    pub seat: SeatId,
    pub name: String,
    pub gender: Gender,
    pub age: u32,
}

/// Contact person for the whole booking; need not occupy a seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadPassenger {
    pub name: String,
    pub mobile: Masked<String>,
    pub email: Masked<String>,
}

impl HeadPassenger {
    pub fn new(name: impl Into<String>, mobile: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mobile: Masked::new(mobile.into()),
            email: Masked::new(email.into()),
        }
    }
}
