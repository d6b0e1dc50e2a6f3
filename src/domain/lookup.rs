//! Closed reference sets for mortgage terms.
//!
//! Rates, payment frequencies and amortization periods are fixed by the
//! lender. Raw names from an input file are resolved here; anything outside
//! these sets is rejected before a [`Mortgage`](super::mortgage::Mortgage)
//! is ever built.

use crate::error::{MortgageError, ValidationError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Amortization periods, in years, that a mortgage may be written for.
pub const VALID_AMORTIZATION: [u32; 6] = [5, 10, 15, 20, 25, 30];

pub fn is_valid_amortization(years: u32) -> bool {
    VALID_AMORTIZATION.contains(&years)
}

/// Annual interest rates offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rate {
    #[serde(rename = "FIXED_5")]
    Fixed5,
    #[serde(rename = "FIXED_3")]
    Fixed3,
    #[serde(rename = "FIXED_1")]
    Fixed1,
    #[serde(rename = "VARIABLE_5")]
    Variable5,
    #[serde(rename = "VARIABLE_3")]
    Variable3,
    #[serde(rename = "VARIABLE_1")]
    Variable1,
}

impl Rate {
    pub const ALL: [Rate; 6] = [
        Rate::Fixed5,
        Rate::Fixed3,
        Rate::Fixed1,
        Rate::Variable5,
        Rate::Variable3,
        Rate::Variable1,
    ];

    /// Annual rate as a decimal fraction (`0.0589` is 5.89%).
    pub fn value(&self) -> Decimal {
        match self {
            Rate::Fixed5 => dec!(0.0500),
            Rate::Fixed3 => dec!(0.0579),
            Rate::Fixed1 => dec!(0.0589),
            Rate::Variable5 => dec!(0.0650),
            Rate::Variable3 => dec!(0.0660),
            Rate::Variable1 => dec!(0.0679),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rate::Fixed5 => "FIXED_5",
            Rate::Fixed3 => "FIXED_3",
            Rate::Fixed1 => "FIXED_1",
            Rate::Variable5 => "VARIABLE_5",
            Rate::Variable3 => "VARIABLE_3",
            Rate::Variable1 => "VARIABLE_1",
        }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rate {
    type Err = MortgageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Rate::ALL
            .into_iter()
            .find(|rate| rate.name() == name)
            .ok_or_else(|| MortgageError::Lookup {
                kind: "MortgageRate",
                name: name.to_string(),
            })
    }
}

impl TryFrom<Decimal> for Rate {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Rate::ALL
            .into_iter()
            .find(|rate| rate.value() == value)
            .ok_or(ValidationError::Rate)
    }
}

/// Payment cadences, carrying the number of payments made per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Monthly,
    BiWeekly,
    Weekly,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Frequency::Monthly, Frequency::BiWeekly, Frequency::Weekly];

    pub fn payments_per_year(&self) -> u32 {
        match self {
            Frequency::Monthly => 12,
            Frequency::BiWeekly => 26,
            Frequency::Weekly => 52,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Monthly => "MONTHLY",
            Frequency::BiWeekly => "BI_WEEKLY",
            Frequency::Weekly => "WEEKLY",
        }
    }

    /// Name as shown on reports: first letter upper case, the rest lower.
    pub fn display_name(&self) -> String {
        let lower = self.name().to_lowercase();
        let mut chars = lower.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Frequency {
    type Err = MortgageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Frequency::ALL
            .into_iter()
            .find(|frequency| frequency.name() == name)
            .ok_or_else(|| MortgageError::Lookup {
                kind: "MortgageFrequency",
                name: name.to_string(),
            })
    }
}

impl TryFrom<u32> for Frequency {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Frequency::ALL
            .into_iter()
            .find(|frequency| frequency.payments_per_year() == value)
            .ok_or(ValidationError::Frequency)
    }
}
