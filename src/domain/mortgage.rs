use super::lookup::{Frequency, Rate, is_valid_amortization};
use super::money::{format_currency, format_percent, round_currency};
use crate::error::{MortgageError, Result, ValidationError};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// How the annual rate is turned into a per-period rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RateConvention {
    /// Annual rate divided by twelve, whatever the payment frequency.
    #[default]
    Monthly,
    /// Annual rate divided by the number of payments per year.
    PerPayment,
}

type Validated<T> = std::result::Result<T, ValidationError>;

fn validate_loan_amount(loan_amount: Decimal) -> Validated<Decimal> {
    if loan_amount > Decimal::ZERO {
        Ok(loan_amount)
    } else {
        Err(ValidationError::LoanAmount)
    }
}

fn validate_rate(rate: Rate) -> Validated<Rate> {
    if Rate::ALL.contains(&rate) {
        Ok(rate)
    } else {
        Err(ValidationError::Rate)
    }
}

fn validate_frequency(frequency: Frequency) -> Validated<Frequency> {
    if Frequency::ALL.contains(&frequency) {
        Ok(frequency)
    } else {
        Err(ValidationError::Frequency)
    }
}

fn validate_amortization(amortization: u32) -> Validated<u32> {
    if is_valid_amortization(amortization) {
        Ok(amortization)
    } else {
        Err(ValidationError::Amortization)
    }
}

/// A single mortgage record.
///
/// Every field is checked on construction through [`Mortgage::new`] and on
/// each setter call. A rejected value leaves the previous one in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mortgage {
    loan_amount: Decimal,
    rate: Rate,
    frequency: Frequency,
    amortization: u32,
}

impl Mortgage {
    /// Builds a mortgage, validating loan amount, rate, frequency and
    /// amortization in that order.
    pub fn new(
        loan_amount: Decimal,
        rate: Rate,
        frequency: Frequency,
        amortization: u32,
    ) -> Validated<Self> {
        Ok(Self {
            loan_amount: validate_loan_amount(loan_amount)?,
            rate: validate_rate(rate)?,
            frequency: validate_frequency(frequency)?,
            amortization: validate_amortization(amortization)?,
        })
    }

    /// Builds a mortgage without checking any field.
    ///
    /// Kept for callers that need the legacy behaviour where only the
    /// setters validate. [`Mortgage::calculate_payment`] still re-checks the
    /// loan amount and amortization.
    pub fn new_unchecked(
        loan_amount: Decimal,
        rate: Rate,
        frequency: Frequency,
        amortization: u32,
    ) -> Self {
        Self {
            loan_amount,
            rate,
            frequency,
            amortization,
        }
    }

    pub fn loan_amount(&self) -> Decimal {
        self.loan_amount
    }

    pub fn rate(&self) -> Rate {
        self.rate
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn amortization(&self) -> u32 {
        self.amortization
    }

    pub fn set_loan_amount(&mut self, loan_amount: Decimal) -> Validated<()> {
        self.loan_amount = validate_loan_amount(loan_amount)?;
        Ok(())
    }

    pub fn set_rate(&mut self, rate: Rate) -> Validated<()> {
        self.rate = validate_rate(rate)?;
        Ok(())
    }

    pub fn set_frequency(&mut self, frequency: Frequency) -> Validated<()> {
        self.frequency = validate_frequency(frequency)?;
        Ok(())
    }

    pub fn set_amortization(&mut self, amortization: u32) -> Validated<()> {
        self.amortization = validate_amortization(amortization)?;
        Ok(())
    }

    /// Periodic payment, rounded half-up to cents, using the monthly rate
    /// convention.
    pub fn calculate_payment(&self) -> Result<Decimal> {
        self.calculate_payment_with(RateConvention::Monthly)
    }

    /// Periodic payment from the standard annuity formula:
    ///
    /// `P * r * (1 + r)^n / ((1 + r)^n - 1)`
    ///
    /// where `r` is the periodic rate under `convention` and `n` is the
    /// amortization in years times the payments per year.
    pub fn calculate_payment_with(&self, convention: RateConvention) -> Result<Decimal> {
        // Instances built with `new_unchecked` reach this point unvalidated.
        validate_loan_amount(self.loan_amount)?;
        validate_amortization(self.amortization)?;

        let payments_per_year = self.frequency.payments_per_year();
        let periodic_rate = match convention {
            RateConvention::Monthly => self.rate.value() / MONTHS_PER_YEAR,
            RateConvention::PerPayment => self.rate.value() / Decimal::from(payments_per_year),
        };
        let periods = u64::from(self.amortization) * u64::from(payments_per_year);

        let growth = (Decimal::ONE + periodic_rate)
            .checked_powu(periods)
            .ok_or_else(|| overflow("compound growth"))?;
        let payment = self
            .loan_amount
            .checked_mul(periodic_rate)
            .and_then(|interest| interest.checked_mul(growth))
            .and_then(|numerator| numerator.checked_div(growth - Decimal::ONE))
            .ok_or_else(|| overflow("payment"))?;

        Ok(round_currency(payment))
    }

    /// Multi-line summary used on reports.
    pub fn render_display(&self) -> Result<String> {
        self.render_display_with(RateConvention::Monthly)
    }

    pub fn render_display_with(&self, convention: RateConvention) -> Result<String> {
        let payment = self.calculate_payment_with(convention)?;
        Ok(format!(
            "Mortgage Amount: {}\nRate: {}%\nAmortization: {}\n\
             Frequency: {} -- Calculated Payment: {}",
            format_currency(self.loan_amount),
            format_percent(self.rate.value()),
            self.amortization,
            self.frequency.display_name(),
            format_currency(payment),
        ))
    }

    /// Raw values as a bracketed list: loan amount, rate fraction,
    /// amortization, payments per year.
    pub fn render_compact(&self) -> String {
        format!(
            "[{}, {}, {}, {}]",
            self.loan_amount.normalize(),
            self.rate.value().normalize(),
            self.amortization,
            self.frequency.payments_per_year(),
        )
    }
}

/// Same text as [`Mortgage::render_display`]. Fails with `fmt::Error` when
/// the payment cannot be calculated, which only happens for instances built
/// with [`Mortgage::new_unchecked`].
impl fmt::Display for Mortgage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.render_display().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

fn overflow(stage: &str) -> MortgageError {
    MortgageError::Calculation(format!("{stage} overflowed"))
}
