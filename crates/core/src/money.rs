//! Monetary value objects.
//!
//! Amounts are integers in the smallest currency unit (e.g. cents) so that
//! arithmetic stays exact. Converting to a display amount is a presentation
//! concern and lives outside the domain layer.

use core::fmt;
use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// ISO 4217 style currency code (e.g. "USD").
///
/// Codes are compared case-sensitively; callers are expected to normalize to
/// upper case at the edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(Cow<'static, str>);

impl CurrencyCode {
    pub fn new(code: impl Into<Cow<'static, str>>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for CurrencyCode {
    fn from(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }
}

impl From<String> for CurrencyCode {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl ValueObject for CurrencyCode {}

/// An amount of money in a single currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: i64,
    currency: CurrencyCode,
}

impl Money {
    pub fn new(amount: i64, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    pub fn zero(currency: CurrencyCode) -> Self {
        Self::new(0, currency)
    }

    /// Amount in minor units (e.g. cents).
    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn same_currency(&self, other: &Money) -> bool {
        self.currency == other.currency
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

impl ValueObject for Money {}

/// An inclusive range of money values in a single currency.
///
/// Invariants: both bounds share one currency and `start <= stop`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyRange {
    start: Money,
    stop: Money,
}

impl MoneyRange {
    pub fn new(start: Money, stop: Money) -> DomainResult<Self> {
        if !start.same_currency(&stop) {
            return Err(DomainError::currency_mismatch(format!(
                "range bounds disagree: {} vs {}",
                start.currency(),
                stop.currency()
            )));
        }
        if start.amount() > stop.amount() {
            return Err(DomainError::invariant("range start exceeds stop"));
        }
        Ok(Self { start, stop })
    }

    pub fn start(&self) -> &Money {
        &self.start
    }

    pub fn stop(&self) -> &Money {
        &self.stop
    }
}

impl ValueObject for MoneyRange {}
