use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const INR_CURRENCY_CODE: &str = "INR";

//--------------------------------------       Paise         ---------------------------------------------------------
/// An amount of Indian rupees, held in paise (1/100th of a rupee). This is also the unit Razorpay uses on the wire.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct Paise(i64);

op!(binary Paise, Add, add);
op!(binary Paise, Sub, sub);
op!(inplace Paise, AddAssign, add_assign);
op!(inplace Paise, SubAssign, sub_assign);
op!(unary Paise, Neg, neg);

impl Mul<i64> for Paise {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Paise {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in paise: {0}")]
pub struct PaiseConversionError(String);

impl From<i64> for Paise {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl TryFrom<u64> for Paise {
    type Error = PaiseConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        i64::try_from(value).map(Self).map_err(|_| PaiseConversionError(format!("{value} is too large")))
    }
}

impl Display for Paise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}₹{}.{:02}", abs / 100, abs % 100)
    }
}

impl Paise {
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Converts a rupee amount into paise, rounding to the nearest paisa.
    pub fn from_rupees(rupees: f64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self((rupees * 100.0).round() as i64)
    }

    pub fn to_rupees(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns `round(self * rate)`. Used for commissions and refund percentages.
    pub fn percent(&self, rate: f64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self((self.0 as f64 * rate).round() as i64)
    }

    /// Splits the amount into `parts` equal shares, rounding each share down. Returns zero if `parts` is zero.
    pub fn split_floor(&self, parts: usize) -> Self {
        match i64::try_from(parts) {
            Ok(0) | Err(_) => Self(0),
            Ok(n) => Self(self.0.div_euclid(n)),
        }
    }

    /// Divides the amount into `parts` shares, rounding each share to the nearest paisa.
    pub fn split_round(&self, parts: usize) -> Self {
        if parts == 0 {
            return Self(0);
        }
        #[allow(clippy::cast_possible_truncation)]
        Self((self.0 as f64 / parts as f64).round() as i64)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}
