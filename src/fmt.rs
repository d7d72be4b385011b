use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::error::FormatError;

/// Monetary amount rounded half-up to two decimal places.
///
/// Rounding operates on the shortest decimal representation of the float,
/// so that `100.005` becomes `100.01` even though its binary value is slightly below.
#[derive(Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct FormattedAmount(Decimal);

impl FormattedAmount {
    pub fn try_round(value: f64) -> Result<Self, FormatError> {
        let mut decimal = Decimal::from_str(&value.to_string())
            .map_err(|_| FormatError::Amount(value))?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        decimal.rescale(2);
        // `rescale` settles for a smaller scale once the mantissa runs out of digits.
        if decimal.scale() != 2 {
            return Err(FormatError::Amount(value));
        }
        Ok(Self(decimal))
    }
}

impl Debug for FormattedAmount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for FormattedAmount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}
