use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{core::error::ForecastError, fmt::FormattedAmount};

/// Key of the service-reported total.
pub const TOTAL_CHARGES: &str = "total_charges";

/// Charge amounts by category, as reported by the forecast service.
///
/// Entries are kept in the response order and stay untyped until formatted:
/// a non-numeric entry must fail the rendering, not the whole response.
/// The total is displayed as reported, never checked against the other entries.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BillingSummary(Map<String, Value>);

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for BillingSummary {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct BillingLine {
    /// Category key as reported by the service.
    pub key: String,

    /// Human-readable label: the key with underscores replaced by spaces.
    pub label: String,

    pub amount: FormattedAmount,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct FormattedBilling {
    /// All the entries, including the total.
    pub lines: Vec<BillingLine>,

    /// The total once more, for the separate summary line.
    pub total: FormattedAmount,
}

impl BillingSummary {
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Format every entry for display.
    ///
    /// All-or-nothing: any non-numeric entry, or a missing total, fails the whole summary.
    pub fn format(&self) -> Result<FormattedBilling, ForecastError> {
        let lines = self
            .0
            .iter()
            .map(|(key, value)| {
                Ok(BillingLine {
                    key: key.clone(),
                    label: key.replace('_', " "),
                    amount: FormattedAmount::try_round(as_amount(key, value)?)?,
                })
            })
            .collect::<Result<Vec<_>, ForecastError>>()?;
        let total = lines
            .iter()
            .find(|line| line.key == TOTAL_CHARGES)
            .ok_or_else(|| ForecastError::Type { key: TOTAL_CHARGES.to_owned(), found: "no entry" })?
            .amount;
        Ok(FormattedBilling { lines, total })
    }
}

fn as_amount(key: &str, value: &Value) -> Result<f64, ForecastError> {
    let found = match value {
        Value::Number(number) => {
            return number
                .as_f64()
                .ok_or_else(|| ForecastError::Type { key: key.to_owned(), found: "a number" });
        }
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    Err(ForecastError::Type { key: key.to_owned(), found })
}
