//! Monthly cost parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Currency markers stripped before parsing: rupee sign, Rs/Rs., INR, dollar, trailing "/-".
///
/// Markers may run straight into the digits ("Rs8000").
static CURRENCY_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)₹|\binr\.?|\brs\.?|\$|/-").expect("valid currency regex"));

static PLAIN_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("valid amount regex"));

static RANGE_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?)\s*(?:-|–|—|to)\s*(\d+(?:\.\d+)?)$").expect("valid range regex")
});

/// Outcome of parsing a raw cost cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CostParse {
    /// A single amount.
    Value { amount: f64 },
    /// A range expression `low-high`.
    Range { low: f64, high: f64 },
    /// Missing or unparseable.
    Invalid,
}

impl CostParse {
    /// The cost this parse stands for: the amount, the range midpoint, or zero.
    pub fn amount(&self) -> f64 {
        match *self {
            CostParse::Value { amount } => amount,
            CostParse::Range { low, high } => (low + high) / 2.0,
            CostParse::Invalid => 0.0,
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, CostParse::Invalid)
    }
}

/// Parse a monthly cost such as `6000`, `₹7,500`, `Rs. 8000/-` or `5000-7000`.
pub fn parse_cost(raw: &str) -> CostParse {
    let stripped = CURRENCY_MARKERS.replace_all(raw, "");
    let cleaned: String = stripped.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return CostParse::Invalid;
    }

    if PLAIN_AMOUNT.is_match(cleaned) {
        return match cleaned.parse::<f64>() {
            Ok(amount) if amount.is_finite() => CostParse::Value { amount },
            _ => CostParse::Invalid,
        };
    }

    if let Some(caps) = RANGE_AMOUNT.captures(cleaned) {
        let low = caps[1].parse::<f64>();
        let high = caps[2].parse::<f64>();
        if let (Ok(a), Ok(b)) = (low, high) {
            if a.is_finite() && b.is_finite() {
                return CostParse::Range {
                    low: a.min(b),
                    high: a.max(b),
                };
            }
        }
    }

    CostParse::Invalid
}
