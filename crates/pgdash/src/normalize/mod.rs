//! Normalization: header renaming, type coercion, defaults and range filtering.

mod coerce;
mod currency;
mod engine;

pub use coerce::{parse_rating, title_case};
pub use currency::{parse_cost, CostParse};
pub use engine::{
    CostRange, ExcludedRow, NormalizeConfig, NormalizeReport, NormalizedTable, Normalizer,
};
