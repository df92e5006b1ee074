//! Writing enriched listings out as CSV or JSON.

use std::io::Write;

use crate::enrich::jitter;
use crate::error::Result;
use crate::schema::{col, ListingView};

/// Random spread applied to exported coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jitter {
    /// Maximum offset in degrees on each axis.
    pub radius: f64,
    /// Seed, so repeated exports place markers identically.
    pub seed: u64,
}

/// Write a view as CSV: canonical columns, pass-through columns, then derived ones.
pub fn write_csv<W: Write>(
    view: &ListingView<'_>,
    writer: W,
    spread: Option<Jitter>,
) -> Result<()> {
    let extra_columns = &view.table().extra_columns;
    let mut out = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = vec![
        col::NAME,
        col::TYPE,
        col::LOCATION,
        col::SHARING,
        col::COST,
        col::RATING,
        col::GENDER,
        col::COMMENTS,
        col::PHONE,
    ];
    header.extend(extra_columns.iter().map(String::as_str));
    header.extend(["Tags", "lat", "lon", "Value Score"]);
    out.write_record(&header)?;

    let mut rng = spread.map(|j| fastrand::Rng::with_seed(j.seed));

    for listing in view.iter() {
        let coordinates = match (spread, rng.as_mut()) {
            (Some(j), Some(rng)) => jitter(listing.derived.coordinates, j.radius, rng),
            _ => listing.derived.coordinates,
        };

        let mut record: Vec<String> = vec![
            listing.name.clone().unwrap_or_default(),
            listing.kind.clone(),
            listing.location.clone(),
            listing.sharing.clone(),
            listing.cost.to_string(),
            listing.rating.to_string(),
            listing.gender.clone(),
            listing.comments.clone(),
            listing.phone.clone(),
        ];
        record.extend(
            extra_columns
                .iter()
                .map(|c| listing.extra.get(c).cloned().unwrap_or_default()),
        );
        record.push(
            listing
                .derived
                .tags
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("; "),
        );
        record.push(coordinates.lat.to_string());
        record.push(coordinates.lon.to_string());
        record.push(format!("{:.4}", listing.derived.value_score));
        out.write_record(&record)?;
    }

    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write a view as a pretty-printed JSON array.
pub fn write_json<W: Write>(view: &ListingView<'_>, writer: W) -> Result<()> {
    let rows: Vec<_> = view.iter().collect();
    serde_json::to_writer_pretty(writer, &rows)?;
    Ok(())
}
