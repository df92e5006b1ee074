//! Canonical column names and the header rename map.

/// Canonical column names used after normalization.
pub mod col {
    pub const NAME: &str = "Name";
    pub const TYPE: &str = "Type";
    pub const LOCATION: &str = "Location";
    pub const SHARING: &str = "Sharing";
    pub const COST: &str = "Cost";
    pub const RATING: &str = "Rating";
    pub const COMMENTS: &str = "Comments";
    pub const PHONE: &str = "Phone";
    pub const GENDER: &str = "Gender";
    pub const TIMESTAMP: &str = "Timestamp";
}

/// Survey headers and the canonical names they map to, applied in order.
///
/// Headers are matched after trimming surrounding whitespace.
pub const COLUMN_RENAMES: &[(&str, &str)] = &[
    ("Name of PG/Hostel:", col::NAME),
    ("Type of PG", col::TYPE),
    ("🌍 Location:", col::LOCATION),
    ("🏡Type of Sharing:", col::SHARING),
    ("💰 Monthly Cost (₹):", col::COST),
    ("🍴 Food Quality:", "Food Quality"),
    ("🚲Parking Space", "Parking"),
    ("🏢 Room Space:", "Room Space"),
    ("⚡Electricity Bill:", "Electricity"),
    ("Overall Rating:", col::RATING),
    ("Additional Comments:", col::COMMENTS),
    ("Contributor Reddit Username", "Contributor"),
    ("PG Owner Phone number", col::PHONE),
    ("Contributor Gender", col::GENDER),
];

/// Columns that map onto typed [`Listing`](super::Listing) fields.
pub const CANONICAL_COLUMNS: &[&str] = &[
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

/// Trim a raw header and apply the rename map.
///
/// Unmapped headers come back trimmed but otherwise unchanged.
pub fn canonical_header(raw: &str) -> String {
    let trimmed = raw.trim();
    COLUMN_RENAMES
        .iter()
        .find(|(from, _)| *from == trimmed)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorated_headers_are_renamed() {
        assert_eq!(canonical_header("  💰 Monthly Cost (₹):  "), "Cost");
        assert_eq!(canonical_header("🌍 Location:"), "Location");
        assert_eq!(canonical_header("Overall Rating:"), "Rating");
        assert_eq!(canonical_header("Contributor Gender\t"), "Gender");
    }

    #[test]
    fn test_unmapped_headers_pass_through() {
        assert_eq!(canonical_header(" Timestamp "), "Timestamp");
        assert_eq!(canonical_header("Deposit"), "Deposit");
    }
}
