//! Shared constants for the wagerbook domain.

/// Date format used for ledger dates in the tabular form, e.g. "2024-01-05".
pub const TABLE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Label format for daily buckets, e.g. "2024-01-05".
pub const DAY_LABEL_FORMAT: &str = "%Y-%m-%d";

/// Label format for monthly buckets, e.g. "January 2024".
pub const MONTH_LABEL_FORMAT: &str = "%B %Y";

/// Label format for yearly buckets, e.g. "2024".
pub const YEAR_LABEL_FORMAT: &str = "%Y";
