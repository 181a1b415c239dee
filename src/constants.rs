/// Storage format for record dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage format for monthly reconciliation keys.
pub const MONTH_FORMAT: &str = "%Y-%m";

/// Products sold at the stations.
pub const PRODUCT_TYPES: [&str; 3] = ["PMS", "AGO", "LPG"];

/// Fallback tank capacity in litres when none has been configured.
pub const DEFAULT_TANK_CAPACITY: f64 = 33_000.0;
