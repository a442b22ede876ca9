/// Default environmental weight
pub const DEFAULT_ENVIRONMENTAL_WEIGHT: f64 = 0.40;

/// Default social weight
pub const DEFAULT_SOCIAL_WEIGHT: f64 = 0.30;

/// Default governance weight
pub const DEFAULT_GOVERNANCE_WEIGHT: f64 = 0.30;

/// Allowed deviation of the weight sum from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// Lower bound of a valid sub-score
pub const MIN_SCORE: f64 = 0.0;

/// Upper bound of a valid sub-score
pub const MAX_SCORE: f64 = 100.0;

/// Value assigned when a normalization range collapses to a single point
pub const DEGENERATE_NORMALIZED_SCORE: f64 = 50.0;

/// Quality penalty per ERROR-severity issue
pub const ERROR_PENALTY: f64 = 10.0;

/// Quality penalty per WARNING-severity issue
pub const WARNING_PENALTY: f64 = 5.0;

/// Quality penalty per INFO-severity issue
pub const INFO_PENALTY: f64 = 1.0;

/// Minimum number of header columns accepted by the structural check
pub const MIN_HEADER_COLUMNS: usize = 7;

/// Portfolio id used when the configuration does not name one
pub const DEFAULT_PORTFOLIO_ID: &str = "PORTFOLIO_001";

/// Portfolio name used when the configuration does not name one
pub const DEFAULT_PORTFOLIO_NAME: &str = "Default Portfolio";

/// Number of errors listed in a report summary
pub const REPORT_SUMMARY_ERROR_LIMIT: usize = 5;
