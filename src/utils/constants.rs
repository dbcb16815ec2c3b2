/// Column names appended by the pipeline stages
pub const FEATURE_COLUMNS: [&str; 8] = [
    "is_holiday",
    "is_weekend",
    "month_cos",
    "month_sin",
    "hour_cos",
    "hour_sin",
    "minute_cos",
    "minute_sin",
];

/// Extension of every per-group file
pub const GROUP_FILE_EXTENSION: &str = "csv";

/// Join defaults
pub const DEFAULT_TOLERANCE_MINUTES: i64 = 120;
pub const DEFAULT_MAX_SKIP_WARNINGS: usize = 5;

/// Logging cadence
pub const DEFAULT_ROW_PROGRESS_INTERVAL: usize = 100_000;
pub const DEFAULT_FILE_PROGRESS_INTERVAL: usize = 10;
pub const DEFAULT_SEGMENT_PROGRESS_INTERVAL: usize = 100;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "TWJ";

/// Read buffer for input tables
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
