/// Application-wide constants to avoid magic values throughout the codebase.
///
/// Log naming conventions, score line prefixes and output file names live
/// here so both tools agree on them.
/// Output format constants
pub mod output_formats {
    /// Text output format - bare p-value, matching what scripts expect
    pub const TEXT: &str = "text";
    /// JSON output format - full test outcome for automation
    pub const JSON: &str = "json";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 2] = [TEXT, JSON];
}

/// Log file naming constants
pub mod log_files {
    /// Prefix every experiment log name starts with
    pub const DEFAULT_PREFIX: &str = "CFPTest";
    /// Extension of experiment logs
    pub const EXTENSION: &str = ".log";
    /// Separator between file name segments
    pub const SEGMENT_SEPARATOR: char = '-';
}

/// Score line prefixes in run logs
pub mod score_prefixes {
    pub const RPRECISION: &str = "RPrecision:";
    pub const NDCG: &str = "nDCG:";
}

/// Baseline table constants
pub mod baselines {
    pub const POPULARITY_FILE: &str = "popularity.tsv";
    pub const NAME_FILE: &str = "name.tsv";
    pub const NDCG_LABEL: &str = "ndcg";
    pub const RPREC_LABEL: &str = "rprec";
    /// Score written for a baseline with no log in the directory
    pub const MISSING_SCORE: f64 = 0.0;
}

/// Significance test constants
pub mod significance {
    /// Test type for independent samples
    pub const TEST_INDEPENDENT: &str = "ind";
    /// Test type for paired samples
    pub const TEST_PAIRED: &str = "1samp";
    /// Decimal places in the printed p-value
    pub const P_VALUE_PRECISION: usize = 6;
}

/// Configuration file constants
pub mod config_files {
    /// Config file looked up in the working directory and its parents
    pub const FILE_NAME: &str = ".recsys-eval.toml";
    /// Number of parent directories searched
    pub const MAX_PARENT_LEVELS: usize = 3;
    /// Default output directory for aggregated tables
    pub const DEFAULT_OUTPUT_DIR: &str = ".";
}
