use std::fmt;

/// Error types for log aggregation and significance testing
#[derive(Debug)]
pub enum EvalError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Invalid argument error
    InvalidArgument(String),

    /// File not found error
    FileNotFound(String),

    /// Log file name does not follow `CFPTest-<algo>-<tag>[-<param>].log`
    MalformedFileName(String),

    /// Parameterized algorithm log without a parameter segment
    MissingParameter(String),

    /// Parameter segment that is not an integer once the marker is removed
    InvalidParameter { file_name: String, token: String },

    /// Log file without the expected score line
    MissingMetric { path: String, prefix: String },

    /// Log file with more than one candidate score line
    AmbiguousMetric { path: String, prefix: String },

    /// Number that could not be parsed as a float
    InvalidNumber { path: String, value: String },

    /// User present in the first map but not the second during a paired test
    MissingPairedUser(u64),

    /// Not enough observations to run a test
    InsufficientData(String),

    /// Distribution construction failure
    Statistics(String),

    /// Regex compilation error
    Regex(regex::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// File walking/ignore error
    FileWalking(ignore::Error),

    /// JSON serialization error
    Json(serde_json::Error),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Io(err) => write!(f, "IO error: {err}"),
            EvalError::Config(msg) => write!(f, "Configuration error: {msg}"),
            EvalError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            EvalError::FileNotFound(path) => write!(f, "File not found: {path}"),
            EvalError::MalformedFileName(name) => write!(f, "Malformed log file name: {name}"),
            EvalError::MissingParameter(name) => {
                write!(f, "Missing parameter segment: {name}")
            }
            EvalError::InvalidParameter { file_name, token } => {
                write!(f, "Invalid parameter '{token}' in log file name: {file_name}")
            }
            EvalError::MissingMetric { path, prefix } => {
                write!(f, "Missing metric: no line starting with '{prefix}' in {path}")
            }
            EvalError::AmbiguousMetric { path, prefix } => {
                write!(
                    f,
                    "Ambiguous metric: several lines starting with '{prefix}' in {path}"
                )
            }
            EvalError::InvalidNumber { path, value } => {
                write!(f, "Invalid number: '{value}' in {path}")
            }
            EvalError::MissingPairedUser(user) => {
                write!(f, "Missing paired user: user {user} not found in second file")
            }
            EvalError::InsufficientData(msg) => write!(f, "Insufficient data: {msg}"),
            EvalError::Statistics(msg) => write!(f, "Statistics error: {msg}"),
            EvalError::Regex(err) => write!(f, "Regex error: {err}"),
            EvalError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            EvalError::FileWalking(err) => write!(f, "File walking error: {err}"),
            EvalError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EvalError::Io(err) => Some(err),
            EvalError::Regex(err) => Some(err),
            EvalError::TomlParsing(err) => Some(err),
            EvalError::FileWalking(err) => Some(err),
            EvalError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EvalError {
    fn from(err: std::io::Error) -> Self {
        EvalError::Io(err)
    }
}

impl From<regex::Error> for EvalError {
    fn from(err: regex::Error) -> Self {
        EvalError::Regex(err)
    }
}

impl From<toml::de::Error> for EvalError {
    fn from(err: toml::de::Error) -> Self {
        EvalError::TomlParsing(err)
    }
}

impl From<ignore::Error> for EvalError {
    fn from(err: ignore::Error) -> Self {
        EvalError::FileWalking(err)
    }
}

impl From<serde_json::Error> for EvalError {
    fn from(err: serde_json::Error) -> Self {
        EvalError::Json(err)
    }
}

/// Type alias for Results using EvalError
pub type Result<T> = std::result::Result<T, EvalError>;
