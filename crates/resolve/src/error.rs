use std::fmt;

#[derive(Debug)]
pub enum ResolveError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Name threshold outside `[0, 1]`.
    ThresholdOutOfRange(f64),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ThresholdOutOfRange(value) => {
                write!(f, "name threshold must be within [0, 1], got {value}")
            }
        }
    }
}

impl std::error::Error for ResolveError {}
