//! What the transaction log records.

use std::fmt;
use std::str::FromStr;

/// Whether rejected transactions stay in the log.
///
/// The log is always appended before the balance update is decided.
/// `Accepted` runs both in one store transaction and discards the entry when
/// the update is rejected; `Attempted` commits the entry on its own first, so
/// rejected attempts remain visible in statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogPolicy {
    #[default]
    Accepted,
    Attempted,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown log policy: {0:?} (expected \"accepted\" or \"attempted\")")]
pub struct UnknownLogPolicy(pub String);

impl FromStr for LogPolicy {
    type Err = UnknownLogPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accepted" => Ok(LogPolicy::Accepted),
            "attempted" => Ok(LogPolicy::Attempted),
            _ => Err(UnknownLogPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for LogPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogPolicy::Accepted => f.write_str("accepted"),
            LogPolicy::Attempted => f.write_str("attempted"),
        }
    }
}
