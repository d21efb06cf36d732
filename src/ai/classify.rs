use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    RateLimit,
    AuthFailure,
    Transient,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::RateLimit => "RATE_LIMIT",
            ErrorKind::AuthFailure => "AUTH_FAILURE",
            ErrorKind::Transient => "TRANSIENT",
            ErrorKind::Unknown => "UNKNOWN",
        }
    }
}

// Vendors word these differently, so matching is deliberately loose.
const RATE_LIMIT_HINTS: &[&str] = &["quota", "rate limit", "too many requests"];
const AUTH_HINTS: &[&str] = &["auth", "key", "api"];
const TRANSIENT_HINTS: &[&str] = &[
    "timeout",
    "timed out",
    "connection",
    "temporarily unavailable",
    "overloaded",
];

/// Maps an upstream failure to an [`ErrorKind`].
///
/// Checked in order: rate limit, auth, transient. Provider wording is not a
/// stable contract, so treat the result as a heuristic. Auth wording is
/// checked before the status range, so a 5xx body mentioning "api" or "key"
/// reports as [`ErrorKind::AuthFailure`].
pub fn classify(status: Option<u16>, message: &str) -> ErrorKind {
    let msg = message.to_lowercase();
    let mentions = |hints: &[&str]| hints.iter().any(|h| msg.contains(h));

    if status == Some(429) || mentions(RATE_LIMIT_HINTS) {
        return ErrorKind::RateLimit;
    }
    if matches!(status, Some(401) | Some(403)) || mentions(AUTH_HINTS) {
        return ErrorKind::AuthFailure;
    }
    if matches!(status, Some(408) | Some(500..=599)) || mentions(TRANSIENT_HINTS) {
        return ErrorKind::Transient;
    }
    ErrorKind::Unknown
}
