//! Timestamps truncated to whole seconds.
//!
//! Sub-second precision varies between JSON encoders and would leak into
//! the canonical signing input, so every timestamp that reaches a
//! credential or proof is truncated first.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A UTC timestamp truncated to whole seconds.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current time, truncated to seconds.
    pub fn now() -> Self {
        Self(Utc::now().trunc_subsecs(0))
    }

    /// Wrap an existing datetime, truncating to seconds.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.trunc_subsecs(0))
    }

    /// Access the underlying datetime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_has_no_subsecond_component() {
        let ts = Timestamp::now();
        assert_eq!(ts.as_datetime().timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn from_datetime_truncates() {
        let dt = Utc::now();
        let ts = Timestamp::from_datetime(dt);
        assert_eq!(ts.as_datetime().timestamp_subsec_nanos(), 0);
        assert_eq!(ts.as_datetime().timestamp(), dt.timestamp());
    }

    #[test]
    fn serde_roundtrip() {
        let ts = Timestamp::now();
        let encoded = serde_json::to_string(&ts).unwrap();
        let back: Timestamp = serde_json::from_str(&encoded).unwrap();
        assert_eq!(back, ts);
    }
}
