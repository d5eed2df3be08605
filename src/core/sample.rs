use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{TimestampSeconds, serde_as};

use crate::quantity::power::Watts;

/// One reconstructed meter observation: the atomic unit of the timeline.
///
/// The serialized shape doubles as the element of the readings protocol:
/// `{"timestamp": <unix seconds>, "reading": <watts>}`.
#[serde_as]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Sample {
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub timestamp: DateTime<Utc>,

    #[serde(rename = "reading")]
    pub power: Watts,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn wire_shape_ok() -> Result {
        let sample = Sample {
            timestamp: DateTime::from_timestamp(995, 0).unwrap(),
            power: Watts(50.0),
        };
        assert_eq!(serde_json::to_string(&sample)?, r#"{"timestamp":995,"reading":50.0}"#);
        Ok(())
    }
}
