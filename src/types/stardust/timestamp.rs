// Copyright 2022 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use derive_more::{Deref, From};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A point in time in seconds since the Unix epoch, as used by time-based unlock conditions.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize, Deref, From)]
#[serde(transparent)]
pub struct UnixTimestamp(pub u32);

impl UnixTimestamp {
    /// The current time, saturated to the range of the protocol's 32-bit timestamps.
    pub fn now() -> Self {
        OffsetDateTime::now_utc().into()
    }
}

impl TryFrom<UnixTimestamp> for OffsetDateTime {
    type Error = time::Error;

    fn try_from(value: UnixTimestamp) -> Result<Self, Self::Error> {
        OffsetDateTime::from_unix_timestamp(value.0 as i64).map_err(time::Error::from)
    }
}

impl From<OffsetDateTime> for UnixTimestamp {
    fn from(value: OffsetDateTime) -> Self {
        UnixTimestamp(value.unix_timestamp().clamp(0, u32::MAX as i64) as u32)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn to_from_offset_date_time() {
        let date = OffsetDateTime::from_unix_timestamp(1_670_457_600).unwrap();
        let timestamp = UnixTimestamp::from(date);
        assert_eq!(timestamp, UnixTimestamp(1_670_457_600));
        assert_eq!(OffsetDateTime::try_from(timestamp).unwrap(), date);
    }

    #[test]
    fn saturates_before_epoch() {
        let date = OffsetDateTime::from_unix_timestamp(-5).unwrap();
        assert_eq!(UnixTimestamp::from(date), UnixTimestamp(0));
    }
}
