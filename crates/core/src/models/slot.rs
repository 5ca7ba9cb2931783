use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::errors::ValidationError;
use crate::time::{parse_timestamp, to_canonical_iso};

/// A slot start time: the parsed instant plus the exact text the server used.
///
/// The booking endpoint looks slots up by their stored string, so the
/// original text is what goes back over the wire. Ordering and equality
/// only look at the instant.
#[derive(Debug, Clone)]
pub struct SlotTime {
    instant: DateTime<Utc>,
    raw: String,
}

impl SlotTime {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            instant: parse_timestamp(raw)?,
            raw: raw.to_string(),
        })
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<DateTime<Utc>> for SlotTime {
    fn from(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            raw: to_canonical_iso(instant),
        }
    }
}

impl PartialEq for SlotTime {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for SlotTime {}

impl PartialOrd for SlotTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SlotTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        SlotTime::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// One interview time offered by an HR user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start_time: SlotTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<SlotTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meet_link: Option<String>,
}

impl Slot {
    pub fn new(start_time: SlotTime, available: bool) -> Self {
        Self {
            start_time,
            end_time: None,
            duration: None,
            available,
            candidate_email: None,
            meet_link: None,
        }
    }

    /// The same slot, marked as consumed by a booking.
    pub fn into_booked(self) -> Self {
        Self {
            available: false,
            ..self
        }
    }
}

/// Body of the available-slots endpoint.
///
/// Entries that cannot be read as a [`Slot`] are left out of `slots` and
/// their decode errors collected in `rejected`, so one bad document does
/// not hide the rest of the set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RawSlotList")]
pub struct SlotListResponse {
    pub slots: Vec<Slot>,
    #[serde(skip)]
    pub rejected: Vec<String>,
}

#[derive(Deserialize)]
struct RawSlotList {
    #[serde(default)]
    slots: Vec<Value>,
}

impl From<RawSlotList> for SlotListResponse {
    fn from(raw: RawSlotList) -> Self {
        let mut response = SlotListResponse::default();
        for value in raw.slots {
            match serde_json::from_value::<Slot>(value) {
                Ok(slot) => response.slots.push(slot),
                Err(e) => response.rejected.push(e.to_string()),
            }
        }
        response
    }
}
