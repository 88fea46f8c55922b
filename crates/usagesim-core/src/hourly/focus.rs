//! Packed focus-minutes bitfield codec.
//!
//! One bit per minute of the day, 1440 bits in 180 bytes. Each hour
//! contributes a 60-bit row, front-loaded (`n` one-bits then `60 - n`
//! zero-bits), and rows are NOT byte-aligned: the next hour's first bit
//! continues in the same byte as the previous hour's last four bits. An hour
//! row therefore spans 7.5 bytes, and 24 rows land exactly on 180 bytes with
//! no padding.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::{HourlyBuckets, HOURS_PER_DAY, MINUTES_PER_HOUR};
use crate::error::{CoreError, Result};

/// Size of the packed buffer: 24 hours * 60 bits / 8.
pub const FOCUS_BUFFER_LEN: usize = 180;

/// A packed per-minute focus bitmap for one day.
///
/// Serializes as a hex string; the byte layout is a fixed external contract
/// consumed by downstream readers and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusBuffer([u8; FOCUS_BUFFER_LEN]);

impl FocusBuffer {
    /// View the packed bytes.
    pub fn as_bytes(&self) -> &[u8; FOCUS_BUFFER_LEN] {
        &self.0
    }

    /// Wrap an existing 180-byte buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidParameter`] when `bytes` is not exactly
    /// 180 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; FOCUS_BUFFER_LEN] = bytes.try_into().map_err(|_| {
            CoreError::invalid_parameter(
                "focus_minutes",
                format!("expected {FOCUS_BUFFER_LEN} bytes, got {}", bytes.len()),
            )
        })?;
        Ok(Self(arr))
    }
}

impl Serialize for FocusBuffer {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for FocusBuffer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let bytes = hex::decode(&text).map_err(de::Error::custom)?;
        FocusBuffer::from_bytes(&bytes).map_err(de::Error::custom)
    }
}

/// Pack hourly use-time buckets into the focus bitmap.
///
/// Returns `None` when no hour has any activity; "absent" is a caller-visible
/// sentinel meaning "do not persist focus data", distinct from an all-zero
/// buffer. Buckets above 60 minutes pack as a full hour.
pub fn encode_focus(use_time: &HourlyBuckets) -> Option<FocusBuffer> {
    if use_time.iter().all(|&m| m == 0) {
        return None;
    }

    let mut buf = [0u8; FOCUS_BUFFER_LEN];
    let mut bit = 0usize;
    for &minutes in use_time {
        let lit = minutes.min(MINUTES_PER_HOUR) as usize;
        for minute in 0..MINUTES_PER_HOUR as usize {
            if minute < lit {
                buf[bit / 8] |= 0x80 >> (bit % 8);
            }
            bit += 1;
        }
    }

    Some(FocusBuffer(buf))
}

/// Unpack a focus bitmap back into per-hour minute counts.
///
/// Sums the set bits in each hour's 60-bit window; for the front-loaded
/// encoding produced by [`encode_focus`] this recovers the input exactly.
pub fn decode_focus(buffer: &FocusBuffer) -> HourlyBuckets {
    let mut use_time = [0u32; HOURS_PER_DAY];
    for (hour, slot) in use_time.iter_mut().enumerate() {
        for minute in 0..MINUTES_PER_HOUR as usize {
            let bit = hour * MINUTES_PER_HOUR as usize + minute;
            if buffer.0[bit / 8] & (0x80 >> (bit % 8)) != 0 {
                *slot += 1;
            }
        }
    }
    use_time
}
