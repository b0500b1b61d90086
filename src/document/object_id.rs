use crate::errors::{ErrorKind, RepoError, RepoResult};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rand::RngCore;
use std::fmt::{Debug, Display};
use std::sync::atomic::{AtomicU32, Ordering};

// 5 random bytes shared by every id generated in this process
static PROCESS_RANDOM: Lazy<[u8; 5]> = Lazy::new(|| {
    let mut bytes = [0u8; 5];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
});

// rolling 3-byte counter, seeded randomly per process
static COUNTER: Lazy<AtomicU32> = Lazy::new(|| AtomicU32::new(rand::thread_rng().next_u32()));

const OBJECT_ID_LENGTH: usize = 12;
const HEX_LENGTH: usize = OBJECT_ID_LENGTH * 2;

/// A store-assigned unique identifier for documents.
///
/// Every inserted document is identified by a 12-byte `ObjectId`:
/// a 4-byte big-endian seconds timestamp, 5 bytes of per-process random
/// state, and a 3-byte rolling counter. The layout makes ids roughly
/// timestamp-ordered and unique without central coordination.
///
/// Within this crate the identifier is always populated from the store's
/// insert acknowledgment; the repository never fabricates one. [`ObjectId::new`]
/// exists for store implementations and test doubles that stand in for the
/// store's id assignment.
///
/// # Examples
///
/// ```rust,ignore
/// use docrepo::document::ObjectId;
///
/// let id = ObjectId::new();
/// let hex = id.to_hex();
/// assert_eq!(ObjectId::parse_str(&hex)?, id);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(PartialEq, Eq, Ord, PartialOrd, Hash, Clone, Copy)]
pub struct ObjectId {
    bytes: [u8; OBJECT_ID_LENGTH],
}

impl ObjectId {
    /// Generates a new unique `ObjectId` stamped with the current time.
    pub fn new() -> Self {
        let seconds = Utc::now().timestamp() as u32;
        let counter = COUNTER.fetch_add(1, Ordering::SeqCst).to_be_bytes();

        let mut bytes = [0u8; OBJECT_ID_LENGTH];
        bytes[0..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_RANDOM);
        bytes[9..12].copy_from_slice(&counter[1..4]);

        ObjectId { bytes }
    }

    /// Creates an `ObjectId` from raw bytes.
    pub fn from_bytes(bytes: [u8; OBJECT_ID_LENGTH]) -> Self {
        ObjectId { bytes }
    }

    /// Returns the raw bytes of this id.
    pub fn bytes(&self) -> [u8; OBJECT_ID_LENGTH] {
        self.bytes
    }

    /// Returns the 24-character lowercase hex form of this id.
    pub fn to_hex(&self) -> String {
        let mut hex = String::with_capacity(HEX_LENGTH);
        for byte in &self.bytes {
            hex.push(hex_digit(byte >> 4));
            hex.push(hex_digit(byte & 0x0f));
        }
        hex
    }

    /// Parses an `ObjectId` from its 24-character hex form.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidId`] if the input is not exactly 24 hex
    /// characters.
    pub fn parse_str(hex: &str) -> RepoResult<ObjectId> {
        if hex.len() != HEX_LENGTH {
            log::error!("ObjectId hex string has invalid length: {}", hex.len());
            return Err(RepoError::new(
                &format!(
                    "ObjectId validation error: hex string must be {} characters, got {}",
                    HEX_LENGTH,
                    hex.len()
                ),
                ErrorKind::InvalidId,
            ));
        }

        let mut bytes = [0u8; OBJECT_ID_LENGTH];
        let chars: Vec<char> = hex.chars().collect();
        for (idx, byte) in bytes.iter_mut().enumerate() {
            let high = hex_value(chars[idx * 2])?;
            let low = hex_value(chars[idx * 2 + 1])?;
            *byte = (high << 4) | low;
        }

        Ok(ObjectId { bytes })
    }

    /// Returns the timestamp portion of this id.
    pub fn timestamp(&self) -> DateTime<Utc> {
        let mut seconds = [0u8; 4];
        seconds.copy_from_slice(&self.bytes[0..4]);
        let seconds = u32::from_be_bytes(seconds);
        DateTime::from_timestamp(i64::from(seconds), 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

fn hex_digit(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        _ => (b'a' + nibble - 10) as char,
    }
}

fn hex_value(c: char) -> RepoResult<u8> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => {
            log::error!("ObjectId hex string contains invalid character: {}", c);
            Err(RepoError::new(
                &format!("ObjectId validation error: invalid hex character '{}'", c),
                ErrorKind::InvalidId,
            ))
        }
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        ObjectId::new()
    }
}

impl Debug for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectId(\"{}\")", self.to_hex())
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
