//! Composite identifier encoding.
//!
//! A modified phoneme is identified by its base phoneme id plus a
//! [`ModificationFlags`] word:
//!
//! ```text
//! <base>#<payload>        payload = encode("<base>|<flags as decimal>")
//! ```
//!
//! The payload is base64 (standard alphabet, padded) by default; hex is the
//! alternative. Decoding tries base64 first, then hex.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use crate::modifiers::ModificationFlags;

/// Separates the base id from the payload.
pub const ID_SEPARATOR: char = '#';

/// Separates the base id from the flags inside the decoded payload.
pub const PAYLOAD_SEPARATOR: char = '|';

/// Payload encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum IdEncoding {
    /// RFC 4648 base64 with padding.
    #[default]
    Base64,
    /// Lower-case hex dump of the UTF-8 bytes.
    Hex,
}

/// Why an identifier could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// No `#` in the identifier, or nothing after it.
    #[error("identifier has no payload after '#': {0:?}")]
    MissingPayload(String),
    /// The payload is neither base64 nor hex of UTF-8 text.
    #[error("identifier payload is neither base64 nor hex: {0:?}")]
    UndecodablePayload(String),
}

/// A base phoneme id with its modification flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeId {
    /// Base phoneme id.
    pub base: String,
    /// Modifications applied to the base.
    pub flags: ModificationFlags,
}

impl CompositeId {
    /// Pair a base id with flags.
    pub fn new(base: impl Into<String>, flags: ModificationFlags) -> Self {
        CompositeId {
            base: base.into(),
            flags,
        }
    }

    /// Encode with base64.
    pub fn encode(&self) -> String {
        self.encode_with(IdEncoding::Base64)
    }

    /// Encode with the given payload encoding.
    pub fn encode_with(&self, encoding: IdEncoding) -> String {
        encode_with(&self.base, self.flags, encoding)
    }
}

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for CompositeId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_strict(s)
    }
}

/// Encode `base` and `flags` as `"{base}#{base64 payload}"`.
///
/// ```
/// use liballophone::identity::{decode, encode};
/// use liballophone::modifiers::{ModificationFlags, ModificationToken};
///
/// let flags = ModificationFlags::EMPTY | ModificationToken::Aspirated;
/// let id = encode("t", flags);
/// assert!(id.starts_with("t#"));
///
/// let back = decode(&id).unwrap();
/// assert_eq!(back.base, "t");
/// assert_eq!(back.flags, flags);
/// ```
pub fn encode(base: &str, flags: ModificationFlags) -> String {
    encode_with(base, flags, IdEncoding::Base64)
}

/// Encode with an explicit payload encoding.
pub fn encode_with(base: &str, flags: ModificationFlags, encoding: IdEncoding) -> String {
    let payload = format!("{base}{PAYLOAD_SEPARATOR}{}", flags.bits());
    let encoded = match encoding {
        IdEncoding::Base64 => STANDARD.encode(payload.as_bytes()),
        IdEncoding::Hex => hex::encode(payload.as_bytes()),
    };
    format!("{base}{ID_SEPARATOR}{encoded}")
}

fn decode_base64(payload: &str) -> Option<String> {
    let bytes = STANDARD.decode(payload).ok()?;
    String::from_utf8(bytes).ok()
}

fn decode_hex(payload: &str) -> Option<String> {
    let bytes = hex::decode(payload).ok()?;
    String::from_utf8(bytes).ok()
}

/// Decode a payload to text.
///
/// Some payloads are valid in both encodings (`"abcd"`). Base64 is tried
/// first, but a decoding that contains the `|` separator is preferred over
/// one that does not.
fn decode_payload(payload: &str) -> Option<String> {
    let base64 = decode_base64(payload);
    if base64.as_deref().is_some_and(|s| s.contains(PAYLOAD_SEPARATOR)) {
        return base64;
    }
    let hex = decode_hex(payload);
    if hex.as_deref().is_some_and(|s| s.contains(PAYLOAD_SEPARATOR)) {
        return hex;
    }
    base64.or(hex)
}

/// Decode an identifier, reporting why it failed.
///
/// A decoded payload with an empty base falls back to the text before `#`.
/// A missing or unparsable flags segment decodes as no flags.
pub fn decode_strict(id: &str) -> Result<CompositeId, IdentityError> {
    let (prefix, payload) = id
        .split_once(ID_SEPARATOR)
        .filter(|(_, payload)| !payload.is_empty())
        .ok_or_else(|| IdentityError::MissingPayload(id.to_string()))?;

    let raw = decode_payload(payload)
        .ok_or_else(|| IdentityError::UndecodablePayload(id.to_string()))?;

    let (base, raw_flags) = match raw.split_once(PAYLOAD_SEPARATOR) {
        Some((base, flags)) => (base, flags),
        None => (raw.as_str(), ""),
    };
    let base = if base.is_empty() { prefix } else { base };
    let flags = raw_flags.trim().parse::<u64>().unwrap_or_else(|_| {
        if !raw_flags.is_empty() {
            debug!(id, flags = raw_flags, "unparsable flags segment; using none");
        }
        0
    });

    Ok(CompositeId::new(base, ModificationFlags::from_bits(flags)))
}

/// Decode an identifier; `None` when it has no payload or the payload
/// decodes under neither encoding.
pub fn decode(id: &str) -> Option<CompositeId> {
    match decode_strict(id) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            debug!(error = %e, "identifier not decodable");
            None
        }
    }
}
