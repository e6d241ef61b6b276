//! Composite phoneme identity.
//!
//! Deterministic, reversible identifiers for a (base phoneme, modification
//! flags) pair, and the decoding of a flags word into categorized editor
//! state.
//!
//! # Usage
//!
//! ```
//! use liballophone::identity::{decode, decode_flags, display_name, encode};
//! use liballophone::modifiers::{ModificationFlags, ModificationToken};
//!
//! let flags = ModificationFlags::EMPTY | ModificationToken::Aspirated | ModificationToken::Long;
//! let id = encode("t", flags);
//!
//! let decoded = decode(&id).unwrap();
//! let state = decode_flags(decoded.flags);
//! assert_eq!(display_name(&decoded.base, &state), "t + Aspirated + Long");
//! ```

mod codec;
mod state;

pub use codec::{
    decode, decode_strict, encode, encode_with, CompositeId, IdEncoding, IdentityError,
    ID_SEPARATOR, PAYLOAD_SEPARATOR,
};
pub use state::{decode_flags, display_name, display_symbol, has_conflicts, CategorizedState};
