// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bit-packed wire format for halfcell stamps.
//!
//! A stream is one version bit followed by records of
//! `key:32 kind:6 payload`, all MSB-first with no alignment. The payload
//! layout depends on the kind (see [`payload`]). The final byte is
//! zero-padded; decoding ends when fewer than 32 bits remain for a key.
//!
//! ```
//! use halfcell_codec::{deserialize, serialize};
//! use halfcell_core::{encode, Item, Payload, Stamp};
//!
//! let stamp: Stamp = vec![Item::new(encode(3, 5), Payload::surface(1))].into();
//! let bytes = serialize(&stamp).unwrap();
//! assert_eq!(deserialize(&bytes).unwrap(), stamp);
//! ```

pub mod bits;
mod error;
pub mod payload;
mod stamp_codec;

pub use bits::{BitReader, BitWriter};
pub use error::{DecodeError, EncodeError};
pub use stamp_codec::{deserialize, serialize, FORMAT_VERSION, KEY_BITS, KIND_BITS, VERSION_BITS};
