// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Stamp framing: version bit, then `key:32 kind:6 payload` records until
//! the data runs out.

use halfcell_core::{HalfcellKey, Item, ObjectKind, Stamp};
use tracing::{debug, trace};

use crate::bits::{BitReader, BitWriter};
use crate::error::{DecodeError, EncodeError};
use crate::payload::{read_payload, write_payload};

/// Format version written by [`serialize`] and accepted by [`deserialize`].
pub const FORMAT_VERSION: u32 = 0;
/// Width of the version field.
pub const VERSION_BITS: u32 = 1;
/// Width of a record's position key.
pub const KEY_BITS: u32 = 32;
/// Width of a record's kind tag.
pub const KIND_BITS: u32 = 6;

/// Pack `stamp` into the minimal zero-padded byte buffer.
pub fn serialize(stamp: &Stamp) -> Result<Vec<u8>, EncodeError> {
    let mut w = BitWriter::new();
    w.write(VERSION_BITS, FORMAT_VERSION);
    for item in stamp {
        w.write(KEY_BITS, item.key.to_bits());
        w.write(KIND_BITS, u32::from(item.kind().tag()));
        write_payload(&mut w, &item.payload)?;
    }
    debug!(items = stamp.len(), bits = w.bit_len(), "serialized stamp");
    Ok(w.into_bytes())
}

/// Unpack a buffer produced by [`serialize`].
///
/// A record cut short by the end of the data is dropped and everything
/// before it is returned; this includes the zero padding of the final byte,
/// which never holds a whole key.
pub fn deserialize(bytes: &[u8]) -> Result<Stamp, DecodeError> {
    let mut r = BitReader::from_bytes(bytes);
    let version = r.read(VERSION_BITS);
    if version != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let mut stamp = Stamp::new();
    loop {
        let key = HalfcellKey::from_bits(r.read(KEY_BITS));
        if !r.in_bounds() {
            break;
        }
        let tag = r.read(KIND_BITS);
        if !r.in_bounds() {
            trace!(%key, "record truncated in kind tag");
            break;
        }
        let kind = u8::try_from(tag)
            .ok()
            .and_then(ObjectKind::from_tag)
            .ok_or(DecodeError::UnknownKind { tag })?;
        let payload = read_payload(&mut r, kind);
        if !r.in_bounds() {
            trace!(%key, %kind, "record truncated in payload");
            break;
        }
        stamp.push(Item::new(key, payload?));
    }
    debug!(items = stamp.len(), bytes = bytes.len(), "deserialized stamp");
    Ok(stamp)
}
