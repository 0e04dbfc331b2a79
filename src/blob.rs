//! A compact binary form of a record: MessagePack, gzip-compressed.
//!
//! Field names are kept in the MessagePack maps so that absent optional fields can simply be left
//! out, exactly like the JSON wire form.

use crate::codec::Record;
use crate::error::BlobError;

use flate2::Compression;
use flate2::write::{GzDecoder, GzEncoder};
use rmp_serde::{Deserializer, Serializer};
use serde::{Deserialize, Serialize};

use std::io::Write;

/// Write a record to a MessagePack binary blob, compressed with the given gzip level (0-9).
pub fn write_blob<T: Record>(record: &T, level: u32) -> Result<Vec<u8>, BlobError> {
    // serialize to buffer
    let mut obj_buf = Vec::new();
    Serialize::serialize(record, &mut Serializer::new(&mut obj_buf).with_struct_map())?;

    // compress buffer
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level.min(9)));
    encoder.write_all(&obj_buf)?;
    let compressed = encoder.finish()?;
    debug!(
        "Packed {} into {} bytes ({} uncompressed)",
        T::KIND,
        compressed.len(),
        obj_buf.len()
    );
    Ok(compressed)
}

/// Read a record from a MessagePack binary blob
pub fn read_blob<T: Record>(raw: &[u8]) -> Result<T, BlobError> {
    // decompress
    let mut decoder = GzDecoder::new(Vec::new());
    decoder.write_all(raw)?;
    let decompressed = decoder.finish()?;

    // deserialize to object
    let mut de = Deserializer::new(&decompressed[..]);
    let record: T = Deserialize::deserialize(&mut de)?;

    Ok(record)
}
