use crate::datapoint::DataPoint;
use crate::error::{DecodeError, EncodeError, FieldPath};
use crate::response::{Alert, DataBlock, Flags, Response};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_path_to_error::Segment;

use std::fmt;
use std::io::{Read, Write};

/// The record types that make up a response document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Response,
    DataPoint,
    DataBlock,
    Alert,
    Flags,
}

impl RecordKind {
    pub fn name(self) -> &'static str {
        match self {
            RecordKind::Response => "Response",
            RecordKind::DataPoint => "DataPoint",
            RecordKind::DataBlock => "DataBlock",
            RecordKind::Alert => "Alert",
            RecordKind::Flags => "Flags",
        }
    }

    /// The records nested under the field `key` of this record, if any.
    fn nested(self, key: &str) -> Option<Nested> {
        match (self, key) {
            (RecordKind::Response, "currently") => Some(Nested::One(RecordKind::DataPoint)),
            (RecordKind::Response, "minutely" | "hourly" | "daily") => {
                Some(Nested::One(RecordKind::DataBlock))
            }
            (RecordKind::Response, "alerts") => Some(Nested::Many(RecordKind::Alert)),
            (RecordKind::Response, "flags") => Some(Nested::One(RecordKind::Flags)),
            (RecordKind::DataBlock, "data") => Some(Nested::Many(RecordKind::DataPoint)),
            _ => None,
        }
    }

    /// The record held by the field `key` of this record, or this record itself if the field is a
    /// plain value.
    fn field(self, key: &str) -> RecordKind {
        match self.nested(key) {
            Some(Nested::One(kind) | Nested::Many(kind)) => kind,
            None => self,
        }
    }

    /// Follow a field path down from this record to the record that contains its last segment.
    pub(crate) fn descend<'a>(self, segments: impl Iterator<Item = &'a Segment>) -> RecordKind {
        segments.fold(self, |kind, segment| match segment {
            Segment::Map { key } => kind.field(key),
            _ => kind,
        })
    }
}

#[derive(Clone, Copy)]
enum Nested {
    One(RecordKind),
    Many(RecordKind),
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A record that can be decoded from, and encoded to, its wire form on its own.
pub trait Record: Serialize + DeserializeOwned {
    const KIND: RecordKind;
}

impl Record for Response {
    const KIND: RecordKind = RecordKind::Response;
}

impl Record for DataPoint {
    const KIND: RecordKind = RecordKind::DataPoint;
}

impl Record for DataBlock {
    const KIND: RecordKind = RecordKind::DataBlock;
}

impl Record for Alert {
    const KIND: RecordKind = RecordKind::Alert;
}

impl Record for Flags {
    const KIND: RecordKind = RecordKind::Flags;
}

/// Decode a record from raw JSON bytes.
pub fn decode<T: Record>(raw: &[u8]) -> Result<T, DecodeError> {
    let value: Value = serde_json::from_slice(raw).map_err(DecodeError::malformed)?;
    decode_value(value)
}

/// Decode a record from an already-parsed JSON document.
pub fn decode_value<T: Record>(value: Value) -> Result<T, DecodeError> {
    let decoded = match reject_sequences(T::KIND, &value, &FieldPath::default()) {
        Ok(()) => serde_path_to_error::deserialize(value)
            .map_err(|err| DecodeError::classify(T::KIND, err)),
        Err(err) => Err(err),
    };
    decoded.map_err(|err| {
        debug!("Rejected {} document: {}", T::KIND, err);
        err
    })
}

/// Every record is a JSON object on the wire, but derived struct decoding also takes the sequence
/// form. Refuse arrays wherever a record sits before handing the document to serde.
fn reject_sequences(kind: RecordKind, value: &Value, path: &FieldPath) -> Result<(), DecodeError> {
    let fields = match value {
        Value::Object(fields) => fields,
        Value::Array(_) => {
            return Err(DecodeError::ShapeMismatch {
                path: path.clone(),
                detail: format!("expected struct {kind}, found sequence"),
            });
        }
        // serde reports scalars in place of a record
        _ => return Ok(()),
    };

    for (key, field) in fields {
        match (kind.nested(key), field) {
            (Some(Nested::One(inner)), _) => reject_sequences(inner, field, &path.child(key))?,
            (Some(Nested::Many(inner)), Value::Array(items)) => {
                let field_path = path.child(key);
                for (i, item) in items.iter().enumerate() {
                    reject_sequences(inner, item, &field_path.index(i))?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Encode a record into compact JSON bytes.
pub fn encode<T: Record>(record: &T) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(record)?)
}

/// Encode a record into a JSON document.
pub fn encode_value<T: Record>(record: &T) -> Result<Value, EncodeError> {
    Ok(serde_json::to_value(record)?)
}

/// Decode a forecast response from raw JSON bytes, as received from the API.
pub fn decode_response(raw: &[u8]) -> Result<Response, DecodeError> {
    let response: Response = decode(raw)?;
    debug!(
        "Decoded response for ({}, {}) in {} from {} bytes",
        response.latitude,
        response.longitude,
        response.timezone,
        raw.len()
    );
    Ok(response)
}

pub fn decode_response_str(raw: &str) -> Result<Response, DecodeError> {
    decode_response(raw.as_bytes())
}

pub fn decode_response_value(value: Value) -> Result<Response, DecodeError> {
    decode_value(value)
}

/// Read a whole document from `reader` and decode it.
pub fn decode_response_reader<R: Read>(mut reader: R) -> Result<Response, DecodeError> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;
    decode_response(&raw)
}

/// Encode a forecast response into the compact JSON wire form.
pub fn encode_response(response: &Response) -> Result<Vec<u8>, EncodeError> {
    let raw = encode(response)?;
    debug!("Encoded response into {} bytes", raw.len());
    Ok(raw)
}

pub fn encode_response_pretty(response: &Response) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec_pretty(response)?)
}

pub fn encode_response_value(response: &Response) -> Result<Value, EncodeError> {
    encode_value(response)
}

/// Write the JSON wire form of `response` to `writer`.
pub fn encode_response_writer<W: Write>(
    response: &Response,
    mut writer: W,
    pretty: bool,
) -> Result<(), EncodeError> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, response)?;
    } else {
        serde_json::to_writer(&mut writer, response)?;
    }
    writer.flush()?;
    Ok(())
}
